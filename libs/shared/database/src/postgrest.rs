use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use shared_config::AppConfig;

/// A single column filter, e.g. `("doctor_id", "eq.42")`.
pub type Filter<'a> = (&'a str, String);

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage rejected credentials: {0}")]
    Auth(String),

    #[error("row conflict: {0}")]
    Conflict(String),

    #[error("storage request failed: {0}")]
    Request(String),

    #[error("unexpected storage payload: {0}")]
    Decode(String),
}

/// HTTP client for the relational storage collaborator. The store speaks the
/// PostgREST dialect: `/rest/v1/{table}?col=op.value` filters, JSON rows, and
/// `Prefer: return=representation` on mutations.
pub struct StoreClient {
    client: Client,
    base_url: String,
    service_key: String,
}

impl StoreClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.store_url.clone(),
            service_key: config.store_service_key.clone(),
        }
    }

    fn headers(&self, returning: bool) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Ok(key) = HeaderValue::from_str(&self.service_key) {
            headers.insert("apikey", key);
        }
        if let Ok(bearer) = HeaderValue::from_str(&format!("Bearer {}", self.service_key)) {
            headers.insert(AUTHORIZATION, bearer);
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if returning {
            headers.insert("Prefer", HeaderValue::from_static("return=representation"));
        }

        headers
    }

    fn table_path(table: &str, filters: &[Filter<'_>]) -> String {
        if filters.is_empty() {
            return format!("/rest/v1/{}", table);
        }

        let query = filters
            .iter()
            .map(|(column, value)| format!("{}={}", column, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        format!("/rest/v1/{}?{}", table, query)
    }

    async fn request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        returning: bool,
    ) -> Result<T, StoreError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("store request {} {}", method, url);

        let mut req = self
            .client
            .request(method, &url)
            .headers(self.headers(returning));

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!("store error ({}): {}", status, detail);

            return Err(match status.as_u16() {
                401 | 403 => StoreError::Auth(detail),
                409 => StoreError::Conflict(detail),
                _ => StoreError::Request(format!("status {}: {}", status, detail)),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    /// Fetch all rows matching the filters.
    pub async fn select<T>(&self, table: &str, filters: &[Filter<'_>]) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let path = Self::table_path(table, filters);
        self.request(Method::GET, &path, None, false).await
    }

    /// Fetch at most one row matching the filters.
    pub async fn select_one<T>(
        &self,
        table: &str,
        filters: &[Filter<'_>],
    ) -> Result<Option<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let mut rows = self.select::<T>(table, filters).await?;
        if rows.is_empty() {
            return Ok(None);
        }
        Ok(Some(rows.remove(0)))
    }

    /// Insert a row and return the stored representation.
    pub async fn insert<T>(&self, table: &str, row: Value) -> Result<T, StoreError>
    where
        T: DeserializeOwned,
    {
        let path = Self::table_path(table, &[]);
        let mut rows: Vec<T> = self.request(Method::POST, &path, Some(row), true).await?;

        if rows.is_empty() {
            return Err(StoreError::Decode(
                "insert returned no representation".to_string(),
            ));
        }
        Ok(rows.remove(0))
    }

    /// Patch every row matching the filters, returning the updated rows.
    pub async fn update<T>(
        &self,
        table: &str,
        filters: &[Filter<'_>],
        patch: Value,
    ) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let path = Self::table_path(table, filters);
        self.request(Method::PATCH, &path, Some(patch), true).await
    }

    /// Delete every row matching the filters, returning the deleted rows.
    pub async fn delete<T>(&self, table: &str, filters: &[Filter<'_>]) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let path = Self::table_path(table, filters);
        self.request(Method::DELETE, &path, None, true).await
    }
}
