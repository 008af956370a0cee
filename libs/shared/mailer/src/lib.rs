use anyhow::{anyhow, Result};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use serde_json::json;
use tracing::{debug, error};

use shared_config::AppConfig;

/// Subject/body triple handed to the email collaborator.
#[derive(Debug, Clone)]
pub struct MailTemplate {
    pub subject: String,
    pub html: String,
    pub text: String,
}

impl MailTemplate {
    pub fn new(subject: impl Into<String>, html: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            html: html.into(),
            text: text.into(),
        }
    }
}

/// HTTP client for the outbound email collaborator. Delivery is best-effort:
/// callers fire after a successful mutation and log failures without touching
/// the response they have already computed.
pub struct MailerClient {
    client: Client,
    base_url: String,
    api_key: String,
    from: String,
}

impl MailerClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.mail_api_url.clone(),
            api_key: config.mail_api_key.clone(),
            from: config.mail_from.clone(),
        }
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(bearer) = HeaderValue::from_str(&format!("Bearer {}", self.api_key)) {
            headers.insert(AUTHORIZATION, bearer);
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    /// Send `template` to every recipient. An empty recipient list is not an
    /// error: nothing is sent and no request leaves the process.
    pub async fn send(&self, recipients: &[String], template: &MailTemplate) -> Result<()> {
        if recipients.is_empty() {
            debug!("no recipients for \"{}\", skipping send", template.subject);
            return Ok(());
        }

        let url = format!("{}/send", self.base_url);
        debug!("sending \"{}\" to {} recipient(s)", template.subject, recipients.len());

        let response = self
            .client
            .post(&url)
            .headers(self.headers())
            .json(&json!({
                "from": self.from,
                "to": recipients,
                "subject": template.subject,
                "html": template.html,
                "text": template.text,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!("mail relay error ({}): {}", status, detail);
            return Err(anyhow!("mail relay error ({}): {}", status, detail));
        }

        Ok(())
    }
}
