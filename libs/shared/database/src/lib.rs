pub mod postgrest;

pub use postgrest::{StoreClient, StoreError};
