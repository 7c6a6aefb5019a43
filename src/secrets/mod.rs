//! Secret store access.
//!
//! - `aws.rs`: AWS Secrets Manager backed [`SecretProvider`]

pub mod aws;

pub use aws::AwsSecretsProvider;

use crate::error::PageError;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt;

/// Fetches a secret by identifier from a region of the secret store.
#[async_trait]
pub trait SecretProvider: Send + Sync {
    async fn fetch(&self, secret_id: &str, region: &str) -> Result<Secret, PageError>;
}

/// Decoded JSON secret payload. Fetched per request and never cached.
#[derive(Clone, PartialEq)]
pub struct Secret(Map<String, Value>);

impl Secret {
    /// Decode a `SecretString`; anything other than a JSON object is rejected.
    pub fn from_json(raw: &str) -> Result<Self, PageError> {
        let fields: Map<String, Value> = serde_json::from_str(raw)
            .map_err(|e| PageError::SecretRetrieval(format!("secret is not a JSON object: {e}")))?;
        Ok(Self(fields))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("keys", &self.0.keys().collect::<Vec<_>>())
            .finish()
    }
}
