use crate::error::PageError;
use crate::secrets::{Secret, SecretProvider};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_secretsmanager::config::Region;
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use tracing::debug;

/// Reads secrets from AWS Secrets Manager with `GetSecretValue`.
///
/// Credentials are resolved once through the default provider chain; the
/// region is applied per call.
#[derive(Clone)]
pub struct AwsSecretsProvider {
    sdk_config: SdkConfig,
}

impl AwsSecretsProvider {
    pub fn new(sdk_config: SdkConfig) -> Self {
        Self { sdk_config }
    }

    pub async fn from_env() -> Self {
        Self::new(aws_config::defaults(BehaviorVersion::latest()).load().await)
    }

    fn client_for(&self, region: &str) -> aws_sdk_secretsmanager::Client {
        let conf = aws_sdk_secretsmanager::config::Builder::from(&self.sdk_config)
            .region(Region::new(region.to_owned()))
            .build();
        aws_sdk_secretsmanager::Client::from_conf(conf)
    }
}

#[async_trait]
impl SecretProvider for AwsSecretsProvider {
    async fn fetch(&self, secret_id: &str, region: &str) -> Result<Secret, PageError> {
        if secret_id.is_empty() || region.is_empty() {
            return Err(PageError::SecretRetrieval(
                "secret identifier and region must not be empty".to_string(),
            ));
        }

        debug!(secret_id, region, "requesting secret value");
        let output = self
            .client_for(region)
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| PageError::SecretRetrieval(DisplayErrorContext(&e).to_string()))?;

        let raw = output.secret_string().ok_or_else(|| {
            PageError::SecretRetrieval(format!("secret {secret_id} has no string value"))
        })?;
        Secret::from_json(raw)
    }
}
