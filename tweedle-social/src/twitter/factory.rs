use std::sync::Arc;

use async_trait::async_trait;
use tweedle_dispatch::{ClientFactory, Credentials, SharedClient};

use super::TwitterClient;

/// Builds [`TwitterClient`]s for the dispatcher. No network traffic happens
/// here; credentials are checked when the dispatcher asks for the identity.
#[derive(Debug, Default, Clone, Copy)]
pub struct TwitterClientFactory;

impl TwitterClientFactory {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ClientFactory for TwitterClientFactory {
    async fn make_client(&self, credentials: Credentials) -> anyhow::Result<SharedClient> {
        tracing::debug!("building twitter client");
        Ok(Arc::new(TwitterClient::from_credentials(&credentials)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tweedle_dispatch::{CredentialField, DispatchError, PostDispatcher};

    #[tokio::test]
    async fn factory_builds_without_network() {
        let creds = Credentials::new("k", "ks", "t", "ts").unwrap();
        let client = TwitterClientFactory::new().make_client(creds).await;
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn dispatcher_rejects_blank_fields_before_building() {
        let mut dispatcher = PostDispatcher::new(Arc::new(TwitterClientFactory::new()));
        let err = dispatcher
            .add_client_with_credentials("k", "ks", "t", "")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::InvalidCredentials {
                field: CredentialField::AccessTokenSecret
            }
        ));
    }
}
