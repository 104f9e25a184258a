use std::sync::Arc;

use async_trait::async_trait;

use crate::credentials::Credentials;
use crate::message::StatusUpdate;

/// A configured account that can post status updates.
///
/// Failures are opaque to the dispatcher; whatever the transport reports is
/// carried along as the cause.
#[async_trait]
pub trait StatusClient: Send + Sync {
    /// Display name of the account, used in logs and error reports.
    ///
    /// Implementations may reach the network the first time this is called; an
    /// error means the client is unusable.
    async fn identity_name(&self) -> anyhow::Result<String>;

    /// Post one status update.
    async fn post_status(&self, update: &StatusUpdate) -> anyhow::Result<()>;
}

/// Clients are shared with the caller; the dispatcher never owns credentials.
pub type SharedClient = Arc<dyn StatusClient>;

/// Builds clients from already validated credentials.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    async fn make_client(&self, credentials: Credentials) -> anyhow::Result<SharedClient>;
}
