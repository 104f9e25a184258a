//! The client registry and fan-out send.
//!
//! Sending is fail-fast: clients are posted to one after another in
//! registration order, and the first failing client ends the send. Clients
//! after it are never contacted, even in quiet mode.
use std::fmt;
use std::sync::Arc;

use crate::client::{ClientFactory, SharedClient};
use crate::credentials::Credentials;
use crate::error::{DispatchError, Result};
use crate::message::{StatusUpdate, make_message};

struct Registered {
    name: String,
    client: SharedClient,
}

/// Owns the clients for one task invocation and posts to all of them.
///
/// Lifecycle: register clients, call [`mark_ready`](Self::mark_ready) once the
/// configuration phase is over, then send. Dropping the dispatcher ends it.
pub struct PostDispatcher {
    factory: Arc<dyn ClientFactory>,
    clients: Vec<Registered>,
    ready: bool,
    quiet: bool,
}

impl PostDispatcher {
    /// New dispatcher in quiet mode with no clients and the ready latch closed.
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self {
            factory,
            clients: Vec::new(),
            ready: false,
            quiet: true,
        }
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn set_quiet(&mut self, quiet: bool) {
        self.quiet = quiet;
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Open the ready latch. Calling it again changes nothing.
    pub fn mark_ready(&mut self) {
        self.ready = true;
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Registered display names, in send order.
    pub fn client_names(&self) -> impl Iterator<Item = &str> {
        self.clients.iter().map(|r| r.name.as_str())
    }

    /// Register a client after resolving the name it posts as.
    pub async fn add_client(&mut self, client: SharedClient) -> Result<()> {
        let name = match client.identity_name().await {
            Ok(name) => name,
            Err(cause) => return Err(reject(cause)),
        };

        tracing::debug!(client = %name, "added new client for {name}");
        self.clients.push(Registered { name, client });
        Ok(())
    }

    /// Validate the four credential strings, build a client through the
    /// factory, and register it.
    ///
    /// Validation happens before the factory is touched, so an empty field
    /// never causes any network traffic.
    pub async fn add_client_with_credentials(
        &mut self,
        api_key: &str,
        api_key_secret: &str,
        access_token: &str,
        access_token_secret: &str,
    ) -> Result<()> {
        let credentials =
            Credentials::new(api_key, api_key_secret, access_token, access_token_secret)?;
        let client = self
            .factory
            .make_client(credentials)
            .await
            .map_err(reject)?;
        self.add_client(client).await
    }

    /// Post `text` through every registered client.
    pub async fn send_tweet(&self, text: &str) -> Result<()> {
        self.send_update(make_message(text)).await
    }

    /// Post a prepared update through every registered client.
    ///
    /// Every failure is logged here. In quiet mode it is then swallowed and
    /// `Ok(())` is returned; otherwise it is handed back to the caller.
    pub async fn send_update(&self, update: StatusUpdate) -> Result<()> {
        match self.fan_out(&update).await {
            Ok(()) => Ok(()),
            Err(err) => {
                tracing::error!(kind = %err.kind(), error = ?err, "failed to send tweet");
                if self.quiet { Ok(()) } else { Err(err) }
            }
        }
    }

    async fn fan_out(&self, update: &StatusUpdate) -> Result<()> {
        if !self.ready {
            return Err(DispatchError::NotReady);
        }
        if self.clients.is_empty() {
            return Err(DispatchError::NoClients);
        }

        for Registered { name, client } in &self.clients {
            client
                .post_status(update)
                .await
                .map_err(|cause| DispatchError::SendFailure {
                    client: name.clone(),
                    cause,
                })?;
        }
        Ok(())
    }
}

fn reject(cause: anyhow::Error) -> DispatchError {
    tracing::error!(error = ?cause, "attempted to add an invalid client");
    DispatchError::InvalidClient { cause }
}

impl fmt::Debug for PostDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostDispatcher")
            .field("clients", &self.client_names().collect::<Vec<_>>())
            .field("ready", &self.ready)
            .field("quiet", &self.quiet)
            .finish_non_exhaustive()
    }
}
