use std::fmt;

use crate::credentials::CredentialField;

/// Errors raised while registering clients or sending a status update.
#[derive(thiserror::Error, Debug)]
pub enum DispatchError {
    /// A send was attempted before the configuration phase finished.
    #[error("attempted to send a tweet before the task was configured and applied")]
    NotReady,

    /// A send was attempted with an empty client list.
    #[error("at least one client is required to send a tweet")]
    NoClients,

    /// A credential string was missing or empty.
    #[error("{field} is required")]
    InvalidCredentials { field: CredentialField },

    /// The client could not be built or could not report who it posts as.
    #[error("invalid client: {cause}")]
    InvalidClient {
        #[source]
        cause: anyhow::Error,
    },

    /// A client failed to post; later clients were not attempted.
    #[error("failed to send tweet via {client}: {cause}")]
    SendFailure {
        client: String,
        #[source]
        cause: anyhow::Error,
    },
}

impl DispatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotReady => ErrorKind::NotReady,
            Self::NoClients => ErrorKind::NoClients,
            Self::InvalidCredentials { .. } => ErrorKind::InvalidCredentials,
            Self::InvalidClient { .. } => ErrorKind::InvalidClient,
            Self::SendFailure { .. } => ErrorKind::SendFailure,
        }
    }
}

/// Field-less discriminant of [`DispatchError`], handy for logs and matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotReady,
    NoClients,
    InvalidCredentials,
    InvalidClient,
    SendFailure,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotReady => "not_ready",
            Self::NoClients => "no_clients",
            Self::InvalidCredentials => "invalid_credentials",
            Self::InvalidClient => "invalid_client",
            Self::SendFailure => "send_failure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Convenient alias for results that use [`DispatchError`].
pub type Result<T> = std::result::Result<T, DispatchError>;
