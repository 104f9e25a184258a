//! Fan a status update out to every registered social-media client.
//!
//! [`PostDispatcher`] is the whole core: clients are registered during a
//! configuration phase, a one-shot ready latch opens the action phase, and
//! [`PostDispatcher::send_tweet`] posts to each client in registration order,
//! stopping at the first failure. Whether a failure fails the caller or is only
//! logged depends on the dispatcher's quiet flag.
//!
//! The transport lives behind [`StatusClient`]; see `tweedle-social` for the
//! Twitter implementation.
pub mod client;
pub mod credentials;
pub mod dispatcher;
pub mod error;
pub mod message;

pub use client::{ClientFactory, SharedClient, StatusClient};
pub use credentials::{CredentialField, Credentials};
pub use dispatcher::PostDispatcher;
pub use error::{DispatchError, ErrorKind, Result};
pub use message::{StatusUpdate, make_message};
