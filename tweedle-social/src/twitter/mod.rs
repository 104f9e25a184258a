//! Twitter/X client and factory plugged into the dispatcher seams.
pub mod client;
pub mod factory;

pub use client::TwitterClient;
pub use factory::TwitterClientFactory;

/// Failures reported by the Twitter transport.
#[derive(Debug, thiserror::Error)]
pub enum SocialError {
    #[error("twitter api error: {0}")]
    Twitter(#[from] egg_mode::error::Error),
}
