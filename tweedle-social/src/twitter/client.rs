//! Thin wrapper over an `egg-mode` access token.
//!
//! Holds the signed-in account's token and lazily resolves its screen name the
//! first time someone asks, so building a client never touches the network.
use std::fmt;

use async_trait::async_trait;
use egg_mode::tweet::DraftTweet;
use egg_mode::{KeyPair, Token};
use tokio::sync::OnceCell;
use tweedle_dispatch::{Credentials, StatusClient, StatusUpdate};

use super::SocialError;

pub struct TwitterClient {
    token: Token,
    screen_name: OnceCell<String>,
}

impl TwitterClient {
    pub fn from_credentials(credentials: &Credentials) -> Self {
        let consumer = KeyPair::new(
            credentials.api_key().to_owned(),
            credentials.api_key_secret().to_owned(),
        );
        let access = KeyPair::new(
            credentials.access_token().to_owned(),
            credentials.access_token_secret().to_owned(),
        );
        Self {
            token: Token::Access { consumer, access },
            screen_name: OnceCell::new(),
        }
    }

    async fn verify(&self) -> Result<String, SocialError> {
        let user = egg_mode::auth::verify_tokens(&self.token).await?;
        Ok(user.response.screen_name)
    }

    fn draft(update: &StatusUpdate) -> DraftTweet {
        let mut draft = DraftTweet::new(update.text.clone());
        if let Some(status_id) = update.in_reply_to {
            draft = draft.in_reply_to(status_id);
        }
        if update.possibly_sensitive {
            draft = draft.possibly_sensitive(true);
        }
        draft
    }
}

#[async_trait]
impl StatusClient for TwitterClient {
    async fn identity_name(&self) -> anyhow::Result<String> {
        let name = self
            .screen_name
            .get_or_try_init(|| self.verify())
            .await?;
        Ok(name.clone())
    }

    async fn post_status(&self, update: &StatusUpdate) -> anyhow::Result<()> {
        let posted = Self::draft(update)
            .send(&self.token)
            .await
            .map_err(SocialError::from)?;
        tracing::debug!(
            status_id = posted.response.id,
            screen_name = ?self.screen_name.get(),
            "posted status"
        );
        Ok(())
    }
}

// `egg_mode::Token` prints its secrets, so only the resolved name is shown.
impl fmt::Debug for TwitterClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwitterClient")
            .field("screen_name", &self.screen_name.get())
            .finish_non_exhaustive()
    }
}
