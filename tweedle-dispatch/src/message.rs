use serde::{Deserialize, Serialize};

/// A status update ready to be posted. Building one does not send it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub text: String,
    /// Post as a reply to this status id.
    #[serde(default)]
    pub in_reply_to: Option<u64>,
    #[serde(default)]
    pub possibly_sensitive: bool,
}

impl StatusUpdate {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            in_reply_to: None,
            possibly_sensitive: false,
        }
    }

    pub fn in_reply_to(mut self, status_id: u64) -> Self {
        self.in_reply_to = Some(status_id);
        self
    }

    pub fn possibly_sensitive(mut self, sensitive: bool) -> Self {
        self.possibly_sensitive = sensitive;
        self
    }
}

/// Wrap plain text as a [`StatusUpdate`].
///
/// ```
/// let update = tweedle_dispatch::make_message("v1.2.0 released").in_reply_to(42);
/// assert_eq!(update.text, "v1.2.0 released");
/// assert_eq!(update.in_reply_to, Some(42));
/// assert!(!update.possibly_sensitive);
/// ```
pub fn make_message(text: impl Into<String>) -> StatusUpdate {
    StatusUpdate::new(text)
}
