//! OAuth 1.0a credential bundle for one account.
//!
//! Values are validated up front so a bad config never reaches the network,
//! and they are never rendered by `Debug`.
use std::fmt;

use crate::error::{DispatchError, Result};

/// Names one of the four credential strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    ApiKey,
    ApiKeySecret,
    AccessToken,
    AccessTokenSecret,
}

impl CredentialField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ApiKey => "api key",
            Self::ApiKeySecret => "api key secret",
            Self::AccessToken => "access token",
            Self::AccessTokenSecret => "access token secret",
        }
    }
}

impl fmt::Display for CredentialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    api_key_secret: String,
    access_token: String,
    access_token_secret: String,
}

impl Credentials {
    /// Validate and bundle the four strings.
    ///
    /// Fields are checked in argument order and the first empty one is reported.
    ///
    /// ```
    /// use tweedle_dispatch::{CredentialField, Credentials, DispatchError};
    ///
    /// let err = Credentials::new("key", "secret", "", "").unwrap_err();
    /// assert!(matches!(
    ///     err,
    ///     DispatchError::InvalidCredentials { field: CredentialField::AccessToken }
    /// ));
    /// ```
    pub fn new(
        api_key: impl Into<String>,
        api_key_secret: impl Into<String>,
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            api_key: required(api_key.into(), CredentialField::ApiKey)?,
            api_key_secret: required(api_key_secret.into(), CredentialField::ApiKeySecret)?,
            access_token: required(access_token.into(), CredentialField::AccessToken)?,
            access_token_secret: required(
                access_token_secret.into(),
                CredentialField::AccessTokenSecret,
            )?,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_key_secret(&self) -> &str {
        &self.api_key_secret
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn access_token_secret(&self) -> &str {
        &self.access_token_secret
    }
}

// Never echo the value here, only the field name.
fn required(value: String, field: CredentialField) -> Result<String> {
    if value.is_empty() {
        return Err(DispatchError::InvalidCredentials { field });
    }
    Ok(value)
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("api_key_secret", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("access_token_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: DispatchError) -> CredentialField {
        match err {
            DispatchError::InvalidCredentials { field } => field,
            other => panic!("expected InvalidCredentials, got {other:?}"),
        }
    }

    #[test]
    fn accepts_four_non_empty_fields() {
        let creds = Credentials::new("k", "ks", "t", "ts").unwrap();
        assert_eq!(creds.api_key(), "k");
        assert_eq!(creds.api_key_secret(), "ks");
        assert_eq!(creds.access_token(), "t");
        assert_eq!(creds.access_token_secret(), "ts");
    }

    #[test]
    fn names_each_missing_field() {
        let cases = [
            (("", "ks", "t", "ts"), CredentialField::ApiKey),
            (("k", "", "t", "ts"), CredentialField::ApiKeySecret),
            (("k", "ks", "", "ts"), CredentialField::AccessToken),
            (("k", "ks", "t", ""), CredentialField::AccessTokenSecret),
        ];
        for ((a, b, c, d), expected) in cases {
            let err = Credentials::new(a, b, c, d).unwrap_err();
            assert_eq!(field_of(err), expected);
        }
    }

    #[test]
    fn first_missing_field_wins() {
        let err = Credentials::new("", "", "", "").unwrap_err();
        assert_eq!(field_of(err), CredentialField::ApiKey);
    }

    #[test]
    fn error_message_names_the_field() {
        let err = Credentials::new("", "ks", "t", "ts").unwrap_err();
        assert_eq!(err.to_string(), "api key is required");
    }

    #[test]
    fn debug_output_is_redacted() {
        let creds = Credentials::new("my-key", "my-secret", "my-token", "my-token-secret").unwrap();
        let rendered = format!("{creds:?}");
        for secret in ["my-key", "my-secret", "my-token", "my-token-secret"] {
            assert!(!rendered.contains(secret), "{secret} leaked into {rendered}");
        }
    }
}
