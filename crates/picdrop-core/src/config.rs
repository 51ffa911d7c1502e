//! Application configuration.
//!
//! Loaded from a JSON document embedded in the app binary. Every field
//! has a default, so an empty object (`{}`) is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::accept::AcceptPolicy;

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The document is not valid JSON or has the wrong shape.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value parsed but is not usable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Settings for the upload widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Accept tokens (`image/*`, `image/png`, `.png`). Drives both the
    /// picker's `accept` attribute and validation.
    pub accept: Vec<String>,

    /// Check dropped files against `accept` too, not only picker
    /// selections.
    pub validate_drops: bool,

    /// Largest accepted file in bytes. `None` disables the limit.
    pub max_bytes: Option<u64>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            accept: vec!["image/*".to_owned()],
            validate_drops: true,
            max_bytes: None,
        }
    }
}

impl UploadConfig {
    /// Parse [`accept`](Self::accept) into a policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first malformed token.
    pub fn accept_policy(&self) -> Result<AcceptPolicy, ConfigError> {
        AcceptPolicy::parse(&self.accept).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

/// An account known to the simulated authenticator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Login email.
    pub email: String,
    /// Plain-text password (demo data only).
    pub password: String,
}

/// Settings for the login/sign-up form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Simulated round-trip time of an auth request, in milliseconds.
    pub latency_ms: u32,

    /// Accounts registered before any sign-up.
    pub accounts: Vec<Account>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            latency_ms: 1500,
            accounts: Vec::new(),
        }
    }
}

/// Top-level configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Upload widget settings.
    pub upload: UploadConfig,
    /// Auth form settings.
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Parse and validate a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] for unusable values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.upload.accept_policy()?;
        Ok(config)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.upload.accept, vec!["image/*"]);
        assert!(config.upload.validate_drops);
        assert_eq!(config.auth.latency_ms, 1500);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_json(
            r#"{
                "upload": { "max_bytes": 1048576 },
                "auth": { "accounts": [{ "email": "a@b.co", "password": "pw" }] }
            }"#,
        )
        .unwrap();
        assert_eq!(config.upload.max_bytes, Some(1_048_576));
        assert_eq!(config.upload.accept, vec!["image/*"]);
        assert_eq!(config.auth.latency_ms, 1500);
        assert_eq!(config.auth.accounts.len(), 1);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = AppConfig::from_json("{ upload: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn bad_accept_token_is_invalid() {
        let err = AppConfig::from_json(r#"{ "upload": { "accept": ["png"] } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("png"));
    }
}
