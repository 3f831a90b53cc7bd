//! Token service configuration

use crate::error::{TokenError, TokenResult};
use serde::{Deserialize, Serialize};

/// Environment variable holding the signing secret.
pub const SECRET_ENV: &str = "AUTHLAB_SECRET";

/// Environment variable holding the default time-to-live in seconds.
pub const TTL_ENV: &str = "AUTHLAB_TOKEN_TTL";

/// Settings for a [`TokenService`](crate::TokenService).
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Secret key for signing tokens.
    #[serde(skip_serializing, default)]
    pub secret: String,
    /// Default time-to-live in seconds for `issue_now`.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: i64,
}

fn default_ttl_secs() -> i64 {
    3600 // 1 hour
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl TokenConfig {
    /// Create a configuration with the given secret and the default TTL.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set the default time-to-live.
    #[must_use]
    pub fn with_ttl_secs(mut self, ttl_secs: i64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }

    /// Read the configuration from `AUTHLAB_SECRET` and `AUTHLAB_TOKEN_TTL`.
    pub fn from_env() -> TokenResult<Self> {
        let secret = std::env::var(SECRET_ENV)
            .map_err(|_| TokenError::invalid_key(format!("{SECRET_ENV} is not set")))?;
        let mut config = Self::new(secret);
        if let Ok(raw) = std::env::var(TTL_ENV) {
            config.ttl_secs = raw.trim().parse().map_err(|e| {
                TokenError::InvalidConfig(format!("{TTL_ENV}={raw:?} is not a number: {e}"))
            })?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Check that the secret is set and the TTL is positive.
    pub fn validate(&self) -> TokenResult<()> {
        if self.secret.is_empty() {
            return Err(TokenError::invalid_key("token secret is not configured"));
        }
        if self.ttl_secs <= 0 {
            return Err(TokenError::InvalidTtl(self.ttl_secs));
        }
        Ok(())
    }
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_one_hour() {
        let config = TokenConfig::new("secret");
        assert_eq!(config.ttl_secs, 3600);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_empty_secret() {
        assert!(matches!(
            TokenConfig::default().validate(),
            Err(TokenError::InvalidKey(_))
        ));
    }

    #[test]
    fn rejects_non_positive_ttl() {
        let config = TokenConfig::new("secret").with_ttl_secs(0);
        assert_eq!(config.validate(), Err(TokenError::InvalidTtl(0)));
    }

    #[test]
    fn secret_is_never_serialized() {
        let config = TokenConfig::new("do-not-leak").with_ttl_secs(60);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"ttl_secs":60}"#);
        assert!(!format!("{config:?}").contains("do-not-leak"));
    }

    // The process environment is shared, so all cases stay in one test.
    #[test]
    fn reads_configuration_from_environment() {
        std::env::remove_var(SECRET_ENV);
        std::env::remove_var(TTL_ENV);
        assert!(matches!(
            TokenConfig::from_env(),
            Err(TokenError::InvalidKey(_))
        ));

        std::env::set_var(SECRET_ENV, "env-secret");
        let config = TokenConfig::from_env().unwrap();
        assert_eq!(config.secret, "env-secret");
        assert_eq!(config.ttl_secs, 3600);

        std::env::set_var(TTL_ENV, "an hour");
        match TokenConfig::from_env() {
            Err(TokenError::InvalidConfig(msg)) => assert!(msg.contains("an hour"), "{msg}"),
            other => panic!("unexpected result: {other:?}"),
        }

        std::env::set_var(TTL_ENV, " 120 ");
        assert_eq!(TokenConfig::from_env().unwrap().ttl_secs, 120);

        std::env::set_var(TTL_ENV, "-1");
        assert!(matches!(
            TokenConfig::from_env(),
            Err(TokenError::InvalidTtl(-1))
        ));

        std::env::remove_var(SECRET_ENV);
        std::env::remove_var(TTL_ENV);
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: TokenConfig = serde_json::from_str(r#"{"secret":"s"}"#).unwrap();
        assert_eq!(config.ttl_secs, 3600);
    }
}
