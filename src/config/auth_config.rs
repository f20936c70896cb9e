use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Auth configuration is invalid: {0}")]
    AuthConfig(String),
}

#[derive(Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    #[serde(default = "crate::config::defaults::default_jwt_kid")]
    pub jwt_kid: String,
    #[serde(default)]
    pub previous_jwt_secrets: Vec<String>,
    #[serde(default)]
    pub previous_jwt_kids: Vec<String>,
    #[serde(default = "crate::config::defaults::default_jwt_expiration_seconds")]
    pub jwt_expiration_seconds: u64,
    pub issuer: String,
    pub audience: String,
    /// Create an account on the first login with an unseen email.
    #[serde(default = "crate::config::defaults::default_auto_provision_on_login")]
    pub auto_provision_on_login: bool,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_kid", &self.jwt_kid)
            .field("previous_jwt_secrets", &"[REDACTED]")
            .field("previous_jwt_kids", &self.previous_jwt_kids)
            .field("jwt_expiration_seconds", &self.jwt_expiration_seconds)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("auto_provision_on_login", &self.auto_provision_on_login)
            .finish()
    }
}

impl AuthConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let jwt_secret = self.jwt_secret.trim();
        if jwt_secret.is_empty() {
            return Err(ConfigError::AuthConfig(
                "JWT_SECRET must be set via environment variable".to_string(),
            ));
        }

        if jwt_secret == "change-me-in-production" {
            return Err(ConfigError::AuthConfig(
                "JWT_SECRET must be set to a secure value, not the default placeholder".to_string(),
            ));
        }

        if self.jwt_expiration_seconds == 0 {
            return Err(ConfigError::AuthConfig(
                "jwt_expiration_seconds must be greater than zero".to_string(),
            ));
        }

        if self.previous_jwt_kids.len() != self.previous_jwt_secrets.len() {
            return Err(ConfigError::AuthConfig(
                "previous_jwt_kids and previous_jwt_secrets must have the same length".to_string(),
            ));
        }

        Ok(())
    }
}
