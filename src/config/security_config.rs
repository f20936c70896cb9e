use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct SecurityConfig {
    /// Exact origins allowed by CORS, e.g. the mobile web build.
    #[serde(default = "crate::config::defaults::default_cors_allowed_origins")]
    pub cors_allowed_origins: Vec<String>,
    /// Serve `/metrics` only to loopback and private addresses unless the
    /// admin token is presented.
    #[serde(default = "crate::config::defaults::default_metrics_allow_private_only")]
    pub metrics_allow_private_only: bool,
    #[serde(
        default,
        deserialize_with = "crate::config::defaults::deserialize_optional_trimmed"
    )]
    pub metrics_admin_token: Option<String>,
    /// Consecutive failed logins per `email|ip` before a lockout.
    #[serde(default = "crate::config::defaults::default_login_max_failures")]
    pub login_max_failures: u32,
    #[serde(default = "crate::config::defaults::default_login_lockout_seconds")]
    pub login_lockout_seconds: u64,
    /// Backoff after the first failure; doubles per failure.
    #[serde(default = "crate::config::defaults::default_login_backoff_base_ms")]
    pub login_backoff_base_ms: u64,
}
