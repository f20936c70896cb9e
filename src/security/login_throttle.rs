use crate::config::SecurityConfig;
use crate::error::{AppError, AppResult};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Upper bounds that keep `now + window` representable.
const MAX_LOCKOUT_SECONDS: u64 = 30 * 24 * 60 * 60;
const MAX_BACKOFF_MS: u64 = 60 * 60 * 1000;

/// Per `email|ip` failed-login tracking with exponential backoff and a
/// lockout after `max_failures` consecutive failures.
pub struct LoginThrottle {
    entries: Mutex<HashMap<String, LoginAttemptState>>,
    max_failures: u32,
    lockout_seconds: u64,
    backoff_base_ms: u64,
}

#[derive(Clone, Default)]
struct LoginAttemptState {
    failures: u32,
    last_failure_at: Option<DateTime<Utc>>,
    locked_until: Option<DateTime<Utc>>,
    next_allowed_at: Option<DateTime<Utc>>,
}

impl LoginThrottle {
    pub fn new(config: &SecurityConfig) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            max_failures: config.login_max_failures.max(1),
            lockout_seconds: config.login_lockout_seconds.min(MAX_LOCKOUT_SECONDS),
            backoff_base_ms: config.login_backoff_base_ms,
        }
    }

    pub fn key(email: &str, ip: Option<&str>) -> String {
        format!("{}|{}", email.trim().to_lowercase(), ip.unwrap_or("unknown"))
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<String, LoginAttemptState>> {
        self.entries.lock().unwrap_or_else(|e| {
            tracing::warn!("login throttle lock was poisoned, recovering");
            e.into_inner()
        })
    }

    /// Drops entries with no active block whose last failure is older than
    /// the lockout window.
    fn cleanup(&self, entries: &mut HashMap<String, LoginAttemptState>, now: DateTime<Utc>) {
        let retention = Duration::seconds(self.lockout_seconds as i64);
        entries.retain(|_, state| {
            let blocked = state
                .locked_until
                .into_iter()
                .chain(state.next_allowed_at)
                .any(|until| until > now);
            let recent = state
                .last_failure_at
                .is_some_and(|at| at + retention > now);
            blocked || recent
        });
    }

    pub fn ensure_allowed(&self, key: &str) -> AppResult<()> {
        let now = Utc::now();
        let mut entries = self.lock_entries();
        self.cleanup(&mut entries, now);

        if let Some(state) = entries.get(key) {
            let blocked = state
                .locked_until
                .into_iter()
                .chain(state.next_allowed_at)
                .any(|until| until > now);
            if blocked {
                return Err(AppError::RateLimited);
            }
        }

        Ok(())
    }

    pub fn record_success(&self, key: &str) {
        self.lock_entries().remove(key);
    }

    /// Registers a failed attempt and returns the error to report:
    /// `RateLimited` once the lockout starts, `Unauthorized` before that.
    pub fn record_failure(&self, key: &str) -> AppError {
        let now = Utc::now();
        let mut entries = self.lock_entries();
        self.cleanup(&mut entries, now);

        let entry = entries.entry(key.to_string()).or_default();
        entry.failures = entry.failures.saturating_add(1);
        entry.last_failure_at = Some(now);

        let exponent = entry.failures.saturating_sub(1).min(8);
        let backoff_ms = self
            .backoff_base_ms
            .saturating_mul(1_u64 << exponent)
            .min(MAX_BACKOFF_MS);
        entry.next_allowed_at = Some(now + Duration::milliseconds(backoff_ms as i64));

        if entry.failures >= self.max_failures {
            entry.failures = 0;
            entry.locked_until = Some(now + Duration::seconds(self.lockout_seconds as i64));
            return AppError::RateLimited;
        }

        AppError::Unauthorized
    }
}
