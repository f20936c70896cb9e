use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub user_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub address_text: Option<String>,
    pub external_uid: String,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub loyalty_points: i32,
    pub is_verified: bool,
    pub is_premium: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a user account. Loyalty and flags start at their defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub user_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub address_text: Option<String>,
    pub external_uid: String,
    pub password_hash: Option<String>,
}

impl NewUser {
    /// Account created on first login for an unseen email.
    pub fn provisioned(email: &str, password_hash: Option<String>) -> Self {
        let email = normalize_email(email);
        Self {
            user_name: user_name_from_email(&email),
            email,
            phone_number: None,
            address_text: None,
            external_uid: local_external_uid(),
            password_hash,
        }
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Local part of an email address, or the whole value when it has no `@`.
pub fn user_name_from_email(email: &str) -> String {
    email
        .split_once('@')
        .map(|(local, _)| local)
        .unwrap_or(email)
        .to_string()
}

pub fn local_external_uid() -> String {
    format!("local-{}", Uuid::new_v4())
}
