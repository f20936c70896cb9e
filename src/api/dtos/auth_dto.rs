use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::user_dto::UserResponse;
use crate::domain::user::normalize_email;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 20, message = "Phone number must be at most 20 characters"))]
    pub phone_number: Option<String>,

    pub address: Option<String>,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

impl SignupRequest {
    /// Trims and lowercases the email and trims the name, so validation
    /// sees the values that get stored. Blank optional fields become `None`.
    pub fn normalized(self) -> Self {
        Self {
            email: normalize_email(&self.email),
            name: self.name.trim().to_string(),
            phone_number: non_blank(self.phone_number),
            address: non_blank(self.address),
            password: self.password,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Both fields are optional at the wire level so a missing one is reported
/// with the same message as an empty one.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    /// Trimmed, non-empty email and non-empty password.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let email = self.email.as_deref().map(str::trim).filter(|e| !e.is_empty())?;
        let password = self.password.as_deref().filter(|p| !p.is_empty())?;
        Some((email, password))
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}
