use std::borrow::Cow;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
    pub code: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Validation error: {message}")]
    ValidationError {
        message: String,
        issues: Vec<ValidationIssue>,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error")]
    InternalError(#[source] anyhow::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Too many requests")]
    RateLimited,

    #[error("Service unavailable: {service}")]
    ServiceUnavailable { service: String, message: String },
}

/// Error half of the `{success, message, data}` envelope.
#[derive(Debug, Serialize)]
struct ErrorEnvelope<'a> {
    success: bool,
    message: Cow<'a, str>,
    data: Option<()>,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a [ValidationIssue]>,
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorEnvelope {
            success: false,
            message: self.public_message(),
            data: None,
            code: self.error_code(),
            details: self.validation_issues(),
        })
    }

    fn status_code(&self) -> StatusCode {
        self.classify().0
    }
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        self.classify().1
    }

    fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::ValidationError { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::TokenExpired => (StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED"),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            AppError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED"),
            AppError::ServiceUnavailable { .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            AppError::DatabaseError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            AppError::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            issues: Vec::new(),
        }
    }

    pub fn database_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            service: "database".to_string(),
            message: message.into(),
        }
    }

    /// Message safe to show clients. Storage and internal failures are
    /// reported generically; their detail only reaches the logs.
    pub(crate) fn public_message(&self) -> Cow<'_, str> {
        match self {
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                Cow::Borrowed("Internal server error")
            }
            AppError::NotFound(message)
            | AppError::Conflict(message)
            | AppError::BadRequest(message)
            | AppError::ValidationError { message, .. }
            | AppError::ServiceUnavailable { message, .. } => Cow::Borrowed(message),
            AppError::Unauthorized => Cow::Borrowed("Unauthorized"),
            AppError::TokenExpired => Cow::Borrowed("Token expired"),
            AppError::InvalidToken => Cow::Borrowed("Invalid token"),
            AppError::RateLimited => Cow::Borrowed("Too many failed attempts, try again later"),
        }
    }

    fn validation_issues(&self) -> Option<&[ValidationIssue]> {
        match self {
            AppError::ValidationError { issues, .. } if !issues.is_empty() => Some(issues),
            _ => None,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
