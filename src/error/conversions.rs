use crate::domain::{DomainError, DUPLICATE_EMAIL_MESSAGE};
use crate::error::app_error::AppError;
use crate::error::db_mapping::map_database_error;
use crate::error::validation_mapping::validation_issues;

const DATABASE_CONNECT_MESSAGE: &str = "Unable to connect to database. Please try again later.";
const DATABASE_BUSY_MESSAGE: &str = "Service temporarily unavailable. Please try again later.";

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::ValidationError(msg) => AppError::validation_error(msg),
            DomainError::DuplicateEmail => AppError::BadRequest(DUPLICATE_EMAIL_MESSAGE.to_string()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError(err)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_) => AppError::database_unavailable(DATABASE_CONNECT_MESSAGE),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                AppError::database_unavailable(DATABASE_BUSY_MESSAGE)
            }
            sqlx::Error::Database(database_error) => {
                if let Some(mapped) = map_database_error(
                    database_error.code().as_deref(),
                    database_error.constraint(),
                    database_error.message(),
                ) {
                    mapped
                } else {
                    AppError::DatabaseError(sqlx::Error::Database(database_error))
                }
            }
            other => AppError::DatabaseError(other),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let issues = validation_issues(&err);

        let message = match issues.as_slice() {
            [issue] => issue.message.clone(),
            _ => "Request validation failed".to_string(),
        };

        AppError::ValidationError { message, issues }
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        }
    }
}

pub(super) fn database_connect_message() -> &'static str {
    DATABASE_CONNECT_MESSAGE
}

pub(super) fn database_busy_message() -> &'static str {
    DATABASE_BUSY_MESSAGE
}
