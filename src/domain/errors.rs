use thiserror::Error;

pub const DUPLICATE_EMAIL_MESSAGE: &str = "User with this email already exists";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("User with this email already exists")]
    DuplicateEmail,
}
