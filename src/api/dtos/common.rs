use serde::Serialize;
use utoipa::ToSchema;

/// Success envelope shared by every `/api` endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

/// Error envelope, as rendered by `AppError`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,
    /// Human-readable error message
    pub message: String,
    /// Always `null`
    #[schema(value_type = Object, nullable)]
    pub data: Option<serde_json::Value>,
    /// Machine-readable code such as `NOT_FOUND` or `VALIDATION_ERROR`
    pub code: String,
    /// Per-field problems, only for validation failures
    pub details: Option<Vec<ValidationIssueDoc>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationIssueDoc {
    pub field: String,
    pub message: String,
    pub code: String,
}
