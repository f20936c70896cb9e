use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: i64,
    pub user_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub address_text: Option<String>,
    pub loyalty_points: i32,
    pub is_verified: bool,
    pub is_premium: bool,
    pub created_at: DateTime<Utc>,
}
