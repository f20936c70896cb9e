use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_NEARBY_RADIUS_KM: f64 = 10.0;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecyclerResponse {
    pub recycler_id: i64,
    pub name: String,
    pub address: String,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub rating: f64,
    pub accepted_items: Vec<String>,
    pub open_hours: Option<String>,
    pub is_verified: bool,
    pub description: Option<String>,
    /// Kilometres from the query point, two decimals. Nearby results only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct NearbyQuery {
    pub latitude: f64,
    pub longitude: f64,
    /// Defaults to 10 km
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,
}

fn default_radius_km() -> f64 {
    DEFAULT_NEARBY_RADIUS_KM
}
