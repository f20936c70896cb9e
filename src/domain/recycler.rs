use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use super::errors::DomainError;
use super::geo::GeoPoint;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recycler {
    pub id: i64,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recycler {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Facility record accepted by the administrative import.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecycler {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default, deserialize_with = "deserialize_accepted_items")]
    pub accepted_items: Vec<String>,
    #[serde(default)]
    pub open_hours: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewRecycler {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "name must not be empty".to_string(),
            ));
        }
        if self.address.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "address must not be empty".to_string(),
            ));
        }
        if !GeoPoint::new(self.latitude, self.longitude).is_in_range() {
            return Err(DomainError::ValidationError(format!(
                "coordinates ({}, {}) are out of range",
                self.latitude, self.longitude
            )));
        }
        if !self.rating.is_finite() {
            return Err(DomainError::ValidationError(
                "rating must be a finite number".to_string(),
            ));
        }
        if self
            .phone_number
            .as_ref()
            .is_some_and(|phone| phone.chars().count() > 20)
        {
            return Err(DomainError::ValidationError(
                "phoneNumber must be at most 20 characters".to_string(),
            ));
        }
        Ok(())
    }
}

/// Splits the legacy comma-delimited category list. Segments are trimmed and
/// empty ones dropped, so `None`, `""` and `" , "` all yield an empty list.
pub fn parse_accepted_items(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// `acceptedItems` as either the legacy delimited string or a JSON array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AcceptedItemsInput {
    Delimited(String),
    List(Vec<String>),
}

impl AcceptedItemsInput {
    fn into_items(self) -> Vec<String> {
        match self {
            AcceptedItemsInput::Delimited(raw) => parse_accepted_items(Some(&raw)),
            AcceptedItemsInput::List(items) => items
                .into_iter()
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect(),
        }
    }
}

fn deserialize_accepted_items<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let input = Option::<AcceptedItemsInput>::deserialize(deserializer)?;
    Ok(input.map(AcceptedItemsInput::into_items).unwrap_or_default())
}
