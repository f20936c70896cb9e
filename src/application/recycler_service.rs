use std::sync::Arc;

use tracing::debug;

use crate::api::dtos::RecyclerResponse;
use crate::application::mapper::{map_nearby_response, map_recycler_response};
use crate::domain::geo::rank_within_radius;
use crate::domain::{BoundingBox, DomainError, GeoPoint, Recycler};
use crate::error::AppResult;
use crate::infrastructure::repositories::RecyclerRepository;

#[derive(Clone)]
pub struct RecyclerService {
    recycler_repo: Arc<dyn RecyclerRepository>,
}

impl RecyclerService {
    pub fn new(recycler_repo: Arc<dyn RecyclerRepository>) -> Self {
        Self { recycler_repo }
    }

    pub async fn list_all(&self) -> AppResult<Vec<RecyclerResponse>> {
        let recyclers = self.recycler_repo.find_all().await?;
        Ok(recyclers.into_iter().map(map_recycler_response).collect())
    }

    pub async fn list_verified(&self) -> AppResult<Vec<RecyclerResponse>> {
        let recyclers = self.recycler_repo.find_verified().await?;
        Ok(recyclers.into_iter().map(map_recycler_response).collect())
    }

    pub async fn list_top_rated(&self) -> AppResult<Vec<RecyclerResponse>> {
        let recyclers = self.recycler_repo.find_all_by_rating_desc().await?;
        Ok(recyclers.into_iter().map(map_recycler_response).collect())
    }

    /// Facilities strictly within `radius_km` of the point, nearest first.
    pub async fn nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> AppResult<Vec<RecyclerResponse>> {
        let origin = GeoPoint::new(latitude, longitude);
        if !origin.is_finite() {
            return Err(DomainError::ValidationError(
                "latitude and longitude must be finite numbers".to_string(),
            )
            .into());
        }
        if !radius_km.is_finite() {
            return Err(
                DomainError::ValidationError("radiusKm must be a finite number".to_string()).into(),
            );
        }
        if radius_km <= 0.0 {
            return Ok(Vec::new());
        }

        let bounds = BoundingBox::around(origin, radius_km);
        let candidates = self.recycler_repo.find_within_bounds(bounds.as_ref()).await?;
        let candidate_count = candidates.len();

        let ranked = rank_within_radius(candidates, origin, radius_km, Recycler::location);
        debug!(
            latitude,
            longitude,
            radius_km,
            prefiltered = bounds.is_some(),
            candidate_count,
            match_count = ranked.len(),
            "nearby recycler query"
        );

        Ok(ranked.into_iter().map(map_nearby_response).collect())
    }
}
