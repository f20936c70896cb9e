//! Great-circle distance and proximity filtering for facility lookups.

use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Slack added to bounding box edges so float rounding never drops a
/// candidate that the exact distance check would keep.
const BOX_EPSILON_DEG: f64 = 1e-9;

/// Haversine distance between two coordinates, in kilometres.
///
/// No range validation is applied to the inputs; out-of-range degrees give a
/// defined but meaningless value.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Rounds a distance to two decimals for display.
pub fn round_distance_km(distance_km: f64) -> f64 {
    (distance_km * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn distance_km_to(&self, other: &GeoPoint) -> f64 {
        haversine_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    pub fn is_in_range(&self) -> bool {
        self.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Latitude/longitude rectangle used to narrow SQL candidates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    /// Smallest rectangle containing every point within `radius_km` of
    /// `center`, or `None` when the circle reaches a pole, crosses the
    /// antimeridian, covers a hemisphere or the input is unusable.
    pub fn around(center: GeoPoint, radius_km: f64) -> Option<Self> {
        if !center.is_in_range() || !radius_km.is_finite() || radius_km <= 0.0 {
            return None;
        }

        let angular = radius_km / EARTH_RADIUS_KM;
        if angular >= std::f64::consts::FRAC_PI_2 {
            return None;
        }

        let lat = center.latitude.to_radians();
        let min_lat = lat - angular;
        let max_lat = lat + angular;
        if min_lat <= -std::f64::consts::FRAC_PI_2 || max_lat >= std::f64::consts::FRAC_PI_2 {
            return None;
        }

        let delta_lon = (angular.sin() / lat.cos()).asin();
        let lon = center.longitude.to_radians();
        let min_lon = lon - delta_lon;
        let max_lon = lon + delta_lon;
        if min_lon < -std::f64::consts::PI || max_lon > std::f64::consts::PI {
            return None;
        }

        Some(Self {
            min_latitude: min_lat.to_degrees() - BOX_EPSILON_DEG,
            max_latitude: max_lat.to_degrees() + BOX_EPSILON_DEG,
            min_longitude: min_lon.to_degrees() - BOX_EPSILON_DEG,
            max_longitude: max_lon.to_degrees() + BOX_EPSILON_DEG,
        })
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&point.latitude)
            && (self.min_longitude..=self.max_longitude).contains(&point.longitude)
    }
}

/// An item paired with its exact distance from a query origin.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyMatch<T> {
    pub item: T,
    pub distance_km: f64,
}

/// Keeps items strictly closer than `radius_km` to `origin`, nearest first.
///
/// Distances are computed once per item. The sort is stable, so equal
/// distances keep their input order.
pub fn rank_within_radius<T, F>(
    items: Vec<T>,
    origin: GeoPoint,
    radius_km: f64,
    locate: F,
) -> Vec<NearbyMatch<T>>
where
    F: Fn(&T) -> GeoPoint,
{
    let mut matches: Vec<NearbyMatch<T>> = items
        .into_iter()
        .filter_map(|item| {
            let distance_km = origin.distance_km_to(&locate(&item));
            (distance_km < radius_km).then_some(NearbyMatch { item, distance_km })
        })
        .collect();

    matches.sort_by(|left, right| left.distance_km.total_cmp(&right.distance_km));
    matches
}
