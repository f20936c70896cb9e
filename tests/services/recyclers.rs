use std::sync::Arc;

use growloop_backend::application::RecyclerService;
use growloop_backend::domain::{haversine_km, round_distance_km};
use growloop_backend::error::{AppError, AppResult};

use crate::common::fixtures::{rated, test_recycler, verified};
use crate::common::mocks::MockRecyclerRepo;

const ORIGIN: (f64, f64) = (40.7128, -74.0060);

fn service(recyclers: Vec<growloop_backend::domain::Recycler>) -> RecyclerService {
    RecyclerService::new(Arc::new(MockRecyclerRepo::with(recyclers)))
}

fn ids(responses: &[growloop_backend::api::dtos::RecyclerResponse]) -> Vec<i64> {
    responses.iter().map(|r| r.recycler_id).collect()
}

#[tokio::test]
async fn list_all_is_ordered_by_id_without_distance() -> AppResult<()> {
    let service = service(vec![
        test_recycler(3, "C", 1.0, 1.0),
        test_recycler(1, "A", 1.0, 1.0),
        test_recycler(2, "B", 1.0, 1.0),
    ]);

    let all = service.list_all().await?;
    assert_eq!(ids(&all), vec![1, 2, 3]);
    assert!(all.iter().all(|r| r.distance.is_none()));
    assert_eq!(all[0].accepted_items, vec!["plastic", "glass"]);
    Ok(())
}

#[tokio::test]
async fn list_verified_keeps_only_verified_facilities() -> AppResult<()> {
    let service = service(vec![
        verified(test_recycler(1, "A", 1.0, 1.0)),
        test_recycler(2, "B", 1.0, 1.0),
        verified(test_recycler(3, "C", 1.0, 1.0)),
    ]);

    let result = service.list_verified().await?;
    assert_eq!(ids(&result), vec![1, 3]);
    assert!(result.iter().all(|r| r.is_verified));
    Ok(())
}

#[tokio::test]
async fn top_rated_sorts_by_rating_then_id() -> AppResult<()> {
    let service = service(vec![
        rated(test_recycler(1, "A", 1.0, 1.0), 3.5),
        rated(test_recycler(2, "B", 1.0, 1.0), 4.8),
        rated(test_recycler(3, "C", 1.0, 1.0), 1.0),
        rated(test_recycler(4, "D", 1.0, 1.0), 4.8),
    ]);

    let result = service.list_top_rated().await?;
    assert_eq!(ids(&result), vec![2, 4, 1, 3]);
    Ok(())
}

#[tokio::test]
async fn nearby_returns_facilities_inside_radius_nearest_first() -> AppResult<()> {
    let (lat, lon) = ORIGIN;
    let service = service(vec![
        test_recycler(1, "Mid", lat, lon + 0.08),
        test_recycler(2, "Far", lat, lon + 0.2),
        test_recycler(3, "Near", lat, lon + 0.02),
    ]);

    let result = service.nearby(lat, lon, 10.0).await?;
    assert_eq!(ids(&result), vec![3, 1]);

    let expected = round_distance_km(haversine_km(lat, lon, lat, lon + 0.02));
    assert_eq!(result[0].distance, Some(expected));
    assert!(result[0].distance < result[1].distance);
    Ok(())
}

#[tokio::test]
async fn nearby_excludes_facility_exactly_on_the_radius() -> AppResult<()> {
    let (lat, lon) = ORIGIN;
    let service = service(vec![test_recycler(1, "Edge", lat + 0.05, lon)]);
    let exact = haversine_km(lat, lon, lat + 0.05, lon);

    assert!(service.nearby(lat, lon, exact).await?.is_empty());
    assert_eq!(ids(&service.nearby(lat, lon, exact + 0.001).await?), vec![1]);
    Ok(())
}

#[tokio::test]
async fn nearby_keeps_id_order_for_equal_distances() -> AppResult<()> {
    let (lat, lon) = ORIGIN;
    let service = service(vec![
        test_recycler(5, "Twin B", lat + 0.01, lon),
        test_recycler(2, "Twin A", lat + 0.01, lon),
    ]);

    let result = service.nearby(lat, lon, 5.0).await?;
    assert_eq!(ids(&result), vec![2, 5]);
    Ok(())
}

#[tokio::test]
async fn nearby_with_non_positive_radius_is_empty() -> AppResult<()> {
    let (lat, lon) = ORIGIN;
    let service = service(vec![test_recycler(1, "Here", lat, lon)]);

    assert!(service.nearby(lat, lon, 0.0).await?.is_empty());
    assert!(service.nearby(lat, lon, -3.0).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn nearby_rejects_non_finite_input() {
    let service = service(Vec::new());

    for (lat, lon, radius) in [
        (f64::NAN, 0.0, 10.0),
        (0.0, f64::INFINITY, 10.0),
        (0.0, 0.0, f64::NAN),
    ] {
        let error = service
            .nearby(lat, lon, radius)
            .await
            .expect_err("non-finite input must fail");
        assert!(matches!(error, AppError::ValidationError { .. }));
    }
}

#[tokio::test]
async fn nearby_handles_poles_and_the_antimeridian() -> AppResult<()> {
    let service = service(vec![
        test_recycler(1, "Polar", 89.99, 180.0),
        test_recycler(2, "Date line", 0.0, -179.99),
    ]);

    let polar = service.nearby(89.99, 0.0, 5.0).await?;
    assert_eq!(ids(&polar), vec![1]);

    let date_line = service.nearby(0.0, 179.99, 5.0).await?;
    assert_eq!(ids(&date_line), vec![2]);
    Ok(())
}

#[tokio::test]
async fn nearby_with_out_of_range_origin_still_computes() -> AppResult<()> {
    let service = service(vec![test_recycler(1, "Somewhere", 10.0, 10.0)]);

    let result = service.nearby(200.0, 10.0, 100_000.0).await?;
    assert_eq!(ids(&result), vec![1]);
    Ok(())
}
