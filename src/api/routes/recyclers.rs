use actix_web::{web, HttpResponse};

use crate::api::dtos::{ApiResponse, NearbyQuery};
use crate::api::routes::AppState;
use crate::error::AppResult;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/recyclers")
            .route("/all", web::get().to(list_all))
            .route("/nearby", web::get().to(nearby))
            .route("/verified", web::get().to(verified))
            .route("/top-rated", web::get().to(top_rated)),
    );
}

#[utoipa::path(
    get,
    path = "/api/recyclers/all",
    responses(
        (status = 200, description = "Every facility ordered by id", body = [crate::api::dtos::RecyclerResponse]),
    ),
    tag = "recyclers"
)]
pub async fn list_all(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let result = state.recycler_service.list_all().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Recyclers retrieved successfully", result)))
}

#[utoipa::path(
    get,
    path = "/api/recyclers/nearby",
    params(NearbyQuery),
    responses(
        (status = 200, description = "Facilities within the radius, nearest first, with distance in km", body = [crate::api::dtos::RecyclerResponse]),
        (status = 400, description = "Missing, non-numeric or non-finite parameters", body = crate::api::dtos::ErrorResponse),
    ),
    tag = "recyclers"
)]
pub async fn nearby(
    state: web::Data<AppState>,
    query: web::Query<NearbyQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    state.metrics.record_nearby_query();
    let result = state
        .recycler_service
        .nearby(query.latitude, query.longitude, query.radius_km)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        "Nearby recyclers retrieved successfully",
        result,
    )))
}

#[utoipa::path(
    get,
    path = "/api/recyclers/verified",
    responses(
        (status = 200, description = "Verified facilities ordered by id", body = [crate::api::dtos::RecyclerResponse]),
    ),
    tag = "recyclers"
)]
pub async fn verified(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let result = state.recycler_service.list_verified().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        "Verified recyclers retrieved successfully",
        result,
    )))
}

#[utoipa::path(
    get,
    path = "/api/recyclers/top-rated",
    responses(
        (status = 200, description = "Every facility by rating, highest first", body = [crate::api::dtos::RecyclerResponse]),
    ),
    tag = "recyclers"
)]
pub async fn top_rated(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let result = state.recycler_service.list_top_rated().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        "Top-rated recyclers retrieved successfully",
        result,
    )))
}
