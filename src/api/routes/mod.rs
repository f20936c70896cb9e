use std::sync::Arc;

use actix_web::{web, HttpRequest, HttpResponse};
use sqlx::PgPool;

use crate::application::{AuthService, RecyclerService};
use crate::config::SecurityConfig;
use crate::error::{AppError, AppResult};
use crate::observability::AppMetrics;
use crate::security::LoginThrottle;

pub mod auth;
pub mod recyclers;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub recycler_service: Arc<RecyclerService>,
    pub security: SecurityConfig,
    pub login_throttle: Arc<LoginThrottle>,
    pub metrics: Arc<AppMetrics>,
    /// `None` only when running without a database, e.g. in route tests.
    pub db_pool: Option<PgPool>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .app_data(query_config())
            .configure(auth::configure)
            .configure(recyclers::configure),
    )
    .route("/health", web::get().to(health))
    .route("/ready", web::get().to(ready))
    .route("/metrics", web::get().to(metrics));
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Invalid request body: {err}")).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Invalid query parameters: {err}")).into()
    })
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check passed", body = String)
    ),
    tag = "health"
)]
pub async fn health() -> &'static str {
    "ok"
}

#[utoipa::path(
    get,
    path = "/ready",
    responses(
        (status = 200, description = "Database reachable", body = String),
        (status = 503, description = "Database unavailable", body = crate::api::dtos::ErrorResponse),
    ),
    tag = "health"
)]
pub async fn ready(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let pool = state
        .db_pool
        .as_ref()
        .ok_or_else(|| AppError::database_unavailable("Service not ready: no database pool"))?;

    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::database_unavailable(format!("Service not ready: {e}")))?;
    Ok(HttpResponse::Ok().body("ready"))
}

async fn metrics(state: web::Data<AppState>, request: HttpRequest) -> AppResult<HttpResponse> {
    let admin_token = state
        .security
        .metrics_admin_token
        .as_deref()
        .filter(|token| !token.is_empty());
    let admin_header = request
        .headers()
        .get("x-admin-token")
        .and_then(|value| value.to_str().ok());
    let has_admin_token = admin_token.is_some() && admin_header == admin_token;

    if !has_admin_token && state.security.metrics_allow_private_only {
        let ip = request
            .peer_addr()
            .map(|addr| addr.ip())
            .ok_or(AppError::Unauthorized)?;

        if !is_private_or_loopback(ip) {
            return Err(AppError::Unauthorized);
        }
    }

    let (db_size, db_idle) = pool_stats(&state);
    Ok(HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(state.metrics.render_prometheus(db_size, db_idle)))
}

fn is_private_or_loopback(ip: std::net::IpAddr) -> bool {
    match ip {
        std::net::IpAddr::V4(v4) => v4.is_private() || v4.is_loopback(),
        std::net::IpAddr::V6(v6) => v6.is_loopback() || (v6.segments()[0] & 0xfe00) == 0xfc00,
    }
}

fn pool_stats(state: &AppState) -> (u32, usize) {
    state
        .db_pool
        .as_ref()
        .map(|pool| (pool.size(), pool.num_idle()))
        .unwrap_or((0, 0))
}
