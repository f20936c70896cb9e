use actix_web::{web, HttpRequest, HttpResponse};

use crate::api::dtos::{ApiResponse, LoginRequest, SignupRequest};
use crate::api::routes::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::AuthenticatedUser;
use crate::security::LoginThrottle;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(login))
            .route("/signup", web::post().to(signup))
            .route("/profile", web::get().to(profile)),
    );
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token and account, wrapped in the response envelope", body = crate::api::dtos::AuthResponse),
        (status = 400, description = "Email or password missing", body = crate::api::dtos::ErrorResponse),
        (status = 401, description = "Wrong password", body = crate::api::dtos::ErrorResponse),
        (status = 429, description = "Too many failed attempts", body = crate::api::dtos::ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn login(
    state: web::Data<AppState>,
    request: HttpRequest,
    payload: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let payload = payload.into_inner();
    // Socket peer only; forwarding headers are client-controlled.
    let client_ip = request.peer_addr().map(|addr| addr.ip().to_string());
    let throttle_key = payload
        .credentials()
        .map(|(email, _)| LoginThrottle::key(email, client_ip.as_deref()));

    if let Some(key) = throttle_key.as_deref() {
        state.login_throttle.ensure_allowed(key)?;
    }

    match state.auth_service.login(&payload).await {
        Ok(result) => {
            if let Some(key) = throttle_key.as_deref() {
                state.login_throttle.record_success(key);
            }
            Ok(HttpResponse::Ok().json(ApiResponse::ok("Login successful", result)))
        }
        Err(AppError::Unauthorized) => {
            state.metrics.record_auth_failure();
            Err(match throttle_key.as_deref() {
                Some(key) => state.login_throttle.record_failure(key),
                None => AppError::Unauthorized,
            })
        }
        Err(error) => Err(error),
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Token and new account, wrapped in the response envelope", body = crate::api::dtos::AuthResponse),
        (status = 400, description = "Validation failure or email already registered", body = crate::api::dtos::ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn signup(
    state: web::Data<AppState>,
    payload: web::Json<SignupRequest>,
) -> AppResult<HttpResponse> {
    let result = state.auth_service.signup(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Signup successful", result)))
}

#[utoipa::path(
    get,
    path = "/api/auth/profile",
    responses(
        (status = 200, description = "Signed-in account, wrapped in the response envelope", body = crate::api::dtos::UserResponse),
        (status = 401, description = "Missing or invalid bearer token", body = crate::api::dtos::ErrorResponse),
        (status = 404, description = "Account no longer exists", body = crate::api::dtos::ErrorResponse),
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn profile(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let result = state.auth_service.profile(user.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Profile retrieved successfully", result)))
}
