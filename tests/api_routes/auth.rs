use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::{http::StatusCode, test as actix_test, web, App};
use growloop_backend::api::routes;
use growloop_backend::application::MISSING_CREDENTIALS_MESSAGE;
use growloop_backend::domain::DUPLICATE_EMAIL_MESSAGE;
use growloop_backend::utils::hash::hash_password;
use growloop_backend::utils::jwt::create_access_token;
use serde_json::{json, Value};

use super::error_body;
use crate::common;
use crate::common::fixtures::test_user;
use crate::common::mocks::{MockRecyclerRepo, MockUserRepo};

#[actix_rt::test]
async fn signup_returns_token_and_account_in_envelope() {
    let user_repo = Arc::new(MockUserRepo::default());
    let state = common::app_state(user_repo.clone(), Arc::new(MockRecyclerRepo::default()));
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(common::test_auth_config()))
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({
            "email": "ana@example.com",
            "name": "Ana",
            "phoneNumber": "555-0101",
            "password": "correct-horse"
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Signup successful");
    assert!(body["data"]["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["data"]["user"]["email"], "ana@example.com");
    assert_eq!(body["data"]["user"]["phoneNumber"], "555-0101");
    assert_eq!(body["data"]["user"]["loyaltyPoints"], 0);
    assert!(body["data"]["user"].get("passwordHash").is_none());
    assert_eq!(user_repo.count(), 1);
}

#[actix_rt::test]
async fn signup_with_registered_email_is_bad_request() {
    let user_repo = Arc::new(MockUserRepo::default());
    user_repo.push(test_user(1, "ana@example.com", None));
    let state = common::app_state(user_repo.clone(), Arc::new(MockRecyclerRepo::default()));
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(common::test_auth_config()))
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({
            "email": "ana@example.com",
            "name": "Ana again",
            "password": "another-secret"
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = error_body(response, "BAD_REQUEST").await;
    assert_eq!(body["message"], DUPLICATE_EMAIL_MESSAGE);
    assert_eq!(user_repo.count(), 1);
}

#[actix_rt::test]
async fn signup_validation_failure_lists_fields() {
    let state = common::app_state(
        Arc::new(MockUserRepo::default()),
        Arc::new(MockRecyclerRepo::default()),
    );
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(common::test_auth_config()))
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({"email": "not-an-email", "name": "Ana", "password": "correct-horse"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = error_body(response, "VALIDATION_ERROR").await;
    assert_eq!(body["details"][0]["field"], "email");
}

#[actix_rt::test]
async fn malformed_json_uses_error_envelope() {
    let state = common::app_state(
        Arc::new(MockUserRepo::default()),
        Arc::new(MockRecyclerRepo::default()),
    );
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(common::test_auth_config()))
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/api/auth/signup")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"email\": ")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    error_body(response, "BAD_REQUEST").await;
}

#[actix_rt::test]
async fn login_without_password_is_bad_request() {
    let state = common::app_state(
        Arc::new(MockUserRepo::default()),
        Arc::new(MockRecyclerRepo::default()),
    );
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(common::test_auth_config()))
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": "ana@example.com"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = error_body(response, "BAD_REQUEST").await;
    assert_eq!(body["message"], MISSING_CREDENTIALS_MESSAGE);
}

#[actix_rt::test]
async fn first_login_provisions_account() {
    let user_repo = Arc::new(MockUserRepo::default());
    let state = common::app_state(user_repo.clone(), Arc::new(MockRecyclerRepo::default()));
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(common::test_auth_config()))
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": "new@example.com", "password": "first-pass"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["data"]["user"]["userName"], "new");
    assert_eq!(body["data"]["user"]["isVerified"], false);
    assert_eq!(body["data"]["user"]["isPremium"], false);
    assert_eq!(user_repo.count(), 1);
}

#[actix_rt::test]
async fn repeated_wrong_passwords_lock_the_account_out() {
    let user_repo = Arc::new(MockUserRepo::default());
    user_repo.push(test_user(
        1,
        "ana@example.com",
        Some(hash_password("right-password").expect("hash")),
    ));
    let mut security = common::security_config();
    security.login_max_failures = 3;
    let state = common::app_state_with_security(
        user_repo,
        Arc::new(MockRecyclerRepo::default()),
        security,
    );
    let metrics = state.metrics.clone();
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(common::test_auth_config()))
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let mut statuses = Vec::new();
    for _ in 0..4 {
        let request = actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({"email": "ana@example.com", "password": "wrong"}))
            .to_request();
        statuses.push(actix_test::call_service(&app, request).await.status());
    }
    assert_eq!(
        statuses,
        vec![
            StatusCode::UNAUTHORIZED,
            StatusCode::UNAUTHORIZED,
            StatusCode::TOO_MANY_REQUESTS,
            StatusCode::TOO_MANY_REQUESTS,
        ]
    );

    // Locked out even with the right password.
    let request = actix_test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": "ana@example.com", "password": "right-password"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    error_body(response, "RATE_LIMITED").await;

    assert!(metrics
        .render_prometheus(0, 0)
        .contains("auth_failures_total 3"));
}

#[actix_rt::test]
async fn rotating_forwarded_for_does_not_escape_the_lockout() {
    let user_repo = Arc::new(MockUserRepo::default());
    user_repo.push(test_user(
        1,
        "ana@example.com",
        Some(hash_password("right-password").expect("hash")),
    ));
    let mut security = common::security_config();
    security.login_max_failures = 3;
    let state = common::app_state_with_security(
        user_repo,
        Arc::new(MockRecyclerRepo::default()),
        security,
    );
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(common::test_auth_config()))
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let peer: SocketAddr = "198.51.100.7:40000".parse().expect("socket address");
    let mut statuses = Vec::new();
    for i in 0..5 {
        let request = actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .peer_addr(peer)
            .insert_header(("x-forwarded-for", format!("203.0.113.{i}")))
            .insert_header(("forwarded", format!("for=203.0.113.{i}")))
            .set_json(json!({"email": "ana@example.com", "password": "wrong"}))
            .to_request();
        statuses.push(actix_test::call_service(&app, request).await.status());
    }

    assert_eq!(&statuses[..2], &[StatusCode::UNAUTHORIZED, StatusCode::UNAUTHORIZED]);
    assert!(statuses[2..]
        .iter()
        .all(|status| *status == StatusCode::TOO_MANY_REQUESTS));
}

#[actix_rt::test]
async fn signup_without_password_is_rejected() {
    let user_repo = Arc::new(MockUserRepo::default());
    let state = common::app_state(user_repo.clone(), Arc::new(MockRecyclerRepo::default()));
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(common::test_auth_config()))
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let request = actix_test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({"email": "victim@example.com", "name": "Victim"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    error_body(response, "BAD_REQUEST").await;
    assert_eq!(user_repo.count(), 0);
}

#[actix_rt::test]
async fn profile_requires_valid_bearer_token() {
    let user_repo = Arc::new(MockUserRepo::default());
    user_repo.push(test_user(12, "ana@example.com", None));
    let state = common::app_state(user_repo, Arc::new(MockRecyclerRepo::default()));
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(common::test_auth_config()))
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let missing = actix_test::TestRequest::get()
        .uri("/api/auth/profile")
        .to_request();
    let response = actix_test::call_service(&app, missing).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    error_body(response, "UNAUTHORIZED").await;

    let garbage = actix_test::TestRequest::get()
        .uri("/api/auth/profile")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let response = actix_test::call_service(&app, garbage).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    error_body(response, "INVALID_TOKEN").await;

    let token = create_access_token(12, &common::test_auth_config()).expect("token");
    let valid = actix_test::TestRequest::get()
        .uri("/api/auth/profile")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let response = actix_test::call_service(&app, valid).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Profile retrieved successfully");
    assert_eq!(body["data"]["userId"], 12);
}

#[actix_rt::test]
async fn profile_for_deleted_account_is_not_found() {
    let state = common::app_state(
        Arc::new(MockUserRepo::default()),
        Arc::new(MockRecyclerRepo::default()),
    );
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(common::test_auth_config()))
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let token = create_access_token(404, &common::test_auth_config()).expect("token");
    let request = actix_test::TestRequest::get()
        .uri("/api/auth/profile")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    error_body(response, "NOT_FOUND").await;
}
