use std::sync::Arc;
use std::time::Instant;

use actix_web::dev::Service as _;
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use growloop_backend::api::openapi::configure_swagger_ui;
use growloop_backend::api::routes::{self, AppState};
use growloop_backend::application::{AuthService, RecyclerService};
use growloop_backend::config::AppConfig;
use growloop_backend::infrastructure::db::{create_pool, run_migrations};
use growloop_backend::infrastructure::repositories::{RecyclerRepositoryImpl, UserRepositoryImpl};
use growloop_backend::middleware::request_logging::{
    create_request_span, get_client_ip, get_status_class, get_user_agent, request_id,
    request_id_header_value, REQUEST_ID_HEADER,
};
use growloop_backend::observability::error_tracking::{capture_unexpected_5xx, ERROR_ID_HEADER};
use growloop_backend::observability::{init_tracing, AppMetrics};
use growloop_backend::security::{cors_middleware, security_headers, LoginThrottle};
use tracing::{info, warn, Instrument};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("failed to load application configuration")?;
    init_tracing(&config.logging);
    config.validate().context("invalid application configuration")?;

    info!(
        environment = %config.environment,
        database = ?config.database,
        auth = ?config.auth,
        "configuration loaded"
    );

    let pool = create_pool(&config.database)
        .await
        .context("failed to create database pool")?;
    run_migrations(&pool)
        .await
        .context("database migrations failed")?;

    let user_repo = Arc::new(UserRepositoryImpl::new(pool.clone()));
    let recycler_repo = Arc::new(RecyclerRepositoryImpl::new(pool.clone()));

    let state = AppState {
        auth_service: Arc::new(AuthService::new(user_repo, config.auth.clone())),
        recycler_service: Arc::new(RecyclerService::new(recycler_repo)),
        security: config.security.clone(),
        login_throttle: Arc::new(LoginThrottle::new(&config.security)),
        metrics: Arc::new(AppMetrics::default()),
        db_pool: Some(pool),
    };

    let bind_host = config.host.clone();
    let bind_port = config.port;
    let security_config = config.security.clone();
    let auth_config = config.auth.clone();
    let expose_docs = !config.is_production();
    let metrics = state.metrics.clone();

    info!(host = %bind_host, port = bind_port, "starting http server");

    HttpServer::new(move || {
        let metrics = metrics.clone();
        App::new()
            .wrap_fn(move |req, srv| {
                let request_id = request_id(&req);
                let path = req.path().to_string();
                let method = req.method().to_string();
                let span = create_request_span(
                    &request_id,
                    &method,
                    &path,
                    &get_client_ip(&req),
                    &get_user_agent(&req),
                );
                let metrics = metrics.clone();
                let start = Instant::now();

                let fut = span.in_scope(|| srv.call(req));
                async move {
                    let mut response = fut.await?;
                    if let Some(value) = request_id_header_value(&request_id) {
                        response
                            .headers_mut()
                            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
                    }

                    let status = response.status().as_u16();
                    let latency_ms = start.elapsed().as_millis() as u64;
                    metrics.record_request(status, latency_ms);

                    info!(
                        status = status,
                        status_class = get_status_class(status),
                        latency_ms = latency_ms,
                        "request completed"
                    );

                    if let Some(event_id) =
                        capture_unexpected_5xx(&path, &method, status, &request_id)
                    {
                        match HeaderValue::from_str(&event_id.to_string()) {
                            Ok(value) => {
                                response
                                    .headers_mut()
                                    .insert(HeaderName::from_static(ERROR_ID_HEADER), value);
                            }
                            Err(error) => warn!(error = %error, "invalid error id header"),
                        }
                    }
                    Ok::<_, actix_web::Error>(response)
                }
                .instrument(span)
            })
            .wrap(cors_middleware(&security_config))
            .wrap(security_headers())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(auth_config.clone()))
            .configure(routes::configure)
            .configure(|cfg| {
                if expose_docs {
                    configure_swagger_ui(cfg);
                }
            })
    })
    .bind((bind_host, bind_port))?
    .run()
    .await?;

    Ok(())
}
