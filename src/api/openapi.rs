use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::routes::auth::login,
        crate::api::routes::auth::signup,
        crate::api::routes::auth::profile,
        crate::api::routes::recyclers::list_all,
        crate::api::routes::recyclers::nearby,
        crate::api::routes::recyclers::verified,
        crate::api::routes::recyclers::top_rated,
        crate::api::routes::health,
        crate::api::routes::ready,
    ),
    components(
        schemas(
            crate::api::dtos::LoginRequest,
            crate::api::dtos::SignupRequest,
            crate::api::dtos::AuthResponse,
            crate::api::dtos::UserResponse,
            crate::api::dtos::RecyclerResponse,
            crate::api::dtos::ErrorResponse,
            crate::api::dtos::ValidationIssueDoc,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "auth", description = "Signup, login and profile"),
        (name = "recyclers", description = "Recycler facility directory"),
        (name = "health", description = "Health check endpoints"),
    ),
    info(
        title = "GrowLoop Backend API",
        version = "0.1.0",
        description = "Recycling marketplace backend. Every /api response is wrapped in {success, message, data}.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

pub fn configure_swagger_ui(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}
