//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, user_handler};
use crate::domain::{UserResponse, UserRole};
use crate::services::AccessToken;

/// OpenAPI documentation for the authentication API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "hackEDU backend",
        version = "0.1.0",
        description = "Authentication, account creation and self-access endpoints",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        auth_handler::authenticate,
        user_handler::create_user,
        user_handler::get_current_user,
        user_handler::get_user,
    ),
    components(
        schemas(
            UserRole,
            UserResponse,
            AccessToken,
            auth_handler::LoginRequest,
            user_handler::CreateUserRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Credential check and token issuance"),
        (name = "Users", description = "Account creation and self access")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /authenticate"))
                        .build(),
                ),
            );
        }
    }
}
