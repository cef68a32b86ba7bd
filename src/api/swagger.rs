use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HunterxJobs API",
        version = "1.0.0",
        description = "LinkedIn profile optimization backend. \n\n**Authentication:** Most endpoints require a JWT Bearer token.\n\n**Features:**\n- Email/password authentication\n- LinkedIn OAuth connection and posting\n- Heuristic profile analysis and section scoring\n- Optimization suggestions and previews\n- Content generation, virality scoring and scheduling\n- Dashboard metrics (PVI, OFR, CAS, CMI)",
        contact(
            name = "HunterxJobs Team",
            email = "support@hunterxjobs.xyz"
        )
    ),
    paths(
        // Auth endpoints
        crate::api::auth::register,
        crate::api::auth::login,
        crate::api::auth::get_current_user,

        // Health
        crate::api::health::health_check,

        // LinkedIn
        crate::api::linkedin::connect,

        // Profile
        crate::api::profile::analyze,

        // Optimization
        crate::api::optimization::suggestions,

        // Content
        crate::api::content::generate,

        // Metrics
        crate::api::metrics::dashboard,
    ),
    components(
        schemas(
            crate::services::auth_service::RegisterRequest,
            crate::services::auth_service::LoginRequest,
            crate::services::auth_service::AuthResponse,
            crate::models::user::UserInfo,
            crate::api::health::HealthResponse,
            crate::agents::optimizer::SectionScore,
            crate::agents::optimizer::SectionScores,
        )
    ),
    tags(
        (name = "Auth", description = "Authentication and account management endpoints."),
        (name = "Health", description = "Health check endpoints for monitoring service status."),
        (name = "LinkedIn", description = "LinkedIn OAuth connection, profile fetch and posting."),
        (name = "Profile", description = "Profile analysis, optimization previews and benchmarks."),
        (name = "Optimization", description = "Per-section optimization suggestions."),
        (name = "Content", description = "Content generation, virality analysis and scheduling."),
        (name = "Metrics", description = "Dashboard metrics: PVI, OFR, CAS and CMI."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your JWT token"))
                        .build(),
                ),
            );
        }
    }
}
