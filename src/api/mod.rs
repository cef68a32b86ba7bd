pub mod agent;
pub mod auth;
pub mod content;
pub mod health;
pub mod linkedin;
pub mod metrics;
pub mod optimization;
pub mod profile;
pub mod swagger;

use actix_web::{HttpMessage, HttpRequest, HttpResponse};

use crate::services::auth_service::Claims;

/// Claims are inserted by the auth middleware; a missing entry means the
/// route was mounted without it.
pub fn request_claims(req: &HttpRequest) -> Result<Claims, HttpResponse> {
    req.extensions().get::<Claims>().cloned().ok_or_else(|| {
        HttpResponse::Unauthorized().json(serde_json::json!({
            "success": false,
            "error": "Not authenticated"
        }))
    })
}
