use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::agents::AgentRegistry;
use crate::api::request_claims;
use crate::config;
use crate::database::MongoDB;
use crate::services::{auth_service, linkedin_service, profile_service};

#[derive(Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

#[derive(Deserialize)]
pub struct PostRequest {
    pub content: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/api/linkedin/connect",
    tag = "LinkedIn",
    responses(
        (status = 200, description = "Authorization URL generated"),
        (status = 500, description = "LinkedIn OAuth not configured")
    ),
    security(("bearer_auth" = []))
)]
pub async fn connect(req: HttpRequest) -> HttpResponse {
    log::info!("🔗 GET /linkedin/connect - Generating OAuth URL");

    let claims = match request_claims(&req) {
        Ok(claims) => claims,
        Err(response) => return response,
    };

    match linkedin_service::authorization_url(&claims.sub) {
        Ok(response) => {
            log::info!("✅ LinkedIn OAuth URL generated for {}", claims.sub);
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log::error!("❌ Failed to generate LinkedIn OAuth URL: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

pub async fn callback(db: web::Data<MongoDB>, query: web::Query<CallbackQuery>) -> HttpResponse {
    log::info!("🔗 GET /linkedin/callback - Processing LinkedIn OAuth");

    let frontend_url = config::frontend_url();

    if let Some(error) = &query.error {
        log::error!("❌ OAuth error: {}", error);
        return HttpResponse::Found()
            .append_header((
                "Location",
                format!("{}/auth-callback.html?error={}", frontend_url, urlencoding::encode(error)),
            ))
            .finish();
    }

    let code = match &query.code {
        Some(code) => code,
        None => {
            log::error!("❌ No authorization code provided");
            return HttpResponse::Found()
                .append_header(("Location", format!("{}/auth-callback.html?error=no_code", frontend_url)))
                .finish();
        }
    };

    let user_id = match query.state.as_deref().and_then(linkedin_service::user_id_from_state) {
        Some(user_id) => user_id.to_string(),
        None => {
            log::error!("❌ Missing or malformed state parameter");
            return HttpResponse::Found()
                .append_header((
                    "Location",
                    format!("{}/auth-callback.html?error=invalid_state", frontend_url),
                ))
                .finish();
        }
    };

    match linkedin_service::handle_oauth_callback(&db, &user_id, code).await {
        Ok(expires_in) => {
            log::info!("✅ LinkedIn connected for user {} (expires in {}s)", user_id, expires_in);
            HttpResponse::Found()
                .append_header((
                    "Location",
                    format!("{}/auth-callback.html?linkedin=connected", frontend_url),
                ))
                .finish()
        }
        Err(e) => {
            log::error!("❌ LinkedIn OAuth failed: {}", e);
            HttpResponse::Found()
                .append_header((
                    "Location",
                    format!("{}/auth-callback.html?error={}", frontend_url, urlencoding::encode(&e)),
                ))
                .finish()
        }
    }
}

pub async fn status(db: web::Data<MongoDB>, req: HttpRequest) -> HttpResponse {
    log::info!("🔗 GET /linkedin/status");

    let claims = match request_claims(&req) {
        Ok(claims) => claims,
        Err(response) => return response,
    };

    match auth_service::find_user(&db, &claims.sub).await {
        Ok(user) => HttpResponse::Ok().json(linkedin_service::connection_status(&user)),
        Err(e) => HttpResponse::NotFound().json(serde_json::json!({
            "success": false,
            "error": e
        })),
    }
}

pub async fn profile(db: web::Data<MongoDB>, req: HttpRequest) -> HttpResponse {
    log::info!("🔗 GET /linkedin/profile");

    let claims = match request_claims(&req) {
        Ok(claims) => claims,
        Err(response) => return response,
    };

    let user = match auth_service::find_user(&db, &claims.sub).await {
        Ok(user) => user,
        Err(e) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    };

    match profile_service::load_profile_data(&db, &user).await {
        Ok(profile) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "profile": profile
        })),
        Err(e) => {
            log::error!("❌ Failed to load profile data: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

pub async fn analyze(
    db: web::Data<MongoDB>,
    agents: web::Data<AgentRegistry>,
    req: HttpRequest,
) -> HttpResponse {
    log::info!("🔍 POST /linkedin/analyze");

    let claims = match request_claims(&req) {
        Ok(claims) => claims,
        Err(response) => return response,
    };

    let user = match auth_service::find_user(&db, &claims.sub).await {
        Ok(user) => user,
        Err(e) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    };

    match profile_service::analyze_profile(&db, &agents, &user).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ Analysis failed for {}: {}", claims.sub, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

pub async fn post(
    db: web::Data<MongoDB>,
    agents: web::Data<AgentRegistry>,
    req: HttpRequest,
    request: web::Json<PostRequest>,
) -> HttpResponse {
    log::info!("📣 POST /linkedin/post");

    let claims = match request_claims(&req) {
        Ok(claims) => claims,
        Err(response) => return response,
    };

    // Security screen before anything reaches the LinkedIn API
    let check = agents.security.check_content_security(&request.content, &request.hashtags);
    if !check.passed {
        log::warn!("❌ Post blocked by security check for {}", claims.sub);
        return HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": check.message,
            "warnings": check.warnings
        }));
    }

    let user = match auth_service::find_user(&db, &claims.sub).await {
        Ok(user) => user,
        Err(e) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    };

    match linkedin_service::post_content(&user, &request.content, &request.hashtags).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("❌ LinkedIn post failed for {}: {}", claims.sub, e);
            HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

pub async fn disconnect(db: web::Data<MongoDB>, req: HttpRequest) -> HttpResponse {
    log::info!("🔗 POST /linkedin/disconnect");

    let claims = match request_claims(&req) {
        Ok(claims) => claims,
        Err(response) => return response,
    };

    match linkedin_service::disconnect_account(&db, &claims.sub).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": "LinkedIn account disconnected successfully"
        })),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": e
        })),
    }
}
