use std::collections::HashMap;

use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::agents::AgentRegistry;
use crate::api::request_claims;
use crate::database::MongoDB;
use crate::services::{auth_service, profile_service};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    pub profile_id: String,
    pub sections: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub profile_id: String,
    pub optimizations: HashMap<String, String>,
}

#[utoipa::path(
    post,
    path = "/api/profile/analyze",
    tag = "Profile",
    responses(
        (status = 200, description = "Profile analysis"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn analyze(
    db: web::Data<MongoDB>,
    agents: web::Data<AgentRegistry>,
    req: HttpRequest,
) -> HttpResponse {
    log::info!("🔍 POST /profile/analyze");

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
        Ok(response) => {
            log::info!(
                "✅ Profile analyzed for {}: score {}",
                claims.sub,
                response.analysis.profile_score
            );
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log::error!("❌ Profile analysis failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

pub async fn optimization_preview(
    db: web::Data<MongoDB>,
    agents: web::Data<AgentRegistry>,
    req: HttpRequest,
    request: web::Json<PreviewRequest>,
) -> HttpResponse {
    log::info!(
        "🔍 POST /profile/optimization-preview - profile: {}, sections: {:?}",
        request.profile_id,
        request.sections
    );

    let claims = match request_claims(&req) {
        Ok(claims) => claims,
        Err(response) => return response,
    };

    if request.sections.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": "Sections must be a non-empty array"
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

    match profile_service::load_profile_data(&db, &user).await {
        Ok(profile) => {
            let response = profile_service::optimization_preview(&agents, &profile, &request.sections);
            HttpResponse::Ok().json(response)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "success": false,
            "error": e
        })),
    }
}

pub async fn apply_optimizations(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    request: web::Json<ApplyRequest>,
) -> HttpResponse {
    log::info!("✏️ POST /profile/apply-optimizations - profile: {}", request.profile_id);

    let claims = match request_claims(&req) {
        Ok(claims) => claims,
        Err(response) => return response,
    };

    if request.optimizations.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": "Optimizations object is required"
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

    match profile_service::apply_optimizations(&db, &user, &request.optimizations).await {
        Ok(applied) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": "Optimizations applied successfully",
            "applied": applied,
            "timestamp": chrono::Utc::now().to_rfc3339()
        })),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": e
        })),
    }
}

pub async fn industry_benchmarks(
    db: web::Data<MongoDB>,
    agents: web::Data<AgentRegistry>,
    req: HttpRequest,
) -> HttpResponse {
    log::info!("📊 GET /profile/industry-benchmarks");

    let claims = match request_claims(&req) {
        Ok(claims) => claims,
        Err(response) => return response,
    };

    let industry = match auth_service::find_user(&db, &claims.sub).await {
        Ok(user) => user.profile_data.and_then(|p| p.industry),
        Err(_) => None,
    };

    let response = profile_service::industry_benchmarks(&agents, industry.as_deref());
    HttpResponse::Ok().json(response)
}
