use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::agents::{Agent, AgentRegistry};
use crate::api::request_claims;
use crate::database::MongoDB;
use crate::services::{auth_service, profile_service};

#[derive(Deserialize)]
pub struct GenerateCodeRequest {
    pub feature: String,
    pub language: String,
}

/// Analyze the caller's profile with the optimizer agent. Same engine as
/// `/api/profile/analyze`; this endpoint exists for the agent console.
pub async fn analyze(
    db: web::Data<MongoDB>,
    agents: web::Data<AgentRegistry>,
    req: HttpRequest,
) -> HttpResponse {
    log::info!("🤖 POST /agent/analyze");

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
            log::error!("❌ Agent analysis failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// Agent system overview: each agent's capabilities plus the project
/// manager's status snapshot.
pub async fn status(agents: web::Data<AgentRegistry>, req: HttpRequest) -> HttpResponse {
    log::info!("🤖 GET /agent/status");

    if let Err(response) = request_claims(&req) {
        return response;
    }

    let capability_list = |agent: &dyn Agent| {
        serde_json::json!({
            "name": agent.name(),
            "capabilities": agent.capabilities(),
        })
    };

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "agents": [
            capability_list(&agents.optimizer),
            capability_list(&agents.security),
            capability_list(&agents.debugger),
            capability_list(&agents.programmer),
            capability_list(&agents.project_manager),
        ],
        "project": agents.project_manager.get_project_status(),
    }))
}

/// Programmer agent output, reviewed by the debugger and gated by the
/// security agent. Developer or admin role required.
pub async fn generate_code(
    agents: web::Data<AgentRegistry>,
    req: HttpRequest,
    request: web::Json<GenerateCodeRequest>,
) -> HttpResponse {
    log::info!(
        "🤖 POST /agent/generate-code - feature: {}, language: {}",
        request.feature,
        request.language
    );

    let claims = match request_claims(&req) {
        Ok(claims) => claims,
        Err(response) => return response,
    };

    if !claims.is_developer() {
        log::warn!("❌ Code generation denied for role '{}' ({})", claims.role, claims.sub);
        return HttpResponse::Forbidden().json(serde_json::json!({
            "success": false,
            "error": "Not authorized to access this resource"
        }));
    }

    let generated = agents.programmer.generate_code(&request.feature, &request.language);
    let review = agents.debugger.debug_code(&generated.code, &agents.security);
    let security_check = agents.security.check_code_security(&generated.code);

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "generated": generated,
        "review": {
            "issues": review.issues,
            "qualityScore": review.quality_score,
            "complexity": review.complexity,
            "summary": review.summary,
        },
        "security": security_check
    }))
}
