use actix_web::{web, HttpRequest, HttpResponse};
use chrono::DateTime;
use serde::Deserialize;

use crate::agents::AgentRegistry;
use crate::api::request_claims;
use crate::database::MongoDB;
use crate::services::{auth_service, content_service, profile_service};

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub content_type: String,
    pub persona: String,
    pub topic: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub content: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub content: String,
    /// RFC 3339 timestamp of the requested posting time.
    pub post_date: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
}

#[utoipa::path(
    post,
    path = "/api/content/generate",
    tag = "Content",
    responses(
        (status = 200, description = "Generated content with hashtags and VPPI score"),
        (status = 400, description = "Content failed security screening")
    ),
    security(("bearer_auth" = []))
)]
pub async fn generate(
    agents: web::Data<AgentRegistry>,
    req: HttpRequest,
    request: web::Json<GenerateRequest>,
) -> HttpResponse {
    log::info!(
        "✍️ POST /content/generate - type: {}, persona: {}",
        request.content_type,
        request.persona
    );

    if let Err(response) = request_claims(&req) {
        return response;
    }

    if request.topic.trim().is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": "Topic is required"
        }));
    }

    match content_service::generate_content(&agents, &request.topic, &request.persona) {
        Ok(content) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "generated": content
        })),
        Err(e) => {
            log::warn!("❌ Content generation blocked: {}", e);
            HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

pub async fn personas(agents: web::Data<AgentRegistry>, req: HttpRequest) -> HttpResponse {
    log::info!("🎭 GET /content/personas");

    if let Err(response) = request_claims(&req) {
        return response;
    }

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "personas": agents.optimizer.writing_personas()
    }))
}

pub async fn templates(req: HttpRequest) -> HttpResponse {
    log::info!("📄 GET /content/templates");

    if let Err(response) = request_claims(&req) {
        return response;
    }

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "templates": content_service::content_templates()
    }))
}

pub async fn analyze(
    agents: web::Data<AgentRegistry>,
    req: HttpRequest,
    request: web::Json<AnalyzeRequest>,
) -> HttpResponse {
    log::info!("📈 POST /content/analyze");

    if let Err(response) = request_claims(&req) {
        return response;
    }

    match content_service::analyze_virality(&agents, &request.content) {
        Ok(analysis) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "analysis": analysis
        })),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": e
        })),
    }
}

pub async fn hashtags(db: web::Data<MongoDB>, req: HttpRequest) -> HttpResponse {
    log::info!("#️⃣ GET /content/hashtags");

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
            "hashtags": content_service::trending_hashtags(&profile)
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "success": false,
            "error": e
        })),
    }
}

pub async fn schedule(
    db: web::Data<MongoDB>,
    agents: web::Data<AgentRegistry>,
    req: HttpRequest,
    request: web::Json<ScheduleRequest>,
) -> HttpResponse {
    log::info!("📅 POST /content/schedule - for {}", request.post_date);

    let claims = match request_claims(&req) {
        Ok(claims) => claims,
        Err(response) => return response,
    };

    let post_date_millis = match DateTime::parse_from_rfc3339(&request.post_date) {
        Ok(date) => date.timestamp_millis(),
        Err(_) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": "Post date must be an RFC 3339 timestamp"
            }))
        }
    };

    match content_service::schedule_content(
        &db,
        &agents,
        &claims.sub,
        &request.content,
        request.hashtags.clone(),
        post_date_millis,
    )
    .await
    {
        Ok(response) => HttpResponse::Created().json(response),
        Err(e) => {
            log::warn!("❌ Scheduling failed: {}", e);
            HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

pub async fn scheduled(db: web::Data<MongoDB>, req: HttpRequest) -> HttpResponse {
    log::info!("📅 GET /content/scheduled");

    let claims = match request_claims(&req) {
        Ok(claims) => claims,
        Err(response) => return response,
    };

    match content_service::get_scheduled_content(&db, &claims.sub).await {
        Ok(posts) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "scheduled": posts
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "success": false,
            "error": e
        })),
    }
}

pub async fn delete_scheduled(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    path: web::Path<String>,
) -> HttpResponse {
    let id = path.into_inner();
    log::info!("🗑️ DELETE /content/scheduled/{}", id);

    let claims = match request_claims(&req) {
        Ok(claims) => claims,
        Err(response) => return response,
    };

    match content_service::delete_scheduled_content(&db, &claims.sub, &id).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": format!("Scheduled content {} deleted successfully", id)
        })),
        Err(e) => HttpResponse::NotFound().json(serde_json::json!({
            "success": false,
            "error": e
        })),
    }
}
