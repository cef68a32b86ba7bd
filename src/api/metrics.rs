use actix_web::{web, HttpRequest, HttpResponse};

use crate::agents::AgentRegistry;
use crate::api::request_claims;
use crate::database::MongoDB;
use crate::models::profile::LinkedInProfile;
use crate::services::{auth_service, metrics_service, profile_service};

async fn load_profile(db: &MongoDB, req: &HttpRequest) -> Result<LinkedInProfile, HttpResponse> {
    let claims = request_claims(req)?;

    let user = auth_service::find_user(db, &claims.sub).await.map_err(|e| {
        HttpResponse::NotFound().json(serde_json::json!({
            "success": false,
            "error": e
        }))
    })?;

    profile_service::load_profile_data(db, &user).await.map_err(|e| {
        HttpResponse::InternalServerError().json(serde_json::json!({
            "success": false,
            "error": e
        }))
    })
}

#[utoipa::path(
    get,
    path = "/api/metrics/dashboard",
    tag = "Metrics",
    responses(
        (status = 200, description = "Dashboard metrics (PVI, OFR, CAS, CMI)"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn dashboard(
    db: web::Data<MongoDB>,
    agents: web::Data<AgentRegistry>,
    req: HttpRequest,
) -> HttpResponse {
    log::info!("📊 GET /metrics/dashboard");

    match load_profile(&db, &req).await {
        Ok(profile) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "metrics": metrics_service::dashboard_metrics(&agents, &profile)
        })),
        Err(response) => response,
    }
}

pub async fn profile_visibility(
    db: web::Data<MongoDB>,
    agents: web::Data<AgentRegistry>,
    req: HttpRequest,
) -> HttpResponse {
    log::info!("📊 GET /metrics/profile-visibility");

    match load_profile(&db, &req).await {
        Ok(profile) => {
            HttpResponse::Ok().json(agents.optimizer.calculate_profile_visibility_index(&profile))
        }
        Err(response) => response,
    }
}

pub async fn opportunity_flow(
    db: web::Data<MongoDB>,
    agents: web::Data<AgentRegistry>,
    req: HttpRequest,
) -> HttpResponse {
    log::info!("📊 GET /metrics/opportunity-flow");

    match load_profile(&db, &req).await {
        Ok(profile) => {
            HttpResponse::Ok().json(agents.optimizer.calculate_opportunity_flow_rate(&profile))
        }
        Err(response) => response,
    }
}

pub async fn content_amplification(
    db: web::Data<MongoDB>,
    agents: web::Data<AgentRegistry>,
    req: HttpRequest,
) -> HttpResponse {
    log::info!("📊 GET /metrics/content-amplification");

    match load_profile(&db, &req).await {
        Ok(profile) => {
            HttpResponse::Ok().json(agents.optimizer.calculate_content_amplification_score(&profile))
        }
        Err(response) => response,
    }
}

pub async fn career_momentum(
    db: web::Data<MongoDB>,
    agents: web::Data<AgentRegistry>,
    req: HttpRequest,
) -> HttpResponse {
    log::info!("📊 GET /metrics/career-momentum");

    match load_profile(&db, &req).await {
        Ok(profile) => {
            HttpResponse::Ok().json(agents.optimizer.calculate_career_momentum_indicator(&profile))
        }
        Err(response) => response,
    }
}

pub async fn profile_views(db: web::Data<MongoDB>, req: HttpRequest) -> HttpResponse {
    log::info!("📊 GET /metrics/profile-views");

    match load_profile(&db, &req).await {
        Ok(profile) => HttpResponse::Ok().json(metrics_service::profile_views_history(&profile)),
        Err(response) => response,
    }
}

pub async fn content_performance(
    db: web::Data<MongoDB>,
    agents: web::Data<AgentRegistry>,
    req: HttpRequest,
) -> HttpResponse {
    log::info!("📊 GET /metrics/content-performance");

    match load_profile(&db, &req).await {
        Ok(profile) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "performance": metrics_service::content_performance(&agents, &profile)
        })),
        Err(response) => response,
    }
}

pub async fn export(
    db: web::Data<MongoDB>,
    agents: web::Data<AgentRegistry>,
    req: HttpRequest,
) -> HttpResponse {
    log::info!("📊 GET /metrics/export");

    match load_profile(&db, &req).await {
        Ok(profile) => HttpResponse::Ok().json(metrics_service::export_metrics(&agents, &profile)),
        Err(response) => response,
    }
}
