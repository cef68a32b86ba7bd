use actix_web::{web, HttpRequest, HttpResponse};

use crate::api::request_claims;
use crate::database::MongoDB;
use crate::services::auth_service;
use crate::services::auth_service::{AuthResponse, LoginRequest, RegisterRequest};

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registration successful", body = AuthResponse),
        (status = 400, description = "Invalid request or user already exists")
    )
)]
pub async fn register(
    db: web::Data<MongoDB>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse {
    log::info!("📝 POST /auth/register - email: {}", request.email);

    match auth_service::register(&db, &request).await {
        Ok(response) => {
            log::info!("✅ Registration successful: {}", request.email);
            HttpResponse::Created().json(response)
        }
        Err(e) => {
            log::warn!("❌ Registration failed: {} - {}", request.email, e);
            HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(db: web::Data<MongoDB>, request: web::Json<LoginRequest>) -> HttpResponse {
    log::info!("🔐 POST /auth/login - email: {}", request.email);

    match auth_service::login(&db, &request).await {
        Ok(response) => {
            log::info!("✅ Login successful: {}", request.email);
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log::warn!("❌ Login failed: {} - {}", request.email, e);
            HttpResponse::Unauthorized().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/auth/user",
    tag = "Auth",
    responses(
        (status = 200, description = "Current user information"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_current_user(db: web::Data<MongoDB>, req: HttpRequest) -> HttpResponse {
    log::info!("👤 GET /auth/user");

    let claims = match request_claims(&req) {
        Ok(claims) => claims,
        Err(response) => return response,
    };

    match auth_service::get_current_user(&db, &claims.sub).await {
        Ok(user) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "user": user
        })),
        Err(e) => {
            log::error!("❌ Failed to get user {}: {}", claims.sub, e);
            HttpResponse::NotFound().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

pub async fn update_user(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    request: web::Json<auth_service::UpdateUserRequest>,
) -> HttpResponse {
    log::info!("✏️ POST /auth/update");

    let claims = match request_claims(&req) {
        Ok(claims) => claims,
        Err(response) => return response,
    };

    match auth_service::update_user(&db, &claims.sub, &request).await {
        Ok(user) => {
            log::info!("✅ User updated: {}", claims.sub);
            HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "user": user
            }))
        }
        Err(e) => {
            log::warn!("❌ Update failed for {}: {}", claims.sub, e);
            HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// Stateless logout: the client discards the token; the server just
/// acknowledges so the frontend flow has an endpoint to call.
pub async fn logout() -> HttpResponse {
    log::info!("👋 POST /auth/logout");

    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Logged out"
    }))
}

pub async fn check_status() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "status": "ok",
        "service": "auth",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Grant the developer role to an account. Admin only.
pub async fn create_developer_account(
    db: web::Data<MongoDB>,
    req: HttpRequest,
    request: web::Json<auth_service::DeveloperRequest>,
) -> HttpResponse {
    log::info!("🛠️ POST /auth/developer - email: {}", request.email);

    let claims = match request_claims(&req) {
        Ok(claims) => claims,
        Err(response) => return response,
    };

    if !claims.is_admin() {
        log::warn!("❌ Developer promotion denied for non-admin {}", claims.sub);
        return HttpResponse::Forbidden().json(serde_json::json!({
            "success": false,
            "error": "Not authorized to access this resource"
        }));
    }

    match auth_service::create_developer_account(&db, &request.email).await {
        Ok(user) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "user": user
        })),
        Err(e) => {
            log::warn!("❌ Developer promotion failed: {}", e);
            HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}
