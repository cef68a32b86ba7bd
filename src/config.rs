use std::env;

// Configuration getters with environment fallbacks.
// Every setting can be overridden via .env (loaded in main).

pub fn jwt_secret() -> String {
    env::var("JWT_SECRET").unwrap_or_else(|_| "default-secret-change-me".to_string())
}

pub fn jwt_issuer() -> String {
    env::var("JWT_ISSUER").unwrap_or_else(|_| "hunterxjobs-service".to_string())
}

pub fn jwt_audience() -> String {
    env::var("JWT_AUDIENCE").unwrap_or_else(|_| "hunterxjobs-api".to_string())
}

/// Token lifetime in hours (default: 24h, matching JWT_EXPIRATION=24h).
pub fn jwt_expiration_hours() -> i64 {
    env::var("JWT_EXPIRATION_HOURS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(24)
}

pub fn frontend_url() -> String {
    env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

pub fn linkedin_client_id() -> Result<String, String> {
    env::var("LINKEDIN_CLIENT_ID").map_err(|_| "LINKEDIN_CLIENT_ID not configured".to_string())
}

pub fn linkedin_client_secret() -> Result<String, String> {
    env::var("LINKEDIN_CLIENT_SECRET")
        .map_err(|_| "LINKEDIN_CLIENT_SECRET not configured".to_string())
}

pub fn linkedin_redirect_uri() -> String {
    env::var("LINKEDIN_REDIRECT_URI")
        .unwrap_or_else(|_| "http://localhost:5000/api/linkedin/callback".to_string())
}

/// OpenID Connect scopes plus the member-social scope for posting.
pub fn linkedin_scope() -> String {
    env::var("LINKEDIN_SCOPE")
        .unwrap_or_else(|_| "openid profile email w_member_social".to_string())
}

pub fn environment() -> String {
    env::var("NODE_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}
