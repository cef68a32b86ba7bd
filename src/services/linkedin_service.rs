use mongodb::bson::doc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config;
use crate::database::MongoDB;
use crate::models::profile::LinkedInProfile;
use crate::models::user::User;

const AUTHORIZATION_URL: &str = "https://www.linkedin.com/oauth/v2/authorization";
const ACCESS_TOKEN_URL: &str = "https://www.linkedin.com/oauth/v2/accessToken";
// OpenID Connect userinfo endpoint
const USERINFO_URL: &str = "https://api.linkedin.com/v2/userinfo";
const UGC_POSTS_URL: &str = "https://api.linkedin.com/v2/ugcPosts";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectResponse {
    pub success: bool,
    pub message: String,
    pub redirect_url: String,
    pub state: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStatus {
    pub connected: bool,
    pub expires_at: Option<i64>,
    pub permissions: Vec<String>,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub success: bool,
    pub message: String,
    pub post_id: String,
    pub timestamp: String,
}

/// Extract the user id from the state parameter built above.
pub fn user_id_from_state(state: &str) -> Option<&str> {
    state.split('.').next().filter(|id| !id.is_empty())
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct UserInfoResponse {
    sub: String,
    given_name: Option<String>,
    family_name: Option<String>,
    email: Option<String>,
    picture: Option<String>,
}

/// Build the LinkedIn authorization URL. The state parameter carries the
/// user id plus a nonce so the public callback can attribute the code.
pub fn authorization_url(user_id: &str) -> Result<ConnectResponse, String> {
    let client_id = config::linkedin_client_id()?;
    // Secret is not used in the URL but its absence means the callback will
    // fail; surface the misconfiguration here.
    config::linkedin_client_secret()?;
    let redirect_uri = config::linkedin_redirect_uri();
    let scope = config::linkedin_scope();

    let state = format!("{}.{}", user_id, Uuid::new_v4().simple());

    let params = vec![
        ("response_type", "code"),
        ("client_id", client_id.as_str()),
        ("redirect_uri", redirect_uri.as_str()),
        ("state", state.as_str()),
        ("scope", scope.as_str()),
    ];

    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    let redirect_url = format!("{}?{}", AUTHORIZATION_URL, query_string);

    Ok(ConnectResponse {
        success: true,
        message: "LinkedIn connection initiated".to_string(),
        redirect_url,
        state,
    })
}

/// Exchange the authorization code and store the token on the user.
/// Returns the token lifetime in seconds.
pub async fn handle_oauth_callback(db: &MongoDB, user_id: &str, code: &str) -> Result<i64, String> {
    let client_id = config::linkedin_client_id()?;
    let client_secret = config::linkedin_client_secret()?;
    let redirect_uri = config::linkedin_redirect_uri();

    log::info!("🔗 Exchanging LinkedIn authorization code for access token");

    let client = reqwest::Client::new();
    let token_response = client
        .post(ACCESS_TOKEN_URL)
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri.as_str()),
            ("client_id", client_id.as_str()),
            ("client_secret", client_secret.as_str()),
        ])
        .send()
        .await
        .map_err(|e| format!("Failed to exchange code: {}", e))?;

    if !token_response.status().is_success() {
        return Err(format!("LinkedIn token exchange failed: {}", token_response.status()));
    }

    let tokens: TokenResponse = token_response
        .json()
        .await
        .map_err(|e| format!("Failed to parse token response: {}", e))?;

    log::info!("✅ Received LinkedIn access token (expires in {}s)", tokens.expires_in);

    // Fetch the member id while the token is fresh so posting has an author urn
    let profile = fetch_profile(&tokens.access_token).await.ok();

    let users = db.collection::<User>("users");
    let expiry = mongodb::bson::DateTime::from_millis(
        mongodb::bson::DateTime::now().timestamp_millis() + tokens.expires_in * 1000,
    );

    let mut update = doc! {
        "linkedin_access_token": &tokens.access_token,
        "linkedin_token_expiry": expiry,
    };
    if let Some(profile) = &profile {
        if let Some(id) = &profile.id {
            update.insert("linkedin_id", id.as_str());
        }
        let profile_bson = mongodb::bson::to_bson(profile)
            .map_err(|e| format!("Failed to serialize profile: {}", e))?;
        update.insert("profile_data", profile_bson);
    }

    let result = users
        .update_one(doc! { "user_id": user_id }, doc! { "$set": update })
        .await
        .map_err(|e| format!("Failed to save LinkedIn token: {}", e))?;

    if result.matched_count == 0 {
        return Err("User not found when saving LinkedIn token".to_string());
    }

    Ok(tokens.expires_in)
}

pub fn connection_status(user: &User) -> ConnectionStatus {
    if user.linkedin_token_valid() {
        ConnectionStatus {
            connected: true,
            expires_at: user.linkedin_token_expiry.map(|e| e.timestamp_millis()),
            permissions: config::linkedin_scope().split(' ').map(String::from).collect(),
            message: "LinkedIn account connected".to_string(),
        }
    } else if user.linkedin_access_token.is_some() {
        ConnectionStatus {
            connected: false,
            expires_at: user.linkedin_token_expiry.map(|e| e.timestamp_millis()),
            permissions: vec![],
            message: "LinkedIn token expired; reconnect your account".to_string(),
        }
    } else {
        ConnectionStatus {
            connected: false,
            expires_at: None,
            permissions: vec![],
            message: "LinkedIn account not connected".to_string(),
        }
    }
}

/// Fetch profile data from the OpenID userinfo endpoint.
pub async fn fetch_profile(access_token: &str) -> Result<LinkedInProfile, String> {
    log::info!("🔗 Fetching LinkedIn profile with access token");

    let client = reqwest::Client::new();
    let response = client
        .get(USERINFO_URL)
        .header("Authorization", format!("Bearer {}", access_token))
        .send()
        .await
        .map_err(|e| format!("Failed to fetch LinkedIn profile: {}", e))?;

    if !response.status().is_success() {
        return Err(format!("LinkedIn userinfo error: {}", response.status()));
    }

    let info: UserInfoResponse = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse LinkedIn userinfo: {}", e))?;

    let mut profile = LinkedInProfile::default();
    profile.id = Some(info.sub);
    profile.first_name = info.given_name;
    profile.last_name = info.family_name;
    profile.email = info.email;
    profile.profile_picture = info.picture;

    log::info!("✅ LinkedIn profile retrieved for {}", profile.full_name());

    Ok(profile)
}

/// Publish a UGC post with the user's stored token.
pub async fn post_content(user: &User, content: &str, hashtags: &[String]) -> Result<PostResponse, String> {
    let access_token = user
        .linkedin_access_token
        .as_ref()
        .filter(|_| user.linkedin_token_valid())
        .ok_or_else(|| "LinkedIn access token is missing or expired. Please reconnect.".to_string())?;

    let author_id = user
        .linkedin_id
        .as_ref()
        .ok_or_else(|| "LinkedIn member id is missing. Please reconnect.".to_string())?;

    let text = if hashtags.is_empty() {
        content.to_string()
    } else {
        format!("{}\n\n{}", content, hashtags.join(" "))
    };

    let body = serde_json::json!({
        "author": format!("urn:li:person:{}", author_id),
        "lifecycleState": "PUBLISHED",
        "specificContent": {
            "com.linkedin.ugc.ShareContent": {
                "shareCommentary": { "text": text },
                "shareMediaCategory": "NONE"
            }
        },
        "visibility": {
            "com.linkedin.ugc.MemberNetworkVisibility": "PUBLIC"
        }
    });

    let client = reqwest::Client::new();
    let response = client
        .post(UGC_POSTS_URL)
        .header("Authorization", format!("Bearer {}", access_token))
        .header("X-Restli-Protocol-Version", "2.0.0")
        .json(&body)
        .send()
        .await
        .map_err(|e| format!("Failed to post to LinkedIn: {}", e))?;

    if !response.status().is_success() {
        return Err(format!("LinkedIn post failed: {}", response.status()));
    }

    let post_id = response
        .headers()
        .get("x-restli-id")
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .unwrap_or_else(|| format!("linkedin_post_{}", Uuid::new_v4().simple()));

    log::info!("✅ Content posted to LinkedIn: {}", post_id);

    Ok(PostResponse {
        success: true,
        message: "Content posted to LinkedIn successfully".to_string(),
        post_id,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Remove stored LinkedIn credentials.
pub async fn disconnect_account(db: &MongoDB, user_id: &str) -> Result<(), String> {
    let users = db.collection::<User>("users");

    let result = users
        .update_one(
            doc! { "user_id": user_id },
            doc! { "$unset": {
                "linkedin_access_token": "",
                "linkedin_token_expiry": "",
                "linkedin_id": "",
            }},
        )
        .await
        .map_err(|e| format!("Failed to disconnect LinkedIn: {}", e))?;

    if result.matched_count == 0 {
        return Err("User not found".to_string());
    }

    log::info!("✅ LinkedIn account disconnected for user {}", user_id);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_round_trips_user_id() {
        assert_eq!(user_id_from_state("64f0a.1c9e3d"), Some("64f0a"));
        assert_eq!(user_id_from_state("just-an-id"), Some("just-an-id"));
        assert_eq!(user_id_from_state(""), None);
        assert_eq!(user_id_from_state(".nonce-only"), None);
    }
}
