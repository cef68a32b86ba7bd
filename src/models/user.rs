use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

use crate::models::profile::LinkedInProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Developer,
    Admin,
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::User
    }
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Developer => "developer",
            UserRole::Admin => "admin",
        }
    }
}

/// User document in the `users` collection. `user_id` is the primary
/// identifier used in JWT claims and cross-collection references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub user_id: String,
    pub name: String,
    pub email: String,
    /// bcrypt hash; never returned to clients.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    pub linkedin_id: Option<String>,
    pub linkedin_access_token: Option<String>,
    pub linkedin_token_expiry: Option<BsonDateTime>,
    pub profile_data: Option<LinkedInProfile>,
    pub created_at: Option<BsonDateTime>,
    pub last_login: Option<BsonDateTime>,
}

impl User {
    pub fn linkedin_token_valid(&self) -> bool {
        match (&self.linkedin_access_token, &self.linkedin_token_expiry) {
            (Some(_), Some(expiry)) => expiry.timestamp_millis() > BsonDateTime::now().timestamp_millis(),
            _ => false,
        }
    }
}

/// Public view of a user, safe to return from the API.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub linkedin_connected: bool,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        UserInfo {
            id: user.user_id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            linkedin_connected: user.linkedin_access_token.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::Developer).unwrap(), "\"developer\"");
        let parsed: UserRole = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(parsed, UserRole::Admin);
    }

    #[test]
    fn token_validity_requires_future_expiry() {
        let mut user = User {
            _id: None,
            user_id: "u1".to_string(),
            name: "Test".to_string(),
            email: "t@example.com".to_string(),
            password: None,
            role: UserRole::User,
            linkedin_id: None,
            linkedin_access_token: Some("token".to_string()),
            linkedin_token_expiry: Some(BsonDateTime::from_millis(
                BsonDateTime::now().timestamp_millis() + 60_000,
            )),
            profile_data: None,
            created_at: None,
            last_login: None,
        };
        assert!(user.linkedin_token_valid());

        user.linkedin_token_expiry =
            Some(BsonDateTime::from_millis(BsonDateTime::now().timestamp_millis() - 60_000));
        assert!(!user.linkedin_token_valid());

        user.linkedin_access_token = None;
        assert!(!user.linkedin_token_valid());
    }
}
