use crate::config;
use crate::database::MongoDB;
use crate::models::user::{User, UserInfo, UserRole};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

// JWT Claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // user_id
    pub email: String,
    pub name: Option<String>,
    pub role: String,
    pub iat: usize, // issued at
    pub exp: usize, // expiration
    pub jti: String, // JWT ID
    pub aud: String, // audience
    pub iss: String, // issuer
}

impl Claims {
    pub fn is_developer(&self) -> bool {
        self.role == "developer" || self.role == "admin"
    }

    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

// Request/Response structures
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeveloperRequest {
    pub email: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: UserInfo,
}

// Generate JWT token
pub fn generate_jwt(user: &User) -> Result<String, String> {
    let iat = Utc::now().timestamp() as usize;
    let exp = (Utc::now() + Duration::hours(config::jwt_expiration_hours())).timestamp() as usize;

    let claims = Claims {
        sub: user.user_id.clone(),
        email: user.email.clone(),
        name: Some(user.name.clone()),
        role: user.role.as_str().to_string(),
        iat,
        exp,
        jti: Uuid::new_v4().to_string(),
        aud: config::jwt_audience(),
        iss: config::jwt_issuer(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config::jwt_secret().as_ref()),
    )
    .map_err(|e| format!("Failed to generate token: {}", e))
}

// Verify JWT token
pub fn verify_token(token: &str) -> Result<Claims, String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[config::jwt_audience()]);

    let mut issuers = HashSet::new();
    issuers.insert(config::jwt_issuer());
    validation.iss = Some(issuers);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config::jwt_secret().as_ref()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| format!("Invalid token: {}", e))
}

// User registration
pub async fn register(db: &MongoDB, request: &RegisterRequest) -> Result<AuthResponse, String> {
    let collection = db.collection::<User>("users");

    if request.password.len() < 6 {
        return Err("Password must be at least 6 characters".to_string());
    }

    let email = request.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err("A valid email is required".to_string());
    }

    let existing = collection
        .find_one(doc! { "email": &email })
        .await
        .map_err(|e| format!("Database error: {}", e))?;
    if existing.is_some() {
        return Err("User already exists".to_string());
    }

    let hashed_password =
        hash(&request.password, DEFAULT_COST).map_err(|e| format!("Failed to hash password: {}", e))?;

    let new_user = User {
        _id: None,
        user_id: ObjectId::new().to_hex(),
        name: request.name.clone(),
        email,
        password: Some(hashed_password),
        role: UserRole::User,
        linkedin_id: None,
        linkedin_access_token: None,
        linkedin_token_expiry: None,
        profile_data: None,
        created_at: Some(BsonDateTime::now()),
        last_login: Some(BsonDateTime::now()),
    };

    collection
        .insert_one(&new_user)
        .await
        .map_err(|e| format!("Failed to create user: {}", e))?;

    let token = generate_jwt(&new_user)?;

    log::info!("✅ User registered successfully: {}", new_user.email);

    Ok(AuthResponse { success: true, token, user: UserInfo::from(&new_user) })
}

// User login
pub async fn login(db: &MongoDB, request: &LoginRequest) -> Result<AuthResponse, String> {
    let collection = db.collection::<User>("users");

    let email = request.email.trim().to_lowercase();
    let user = collection
        .find_one(doc! { "email": &email })
        .await
        .map_err(|e| format!("Database error: {}", e))?
        .ok_or_else(|| "Invalid credentials".to_string())?;

    let stored_password = user
        .password
        .as_ref()
        .ok_or_else(|| "Invalid credentials".to_string())?;

    let valid = verify(&request.password, stored_password)
        .map_err(|e| format!("Password verification error: {}", e))?;
    if !valid {
        return Err("Invalid credentials".to_string());
    }

    collection
        .update_one(
            doc! { "user_id": &user.user_id },
            doc! { "$set": { "last_login": BsonDateTime::now() } },
        )
        .await
        .map_err(|e| format!("Failed to update last login: {}", e))?;

    let token = generate_jwt(&user)?;

    Ok(AuthResponse { success: true, token, user: UserInfo::from(&user) })
}

// Get full user document by user_id
pub async fn find_user(db: &MongoDB, user_id: &str) -> Result<User, String> {
    let collection = db.collection::<User>("users");

    collection
        .find_one(doc! { "user_id": user_id })
        .await
        .map_err(|e| format!("Database error: {}", e))?
        .ok_or_else(|| "User not found".to_string())
}

// Get current user info
pub async fn get_current_user(db: &MongoDB, user_id: &str) -> Result<UserInfo, String> {
    let user = find_user(db, user_id).await?;
    Ok(UserInfo::from(&user))
}

// Update name/email/password of the current user
pub async fn update_user(
    db: &MongoDB,
    user_id: &str,
    request: &UpdateUserRequest,
) -> Result<UserInfo, String> {
    let collection = db.collection::<User>("users");

    let mut updates = doc! {};
    if let Some(name) = &request.name {
        if name.trim().is_empty() {
            return Err("Name cannot be empty".to_string());
        }
        updates.insert("name", name.trim());
    }
    if let Some(email) = &request.email {
        let email = email.trim().to_lowercase();
        if !email.contains('@') {
            return Err("A valid email is required".to_string());
        }
        // The unique index would also reject this, but check first for a
        // clean error message.
        let taken = collection
            .find_one(doc! { "email": &email, "user_id": { "$ne": user_id } })
            .await
            .map_err(|e| format!("Database error: {}", e))?;
        if taken.is_some() {
            return Err("Email is already in use".to_string());
        }
        updates.insert("email", email);
    }
    if let Some(password) = &request.password {
        if password.len() < 6 {
            return Err("Password must be at least 6 characters".to_string());
        }
        let hashed =
            hash(password, DEFAULT_COST).map_err(|e| format!("Failed to hash password: {}", e))?;
        updates.insert("password", hashed);
    }

    if updates.is_empty() {
        return Err("Nothing to update".to_string());
    }

    collection
        .update_one(doc! { "user_id": user_id }, doc! { "$set": updates })
        .await
        .map_err(|e| format!("Failed to update user: {}", e))?;

    get_current_user(db, user_id).await
}

// Promote an account to the developer role (admin only)
pub async fn create_developer_account(db: &MongoDB, email: &str) -> Result<UserInfo, String> {
    let collection = db.collection::<User>("users");

    let email = email.trim().to_lowercase();
    let user = collection
        .find_one(doc! { "email": &email })
        .await
        .map_err(|e| format!("Database error: {}", e))?
        .ok_or_else(|| format!("User {} not found", email))?;

    collection
        .update_one(doc! { "user_id": &user.user_id }, doc! { "$set": { "role": "developer" } })
        .await
        .map_err(|e| format!("Failed to update role: {}", e))?;

    log::info!("✅ Developer role granted to {}", email);

    get_current_user(db, &user.user_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::UserRole;

    fn test_user() -> User {
        User {
            _id: None,
            user_id: "64f000000000000000000001".to_string(),
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password: None,
            role: UserRole::Developer,
            linkedin_id: None,
            linkedin_access_token: None,
            linkedin_token_expiry: None,
            profile_data: None,
            created_at: None,
            last_login: None,
        }
    }

    #[test]
    fn jwt_round_trip_preserves_claims() {
        let user = test_user();
        let token = generate_jwt(&user).unwrap();
        let claims = verify_token(&token).unwrap();
        assert_eq!(claims.sub, user.user_id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.role, "developer");
        assert!(claims.is_developer());
        assert!(!claims.is_admin());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let user = test_user();
        let token = generate_jwt(&user).unwrap();
        let mut tampered = token.clone();
        tampered.push('x');
        assert!(verify_token(&tampered).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(verify_token("not-a-jwt").is_err());
    }
}
