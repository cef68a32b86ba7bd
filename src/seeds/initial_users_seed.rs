use bcrypt::{hash, DEFAULT_COST};
use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime};

use crate::database::MongoDB;
use crate::models::user::{User, UserRole};

/// Creates the initial admin account on first startup. Credentials come from
/// the environment; without ADMIN_PASSWORD no account is created.
pub async fn seed_initial_admin(db: &MongoDB) {
    let collection = db.collection::<User>("users");

    match collection.find_one(doc! { "role": "admin" }).await {
        Ok(Some(_)) => {
            log::debug!("ℹ️  Admin user already exists");
            return;
        }
        Ok(None) => {}
        Err(e) => {
            log::error!("❌ Failed to check for admin user: {}", e);
            return;
        }
    }

    let password = match std::env::var("ADMIN_PASSWORD") {
        Ok(password) if password.len() >= 8 => password,
        Ok(_) => {
            log::warn!("⚠️  ADMIN_PASSWORD too short (min 8 chars); skipping admin seed");
            return;
        }
        Err(_) => {
            log::warn!("⚠️  ADMIN_PASSWORD not set; skipping admin seed");
            return;
        }
    };

    let email =
        std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@hunterxjobs.xyz".to_string());

    let hashed = match hash(&password, DEFAULT_COST) {
        Ok(hashed) => hashed,
        Err(e) => {
            log::error!("❌ Failed to hash admin password: {}", e);
            return;
        }
    };

    let admin = User {
        _id: None,
        user_id: ObjectId::new().to_hex(),
        name: "Admin".to_string(),
        email: email.clone(),
        password: Some(hashed),
        role: UserRole::Admin,
        linkedin_id: None,
        linkedin_access_token: None,
        linkedin_token_expiry: None,
        profile_data: None,
        created_at: Some(BsonDateTime::now()),
        last_login: None,
    };

    match collection.insert_one(&admin).await {
        Ok(_) => log::info!("🌱 Admin user created: {}", email),
        Err(e) => log::error!("❌ Failed to create admin user: {}", e),
    }
}
