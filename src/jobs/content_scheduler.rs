// ==================== CONTENT SCHEDULER ====================
// Job em background que publica posts agendados quando chega a hora.
// Roda a cada minuto; cada post é marcado published ou failed.

use futures::stream::TryStreamExt;
use mongodb::bson::{doc, DateTime as BsonDateTime};
use tokio::time::{interval, Duration};

use crate::database::MongoDB;
use crate::models::scheduled_post::{ScheduledPost, STATUS_FAILED, STATUS_PUBLISHED, STATUS_SCHEDULED};
use crate::models::user::User;
use crate::services::linkedin_service;
use crate::utils::AppError;

/// Starts the scheduled-content publisher. Runs an immediate pass on startup
/// so posts that came due while the server was down are not lost, then ticks
/// once per minute.
pub async fn start_content_scheduler(db: MongoDB) {
    log::info!("📅 Starting content scheduler (runs every minute)");

    tokio::spawn(async move {
        log::info!("🚀 Running initial scheduled-post check on startup...");
        match publish_due_posts(&db).await {
            Ok(count) => {
                log::info!("✅ Startup scheduled-post check completed: {} posts processed", count);
            }
            Err(e) => {
                log::error!("❌ Startup scheduled-post check failed: {}", e);
            }
        }

        let mut interval = interval(Duration::from_secs(60));

        loop {
            interval.tick().await;

            match publish_due_posts(&db).await {
                Ok(0) => {}
                Ok(count) => {
                    log::info!("✅ Scheduler tick: {} posts processed", count);
                }
                Err(e) => {
                    log::error!("❌ Scheduler tick failed: {}", e);
                }
            }
        }
    });

    log::info!("✅ Content scheduler started successfully");
}

/// Publishes every post whose scheduled time has passed. Returns the number
/// of posts processed (published or failed).
async fn publish_due_posts(db: &MongoDB) -> Result<usize, AppError> {
    let collection = db.collection::<ScheduledPost>("scheduled_posts");

    let now = BsonDateTime::now().timestamp_millis();
    let filter = doc! {
        "status": STATUS_SCHEDULED,
        "scheduled_for": { "$lte": now },
    };

    let cursor = collection
        .find(filter)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    let due: Vec<ScheduledPost> = cursor
        .try_collect()
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    let mut processed = 0;
    let mut success_count = 0;
    let mut error_count = 0;

    for post in due {
        processed += 1;
        let post_id = post.id;

        match publish_post(db, &post).await {
            Ok(_) => {
                success_count += 1;
                log::info!("    ✅ Published scheduled post for user {}", post.user_id);
                mark_post(db, post_id, STATUS_PUBLISHED).await;
            }
            Err(e) => {
                error_count += 1;
                log::error!("    ❌ Failed to publish post for {}: {}", post.user_id, e);
                mark_post(db, post_id, STATUS_FAILED).await;
            }
        }

        // Pequeno delay entre posts para não estourar rate limit da API
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    if processed > 0 {
        log::info!(
            "📊 Scheduler summary: {} posts, {} published, {} failed",
            processed,
            success_count,
            error_count
        );
    }

    Ok(processed)
}

async fn publish_post(db: &MongoDB, post: &ScheduledPost) -> Result<(), AppError> {
    let users = db.collection::<User>("users");

    let user = users
        .find_one(doc! { "user_id": &post.user_id })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?
        .ok_or_else(|| AppError::NotFound(format!("user {}", post.user_id)))?;

    linkedin_service::post_content(&user, &post.content, &post.hashtags)
        .await
        .map_err(AppError::LinkedInError)?;

    Ok(())
}

async fn mark_post(db: &MongoDB, post_id: Option<mongodb::bson::oid::ObjectId>, status: &str) {
    let Some(post_id) = post_id else {
        return;
    };

    let collection = db.collection::<ScheduledPost>("scheduled_posts");
    if let Err(e) = collection
        .update_one(doc! { "_id": post_id }, doc! { "$set": { "status": status } })
        .await
    {
        log::error!("❌ Failed to mark post {} as {}: {}", post_id.to_hex(), status, e);
    }
}
