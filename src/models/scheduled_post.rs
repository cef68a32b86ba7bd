use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

pub const STATUS_SCHEDULED: &str = "scheduled";
pub const STATUS_PUBLISHED: &str = "published";
pub const STATUS_FAILED: &str = "failed";

/// Scheduled LinkedIn post (collection `scheduled_posts`). The content
/// scheduler job publishes due entries and flips `status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledPost {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub content: String,
    pub hashtags: Vec<String>,
    /// Unix millis of the requested posting time.
    pub scheduled_for: i64,
    pub status: String,
    pub created_at: Option<BsonDateTime>,
}

/// Response shape for the scheduled-content endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPostResponse {
    pub id: String,
    pub content: String,
    pub hashtags: Vec<String>,
    pub scheduled_for: i64,
    pub status: String,
}

impl From<ScheduledPost> for ScheduledPostResponse {
    fn from(post: ScheduledPost) -> Self {
        ScheduledPostResponse {
            id: post.id.map(|id| id.to_hex()).unwrap_or_default(),
            content: post.content,
            hashtags: post.hashtags,
            scheduled_for: post.scheduled_for,
            status: post.status,
        }
    }
}
