use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime};
use serde::Serialize;

use crate::agents::optimizer::{GeneratedContent, ViralityAnalysis};
use crate::agents::AgentRegistry;
use crate::database::MongoDB;
use crate::models::profile::LinkedInProfile;
use crate::models::scheduled_post::{
    ScheduledPost, ScheduledPostResponse, STATUS_SCHEDULED,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentTemplate {
    pub name: String,
    pub description: String,
    pub structure: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingHashtags {
    pub trending: Vec<String>,
    pub industry: Vec<String>,
    pub personalized: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub success: bool,
    pub message: String,
    pub id: String,
    pub scheduled_for: i64,
}

/// Generate content after screening the inputs with the security agent.
pub fn generate_content(
    agents: &AgentRegistry,
    topic: &str,
    persona: &str,
) -> Result<GeneratedContent, String> {
    let check = agents.security.check_content_security(topic, &[]);
    if !check.passed {
        return Err(check.message);
    }

    Ok(agents.optimizer.generate_content(topic, persona, true))
}

pub fn analyze_virality(agents: &AgentRegistry, content: &str) -> Result<ViralityAnalysis, String> {
    let check = agents.security.check_content_security(content, &[]);
    if !check.passed {
        return Err(check.message);
    }

    Ok(agents.optimizer.analyze_content_virality(content))
}

pub fn content_templates() -> Vec<ContentTemplate> {
    vec![
        ContentTemplate {
            name: "Industry Insight".to_string(),
            description: "Trends analysis with a data hook and a closing question".to_string(),
            structure: "Open with a statistic, cover three observed shifts with supporting data, close with a question to the audience".to_string(),
        },
        ContentTemplate {
            name: "Personal Story".to_string(),
            description: "A lesson learned, told as a short narrative".to_string(),
            structure: "Set the scene, describe the challenge and what changed, end with a takeaway for the reader".to_string(),
        },
        ContentTemplate {
            name: "How-To".to_string(),
            description: "Actionable steps on a focused topic".to_string(),
            structure: "State the problem, walk through numbered steps, flag a common mistake, invite readers to share results".to_string(),
        },
        ContentTemplate {
            name: "Contrarian Take".to_string(),
            description: "Challenge a common assumption with evidence".to_string(),
            structure: "Name the popular belief, show where it falls short, offer the alternative view, prompt discussion".to_string(),
        },
    ]
}

pub fn trending_hashtags(profile: &LinkedInProfile) -> TrendingHashtags {
    let trending = ["#innovation", "#leadership", "#futureofwork", "#careers", "#ai"]
        .iter()
        .map(|t| t.to_string())
        .collect();

    let industry = match profile
        .industry
        .as_deref()
        .map(crate::agents::LinkedInOptimizerAgent::normalize_industry)
        .unwrap_or("default")
    {
        "technology" => vec!["#tech", "#softwareengineering", "#cloud", "#devops"],
        "finance" => vec!["#fintech", "#investing", "#banking", "#markets"],
        "healthcare" => vec!["#healthtech", "#medicine", "#publichealth", "#biotech"],
        "marketing" => vec!["#digitalmarketing", "#contentstrategy", "#branding", "#seo"],
        _ => vec!["#business", "#strategy", "#networking", "#growth"],
    }
    .into_iter()
    .map(String::from)
    .collect();

    // Personalized tags come straight from the user's own skills
    let personalized = profile
        .skills
        .iter()
        .take(4)
        .map(|skill| format!("#{}", skill.to_lowercase().replace([' ', '/'], "")))
        .collect();

    TrendingHashtags { trending, industry, personalized }
}

/// Persist a scheduled post after a security screen.
pub async fn schedule_content(
    db: &MongoDB,
    agents: &AgentRegistry,
    user_id: &str,
    content: &str,
    hashtags: Vec<String>,
    post_date_millis: i64,
) -> Result<ScheduleResponse, String> {
    let check = agents.security.check_content_security(content, &hashtags);
    if !check.passed {
        return Err(check.message);
    }

    if post_date_millis <= BsonDateTime::now().timestamp_millis() {
        return Err("Post date must be in the future".to_string());
    }

    let collection = db.collection::<ScheduledPost>("scheduled_posts");

    let post = ScheduledPost {
        id: None,
        user_id: user_id.to_string(),
        content: content.to_string(),
        hashtags,
        scheduled_for: post_date_millis,
        status: STATUS_SCHEDULED.to_string(),
        created_at: Some(BsonDateTime::now()),
    };

    let inserted = collection
        .insert_one(&post)
        .await
        .map_err(|e| format!("Failed to schedule content: {}", e))?;

    let id = inserted
        .inserted_id
        .as_object_id()
        .map(|oid| oid.to_hex())
        .unwrap_or_default();

    log::info!("📅 Content scheduled for user {}: {}", user_id, id);

    Ok(ScheduleResponse {
        success: true,
        message: "Content scheduled successfully".to_string(),
        id,
        scheduled_for: post_date_millis,
    })
}

pub async fn get_scheduled_content(
    db: &MongoDB,
    user_id: &str,
) -> Result<Vec<ScheduledPostResponse>, String> {
    let collection = db.collection::<ScheduledPost>("scheduled_posts");

    let cursor = collection
        .find(doc! { "user_id": user_id })
        .sort(doc! { "scheduled_for": 1 })
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    let posts: Vec<ScheduledPost> = cursor
        .try_collect()
        .await
        .map_err(|e| format!("Failed to read scheduled posts: {}", e))?;

    Ok(posts.into_iter().map(ScheduledPostResponse::from).collect())
}

pub async fn delete_scheduled_content(db: &MongoDB, user_id: &str, id: &str) -> Result<(), String> {
    let collection = db.collection::<ScheduledPost>("scheduled_posts");

    let object_id = ObjectId::parse_str(id).map_err(|_| format!("Invalid id: {}", id))?;

    // Scoped to the owner so one user cannot delete another's post
    let result = collection
        .delete_one(doc! { "_id": object_id, "user_id": user_id })
        .await
        .map_err(|e| format!("Failed to delete scheduled content: {}", e))?;

    if result.deleted_count == 0 {
        return Err(format!("Scheduled content {} not found", id));
    }

    log::info!("🗑️ Scheduled content {} deleted for user {}", id, user_id);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_rejects_script_topics() {
        let agents = AgentRegistry::new();
        let result = generate_content(&agents, "<script>alert(1)</script>", "professional");
        assert!(result.is_err());
    }

    #[test]
    fn generation_returns_content_with_hashtags() {
        let agents = AgentRegistry::new();
        let result = generate_content(&agents, "quarterly planning", "professional").unwrap();
        assert!(result.content.contains("quarterly planning"));
        assert!(!result.hashtags.is_empty());
    }

    #[test]
    fn personalized_hashtags_come_from_skills() {
        let mut profile = LinkedInProfile::default();
        profile.industry = Some("Software Engineering".to_string());
        profile.skills = vec!["Machine Learning".to_string(), "Rust".to_string()];
        let tags = trending_hashtags(&profile);
        assert!(tags.personalized.contains(&"#machinelearning".to_string()));
        assert!(tags.industry.contains(&"#tech".to_string()));
    }

    #[test]
    fn templates_catalog_is_not_empty() {
        let templates = content_templates();
        assert!(templates.len() >= 4);
        assert!(templates.iter().all(|t| !t.structure.is_empty()));
    }
}
