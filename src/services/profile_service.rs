use std::collections::HashMap;

use mongodb::bson::doc;
use serde::Serialize;

use crate::agents::optimizer::{ImprovedText, IndustryBenchmark, ProfileAnalysis};
use crate::agents::AgentRegistry;
use crate::database::MongoDB;
use crate::models::profile::LinkedInProfile;
use crate::models::user::User;
use crate::services::linkedin_service;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub success: bool,
    pub profile_id: String,
    pub analysis: ProfileAnalysis,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub success: bool,
    pub previews: HashMap<String, ImprovedText>,
    pub skipped: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkResponse {
    pub success: bool,
    pub industry: String,
    pub benchmark: IndustryBenchmark,
}

/// Resolve the profile data to analyze: stored document first, then a fresh
/// LinkedIn fetch when a valid token exists, then a minimal fallback built
/// from the account itself.
pub async fn load_profile_data(db: &MongoDB, user: &User) -> Result<LinkedInProfile, String> {
    if let Some(profile) = &user.profile_data {
        log::debug!("📦 Using stored profile data for {}", user.user_id);
        return Ok(profile.clone());
    }

    if user.linkedin_token_valid() {
        if let Some(token) = &user.linkedin_access_token {
            match linkedin_service::fetch_profile(token).await {
                Ok(profile) => {
                    persist_profile(db, &user.user_id, &profile).await?;
                    return Ok(profile);
                }
                Err(e) => {
                    log::warn!("⚠️  LinkedIn fetch failed, using fallback profile: {}", e);
                }
            }
        }
    }

    Ok(fallback_profile(user))
}

/// Minimal profile derived from the account when no LinkedIn data exists.
pub fn fallback_profile(user: &User) -> LinkedInProfile {
    let mut parts = user.name.split_whitespace();
    let first = parts.next().unwrap_or("User").to_string();
    let rest = parts.collect::<Vec<_>>().join(" ");

    let mut profile = LinkedInProfile::default();
    profile.id = Some(user.user_id.clone());
    profile.first_name = Some(first);
    profile.last_name = if rest.is_empty() { None } else { Some(rest) };
    profile.email = Some(user.email.clone());
    profile.headline = Some("LinkedIn User".to_string());
    profile
}

pub async fn persist_profile(
    db: &MongoDB,
    user_id: &str,
    profile: &LinkedInProfile,
) -> Result<(), String> {
    let users = db.collection::<User>("users");
    let profile_bson =
        mongodb::bson::to_bson(profile).map_err(|e| format!("Failed to serialize profile: {}", e))?;

    users
        .update_one(doc! { "user_id": user_id }, doc! { "$set": { "profile_data": profile_bson } })
        .await
        .map_err(|e| format!("Failed to save profile data: {}", e))?;

    Ok(())
}

/// Full profile analysis via the optimizer agent.
pub async fn analyze_profile(
    db: &MongoDB,
    agents: &AgentRegistry,
    user: &User,
) -> Result<AnalysisResponse, String> {
    let profile = load_profile_data(db, user).await?;
    let analysis = agents.optimizer.analyze_profile(&profile);

    Ok(AnalysisResponse {
        success: true,
        profile_id: profile.id.clone().unwrap_or_else(|| user.user_id.clone()),
        analysis,
    })
}

/// Per-section original→improved previews. Unknown sections are reported in
/// `skipped` rather than failing the request.
pub fn optimization_preview(
    agents: &AgentRegistry,
    profile: &LinkedInProfile,
    sections: &[String],
) -> PreviewResponse {
    let mut previews = HashMap::new();
    let mut skipped = Vec::new();

    for section in sections {
        match section.as_str() {
            "headline" | "title" => {
                previews.insert(
                    "headline".to_string(),
                    agents.optimizer.generate_improved_headline(profile),
                );
            }
            "about" | "bio" => {
                previews.insert("about".to_string(), agents.optimizer.generate_improved_about(profile));
            }
            "experience" => {
                if let Some(position) = profile.positions.first() {
                    previews.insert(
                        "experience".to_string(),
                        agents.optimizer.generate_improved_experience(position),
                    );
                } else {
                    skipped.push("experience".to_string());
                }
            }
            "skills" => {
                previews.insert("skills".to_string(), agents.optimizer.generate_improved_skills(profile));
            }
            other => skipped.push(other.to_string()),
        }
    }

    PreviewResponse { success: true, previews, skipped }
}

/// Persist chosen section texts into the stored profile.
pub async fn apply_optimizations(
    db: &MongoDB,
    user: &User,
    optimizations: &HashMap<String, String>,
) -> Result<Vec<String>, String> {
    let mut profile = load_profile_data(db, user).await?;
    let mut applied = Vec::new();

    for (section, value) in optimizations {
        match section.as_str() {
            "headline" | "title" => {
                profile.headline = Some(value.clone());
                applied.push("headline".to_string());
            }
            "about" | "bio" => {
                profile.about = Some(value.clone());
                applied.push("about".to_string());
            }
            "skills" => {
                profile.skills = value
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                applied.push("skills".to_string());
            }
            "experience" => {
                if let Some(position) = profile.positions.first_mut() {
                    position.description = Some(value.clone());
                    applied.push("experience".to_string());
                }
            }
            other => log::warn!("⚠️  Ignoring unknown optimization section: {}", other),
        }
    }

    if applied.is_empty() {
        return Err("No applicable optimizations provided".to_string());
    }

    persist_profile(db, &user.user_id, &profile).await?;

    log::info!("✅ Applied optimizations for {}: {:?}", user.user_id, applied);

    Ok(applied)
}

pub fn industry_benchmarks(agents: &AgentRegistry, industry: Option<&str>) -> BenchmarkResponse {
    let benchmark = agents.optimizer.benchmark_for(industry);
    BenchmarkResponse {
        success: true,
        industry: industry.unwrap_or("default").to_string(),
        benchmark: benchmark.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::UserRole;

    fn test_user(name: &str) -> User {
        User {
            _id: None,
            user_id: "u1".to_string(),
            name: name.to_string(),
            email: "a@b.com".to_string(),
            password: None,
            role: UserRole::User,
            linkedin_id: None,
            linkedin_access_token: None,
            linkedin_token_expiry: None,
            profile_data: None,
            created_at: None,
            last_login: None,
        }
    }

    #[test]
    fn fallback_profile_splits_name() {
        let profile = fallback_profile(&test_user("Ada Lovelace Byron"));
        assert_eq!(profile.first_name.as_deref(), Some("Ada"));
        assert_eq!(profile.last_name.as_deref(), Some("Lovelace Byron"));
        assert_eq!(profile.headline.as_deref(), Some("LinkedIn User"));
    }

    #[test]
    fn fallback_profile_handles_single_name() {
        let profile = fallback_profile(&test_user("Cher"));
        assert_eq!(profile.first_name.as_deref(), Some("Cher"));
        assert!(profile.last_name.is_none());
    }

    #[test]
    fn preview_skips_unknown_sections() {
        let agents = AgentRegistry::new();
        let profile = LinkedInProfile::default();
        let response = optimization_preview(
            &agents,
            &profile,
            &["headline".to_string(), "certifications".to_string(), "experience".to_string()],
        );
        assert!(response.previews.contains_key("headline"));
        // no positions, so experience is skipped alongside the unknown section
        assert_eq!(response.skipped, vec!["certifications".to_string(), "experience".to_string()]);
    }
}
