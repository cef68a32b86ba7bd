use serde::{Deserialize, Serialize};

/// LinkedIn profile data as stored in `users.profile_data`.
/// Field names keep the camelCase of the LinkedIn payloads so the stored
/// document round-trips unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkedInProfile {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub headline: Option<String>,
    pub about: Option<String>,
    pub email: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub profile_url: Option<String>,
    pub profile_picture: Option<String>,
    pub positions: Vec<Position>,
    pub skills: Vec<String>,
    pub education: Vec<Education>,
    pub connections: Option<u32>,
    pub profile_views: Option<u32>,
    pub post_engagement: Option<u32>,
}

impl LinkedInProfile {
    pub fn full_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Position {
    pub title: String,
    pub company: String,
    pub description: Option<String>,
    pub date_range: Option<String>,
    pub current: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub school_name: String,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub year: Option<String>,
}
