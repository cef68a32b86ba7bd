use serde::Serialize;

use crate::agents::optimizer::stable_hash;
use crate::models::profile::LinkedInProfile;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleSuggestions {
    pub current: String,
    pub suggestions: Vec<String>,
    pub tips: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BioSuggestions {
    pub current: String,
    pub suggestions: Vec<String>,
    pub tips: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedPosition {
    pub title: String,
    pub company: String,
    pub optimized_bullets: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceSuggestions {
    pub optimized_positions: Vec<OptimizedPosition>,
    pub tips: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationRecommendation {
    pub name: String,
    pub provider: String,
    pub relevance: String,
    pub time_to_complete: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillsSuggestions {
    pub current_skills: Vec<String>,
    pub recommended_skills: Vec<String>,
    pub skill_gaps: Vec<String>,
    pub certification_recommendations: Vec<CertificationRecommendation>,
    pub tips: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedEducation {
    pub school_name: String,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub enhanced_description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinuingEducation {
    pub education_type: String,
    pub name: String,
    pub provider: String,
    pub duration: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationSuggestions {
    pub enhanced_education: Vec<EnhancedEducation>,
    pub continuing_education_recommendations: Vec<ContinuingEducation>,
    pub tips: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllSuggestions {
    pub title: TitleSuggestions,
    pub bio: BioSuggestions,
    pub experience: ExperienceSuggestions,
    pub skills: SkillsSuggestions,
    pub education: EducationSuggestions,
}

fn skill_or(profile: &LinkedInProfile, index: usize, fallback: &str) -> String {
    profile.skills.get(index).cloned().unwrap_or_else(|| fallback.to_string())
}

fn role_or(profile: &LinkedInProfile, fallback: &str) -> String {
    profile
        .positions
        .first()
        .map(|p| p.title.clone())
        .unwrap_or_else(|| fallback.to_string())
}

pub fn all_suggestions(profile: &LinkedInProfile) -> AllSuggestions {
    AllSuggestions {
        title: title_suggestions(profile),
        bio: bio_suggestions(profile),
        experience: experience_suggestions(profile),
        skills: skills_suggestions(profile),
        education: education_suggestions(profile),
    }
}

pub fn title_suggestions(profile: &LinkedInProfile) -> TitleSuggestions {
    let role = role_or(profile, "Marketing Professional");
    let company = profile
        .positions
        .first()
        .map(|p| p.company.clone())
        .unwrap_or_else(|| "Industry".to_string());
    let skill_a = skill_or(profile, 0, "Digital Strategy");
    let skill_b = skill_or(profile, 1, "Brand Development");

    TitleSuggestions {
        current: profile.headline.clone().unwrap_or_default(),
        suggestions: vec![
            format!("{} | {} | {}", role, skill_a, skill_b),
            format!("{} with expertise in {} and {}", role, skill_a, skill_b),
            format!("{} {} | {} | Innovation", company, role, skill_a),
        ],
        tips: vec![
            "Include your current role and key specializations".to_string(),
            "Use industry-specific keywords to improve searchability".to_string(),
            "Keep it concise but informative (under 120 characters)".to_string(),
        ],
    }
}

pub fn bio_suggestions(profile: &LinkedInProfile) -> BioSuggestions {
    let role = role_or(profile, "Marketing Professional");
    let industry = profile.industry.clone().unwrap_or_else(|| "digital marketing".to_string());
    let years = profile.positions.len().max(1) * 2;
    let skill_a = skill_or(profile, 0, "content strategy");
    let skill_b = skill_or(profile, 1, "brand development");
    let skill_c = skill_or(profile, 2, "campaign management");
    let school = profile
        .education
        .first()
        .map(|e| e.school_name.clone())
        .unwrap_or_else(|| "University".to_string());
    let field = profile
        .education
        .first()
        .and_then(|e| e.field_of_study.clone())
        .unwrap_or_else(|| "Marketing".to_string());

    BioSuggestions {
        current: profile.about.clone().unwrap_or_default(),
        suggestions: vec![
            format!(
                "Results-driven {} with {}+ years of experience in {}. Specialized in {} and {} with a \
                 proven track record of increasing engagement and driving conversion. Passionate about \
                 leveraging data-driven insights to create compelling narratives that resonate with \
                 target audiences.",
                role, years, industry, skill_a, skill_b
            ),
            format!(
                "Innovative {} who transforms business challenges into growth opportunities. Expertise in \
                 {}, {}, and {}. Consistently delivered projects that exceeded KPIs while reducing \
                 acquisition costs. Looking to connect with forward-thinking professionals in the {} \
                 space.",
                role, skill_a, skill_b, skill_c, industry
            ),
            format!(
                "Strategic {} with a passion for {}. Background in {} from {}. Seeking to collaborate on \
                 projects that drive meaningful business impact through targeted {} and {}.",
                role, skill_a, field, school, skill_b, skill_c
            ),
        ],
        tips: vec![
            "Start with a strong professional identity statement".to_string(),
            "Quantify achievements with specific metrics".to_string(),
            "Include relevant keywords for ATS optimization".to_string(),
            "End with a clear value proposition or call to action".to_string(),
        ],
    }
}

pub fn experience_suggestions(profile: &LinkedInProfile) -> ExperienceSuggestions {
    let optimized_positions = profile
        .positions
        .iter()
        .map(|position| {
            // Figures derive from a stable hash of the title so repeated
            // requests produce the same bullets.
            let seed = stable_hash(&position.title);
            let pct_a = 20 + (seed % 30);
            let amount = 100 + (seed % 500);
            let pct_b = 10 + ((seed >> 8) % 40);

            let is_manager = position.title.contains("Manager");
            let is_marketing = position.title.contains("Marketing");
            let is_sales = position.title.contains("Sales");

            OptimizedPosition {
                title: position.title.clone(),
                company: position.company.clone(),
                optimized_bullets: vec![
                    format!(
                        "Led {} that resulted in {}% increase in {}",
                        if is_manager { "strategic initiatives" } else { "projects" },
                        pct_a,
                        if is_marketing { "engagement" } else { "efficiency" }
                    ),
                    format!(
                        "Collaborated with cross-functional teams to implement {} that generated ${}K in {}",
                        if is_marketing { "marketing campaigns" } else { "business solutions" },
                        amount,
                        if is_sales { "revenue" } else { "cost savings" }
                    ),
                    format!(
                        "Developed and executed {} resulting in {}% growth in {}",
                        if is_marketing { "content strategies" } else { "operational improvements" },
                        pct_b,
                        if is_marketing { "audience reach" } else { "productivity" }
                    ),
                ],
            }
        })
        .collect();

    ExperienceSuggestions {
        optimized_positions,
        tips: vec![
            "Focus on achievements rather than responsibilities".to_string(),
            "Quantify results with specific metrics and percentages".to_string(),
            "Use action verbs to begin each bullet point".to_string(),
            "Highlight collaboration and leadership when applicable".to_string(),
            "Include relevant keywords for your industry".to_string(),
        ],
    }
}

pub fn skills_suggestions(profile: &LinkedInProfile) -> SkillsSuggestions {
    let recommended: Vec<&str> = if profile
        .industry
        .as_deref()
        .map(|i| i.to_lowercase().contains("market"))
        .unwrap_or(false)
    {
        vec![
            "Digital Marketing Strategy",
            "Content Marketing",
            "SEO/SEM",
            "Social Media Marketing",
            "Email Marketing",
            "Marketing Analytics",
            "Brand Development",
            "Campaign Management",
            "Market Research",
            "CRM Systems",
        ]
    } else {
        vec![
            "Strategic Planning",
            "Project Management",
            "Team Leadership",
            "Data Analysis",
            "Business Development",
            "Client Relationship Management",
            "Process Optimization",
            "Cross-functional Collaboration",
            "Problem Solving",
            "Communication",
        ]
    };

    // Drop recommendations the profile already covers in either direction
    let new_recommended: Vec<String> = recommended
        .iter()
        .filter(|candidate| {
            let candidate_lower = candidate.to_lowercase();
            !profile.skills.iter().any(|current| {
                let current_lower = current.to_lowercase();
                current_lower.contains(&candidate_lower) || candidate_lower.contains(&current_lower)
            })
        })
        .map(|s| s.to_string())
        .collect();

    SkillsSuggestions {
        current_skills: profile.skills.clone(),
        skill_gaps: new_recommended.iter().take(3).cloned().collect(),
        recommended_skills: new_recommended,
        certification_recommendations: vec![
            CertificationRecommendation {
                name: "Google Analytics Certification".to_string(),
                provider: "Google".to_string(),
                relevance: "high".to_string(),
                time_to_complete: "4-6 weeks".to_string(),
            },
            CertificationRecommendation {
                name: "HubSpot Content Marketing Certification".to_string(),
                provider: "HubSpot Academy".to_string(),
                relevance: "medium".to_string(),
                time_to_complete: "2-3 weeks".to_string(),
            },
            CertificationRecommendation {
                name: "Facebook Blueprint Certification".to_string(),
                provider: "Facebook".to_string(),
                relevance: "high".to_string(),
                time_to_complete: "4-8 weeks".to_string(),
            },
        ],
        tips: vec![
            "Order skills by proficiency and relevance to target roles".to_string(),
            "Include a mix of technical and soft skills".to_string(),
            "Add industry-specific tools and platforms".to_string(),
            "Remove outdated or irrelevant skills".to_string(),
            "Aim for 15-20 highly relevant skills rather than a longer list of generic ones".to_string(),
        ],
    }
}

pub fn education_suggestions(profile: &LinkedInProfile) -> EducationSuggestions {
    let enhanced_education = profile
        .education
        .iter()
        .map(|education| {
            let field = education.field_of_study.clone().unwrap_or_else(|| "relevant coursework".to_string());
            let emphasis = if field == "Marketing" {
                "digital marketing strategies and consumer behavior analysis"
            } else {
                "industry-specific applications and practical implementations"
            };
            let closing = if education.degree.as_deref().map(|d| d.contains("Bachelor")).unwrap_or(false) {
                "Developed foundational knowledge through hands-on projects and collaborative research."
            } else {
                "Advanced specialized expertise through intensive research and practical application of \
                 theoretical concepts."
            };

            EnhancedEducation {
                school_name: education.school_name.clone(),
                degree: education.degree.clone(),
                field_of_study: education.field_of_study.clone(),
                enhanced_description: format!("Focused on {} with emphasis on {}. {}", field, emphasis, closing),
            }
        })
        .collect();

    EducationSuggestions {
        enhanced_education,
        continuing_education_recommendations: vec![
            ContinuingEducation {
                education_type: "Course".to_string(),
                name: "Digital Marketing Specialization".to_string(),
                provider: "Coursera".to_string(),
                duration: "6 months".to_string(),
            },
            ContinuingEducation {
                education_type: "Workshop".to_string(),
                name: "Data-Driven Marketing Masterclass".to_string(),
                provider: "LinkedIn Learning".to_string(),
                duration: "4 weeks".to_string(),
            },
            ContinuingEducation {
                education_type: "Certificate".to_string(),
                name: "Professional Certificate in Digital Marketing".to_string(),
                provider: "edX".to_string(),
                duration: "3 months".to_string(),
            },
        ],
        tips: vec![
            "Highlight relevant coursework and projects".to_string(),
            "Include academic achievements and honors".to_string(),
            "Mention leadership roles or extracurricular activities".to_string(),
            "Add continuing education and professional development".to_string(),
            "Connect education to career trajectory and industry relevance".to_string(),
        ],
    }
}

pub const PUBLISHABLE_SECTIONS: [&str; 5] = ["title", "bio", "experience", "skills", "education"];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{Education, Position};

    fn marketing_profile() -> LinkedInProfile {
        let mut profile = LinkedInProfile::default();
        profile.industry = Some("Marketing and Advertising".to_string());
        profile.headline = Some("Marketing Manager".to_string());
        profile.skills = vec!["Digital Marketing".to_string(), "Content Strategy".to_string()];
        profile.positions = vec![Position {
            title: "Marketing Manager".to_string(),
            company: "ABC Corp".to_string(),
            description: Some("Lead digital marketing initiatives.".to_string()),
            date_range: Some("2020 - Present".to_string()),
            current: true,
        }];
        profile.education = vec![Education {
            school_name: "University of Marketing".to_string(),
            degree: Some("Bachelor of Business Administration".to_string()),
            field_of_study: Some("Marketing".to_string()),
            year: Some("2018".to_string()),
        }];
        profile
    }

    #[test]
    fn title_suggestions_use_profile_role_and_skills() {
        let suggestions = title_suggestions(&marketing_profile());
        assert_eq!(suggestions.current, "Marketing Manager");
        assert_eq!(suggestions.suggestions.len(), 3);
        assert!(suggestions.suggestions[0].contains("Marketing Manager"));
        assert!(suggestions.suggestions[0].contains("Digital Marketing"));
    }

    #[test]
    fn experience_bullets_are_deterministic() {
        let profile = marketing_profile();
        let a = experience_suggestions(&profile);
        let b = experience_suggestions(&profile);
        assert_eq!(a.optimized_positions[0].optimized_bullets, b.optimized_positions[0].optimized_bullets);
        assert!(a.optimized_positions[0].optimized_bullets[0].contains("engagement"));
    }

    #[test]
    fn skill_recommendations_exclude_existing_skills() {
        let suggestions = skills_suggestions(&marketing_profile());
        // "Digital Marketing Strategy" overlaps the existing "Digital Marketing"
        assert!(!suggestions.recommended_skills.iter().any(|s| s == "Digital Marketing Strategy"));
        assert!(suggestions.recommended_skills.iter().any(|s| s == "Content Marketing"));
        assert!(suggestions.skill_gaps.len() <= 3);
    }

    #[test]
    fn education_enhancement_varies_by_degree() {
        let suggestions = education_suggestions(&marketing_profile());
        assert_eq!(suggestions.enhanced_education.len(), 1);
        assert!(suggestions.enhanced_education[0]
            .enhanced_description
            .contains("consumer behavior analysis"));
        assert!(suggestions.enhanced_education[0]
            .enhanced_description
            .contains("foundational knowledge"));
    }

    #[test]
    fn non_marketing_profile_gets_general_recommendations() {
        let mut profile = marketing_profile();
        profile.industry = Some("Software".to_string());
        let suggestions = skills_suggestions(&profile);
        assert!(suggestions.recommended_skills.iter().any(|s| s == "Strategic Planning"));
    }
}
