use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile fields a user supplies directly (or that resume extraction fills in).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewUserInfo {
    pub experience_level: Option<String>,
    pub primary_role: Option<String>,
    pub secondary_role: Option<String>,
    #[serde(default)]
    pub primary_skills: Vec<String>,
    #[serde(default)]
    pub secondary_skills: Vec<String>,
    pub school: Option<String>,
    pub goal: Option<String>,
    pub note: Option<String>,
    pub personality_trait: Option<String>,
    pub discord_link: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserInfoRequest {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub info: NewUserInfo,
}

#[derive(Debug, Deserialize)]
pub struct UpdateFieldRequest {
    pub user_id: Uuid,
    pub value: String,
}

/// What the LLM is asked to pull out of a resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedProfile {
    pub experience_level: Option<String>,
    pub primary_role: Option<String>,
    pub secondary_role: Option<String>,
    #[serde(default)]
    pub primary_skills: Vec<String>,
    #[serde(default)]
    pub secondary_skills: Vec<String>,
    pub school: Option<String>,
}

impl From<ExtractedProfile> for NewUserInfo {
    fn from(extracted: ExtractedProfile) -> Self {
        NewUserInfo {
            experience_level: extracted.experience_level,
            primary_role: extracted.primary_role,
            secondary_role: extracted.secondary_role,
            primary_skills: extracted.primary_skills,
            secondary_skills: extracted.secondary_skills,
            school: extracted.school,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_request_flattens_profile_fields() {
        let user_id = Uuid::new_v4();
        let req: CreateUserInfoRequest = serde_json::from_value(json!({
            "user_id": user_id,
            "experience_level": "beginner",
            "primary_role": "front-end",
            "primary_skills": ["react"]
        }))
        .unwrap();

        assert_eq!(req.user_id, user_id);
        assert_eq!(req.info.primary_role.as_deref(), Some("front-end"));
        assert_eq!(req.info.primary_skills, vec!["react".to_string()]);
        assert!(req.info.secondary_skills.is_empty());
    }

    #[test]
    fn test_extracted_profile_tolerates_missing_lists() {
        let extracted: ExtractedProfile = serde_json::from_value(json!({
            "experience_level": "expert",
            "primary_role": "data science"
        }))
        .unwrap();
        let info = NewUserInfo::from(extracted);
        assert!(info.primary_skills.is_empty());
        assert_eq!(info.goal, None);
    }
}
