//! Participant profiles as the engine sees them.
//!
//! `ProfileRecord` is the loose shape supplied by callers (every field optional),
//! `Profile` is the validated shape the engine ranks. Scoring never reads the
//! pass-through fields (`school`, `note`, `discord_link`, `image_link`,
//! `pronouns`); they ride along so they can be returned untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("profile is missing its identifier")]
    MissingId,

    #[error("profile {0} is missing its owner identifier")]
    MissingUserId(Uuid),
}

/// Hackathon experience. Ordinals feed the single scalar feature column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Expert,
}

impl ExperienceLevel {
    /// Case-insensitive parse. Anything outside the three levels is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match fold(raw).as_str() {
            "beginner" => Some(ExperienceLevel::Beginner),
            "intermediate" => Some(ExperienceLevel::Intermediate),
            "expert" => Some(ExperienceLevel::Expert),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "beginner",
            ExperienceLevel::Intermediate => "intermediate",
            ExperienceLevel::Expert => "expert",
        }
    }

    pub fn ordinal(self) -> f64 {
        match self {
            ExperienceLevel::Beginner => 1.0,
            ExperienceLevel::Intermediate => 2.0,
            ExperienceLevel::Expert => 3.0,
        }
    }
}

/// Ordinal used when the level is absent or unrecognised.
pub const UNKNOWN_EXPERIENCE_ORDINAL: f64 = 0.0;

/// Maps an optional raw level to its feature value.
pub fn experience_ordinal(raw: Option<&str>) -> f64 {
    raw.and_then(ExperienceLevel::parse)
        .map(ExperienceLevel::ordinal)
        .unwrap_or(UNKNOWN_EXPERIENCE_ORDINAL)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(default)]
    pub name: String,
    pub experience_level: Option<String>,
    pub primary_role: Option<String>,
    pub secondary_role: Option<String>,
    pub goal: Option<String>,
    pub personality_trait: Option<String>,
    #[serde(default)]
    pub primary_skills: Vec<String>,
    #[serde(default)]
    pub secondary_skills: Vec<String>,
    pub school: Option<String>,
    pub note: Option<String>,
    pub discord_link: Option<String>,
    pub image_link: Option<String>,
    pub pronouns: Option<String>,
}

/// Caller-supplied profile before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub name: Option<String>,
    pub experience_level: Option<String>,
    pub primary_role: Option<String>,
    pub secondary_role: Option<String>,
    pub goal: Option<String>,
    pub personality_trait: Option<String>,
    pub primary_skills: Option<Vec<String>>,
    pub secondary_skills: Option<Vec<String>>,
    pub school: Option<String>,
    pub note: Option<String>,
    pub discord_link: Option<String>,
    pub image_link: Option<String>,
    pub pronouns: Option<String>,
}

impl TryFrom<ProfileRecord> for Profile {
    type Error = ProfileError;

    fn try_from(record: ProfileRecord) -> Result<Self, Self::Error> {
        let id = record.id.ok_or(ProfileError::MissingId)?;
        let user_id = record.user_id.ok_or(ProfileError::MissingUserId(id))?;

        Ok(Profile {
            id,
            user_id,
            name: record.name.unwrap_or_default(),
            experience_level: record.experience_level,
            primary_role: record.primary_role,
            secondary_role: record.secondary_role,
            goal: record.goal,
            personality_trait: record.personality_trait,
            primary_skills: record.primary_skills.unwrap_or_default(),
            secondary_skills: record.secondary_skills.unwrap_or_default(),
            school: record.school,
            note: record.note,
            discord_link: record.discord_link,
            image_link: record.image_link,
            pronouns: record.pronouns,
        })
    }
}

/// The scoring-relevant view of a profile with every string case-folded.
///
/// Blank strings collapse to absent so `"  "` never becomes a feature column.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub primary_role: Option<String>,
    pub experience_level: Option<String>,
    pub secondary_role: Option<String>,
    pub goal: Option<String>,
    pub personality_trait: Option<String>,
    pub primary_skills: Vec<String>,
    pub secondary_skills: Vec<String>,
}

impl Profile {
    pub fn normalized(&self) -> NormalizedProfile {
        NormalizedProfile {
            id: self.id,
            user_id: self.user_id,
            name: fold(&self.name),
            primary_role: fold_opt(self.primary_role.as_deref()),
            experience_level: fold_opt(self.experience_level.as_deref()),
            secondary_role: fold_opt(self.secondary_role.as_deref()),
            goal: fold_opt(self.goal.as_deref()),
            personality_trait: fold_opt(self.personality_trait.as_deref()),
            primary_skills: fold_tags(&self.primary_skills),
            secondary_skills: fold_tags(&self.secondary_skills),
        }
    }
}

/// Canonical case used for every comparison in the engine.
pub fn fold(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn fold_opt(raw: Option<&str>) -> Option<String> {
    raw.map(fold).filter(|s| !s.is_empty())
}

fn fold_tags(tags: &[String]) -> Vec<String> {
    let mut folded: Vec<String> = tags
        .iter()
        .map(|t| fold(t))
        .filter(|t| !t.is_empty())
        .collect();
    folded.sort();
    folded.dedup();
    folded
}
