use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::matching::profile::Profile;

/// `user_info` row. Tag arrays are nullable in storage.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserInfoRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: Option<String>,
    pub experience_level: Option<String>,
    pub primary_role: Option<String>,
    pub secondary_role: Option<String>,
    pub primary_skills: Option<Vec<String>>,
    pub secondary_skills: Option<Vec<String>>,
    pub school: Option<String>,
    pub goal: Option<String>,
    pub pronouns: Option<String>,
    pub note: Option<String>,
    pub personality_trait: Option<String>,
    pub discord_link: Option<String>,
    pub image_link: Option<String>,
}

impl From<UserInfoRow> for Profile {
    fn from(row: UserInfoRow) -> Self {
        Profile {
            id: row.id,
            user_id: row.user_id,
            name: row.name.unwrap_or_default(),
            experience_level: row.experience_level,
            primary_role: row.primary_role,
            secondary_role: row.secondary_role,
            goal: row.goal,
            personality_trait: row.personality_trait,
            primary_skills: row.primary_skills.unwrap_or_default(),
            secondary_skills: row.secondary_skills.unwrap_or_default(),
            school: row.school,
            note: row.note,
            discord_link: row.discord_link,
            image_link: row.image_link,
            pronouns: row.pronouns,
        }
    }
}
