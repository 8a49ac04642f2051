use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::user::User;
use crate::models::user_info::UserInfoRow;
use crate::profiles::models::NewUserInfo;

pub async fn get_user(pool: &PgPool, user_id: Uuid) -> Result<Option<User>> {
    Ok(sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?)
}

pub async fn get_user_info(pool: &PgPool, user_id: Uuid) -> Result<Option<UserInfoRow>> {
    Ok(
        sqlx::query_as::<_, UserInfoRow>("SELECT * FROM user_info WHERE user_id = $1 LIMIT 1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?,
    )
}

/// The candidate pool for a request: every profile except the requester's own.
pub async fn list_candidates(pool: &PgPool, exclude_user_id: Uuid) -> Result<Vec<UserInfoRow>> {
    Ok(sqlx::query_as::<_, UserInfoRow>(
        "SELECT * FROM user_info WHERE user_id <> $1 ORDER BY id",
    )
    .bind(exclude_user_id)
    .fetch_all(pool)
    .await?)
}

pub async fn insert_user_info(
    pool: &PgPool,
    user_id: Uuid,
    name: &str,
    info: &NewUserInfo,
) -> Result<UserInfoRow> {
    let row = sqlx::query_as::<_, UserInfoRow>(
        r#"
        INSERT INTO user_info
            (id, user_id, name, experience_level, primary_role, secondary_role,
             primary_skills, secondary_skills, school, goal, note,
             personality_trait, discord_link)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(name)
    .bind(&info.experience_level)
    .bind(&info.primary_role)
    .bind(&info.secondary_role)
    .bind(&info.primary_skills)
    .bind(&info.secondary_skills)
    .bind(&info.school)
    .bind(&info.goal)
    .bind(&info.note)
    .bind(&info.personality_trait)
    .bind(&info.discord_link)
    .fetch_one(pool)
    .await?;

    info!("Created profile {} for user {user_id}", row.id);
    Ok(row)
}

/// Single-column profile updates exposed over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Goal,
    Pronouns,
    ImageLink,
}

impl ProfileField {
    fn column(self) -> &'static str {
        match self {
            ProfileField::Goal => "goal",
            ProfileField::Pronouns => "pronouns",
            ProfileField::ImageLink => "image_link",
        }
    }
}

/// Sets one field on the user's profile. `None` when the user has no profile.
pub async fn update_field(
    pool: &PgPool,
    user_id: Uuid,
    field: ProfileField,
    value: &str,
) -> Result<Option<UserInfoRow>> {
    // Column name comes from a closed enum, never from input.
    let sql = format!(
        "UPDATE user_info SET {} = $1 WHERE user_id = $2 RETURNING *",
        field.column()
    );
    Ok(sqlx::query_as::<_, UserInfoRow>(&sql)
        .bind(value)
        .bind(user_id)
        .fetch_optional(pool)
        .await?)
}
