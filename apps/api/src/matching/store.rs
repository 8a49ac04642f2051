use anyhow::Result;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::matches::MatchRow;
use crate::models::user_info::UserInfoRow;

pub enum MatchOutcome {
    Created { row: MatchRow, confirmed: bool },
    AlreadyExists,
}

/// User ids the requester has already matched with.
pub async fn existing_match_ids(pool: &PgPool, user_id: Uuid) -> Result<Vec<Uuid>> {
    Ok(
        sqlx::query_scalar("SELECT user2_id FROM matches WHERE user1_id = $1")
            .bind(user_id)
            .fetch_all(pool)
            .await?,
    )
}

/// Records `user_id -> target_id`. If the reverse match already exists the
/// pair is confirmed in both directions. Runs as one transaction.
pub async fn create_match(pool: &PgPool, user_id: Uuid, target_id: Uuid) -> Result<MatchOutcome> {
    let mut tx = pool.begin().await?;

    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM matches WHERE user1_id = $1 AND user2_id = $2)",
    )
    .bind(user_id)
    .bind(target_id)
    .fetch_one(&mut *tx)
    .await?;
    if exists {
        return Ok(MatchOutcome::AlreadyExists);
    }

    let reciprocated: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM matches WHERE user1_id = $1 AND user2_id = $2)",
    )
    .bind(target_id)
    .bind(user_id)
    .fetch_one(&mut *tx)
    .await?;

    if reciprocated {
        sqlx::query(
            r#"
            INSERT INTO confirmed_matches (user1_id, user2_id)
            VALUES ($1, $2), ($2, $1)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(target_id)
        .execute(&mut *tx)
        .await?;
    }

    let row = sqlx::query_as::<_, MatchRow>(
        "INSERT INTO matches (user1_id, user2_id) VALUES ($1, $2) RETURNING *",
    )
    .bind(user_id)
    .bind(target_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    info!("Recorded match {user_id} -> {target_id} (confirmed: {reciprocated})");

    Ok(MatchOutcome::Created {
        row,
        confirmed: reciprocated,
    })
}

/// Profiles of everyone the user is confirmed to team up with.
pub async fn confirmed_roster(pool: &PgPool, user_id: Uuid) -> Result<Vec<UserInfoRow>> {
    Ok(sqlx::query_as::<_, UserInfoRow>(
        r#"
        SELECT ui.*
        FROM user_info ui
        JOIN confirmed_matches cm ON cm.user2_id = ui.user_id
        WHERE cm.user1_id = $1
        ORDER BY cm.date_matched ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}
