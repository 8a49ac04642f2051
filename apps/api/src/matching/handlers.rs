use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::profile::{Profile, ProfileRecord};
use crate::matching::recommender::{valid_profiles, Recommendations, Recommender};
use crate::matching::store::{self, MatchOutcome};
use crate::models::matches::MatchRow;
use crate::models::user_info::UserInfoRow;
use crate::profiles::store::{get_user_info, list_candidates};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct CreateMatchRequest {
    pub user_id: Uuid,
    pub target_user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct CreateMatchResponse {
    #[serde(rename = "match")]
    pub row: MatchRow,
    pub confirmed: bool,
}

#[derive(Debug, Deserialize)]
pub struct RankRequest {
    pub requester: ProfileRecord,
    #[serde(default)]
    pub candidates: Vec<ProfileRecord>,
}

/// Drops every candidate whose owner the requester has already matched with.
pub fn exclude_matched(recommendations: Recommendations, matched: &HashSet<Uuid>) -> Recommendations {
    recommendations.map(|_, ranked| {
        ranked
            .into_iter()
            .filter(|c| !matched.contains(&c.profile.user_id))
            .collect()
    })
}

/// Runs the CPU-bound ranking off the async runtime.
async fn rank_blocking(
    recommender: Arc<dyn Recommender>,
    requester: Profile,
    candidates: Vec<Profile>,
) -> Result<Recommendations, AppError> {
    let recommendations =
        tokio::task::spawn_blocking(move || recommender.recommend(&requester, &candidates))
            .await
            .map_err(|e| anyhow::anyhow!("ranking task failed: {e}"))?;
    Ok(recommendations)
}

/// GET /api/v1/matches
pub async fn handle_get_matches(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Recommendations>, AppError> {
    let requester: Profile = get_user_info(&state.db, params.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No profile for user {}", params.user_id)))?
        .into();

    let pool: Vec<Profile> = list_candidates(&state.db, params.user_id)
        .await?
        .into_iter()
        .map(Profile::from)
        .collect();
    let pool_size = pool.len();

    let ranked = rank_blocking(state.recommender.clone(), requester, pool).await?;

    let matched: HashSet<Uuid> = store::existing_match_ids(&state.db, params.user_id)
        .await?
        .into_iter()
        .collect();
    let recommendations = exclude_matched(ranked, &matched);

    info!(
        "Recommended {} of {} candidates for user {}",
        recommendations.total_len(),
        pool_size,
        params.user_id
    );
    Ok(Json(recommendations))
}

/// POST /api/v1/matches
pub async fn handle_create_match(
    State(state): State<AppState>,
    Json(req): Json<CreateMatchRequest>,
) -> Result<(StatusCode, Json<CreateMatchResponse>), AppError> {
    if req.user_id == req.target_user_id {
        return Err(AppError::Validation(
            "Cannot match with yourself".to_string(),
        ));
    }

    if get_user_info(&state.db, req.target_user_id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "No profile for user {}",
            req.target_user_id
        )));
    }

    match store::create_match(&state.db, req.user_id, req.target_user_id).await? {
        MatchOutcome::AlreadyExists => Err(AppError::Validation(format!(
            "Already matched with user {}",
            req.target_user_id
        ))),
        MatchOutcome::Created { row, confirmed } => Ok((
            StatusCode::CREATED,
            Json(CreateMatchResponse { row, confirmed }),
        )),
    }
}

/// GET /api/v1/roster
pub async fn handle_get_roster(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<UserInfoRow>>, AppError> {
    let roster = store::confirmed_roster(&state.db, params.user_id).await?;
    Ok(Json(roster))
}

/// POST /api/v1/matches/rank
///
/// Ranks caller-supplied records without touching the database.
pub async fn handle_rank(
    State(state): State<AppState>,
    Json(req): Json<RankRequest>,
) -> Result<Json<Recommendations>, AppError> {
    let requester = Profile::try_from(req.requester)
        .map_err(|e| AppError::Validation(format!("Invalid requester: {e}")))?;
    let candidates = valid_profiles(req.candidates);
    let ranked = rank_blocking(state.recommender.clone(), requester, candidates).await?;
    Ok(Json(ranked))
}
