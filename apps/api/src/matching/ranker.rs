//! Similarity ranker: scores a bucket against the requester and orders it.
//!
//! Order is ascending: the least similar candidate comes first. Teammates who
//! complement the requester are surfaced ahead of near-duplicates. Equal scores
//! keep their bucket order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::matching::bucketizer::RoleBucket;
use crate::matching::profile::Profile;
use crate::matching::similarity::cosine_similarity;
use crate::matching::vectorizer::{FeatureRow, FeatureTable, EXPERIENCE_COLUMN};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub bucket: RoleBucket,
    pub similarity: f64,
    #[serde(flatten)]
    pub profile: Profile,
}

/// Copy of `values` with the experience column scaled by `weight`.
fn weighted(values: &[f64], experience_idx: Option<usize>, weight: f64) -> Vec<f64> {
    let mut out = values.to_vec();
    if let Some(i) = experience_idx {
        out[i] *= weight;
    }
    out
}

/// Scores every row of `table` against `requester`.
///
/// Both must already share one column set. Returns `(row index, score)` pairs
/// sorted least-similar first; the sort is stable.
pub fn score_rows(
    requester: &FeatureRow,
    table: &FeatureTable,
    experience_weight: f64,
) -> Vec<(usize, f64)> {
    let experience_idx = table.column_index(EXPERIENCE_COLUMN);
    let requester_values = weighted(&requester.values, experience_idx, experience_weight);

    let mut scored: Vec<(usize, f64)> = table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let candidate_values = weighted(&row.values, experience_idx, experience_weight);
            (i, cosine_similarity(&requester_values, &candidate_values))
        })
        .collect();

    scored.sort_by(|a, b| a.1.total_cmp(&b.1));
    scored
}

/// Ranks one bucket and re-attaches each candidate's full, unmodified profile.
///
/// `members` are the bucket's original profiles; rows are matched back by identifier.
pub fn rank_bucket(
    bucket: RoleBucket,
    requester: &FeatureRow,
    table: &FeatureTable,
    members: &[&Profile],
    experience_weight: f64,
) -> Vec<ScoredCandidate> {
    let by_id: HashMap<Uuid, &Profile> = members.iter().map(|p| (p.id, *p)).collect();

    score_rows(requester, table, experience_weight)
        .into_iter()
        .filter_map(|(i, similarity)| {
            let row = &table.rows[i];
            match by_id.get(&row.id) {
                Some(profile) => Some(ScoredCandidate {
                    bucket,
                    similarity,
                    profile: (*profile).clone(),
                }),
                None => {
                    warn!(profile_id = %row.id, %bucket, "scored row has no source profile");
                    None
                }
            }
        })
        .collect()
}
