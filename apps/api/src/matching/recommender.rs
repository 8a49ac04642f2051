//! Recommender: the engine's entry point.
//!
//! Pipeline per request (nothing is cached between requests):
//! 1. drop duplicate identifiers, bucketize by primary role
//! 2. vectorize each bucket (fan-out)
//! 3. vectorize the requester, align requester + every bucket to one schema
//! 4. rank each bucket against the requester (fan-out), fan-in to `RoleBuckets`
//!
//! `AppState` holds an `Arc<dyn Recommender>`.

use std::collections::HashSet;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::matching::alignment::align_tables;
use crate::matching::bucketizer::{bucketize, RoleBucket, RoleBuckets};
use crate::matching::profile::{Profile, ProfileRecord};
use crate::matching::ranker::{rank_bucket, ScoredCandidate};
use crate::matching::similarity::experience_weight;
use crate::matching::vectorizer::{vectorize, FeatureTable};

pub type Recommendations = RoleBuckets<Vec<ScoredCandidate>>;

pub trait Recommender: Send + Sync {
    fn recommend(&self, requester: &Profile, candidates: &[Profile]) -> Recommendations;
}

/// Goal-weighted cosine recommender.
#[derive(Debug, Clone, Copy)]
pub struct CosineRecommender {
    /// Run the four bucket pipelines on the rayon pool.
    pub parallel: bool,
}

impl Default for CosineRecommender {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl Recommender for CosineRecommender {
    fn recommend(&self, requester: &Profile, candidates: &[Profile]) -> Recommendations {
        recommend_with(requester, candidates, self.parallel)
    }
}

/// Ranks `candidates` for `requester`, one least-similar-first list per role bucket.
pub fn recommend(requester: &Profile, candidates: &[Profile]) -> Recommendations {
    CosineRecommender::default().recommend(requester, candidates)
}

/// Validates caller-supplied records. A record without an identifier or
/// owner identifier is dropped with a warning.
pub fn valid_profiles(records: Vec<ProfileRecord>) -> Vec<Profile> {
    records
        .into_iter()
        .filter_map(|record| match Profile::try_from(record) {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!("dropping malformed candidate: {e}");
                None
            }
        })
        .collect()
}

/// Map each bucket through `f`, on the rayon pool when `parallel` is set.
fn fan_out<T, U, F>(buckets: RoleBuckets<T>, parallel: bool, f: F) -> RoleBuckets<U>
where
    T: Send,
    U: Send + Default,
    F: Fn(RoleBucket, T) -> U + Send + Sync,
{
    let pairs = buckets.into_pairs();
    let results: Vec<(RoleBucket, U)> = if parallel {
        pairs
            .into_par_iter()
            .map(|(bucket, value)| (bucket, f(bucket, value)))
            .collect()
    } else {
        pairs
            .into_iter()
            .map(|(bucket, value)| (bucket, f(bucket, value)))
            .collect()
    };
    RoleBuckets::from_pairs(results)
}

fn dedup_by_id(candidates: &[Profile]) -> Vec<&Profile> {
    let mut seen = HashSet::new();
    candidates
        .iter()
        .filter(|p| {
            let fresh = seen.insert(p.id);
            if !fresh {
                warn!(profile_id = %p.id, "duplicate candidate identifier; keeping first");
            }
            fresh
        })
        .collect()
}

fn recommend_with(requester: &Profile, candidates: &[Profile], parallel: bool) -> Recommendations {
    if candidates.is_empty() {
        return Recommendations::default();
    }

    let unique: Vec<Profile> = dedup_by_id(candidates).into_iter().cloned().collect();
    let buckets = bucketize(&unique);

    let tables: RoleBuckets<Option<FeatureTable>> =
        fan_out(buckets.clone(), parallel, |bucket, members| {
            let table = vectorize(&members);
            if let Some(t) = &table {
                debug!(%bucket, members = t.rows.len(), columns = t.columns.len(), "vectorized bucket");
            }
            table
        });

    let Some(requester_table) = vectorize(&[requester]) else {
        return Recommendations::default();
    };

    // One merged schema: the requester plus every non-empty bucket.
    let present: Vec<RoleBucket> = tables
        .iter()
        .filter(|(_, t)| t.is_some())
        .map(|(b, _)| b)
        .collect();
    let mut to_align: Vec<&FeatureTable> = vec![&requester_table];
    to_align.extend(tables.iter().filter_map(|(_, t)| t.as_ref()));

    let mut aligned = align_tables(&to_align).into_iter();
    let Some(requester_row) = aligned.next().and_then(|t| t.rows.into_iter().next()) else {
        return Recommendations::default();
    };
    let aligned: RoleBuckets<Option<FeatureTable>> =
        RoleBuckets::from_pairs(present.into_iter().zip(aligned.map(Some)));

    let weight = experience_weight(requester.goal.as_deref());
    debug!(weight, columns = requester_row.values.len(), "ranking buckets");

    let work = aligned.map(|b, table| (table, buckets.get(b).clone()));
    fan_out(work, parallel, |bucket, (table, members)| match table {
        Some(table) => rank_bucket(bucket, &requester_row, &table, &members, weight),
        None => Vec::new(),
    })
}
