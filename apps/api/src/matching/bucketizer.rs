//! Partitions candidates into the four primary-role buckets.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matching::profile::{fold, Profile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoleBucket {
    #[serde(rename = "data science")]
    DataScience,
    #[serde(rename = "back-end")]
    BackEnd,
    #[serde(rename = "front-end")]
    FrontEnd,
    #[serde(rename = "business")]
    Business,
}

impl RoleBucket {
    pub const ALL: [RoleBucket; 4] = [
        RoleBucket::DataScience,
        RoleBucket::BackEnd,
        RoleBucket::FrontEnd,
        RoleBucket::Business,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RoleBucket::DataScience => "data science",
            RoleBucket::BackEnd => "back-end",
            RoleBucket::FrontEnd => "front-end",
            RoleBucket::Business => "business",
        }
    }

    /// Case-insensitive lookup of a primary role. Unknown roles have no bucket.
    pub fn from_role(role: &str) -> Option<Self> {
        let role = fold(role);
        RoleBucket::ALL.into_iter().find(|b| b.as_str() == role)
    }
}

impl std::fmt::Display for RoleBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per bucket. Serializes as the four-key map the clients expect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleBuckets<T> {
    #[serde(rename = "data science")]
    pub data_science: T,
    #[serde(rename = "back-end")]
    pub back_end: T,
    #[serde(rename = "front-end")]
    pub front_end: T,
    pub business: T,
}

impl<T> RoleBuckets<T> {
    pub fn get(&self, bucket: RoleBucket) -> &T {
        match bucket {
            RoleBucket::DataScience => &self.data_science,
            RoleBucket::BackEnd => &self.back_end,
            RoleBucket::FrontEnd => &self.front_end,
            RoleBucket::Business => &self.business,
        }
    }

    pub fn get_mut(&mut self, bucket: RoleBucket) -> &mut T {
        match bucket {
            RoleBucket::DataScience => &mut self.data_science,
            RoleBucket::BackEnd => &mut self.back_end,
            RoleBucket::FrontEnd => &mut self.front_end,
            RoleBucket::Business => &mut self.business,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (RoleBucket, &T)> {
        RoleBucket::ALL.into_iter().map(move |b| (b, self.get(b)))
    }

    pub fn map<U>(self, mut f: impl FnMut(RoleBucket, T) -> U) -> RoleBuckets<U> {
        RoleBuckets {
            data_science: f(RoleBucket::DataScience, self.data_science),
            back_end: f(RoleBucket::BackEnd, self.back_end),
            front_end: f(RoleBucket::FrontEnd, self.front_end),
            business: f(RoleBucket::Business, self.business),
        }
    }

    /// Bucket-ordered pairs, the unit of work for fan-out.
    pub fn into_pairs(self) -> Vec<(RoleBucket, T)> {
        vec![
            (RoleBucket::DataScience, self.data_science),
            (RoleBucket::BackEnd, self.back_end),
            (RoleBucket::FrontEnd, self.front_end),
            (RoleBucket::Business, self.business),
        ]
    }
}

impl<T: Default> RoleBuckets<T> {
    /// Fan-in. Buckets missing from `pairs` take `T::default()`.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (RoleBucket, T)>) -> Self {
        let mut buckets = RoleBuckets::default();
        for (bucket, value) in pairs {
            *buckets.get_mut(bucket) = value;
        }
        buckets
    }
}

impl<T> RoleBuckets<Vec<T>> {
    pub fn total_len(&self) -> usize {
        self.iter().map(|(_, v)| v.len()).sum()
    }
}

/// Splits candidates by primary role, preserving input order inside each bucket.
///
/// Profiles with a missing or unrecognised primary role land in no bucket.
pub fn bucketize(candidates: &[Profile]) -> RoleBuckets<Vec<&Profile>> {
    let mut buckets: RoleBuckets<Vec<&Profile>> = RoleBuckets::default();

    for candidate in candidates {
        match candidate.primary_role.as_deref().and_then(RoleBucket::from_role) {
            Some(bucket) => buckets.get_mut(bucket).push(candidate),
            None => debug!(
                profile_id = %candidate.id,
                primary_role = ?candidate.primary_role,
                "candidate has no recognised primary role; skipping"
            ),
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::profile::tests::make_profile;

    #[test]
    fn test_from_role_is_case_insensitive() {
        assert_eq!(RoleBucket::from_role("Data Science"), Some(RoleBucket::DataScience));
        assert_eq!(RoleBucket::from_role("BACK-END"), Some(RoleBucket::BackEnd));
        assert_eq!(RoleBucket::from_role(" front-end "), Some(RoleBucket::FrontEnd));
        assert_eq!(RoleBucket::from_role("business"), Some(RoleBucket::Business));
        assert_eq!(RoleBucket::from_role("devops"), None);
    }

    #[test]
    fn test_bucketize_preserves_order_and_drops_unknown() {
        let a = make_profile("back-end");
        let b = make_profile("designer");
        let c = make_profile("Back-End");
        let d = make_profile("business");
        let mut e = make_profile("front-end");
        e.primary_role = None;
        let candidates = vec![a.clone(), b, c.clone(), d.clone(), e];

        let buckets = bucketize(&candidates);

        let back_end: Vec<_> = buckets.back_end.iter().map(|p| p.id).collect();
        assert_eq!(back_end, vec![a.id, c.id]);
        assert_eq!(buckets.business.len(), 1);
        assert_eq!(buckets.business[0].id, d.id);
        assert!(buckets.data_science.is_empty());
        assert!(buckets.front_end.is_empty());
        assert_eq!(buckets.total_len(), 3);
    }

    #[test]
    fn test_every_recognised_candidate_lands_in_exactly_one_bucket() {
        let candidates: Vec<Profile> = ["data science", "back-end", "front-end", "business"]
            .iter()
            .cycle()
            .take(12)
            .map(|r| make_profile(r))
            .collect();

        let buckets = bucketize(&candidates);

        assert_eq!(buckets.total_len(), candidates.len());
        for candidate in &candidates {
            let hits = buckets
                .iter()
                .filter(|(_, members)| members.iter().any(|m| m.id == candidate.id))
                .count();
            assert_eq!(hits, 1);
        }
    }

    #[test]
    fn test_empty_input_gives_four_empty_buckets() {
        let buckets = bucketize(&[]);
        assert_eq!(buckets.total_len(), 0);
        assert_eq!(buckets.iter().count(), 4);
    }

    #[test]
    fn test_role_buckets_serialize_with_canonical_keys() {
        let buckets = RoleBuckets::from_pairs(RoleBucket::ALL.map(|b| (b, b.as_str().len())));
        let value = serde_json::to_value(&buckets).unwrap();
        assert_eq!(value["data science"], 12);
        assert_eq!(value["back-end"], 8);
        assert_eq!(value["front-end"], 9);
        assert_eq!(value["business"], 8);
    }

    #[test]
    fn test_from_pairs_round_trips_into_pairs() {
        let buckets = RoleBuckets::from_pairs(RoleBucket::ALL.map(|b| (b, vec![b.as_str()])));
        let rebuilt = RoleBuckets::from_pairs(buckets.clone().into_pairs());
        assert_eq!(rebuilt, buckets);
    }
}
