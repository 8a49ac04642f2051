//! Vectorizer: turns a bucket of profiles into a numeric feature table.
//!
//! Two passes:
//! 1. `FeatureSchema::observe` collects the value universe for every categorical
//!    attribute and both skill lists (sorted sets, so column order is deterministic).
//! 2. `FeatureSchema::encode` writes one row per profile against that universe.
//!
//! Columns:
//! - `experience_level`: ordinal (beginner=1, intermediate=2, expert=3, absent=0)
//! - `secondary_role:<v>`, `goal:<v>`, `trait:<v>`: one-hot; absent value = all zero
//! - `primary:<tag>`, `secondary:<tag>`: multi-hot, namespaced per list

use std::collections::{BTreeSet, HashMap};

use uuid::Uuid;

use crate::matching::profile::{experience_ordinal, NormalizedProfile, Profile};

pub const EXPERIENCE_COLUMN: &str = "experience_level";

const SECONDARY_ROLE_PREFIX: &str = "secondary_role:";
const GOAL_PREFIX: &str = "goal:";
const TRAIT_PREFIX: &str = "trait:";
const PRIMARY_SKILL_PREFIX: &str = "primary:";
const SECONDARY_SKILL_PREFIX: &str = "secondary:";

/// A profile's encoded row. Identity fields are carried but never scored.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub primary_role: Option<String>,
    pub values: Vec<f64>,
}

/// Rows sharing one ordered column set.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    pub columns: Vec<String>,
    pub rows: Vec<FeatureRow>,
}

impl FeatureTable {
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }
}

/// Observed value universe for one bucket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSchema {
    pub secondary_roles: BTreeSet<String>,
    pub goals: BTreeSet<String>,
    pub traits: BTreeSet<String>,
    pub primary_skills: BTreeSet<String>,
    pub secondary_skills: BTreeSet<String>,
}

impl FeatureSchema {
    pub fn observe<'a>(profiles: impl IntoIterator<Item = &'a NormalizedProfile>) -> Self {
        let mut schema = FeatureSchema::default();
        for p in profiles {
            if let Some(v) = &p.secondary_role {
                schema.secondary_roles.insert(v.clone());
            }
            if let Some(v) = &p.goal {
                schema.goals.insert(v.clone());
            }
            if let Some(v) = &p.personality_trait {
                schema.traits.insert(v.clone());
            }
            schema.primary_skills.extend(p.primary_skills.iter().cloned());
            schema.secondary_skills.extend(p.secondary_skills.iter().cloned());
        }
        schema
    }

    /// Every column name, lexicographically ordered.
    pub fn columns(&self) -> Vec<String> {
        let mut columns = BTreeSet::new();
        columns.insert(EXPERIENCE_COLUMN.to_string());
        let namespaced = [
            (SECONDARY_ROLE_PREFIX, &self.secondary_roles),
            (GOAL_PREFIX, &self.goals),
            (TRAIT_PREFIX, &self.traits),
            (PRIMARY_SKILL_PREFIX, &self.primary_skills),
            (SECONDARY_SKILL_PREFIX, &self.secondary_skills),
        ];
        for (prefix, values) in namespaced {
            columns.extend(values.iter().map(|v| format!("{prefix}{v}")));
        }
        columns.into_iter().collect()
    }

    pub fn encode(&self, profiles: &[NormalizedProfile]) -> FeatureTable {
        let columns = self.columns();
        let index: HashMap<&str, usize> = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();

        let rows = profiles
            .iter()
            .map(|p| {
                let mut values = vec![0.0; columns.len()];
                let mut hot = |name: String| {
                    if let Some(&i) = index.get(name.as_str()) {
                        values[i] = 1.0;
                    }
                };

                if let Some(v) = &p.secondary_role {
                    hot(format!("{SECONDARY_ROLE_PREFIX}{v}"));
                }
                if let Some(v) = &p.goal {
                    hot(format!("{GOAL_PREFIX}{v}"));
                }
                if let Some(v) = &p.personality_trait {
                    hot(format!("{TRAIT_PREFIX}{v}"));
                }
                for tag in &p.primary_skills {
                    hot(format!("{PRIMARY_SKILL_PREFIX}{tag}"));
                }
                for tag in &p.secondary_skills {
                    hot(format!("{SECONDARY_SKILL_PREFIX}{tag}"));
                }

                values[index[EXPERIENCE_COLUMN]] = experience_ordinal(p.experience_level.as_deref());

                FeatureRow {
                    id: p.id,
                    user_id: p.user_id,
                    name: p.name.clone(),
                    primary_role: p.primary_role.clone(),
                    values,
                }
            })
            .collect();

        FeatureTable { columns, rows }
    }
}

/// Vectorizes a bucket. An empty bucket has no schema to derive, so it yields `None`.
pub fn vectorize(profiles: &[&Profile]) -> Option<FeatureTable> {
    if profiles.is_empty() {
        return None;
    }
    let normalized: Vec<NormalizedProfile> = profiles.iter().map(|p| p.normalized()).collect();
    let schema = FeatureSchema::observe(&normalized);
    Some(schema.encode(&normalized))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::profile::tests::{make_profile, tags};

    impl FeatureTable {
        /// Value of `column` in row `row`, 0.0 when the column is not in the schema.
        fn value(&self, row: usize, column: &str) -> f64 {
            self.column_index(column)
                .and_then(|i| self.rows.get(row).map(|r| r.values[i]))
                .unwrap_or(0.0)
        }
    }

    #[test]
    fn test_empty_bucket_is_absent() {
        assert_eq!(vectorize(&[]), None);
    }

    #[test]
    fn test_columns_are_sorted_and_namespaced() {
        let mut a = make_profile("back-end");
        a.primary_skills = tags(&["sql", "python"]);
        a.secondary_skills = tags(&["sql"]);
        a.goal = Some("win hackathon".to_string());

        let table = vectorize(&[&a]).unwrap();
        assert_eq!(
            table.columns,
            vec![
                "experience_level",
                "goal:win hackathon",
                "primary:python",
                "primary:sql",
                "secondary:sql",
            ]
        );
    }

    #[test]
    fn test_one_hot_and_multi_hot_values() {
        let mut a = make_profile("back-end");
        a.experience_level = Some("expert".to_string());
        a.secondary_role = Some("front-end".to_string());
        a.primary_skills = tags(&["rust"]);

        let mut b = make_profile("back-end");
        b.experience_level = Some("beginner".to_string());
        b.secondary_role = Some("business".to_string());
        b.primary_skills = tags(&["go", "rust"]);

        let table = vectorize(&[&a, &b]).unwrap();

        assert_eq!(table.value(0, EXPERIENCE_COLUMN), 3.0);
        assert_eq!(table.value(1, EXPERIENCE_COLUMN), 1.0);
        assert_eq!(table.value(0, "secondary_role:front-end"), 1.0);
        assert_eq!(table.value(0, "secondary_role:business"), 0.0);
        assert_eq!(table.value(1, "secondary_role:business"), 1.0);
        assert_eq!(table.value(0, "primary:go"), 0.0);
        assert_eq!(table.value(1, "primary:go"), 1.0);
        assert_eq!(table.value(1, "primary:rust"), 1.0);
    }

    #[test]
    fn test_absent_categorical_is_all_zero_without_missing_column() {
        let mut a = make_profile("business");
        a.personality_trait = Some("leader".to_string());
        let b = make_profile("business");

        let table = vectorize(&[&a, &b]).unwrap();

        let trait_cols: Vec<_> = table
            .columns
            .iter()
            .filter(|c| c.starts_with(TRAIT_PREFIX))
            .collect();
        assert_eq!(trait_cols, vec!["trait:leader"]);
        assert_eq!(table.value(1, "trait:leader"), 0.0);
    }

    #[test]
    fn test_same_tag_in_both_lists_gives_two_columns() {
        let mut a = make_profile("data science");
        a.primary_skills = tags(&["python"]);
        a.secondary_skills = tags(&["python"]);

        let table = vectorize(&[&a]).unwrap();
        assert!(table.column_index("primary:python").is_some());
        assert!(table.column_index("secondary:python").is_some());
        assert_ne!(
            table.column_index("primary:python"),
            table.column_index("secondary:python")
        );
    }

    #[test]
    fn test_casing_variants_share_columns() {
        let mut a = make_profile("back-end");
        a.primary_skills = tags(&["Python"]);
        a.goal = Some("Gain Experience".to_string());
        let mut b = make_profile("back-end");
        b.primary_skills = tags(&["python"]);
        b.goal = Some("gain experience".to_string());

        let table = vectorize(&[&a, &b]).unwrap();
        assert_eq!(
            table.columns,
            vec!["experience_level", "goal:gain experience", "primary:python"]
        );
        assert_eq!(table.rows[0].values, table.rows[1].values);
    }

    #[test]
    fn test_identity_fields_are_carried_not_encoded() {
        let a = make_profile("Front-End");
        let table = vectorize(&[&a]).unwrap();
        let row = &table.rows[0];
        assert_eq!(row.id, a.id);
        assert_eq!(row.user_id, a.user_id);
        assert_eq!(row.primary_role.as_deref(), Some("front-end"));
        assert_eq!(row.values.len(), table.columns.len());
        assert!(!table.columns.iter().any(|c| c.contains("front-end")));
    }

    #[test]
    fn test_all_default_profile_is_zero_row() {
        let a = make_profile("business");
        let table = vectorize(&[&a]).unwrap();
        assert_eq!(table.columns, vec![EXPERIENCE_COLUMN]);
        assert_eq!(table.rows[0].values, vec![0.0]);
    }
}
