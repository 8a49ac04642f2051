//! Column alignment across feature tables.
//!
//! Encoding derives columns from whatever a bucket happens to contain, so two
//! tables rarely share a schema. Alignment builds the sorted union, zero-fills
//! what a table lacks, and returns new tables. Inputs are never mutated.

use std::collections::{BTreeSet, HashMap};

use crate::matching::vectorizer::{FeatureRow, FeatureTable};

/// Sorted union of every column across `tables`.
pub fn union_columns<'a>(tables: impl IntoIterator<Item = &'a FeatureTable>) -> Vec<String> {
    tables
        .into_iter()
        .flat_map(|t| t.columns.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

impl FeatureTable {
    /// Projects this table onto `columns`: missing columns read 0, extra ones are dropped.
    pub fn reindex(&self, columns: &[String]) -> FeatureTable {
        let source: HashMap<&str, usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();
        let mapping: Vec<Option<usize>> = columns
            .iter()
            .map(|c| source.get(c.as_str()).copied())
            .collect();

        let rows = self
            .rows
            .iter()
            .map(|row| FeatureRow {
                values: mapping
                    .iter()
                    .map(|m| m.map(|i| row.values[i]).unwrap_or(0.0))
                    .collect(),
                ..row.clone()
            })
            .collect();

        FeatureTable {
            columns: columns.to_vec(),
            rows,
        }
    }
}

/// Aligns every table to the union of all their columns, in lexicographic order.
pub fn align_tables(tables: &[&FeatureTable]) -> Vec<FeatureTable> {
    let columns = union_columns(tables.iter().copied());
    tables.iter().map(|t| t.reindex(&columns)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn table(columns: &[&str], rows: &[&[f64]]) -> FeatureTable {
        FeatureTable {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .iter()
                .map(|values| FeatureRow {
                    id: Uuid::new_v4(),
                    user_id: Uuid::new_v4(),
                    name: String::new(),
                    primary_role: None,
                    values: values.to_vec(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_align_fills_missing_with_zero_and_sorts() {
        let back_end = table(&["experience_level", "primary:go"], &[&[2.0, 1.0]]);
        let business = table(&["experience_level", "goal:win hackathon"], &[&[1.0, 1.0]]);

        let aligned = align_tables(&[&back_end, &business]);

        let expected = vec!["experience_level", "goal:win hackathon", "primary:go"];
        assert_eq!(aligned[0].columns, expected);
        assert_eq!(aligned[1].columns, expected);
        assert_eq!(aligned[0].rows[0].values, vec![2.0, 0.0, 1.0]);
        assert_eq!(aligned[1].rows[0].values, vec![1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_align_is_idempotent() {
        let a = table(&["experience_level", "primary:rust"], &[&[3.0, 1.0], &[1.0, 0.0]]);
        let b = table(&["experience_level", "trait:leader"], &[&[2.0, 1.0]]);

        let once = align_tables(&[&a, &b]);
        let twice = align_tables(&once.iter().collect::<Vec<_>>());

        assert_eq!(once, twice);
    }

    #[test]
    fn test_align_does_not_touch_inputs() {
        let a = table(&["primary:rust"], &[&[1.0]]);
        let b = table(&["primary:go"], &[&[1.0]]);
        let a_before = a.clone();

        let _ = align_tables(&[&a, &b]);

        assert_eq!(a, a_before);
    }

    #[test]
    fn test_reindex_preserves_identity_fields() {
        let a = table(&["primary:rust"], &[&[1.0]]);
        let columns = vec!["primary:go".to_string(), "primary:rust".to_string()];
        let reindexed = a.reindex(&columns);
        assert_eq!(reindexed.rows[0].id, a.rows[0].id);
        assert_eq!(reindexed.rows[0].values, vec![0.0, 1.0]);
    }

    #[test]
    fn test_union_of_nothing_is_empty() {
        assert!(union_columns(std::iter::empty()).is_empty());
    }
}
