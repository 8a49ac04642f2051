use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// "First Last", skipping whichever half is missing.
    pub fn display_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(first: Option<&str>, last: Option<&str>) -> User {
        User {
            id: Uuid::new_v4(),
            email: "someone@example.com".to_string(),
            first_name: first.map(String::from),
            last_name: last.map(String::from),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_display_name_joins_both_halves() {
        assert_eq!(user(Some("Ada"), Some("Lovelace")).display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_display_name_skips_missing_half() {
        assert_eq!(user(Some("Ada"), None).display_name(), "Ada");
        assert_eq!(user(None, Some(" Lovelace ")).display_name(), "Lovelace");
        assert_eq!(user(None, None).display_name(), "");
    }
}
