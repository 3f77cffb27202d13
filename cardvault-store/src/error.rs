//! Error types for cardvault-store

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Database error type.
///
/// Constraint violations (unique names, foreign keys) are carried inside
/// the `Sqlx` variant unchanged; callers that need to map them inspect the
/// error code through the helpers below.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{key}'")]
    NotFound {
        resource: &'static str,
        key: String,
    },
}

impl StoreError {
    /// True when the underlying database error is a unique-constraint
    /// violation (Postgres SQLSTATE 23505).
    pub fn is_unique_violation(&self) -> bool {
        self.sqlstate().as_deref() == Some("23505")
    }

    /// True when the underlying database error is a foreign-key violation
    /// (Postgres SQLSTATE 23503).
    pub fn is_foreign_key_violation(&self) -> bool {
        self.sqlstate().as_deref() == Some("23503")
    }

    fn sqlstate(&self) -> Option<String> {
        match self {
            Self::Sqlx(sqlx::Error::Database(db)) => db.code().map(|code| code.into_owned()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = StoreError::NotFound {
            resource: "card",
            key: "Goblin".to_owned(),
        };
        assert_eq!(err.to_string(), "not found: card 'Goblin'");
    }

    #[test]
    fn not_found_is_not_a_violation() {
        let err = StoreError::NotFound {
            resource: "card",
            key: "Goblin".to_owned(),
        };
        assert!(!err.is_unique_violation());
        assert!(!err.is_foreign_key_violation());
    }
}
