//! Persistence-gateway contract.
//!
//! Store ports are defined next to the domain crates that consume them and
//! implemented by the infrastructure layer; this module holds the pieces
//! every port shares: the failure taxonomy of a commit and the optimistic
//! concurrency expectation attached to row mutations.

use thiserror::Error;

/// Result type for gateway operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Failure surfaced by a gateway commit or single-row mutation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The targeted row does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// A reference pointed at a row that does not exist, or a row still
    /// referenced elsewhere was asked to go away (restrict on delete).
    #[error("foreign key violation: {0}")]
    ForeignKey(String),

    /// A uniqueness rule was violated (e.g. the composite line-item key).
    #[error("duplicate key: {0}")]
    Duplicate(String),

    /// A check constraint rejected a value.
    #[error("check constraint violation: {0}")]
    Check(String),

    /// The row changed underfoot (optimistic versioning), or the store
    /// itself is unusable.
    #[error("conflict: {0}")]
    Conflict(String),
}

/// Optimistic concurrency expectation for a row.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExpectedVersion {
    /// Skip version checking (useful for idempotent writes and migrations).
    Any,
    /// Require the row to be at an exact version.
    Exact(u64),
}

impl ExpectedVersion {
    pub fn matches(self, actual: u64) -> bool {
        match self {
            ExpectedVersion::Any => true,
            ExpectedVersion::Exact(v) => v == actual,
        }
    }

    pub fn check(self, actual: u64) -> StoreResult<()> {
        if self.matches(actual) {
            Ok(())
        } else {
            Err(StoreError::Conflict(format!(
                "row version check failed (expected: {self:?}, actual: {actual})"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_matches_every_version() {
        assert!(ExpectedVersion::Any.matches(0));
        assert!(ExpectedVersion::Any.matches(17));
    }

    #[test]
    fn exact_only_matches_its_version() {
        assert!(ExpectedVersion::Exact(3).check(3).is_ok());
        let err = ExpectedVersion::Exact(3).check(4).unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }
}
