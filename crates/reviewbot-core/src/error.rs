use crate::directory::DirectoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("failed to look up {what}: {source}")]
    Lookup {
        what: String,
        #[source]
        source: DirectoryError,
    },

    #[error(
        "sampling invariant violated: wanted {requested} of {pool} candidates, \
         gave up after {attempts} draws"
    )]
    InvariantViolation {
        requested: usize,
        pool: usize,
        attempts: usize,
    },

    #[error("invalid permission '{0}': expected none, read, triage, write, maintain or admin")]
    InvalidPermission(String),

    #[error("invalid team name '{0}': expected 'org/team'")]
    InvalidTeamName(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl ReviewError {
    pub(crate) fn lookup(what: impl Into<String>, source: DirectoryError) -> Self {
        ReviewError::Lookup {
            what: what.into(),
            source,
        }
    }

    /// True for defects inside the engine, as opposed to failures of the
    /// directory or of input files. Callers should not retry these.
    pub fn is_internal(&self) -> bool {
        matches!(self, ReviewError::InvariantViolation { .. })
    }
}

pub type Result<T> = std::result::Result<T, ReviewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariant_violation_is_internal() {
        let err = ReviewError::InvariantViolation {
            requested: 3,
            pool: 4,
            attempts: 15,
        };
        assert!(err.is_internal());
        let msg = err.to_string();
        assert!(msg.contains("3 of 4"));
        assert!(msg.contains("15 draws"));
    }

    #[test]
    fn lookup_failure_is_not_internal() {
        let err = ReviewError::lookup(
            "repository collaborators",
            DirectoryError::Unavailable("rate limited".to_string()),
        );
        assert!(!err.is_internal());
        assert!(err.to_string().contains("repository collaborators"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn malformed_yaml_is_a_file_error() {
        let err: ReviewError = serde_yaml::from_str::<u32>("[not, a, number]")
            .unwrap_err()
            .into();
        assert!(matches!(err, ReviewError::Yaml(_)));
        assert!(!err.is_internal());
    }
}
