// Error types for the validation engine

use crate::failure::Failure;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationError {
    /// The configured maximum recursion depth was exceeded. This is a
    /// structural problem (unbounded or value-equal cyclic data) and is
    /// raised regardless of the throw policy.
    #[error("maximum validation depth of {max} exceeded (depth {depth})")]
    MaxDepthExceeded { depth: usize, max: usize },

    /// Terminal validation error, raised under the throw policy once a
    /// validated object finished with failures. Carries the accumulated
    /// failure list of the failed object.
    #[error("{summary}")]
    Invalid {
        failures: Vec<Failure>,
        summary: String,
    },
}

impl ValidationError {
    /// Failures carried by the error, empty for the depth case.
    pub fn failures(&self) -> &[Failure] {
        match self {
            Self::MaxDepthExceeded { .. } => &[],
            Self::Invalid { failures, .. } => failures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ValidationError::MaxDepthExceeded { depth: 33, max: 32 };
        assert_eq!(
            err.to_string(),
            "maximum validation depth of 32 exceeded (depth 33)"
        );
    }

    #[test]
    fn test_failures_access() {
        let err = ValidationError::Invalid {
            failures: vec![Failure::new("bad")],
            summary: "failed".into(),
        };
        assert_eq!(err.failures().len(), 1);
        let depth = ValidationError::MaxDepthExceeded { depth: 1, max: 1 };
        assert!(depth.failures().is_empty());
    }
}
