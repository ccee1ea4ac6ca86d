//! Error types for the cost engine.
//!
//! There are only two failure classes:
//!
//! - [`CostModelError::InvalidConfiguration`]: the configuration snapshot is
//!   malformed (non-positive limits, weights not summing to 1.0, thresholds out
//!   of order). A snapshot that produces this error must be rejected before use
//!   and is never retried.
//! - [`CostModelError::InvalidInput`]: one simulation payload is malformed. It
//!   only affects the call that received it.
//!
//! Callers must treat any error from `analyze` as "cannot assess this
//! transaction" and must not substitute a default score.

use thiserror::Error;

/// Errors raised while validating configuration or evaluating a simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CostModelError {
    /// The configuration snapshot violates one of its invariants.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The simulation payload cannot be assessed.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl CostModelError {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Whether this error condemns the whole configuration epoch rather than
    /// a single call.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration(_))
    }
}

pub type Result<T> = std::result::Result<T, CostModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = CostModelError::invalid_config("tx_max_instructions must be > 0");
        assert_eq!(
            err.to_string(),
            "invalid configuration: tx_max_instructions must be > 0"
        );
        assert!(err.is_configuration());

        let err = CostModelError::invalid_input("bad payload");
        assert_eq!(err.to_string(), "invalid input: bad payload");
        assert!(!err.is_configuration());
    }
}
