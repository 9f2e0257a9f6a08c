//! Error types for the simulation engine.
//!
//! Every variant is a broken invariant. Callers are expected to stop the run:
//! a corrupted snapshot would otherwise leak into every later generation.

use thiserror::Error;

/// Fatal simulation failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// A position, angle or heading became NaN.
    #[error("Non-finite {quantity} for swimbot {index} in generation {generation}")]
    NonFiniteState {
        quantity: &'static str,
        index: usize,
        generation: u64,
    },

    /// A genome asks for more segments than it has gene slots.
    #[error("Invalid genome: {0}")]
    InvalidGenome(String),

    /// The configuration was rejected before the run started.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    /// A NaN value detected outside of a stepping context.
    #[must_use]
    pub fn non_finite(quantity: &'static str) -> Self {
        Self::NonFiniteState {
            quantity,
            index: usize::MAX,
            generation: 0,
        }
    }

    /// Attaches the swimbot index and generation to a NaN report.
    #[must_use]
    pub fn at(self, index: usize, generation: u64) -> Self {
        match self {
            Self::NonFiniteState { quantity, .. } => Self::NonFiniteState {
                quantity,
                index,
                generation,
            },
            other => other,
        }
    }

    #[must_use]
    pub fn invalid_genome<S: Into<String>>(msg: S) -> Self {
        Self::InvalidGenome(msg.into())
    }
}

impl From<anyhow::Error> for SimError {
    fn from(err: anyhow::Error) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimError::non_finite("heading").at(4, 17);
        assert_eq!(
            err.to_string(),
            "Non-finite heading for swimbot 4 in generation 17"
        );
    }

    #[test]
    fn test_at_leaves_other_variants_alone() {
        let err = SimError::invalid_genome("9 segments").at(1, 1);
        assert_eq!(err, SimError::InvalidGenome("9 segments".into()));
    }

    #[test]
    fn test_from_anyhow() {
        let err: SimError = anyhow::anyhow!("width must be positive").into();
        assert!(matches!(err, SimError::Config(_)));
    }
}
