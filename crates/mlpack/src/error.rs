//! Error types for the binding runtime.
//!
//! Every fallible operation in this crate returns [`Result`]. Marshaling
//! failures ([`MlpackError::Shape`], [`MlpackError::Domain`]) are raised before
//! anything is handed to the native side, so no native allocation is made on
//! those paths.

use thiserror::Error;

use crate::matrix::Flavor;

// =============================================================================
// Error Types
// =============================================================================

/// Errors raised by environments, marshaling, model handles and entries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MlpackError {
    /// A host matrix does not have the shape its flavor requires.
    #[error("shape mismatch for '{name}': {flavor} cannot accept a {rows}x{cols} matrix")]
    Shape {
        name: String,
        flavor: Flavor,
        rows: usize,
        cols: usize,
    },

    /// A value cannot be represented in the target flavor (e.g. a negative
    /// entry pushed as an unsigned label).
    #[error("value {value} for '{name}' is not a non-negative integer")]
    Domain { name: String, value: f64 },

    /// An environment or model handle was used in a state that forbids it.
    #[error("lifecycle violation: {0}")]
    Lifecycle(String),

    /// The native side reported a failure.
    #[error("mlpack program '{program}' failed: {reason}")]
    Bridge { program: String, reason: String },

    /// A parameter or program name cannot be handed to the native side.
    #[error("invalid name {0:?}: names must be non-empty and free of NUL bytes")]
    InvalidName(String),
}

impl MlpackError {
    pub(crate) fn lifecycle(message: impl Into<String>) -> Self {
        Self::Lifecycle(message.into())
    }

    pub(crate) fn bridge(program: &str, reason: impl Into<String>) -> Self {
        Self::Bridge {
            program: program.to_owned(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Result type for binding operations.
pub type Result<T> = std::result::Result<T, MlpackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_message_names_flavor_and_dims() {
        let err = MlpackError::Shape {
            name: "labels".into(),
            flavor: Flavor::URow,
            rows: 3,
            cols: 2,
        };
        assert_eq!(
            err.to_string(),
            "shape mismatch for 'labels': urow cannot accept a 3x2 matrix"
        );
    }

    #[test]
    fn bridge_message_carries_reason() {
        let err = MlpackError::bridge("pca", "new dimensionality too large");
        assert_eq!(
            err.to_string(),
            "mlpack program 'pca' failed: new dimensionality too large"
        );
    }
}
