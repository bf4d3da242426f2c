//! Error types for the step engine.

use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors reported by the engine's typed entry points.
///
/// Step generation itself is total; these only surface when parsing an
/// algorithm name or asking the generator for an out-of-range size.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The algorithm identifier is not one of the registered sorts.
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// The requested array size is outside the supported range.
    #[error("array size {size} out of range ({min}..={max})")]
    ArraySize {
        size: usize,
        min: usize,
        max: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = EngineError::UnknownAlgorithm("bogo".into());
        assert_eq!(err.to_string(), "unknown algorithm: bogo");

        let err = EngineError::ArraySize { size: 5, min: 10, max: 100 };
        assert_eq!(err.to_string(), "array size 5 out of range (10..=100)");
    }
}
