//! # Error Types
//!
//! Errors raised while parsing shared primitives.

use thiserror::Error;

/// Errors from parsing textual identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// Input is not valid hexadecimal.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Decoded bytes have the wrong width for the target type.
    #[error("invalid {kind} length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Target type name.
        kind: &'static str,
        /// Required width.
        expected: usize,
        /// Decoded width.
        got: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_length_message() {
        let err = TypeError::InvalidLength {
            kind: "Hash",
            expected: 32,
            got: 4,
        };
        assert!(err.to_string().contains("Hash"));
        assert!(err.to_string().contains("got 4"));
    }
}
