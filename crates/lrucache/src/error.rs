//! Error types for lrucache

use std::fmt;

/// Result type alias for lrucache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache construction
///
/// A lookup miss is not an error; `get` reports it as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Capacity must be a positive integer
    InvalidCapacity(i64),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCapacity(capacity) => {
                write!(f, "Invalid capacity: {} (must be at least 1)", capacity)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_rejected_value() {
        let err = Error::InvalidCapacity(-3);
        assert_eq!(err.to_string(), "Invalid capacity: -3 (must be at least 1)");
    }
}
