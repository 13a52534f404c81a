//! Validated cache capacity

use std::fmt;
use std::num::NonZeroUsize;

use crate::error::{Error, Result};

/// Maximum number of entries a cache may hold; always at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Capacity(NonZeroUsize);

impl Capacity {
    /// Create a capacity from an unsigned count, rejecting zero
    pub fn new(capacity: usize) -> Result<Self> {
        NonZeroUsize::new(capacity)
            .map(Capacity)
            .ok_or(Error::InvalidCapacity(0))
    }

    /// Get the capacity as a plain count
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl From<NonZeroUsize> for Capacity {
    fn from(capacity: NonZeroUsize) -> Self {
        Capacity(capacity)
    }
}

impl TryFrom<usize> for Capacity {
    type Error = Error;

    fn try_from(capacity: usize) -> Result<Self> {
        Capacity::new(capacity)
    }
}

impl TryFrom<i64> for Capacity {
    type Error = Error;

    fn try_from(capacity: i64) -> Result<Self> {
        if capacity <= 0 {
            return Err(Error::InvalidCapacity(capacity));
        }
        // Wider than the address space: saturate rather than reject.
        let capacity = usize::try_from(capacity).unwrap_or(usize::MAX);
        Capacity::new(capacity)
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_zero_rejected() {
        assert_eq!(Capacity::new(0), Err(Error::InvalidCapacity(0)));
        assert_eq!(Capacity::try_from(0i64), Err(Error::InvalidCapacity(0)));
    }

    #[test]
    fn test_capacity_negative_rejected() {
        assert_eq!(Capacity::try_from(-1i64), Err(Error::InvalidCapacity(-1)));
        assert_eq!(
            Capacity::try_from(i64::MIN),
            Err(Error::InvalidCapacity(i64::MIN))
        );
    }

    #[test]
    fn test_capacity_positive() {
        assert_eq!(Capacity::new(1).unwrap().get(), 1);
        assert_eq!(Capacity::try_from(42i64).unwrap().get(), 42);
        assert_eq!(Capacity::try_from(7usize).unwrap().to_string(), "7");
    }
}
