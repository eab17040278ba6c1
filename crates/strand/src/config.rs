//! List configuration parameters.

use crate::arena::NodeArena;
use crate::error::ListError;

/// Configuration for a new [`LinkedList`](crate::LinkedList).
///
/// Only affects the first arena. Later arenas are sized to the element
/// count they must hold at the time of the rebuild.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListConfig {
    /// Minimum number of node slots in the initial arena.
    ///
    /// Default: 32. Rounded up to a whole bitmap word (64 slots).
    pub initial_capacity: usize,
}

impl ListConfig {
    /// Default initial slot request.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 32;

    /// Create a config requesting `initial_capacity` slots.
    pub fn new(initial_capacity: usize) -> Self {
        Self { initial_capacity }
    }

    /// Check that the config describes an arena that can be built.
    pub fn validate(&self) -> Result<(), ListError> {
        NodeArena::<()>::capacity_for(self.initial_capacity).map(|_| ())
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INITIAL_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_requests_32_slots() {
        assert_eq!(ListConfig::default().initial_capacity, 32);
        assert!(ListConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_capacity_is_valid() {
        assert!(ListConfig::new(0).validate().is_ok());
    }

    #[test]
    fn capacity_that_rounds_past_the_limit_is_rejected() {
        let near_limit = crate::slot::MAX_CAPACITY - 1;
        assert!(ListConfig::new(near_limit).validate().is_err());
    }

    #[test]
    fn oversized_capacity_rejected() {
        let err = ListConfig::new(usize::MAX).validate().unwrap_err();
        assert!(matches!(err, ListError::CapacityOverflow { .. }));
    }
}
