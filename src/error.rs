//! Error types for coordinator commands

use thiserror::Error;

/// Reasons a command addressed to the timer collection is rejected.
///
/// A rejected command never changes any timer or snapshot state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinatorError {
    #[error("timer index {index} is out of range (count: {count})")]
    InvalidIndex { index: usize, count: usize },

    #[error("the default timer at index 0 cannot be removed")]
    DefaultTimerPermanent,

    #[error("failed to lock {0}")]
    LockPoisoned(&'static str),
}
