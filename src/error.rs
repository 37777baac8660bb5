use thiserror::Error;

use crate::calloc::{AllocError, Block};

/// Why a queue operation did not take effect.
///
/// None of these are fatal. After any of them the queue is exactly as it was before the call.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// the operation was given no queue to work on
    #[error("no queue to operate on")]
    InvalidContainer,
    /// the allocator refused the given block; anything acquired before it was released again
    #[error("could not allocate {0}")]
    AllocationFailure(Block),
    /// removal from a queue without elements
    #[error("queue is empty")]
    EmptyContainer,
}

impl From<AllocError> for QueueError {
    fn from(err: AllocError) -> Self {
        QueueError::AllocationFailure(err.0)
    }
}

pub type Result<T> = std::result::Result<T, QueueError>;
