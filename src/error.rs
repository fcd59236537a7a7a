//! Errors reported by both map implementations.

use thiserror::Error;

/// Everything that can go wrong when talking to a map. None of these are
/// transient: they all mean the caller asked for something the map can't give.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MapError {
    /// No entry matches the requested key.
    #[error("such key doesn't exist")]
    KeyNotFound,

    /// The position is the end sentinel, refers to a node that has since been
    /// removed, or stepping would leave the sequence.
    #[error("invalid iterator position")]
    InvalidIterator,

    /// A hash map needs at least one bucket to put things in.
    #[error("bucket count must be greater than zero")]
    ZeroBucketCount,
}

pub type Result<T> = std::result::Result<T, MapError>;
