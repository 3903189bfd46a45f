use thiserror::Error;

/// Reasons a read from a [`BitStream`](crate::BitStream) can fail
///
/// Neither kind is transient. A width error is a programming mistake and an
/// out of bounds error means the encoded structure is truncated or corrupt, so
/// both should be surfaced as a decode failure.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The requested width exceeds what the operation can return
    #[error("cannot read {requested} bits at once, the maximum is {max}")]
    InvalidArgument { requested: u32, max: u32 },

    /// Fewer bits remain in the buffer than were requested
    #[error("read of {requested} bits runs past the end of the buffer ({available} bits left)")]
    OutOfBounds { requested: usize, available: usize },
}

/// Result alias used throughout the crate
pub type Result<T> = core::result::Result<T, Error>;
