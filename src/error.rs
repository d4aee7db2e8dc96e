use thiserror::Error;

/// Errors raised while decoding a compressed stream.
///
/// All variants are fatal for the current operation: a stream that fails to
/// decode is corrupt or truncated and no partial output should be trusted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The stream does not begin with the expected magic tag.
    #[error("invalid magic number {0:#010x}")]
    InvalidFormat(u32),

    /// The stream ended while the tree header was being reconstructed.
    #[error("bit stream exhausted while reading tree header")]
    TruncatedHeader,

    /// The stream ended before the end-of-stream codeword was reached.
    #[error("bit stream exhausted before the end-of-stream marker")]
    TruncatedStream,
}

/// Result type for compression operations.
pub type Result<T> = std::result::Result<T, Error>;
