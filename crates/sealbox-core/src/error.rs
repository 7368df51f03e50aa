use thiserror::Error;

pub type SealboxResult<T> = Result<T, SealboxError>;

/// Every failure the core can report across the API boundary.
///
/// All variants are recoverable by the caller; none of them should escape
/// as a panic. Transient I/O retry is the caller's concern, not ours.
#[derive(Debug, Error)]
pub enum SealboxError {
    /// A key had the wrong length or could not be decoded.
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),

    /// The container structure is broken: truncated nonce, truncated or
    /// out-of-range length prefix, or a truncated chunk.
    #[error("malformed container: {0}")]
    MalformedContainer(&'static str),

    /// A chunk failed MAC verification: tampering, corruption, or a key
    /// pair that does not match the one used at encryption time.
    #[error("authentication failure: chunk MAC verification failed")]
    AuthenticationFailure,

    /// Underlying stream read/write error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The OS CSPRNG failed. Fatal for the operation, never retried.
    #[error("random source failure: {0}")]
    RandomSource(String),

    /// An AEAD primitive rejected its input (e.g. plaintext beyond the
    /// cipher's message limit). Not reachable with in-range chunk sizes.
    #[error("crypto primitive error: {0}")]
    Crypto(String),

    /// Invalid engine configuration.
    #[error("config error: {0}")]
    Config(String),
}
