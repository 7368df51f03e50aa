use serde::{Deserialize, Serialize};

use crate::error::{SealboxError, SealboxResult};

/// Default plaintext chunk size: 64 KiB. Large enough to amortize per-chunk
/// AEAD and I/O overhead, small enough to cap peak memory per operation.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Hard upper bound on the plaintext size of a single chunk: 16 MiB.
///
/// The decryptor enforces this against the wire length prefix regardless of
/// the encryptor's configured chunk size, so a hostile length field can
/// never reserve unbounded memory.
pub const MAX_CHUNK_SIZE: usize = 16 * 1024 * 1024;

/// Streaming engine configuration (loadable from the host's config file).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum plaintext bytes per chunk (default: 65536)
    pub chunk_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl EngineConfig {
    /// Build a config with a custom chunk size, rejecting out-of-range values.
    pub fn new(chunk_size: usize) -> SealboxResult<Self> {
        let config = Self { chunk_size };
        config.validate()?;
        Ok(config)
    }

    /// Check that the chunk size is within `1..=MAX_CHUNK_SIZE`.
    pub fn validate(&self) -> SealboxResult<()> {
        if self.chunk_size == 0 || self.chunk_size > MAX_CHUNK_SIZE {
            return Err(SealboxError::Config(format!(
                "chunk_size {} out of range [1, {}]",
                self.chunk_size, MAX_CHUNK_SIZE
            )));
        }
        Ok(())
    }
}
