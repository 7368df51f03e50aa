//! sealbox-core: shared error type, result alias, and engine configuration

pub mod config;
pub mod error;

pub use config::{EngineConfig, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE};
pub use error::{SealboxError, SealboxResult};
