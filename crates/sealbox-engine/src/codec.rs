//! Chunk framing: the 4-byte little-endian length prefix
//!
//! Stateless and pure. The decoder validates the declared length before any
//! buffer is sized to it, so a hostile prefix cannot reserve memory.

use sealbox_core::{SealboxError, SealboxResult, MAX_CHUNK_SIZE};
use sealbox_crypto::TAG_SIZE;

/// Size of the per-chunk length prefix in bytes.
pub const CHUNK_HEADER_SIZE: usize = 4;

/// Encode a ciphertext length as the wire prefix.
pub fn encode_chunk_header(len: usize) -> [u8; CHUNK_HEADER_SIZE] {
    debug_assert!(len <= i32::MAX as usize);
    (len as u32).to_le_bytes()
}

/// Decode and validate a wire prefix into a ciphertext length.
///
/// Rejected as malformed:
/// - the sign bit set (a negative int32 on the wire)
/// - lengths shorter than a bare authentication tag
/// - lengths beyond `MAX_CHUNK_SIZE` plaintext plus the tag
pub fn decode_chunk_header(header: [u8; CHUNK_HEADER_SIZE]) -> SealboxResult<usize> {
    let raw = u32::from_le_bytes(header);
    if raw > i32::MAX as u32 {
        return Err(SealboxError::MalformedContainer("negative chunk length"));
    }

    let len = raw as usize;
    if len < TAG_SIZE {
        return Err(SealboxError::MalformedContainer(
            "chunk length shorter than authentication tag",
        ));
    }
    if len > MAX_CHUNK_SIZE + TAG_SIZE {
        return Err(SealboxError::MalformedContainer(
            "chunk length exceeds maximum",
        ));
    }
    Ok(len)
}
