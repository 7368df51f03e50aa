//! sealbox-engine: streaming chunked encryption over bounded memory
//!
//! Container format (binary):
//! ```text
//! [24 bytes: base nonce][chunk_1][chunk_2]...[chunk_n]
//! chunk_i = [4 bytes: u32 LE ciphertext length][ciphertext: plaintext + 16-byte tag]
//! ```
//!
//! End of input terminates the container; a well-formed container ends
//! exactly at a chunk boundary. The AEAD nonce for chunk `i` is derived
//! from the base nonce and `i`, so chunks cannot be reordered, duplicated,
//! or substituted across containers without failing authentication.
//!
//! Memory stays bounded by a small multiple of the chunk size regardless of
//! input length; scratch buffers come from a shared [`BufferPool`].

pub mod codec;
pub mod decrypt;
pub mod encrypt;
mod io;
pub mod pool;

pub use codec::{decode_chunk_header, encode_chunk_header, CHUNK_HEADER_SIZE};
pub use decrypt::StreamDecryptor;
pub use encrypt::StreamEncryptor;
pub use pool::{BufferPool, PooledBuf};
