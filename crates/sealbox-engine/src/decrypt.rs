//! Streaming decryptor: container stream in, plaintext stream out
//!
//! Every chunk is authenticated before a byte of it is written. Plaintext
//! already written for earlier chunks stays written when a later chunk
//! fails; the error still reports the whole operation as incomplete.

use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use sealbox_core::{SealboxError, SealboxResult};
use sealbox_crypto::{BoxCipher, Nonce, PublicKey, SecretKey, NONCE_SIZE};

use crate::codec::{decode_chunk_header, CHUNK_HEADER_SIZE};
use crate::io::read_full;
use crate::pool::BufferPool;

/// Inverse of [`crate::StreamEncryptor`]; validates container structure and
/// authenticates every chunk.
pub struct StreamDecryptor {
    pool: Arc<BufferPool>,
}

impl StreamDecryptor {
    pub fn new(pool: Arc<BufferPool>) -> Self {
        Self { pool }
    }

    /// Decrypt a container from `input`, writing recovered plaintext to
    /// `output`.
    ///
    /// The container is self-describing: chunk sizes come from the wire, so
    /// the decryptor needs no knowledge of the encryptor's configuration.
    /// Terminates successfully only when `input` ends exactly at a chunk
    /// boundary.
    pub async fn decrypt<R, W>(
        &self,
        input: &mut R,
        output: &mut W,
        sender_public: &PublicKey,
        recipient_secret: &SecretKey,
    ) -> SealboxResult<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let cipher = BoxCipher::new(sender_public, recipient_secret)?;

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        if read_full(input, &mut nonce_bytes).await? != NONCE_SIZE {
            return Err(SealboxError::MalformedContainer("truncated nonce"));
        }
        let base_nonce = Nonce::from_bytes(nonce_bytes);

        let mut buf = self.pool.rent(CHUNK_HEADER_SIZE);
        let mut index: u64 = 0;
        loop {
            let mut header = [0u8; CHUNK_HEADER_SIZE];
            let n = read_full(input, &mut header).await?;
            if n == 0 {
                // Clean end of container: input exhausted at a chunk boundary.
                break;
            }
            if n < CHUNK_HEADER_SIZE {
                return Err(SealboxError::MalformedContainer(
                    "truncated length prefix",
                ));
            }

            // Validated before the buffer is sized to it.
            let len = decode_chunk_header(header)?;

            buf.ensure_capacity(len);
            buf.resize(len, 0);
            if read_full(input, &mut buf[..len]).await? != len {
                return Err(SealboxError::MalformedContainer("truncated chunk"));
            }

            let plaintext = cipher.open(&base_nonce.for_chunk(index), &buf[..len])?;
            output.write_all(&plaintext).await?;
            index += 1;
        }

        output.flush().await?;
        debug!(chunks = index, "container opened");
        Ok(())
    }
}
