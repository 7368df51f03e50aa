//! Streaming encryptor: plaintext stream in, container stream out

use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use sealbox_core::{EngineConfig, SealboxResult};
use sealbox_crypto::{BoxCipher, Nonce, PublicKey, SecretKey};

use crate::codec::encode_chunk_header;
use crate::io::read_full;
use crate::pool::BufferPool;

/// Drives the box primitive and chunk codec over an input byte stream.
///
/// One instance serves many operations; concurrent operations share only
/// the injected [`BufferPool`].
pub struct StreamEncryptor {
    config: EngineConfig,
    pool: Arc<BufferPool>,
}

impl StreamEncryptor {
    pub fn new(config: EngineConfig, pool: Arc<BufferPool>) -> SealboxResult<Self> {
        config.validate()?;
        Ok(Self { config, pool })
    }

    /// Encrypt `input` to `output` as a chunked container.
    ///
    /// Writes the 24-byte base nonce, then one length-prefixed sealed chunk
    /// per full read of up to `chunk_size` plaintext bytes. Consumes `input`
    /// to end of stream. On error the output is left truncated mid-container
    /// and the caller owns cleanup; the scratch buffer goes back to the pool
    /// on every exit path.
    ///
    /// Returns the base nonce (also embedded in the container).
    pub async fn encrypt<R, W>(
        &self,
        input: &mut R,
        output: &mut W,
        recipient_public: &PublicKey,
        sender_secret: &SecretKey,
    ) -> SealboxResult<Nonce>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let cipher = BoxCipher::new(recipient_public, sender_secret)?;
        let base_nonce = Nonce::generate()?;

        output.write_all(base_nonce.as_bytes()).await?;

        let chunk_size = self.config.chunk_size;
        let mut buf = self.pool.rent(chunk_size);
        buf.resize(chunk_size, 0);

        let mut index: u64 = 0;
        loop {
            let n = read_full(input, &mut buf[..chunk_size]).await?;
            if n == 0 {
                break;
            }

            let ciphertext = cipher.seal(&base_nonce.for_chunk(index), &buf[..n])?;
            output.write_all(&encode_chunk_header(ciphertext.len())).await?;
            output.write_all(&ciphertext).await?;
            index += 1;
        }

        output.flush().await?;
        debug!(chunks = index, chunk_size, "container sealed");
        Ok(base_nonce)
    }
}
