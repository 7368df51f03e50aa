//! sealbox-service: the contract exposed to the transport layer
//!
//! Keys cross this boundary base64-encoded; payloads cross as raw bytes
//! (the outermost transport owns any base64 of payloads). The HTTP layer
//! on top of this crate is a thin adapter: route, parse the multipart
//! form, call one of these methods, shape the JSON.

use std::io::Cursor;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::io::AsyncRead;
use tracing::debug;

use sealbox_core::{EngineConfig, SealboxResult};
use sealbox_crypto::{KeyPair, PublicKey, SecretKey, TAG_SIZE};
use sealbox_engine::{BufferPool, StreamDecryptor, StreamEncryptor};

/// A key pair in its transport encoding.
///
/// The secret key is request-scoped: hand it to the caller once, never log
/// it, never retain it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyPairB64 {
    pub public_key: String,
    pub secret_key: String,
}

/// Facade over the streaming engine for callers that hold base64 keys and
/// in-memory payloads. One instance per process; operations may run
/// concurrently and share the buffer pool.
pub struct CryptoService {
    encryptor: StreamEncryptor,
    decryptor: StreamDecryptor,
}

impl CryptoService {
    pub fn new(config: EngineConfig) -> SealboxResult<Self> {
        config.validate()?;
        let pool = BufferPool::new(config.chunk_size + TAG_SIZE);
        Ok(Self {
            encryptor: StreamEncryptor::new(config, Arc::clone(&pool))?,
            decryptor: StreamDecryptor::new(pool),
        })
    }

    /// Generate a fresh key pair and return it base64-encoded.
    pub fn generate_key_pair(&self) -> SealboxResult<KeyPairB64> {
        let kp = KeyPair::generate()?;
        debug!("generated key pair");
        Ok(KeyPairB64 {
            public_key: kp.public.to_base64(),
            secret_key: kp.secret.to_base64(),
        })
    }

    /// Encrypt `plaintext` for `recipient_public_b64`, authenticated by
    /// `sender_secret_b64`. Returns the complete container.
    pub async fn encrypt_stream<R>(
        &self,
        plaintext: &mut R,
        recipient_public_b64: &str,
        sender_secret_b64: &str,
    ) -> SealboxResult<Vec<u8>>
    where
        R: AsyncRead + Unpin,
    {
        let recipient_public = PublicKey::from_base64(recipient_public_b64)?;
        let sender_secret = SecretKey::from_base64(sender_secret_b64)?;

        let mut container = Cursor::new(Vec::new());
        self.encryptor
            .encrypt(plaintext, &mut container, &recipient_public, &sender_secret)
            .await?;

        let container = container.into_inner();
        debug!(container_len = container.len(), "stream encrypted");
        Ok(container)
    }

    /// Decrypt a container produced by [`Self::encrypt_stream`].
    pub async fn decrypt_stream(
        &self,
        container: &[u8],
        sender_public_b64: &str,
        recipient_secret_b64: &str,
    ) -> SealboxResult<Vec<u8>> {
        let sender_public = PublicKey::from_base64(sender_public_b64)?;
        let recipient_secret = SecretKey::from_base64(recipient_secret_b64)?;

        let mut input = container;
        let mut plaintext = Cursor::new(Vec::new());
        self.decryptor
            .decrypt(&mut input, &mut plaintext, &sender_public, &recipient_secret)
            .await?;

        let plaintext = plaintext.into_inner();
        debug!(plaintext_len = plaintext.len(), "stream decrypted");
        Ok(plaintext)
    }

    /// Encrypt under a key pair generated on the spot, returning both.
    ///
    /// The caller becomes the only holder of the secret key; losing it
    /// makes the container unrecoverable.
    pub async fn encrypt_with_new_key<R>(
        &self,
        plaintext: &mut R,
    ) -> SealboxResult<(KeyPairB64, Vec<u8>)>
    where
        R: AsyncRead + Unpin,
    {
        let keys = self.generate_key_pair()?;
        let container = self
            .encrypt_stream(plaintext, &keys.public_key, &keys.secret_key)
            .await?;
        Ok((keys, container))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sealbox_core::SealboxError;

    fn service() -> CryptoService {
        CryptoService::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_generated_keys_are_44_char_base64() {
        let keys = service().generate_key_pair().unwrap();
        // 32 bytes -> 44 base64 characters including padding.
        assert_eq!(keys.public_key.len(), 44);
        assert_eq!(keys.secret_key.len(), 44);
        assert_ne!(keys.public_key, keys.secret_key);
    }

    #[test]
    fn test_key_pair_serializes_for_transport() {
        let keys = service().generate_key_pair().unwrap();
        let json = serde_json::to_string(&keys).unwrap();
        let back: KeyPairB64 = serde_json::from_str(&json).unwrap();
        assert_eq!(back.public_key, keys.public_key);
    }

    #[tokio::test]
    async fn test_encrypt_decrypt_through_base64_boundary() {
        let service = service();
        let sender = service.generate_key_pair().unwrap();
        let recipient = service.generate_key_pair().unwrap();
        let payload = b"multipart form contents".to_vec();

        let container = service
            .encrypt_stream(&mut payload.as_slice(), &recipient.public_key, &sender.secret_key)
            .await
            .unwrap();

        let recovered = service
            .decrypt_stream(&container, &sender.public_key, &recipient.secret_key)
            .await
            .unwrap();
        assert_eq!(recovered, payload);
    }

    #[tokio::test]
    async fn test_rejects_bad_base64_keys() {
        let service = service();
        let mut payload: &[u8] = b"data";

        let result = service
            .encrypt_stream(&mut payload, "!!not-base64!!", "also bad")
            .await;
        assert!(matches!(result, Err(SealboxError::InvalidKeyMaterial(_))));
    }

    #[tokio::test]
    async fn test_rejects_wrong_length_key() {
        let service = service();
        let mut payload: &[u8] = b"data";

        // Valid base64, wrong decoded length (16 bytes).
        let short = "QUFBQUFBQUFBQUFBQUFBQQ==";
        let keys = service.generate_key_pair().unwrap();
        let result = service
            .encrypt_stream(&mut payload, short, &keys.secret_key)
            .await;
        assert!(matches!(result, Err(SealboxError::InvalidKeyMaterial(_))));
    }

    #[tokio::test]
    async fn test_encrypt_with_new_key_roundtrip() {
        let service = service();
        let payload = b"self-addressed".to_vec();

        let (keys, container) = service
            .encrypt_with_new_key(&mut payload.as_slice())
            .await
            .unwrap();

        // The original encrypts to its own key pair; decrypt mirrors that.
        let recovered = service
            .decrypt_stream(&container, &keys.public_key, &keys.secret_key)
            .await
            .unwrap();
        assert_eq!(recovered, payload);
    }

    #[tokio::test]
    async fn test_decrypt_rejects_garbage() {
        let service = service();
        let keys = service.generate_key_pair().unwrap();

        let result = service
            .decrypt_stream(b"too short", &keys.public_key, &keys.secret_key)
            .await;
        assert!(matches!(result, Err(SealboxError::MalformedContainer(_))));
    }
}
