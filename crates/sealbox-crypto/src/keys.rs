//! Key pair types and the base64 key codec used at the API boundary

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroize;

use sealbox_core::{SealboxError, SealboxResult};

use crate::KEY_SIZE;

/// A 32-byte Curve25519 public key.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    bytes: [u8; KEY_SIZE],
}

/// A 32-byte Curve25519 secret key. Zeroized on drop.
#[derive(Clone)]
pub struct SecretKey {
    bytes: [u8; KEY_SIZE],
}

/// A freshly generated or caller-supplied public/secret key pair.
pub struct KeyPair {
    pub public: PublicKey,
    pub secret: SecretKey,
}

impl PublicKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Parse from a byte slice, rejecting anything but exactly 32 bytes.
    pub fn from_slice(slice: &[u8]) -> SealboxResult<Self> {
        let bytes: [u8; KEY_SIZE] = slice.try_into().map_err(|_| {
            SealboxError::InvalidKeyMaterial(format!(
                "public key must be {} bytes, got {}",
                KEY_SIZE,
                slice.len()
            ))
        })?;
        Ok(Self { bytes })
    }

    /// Parse from a base64 string (the transport encoding of keys).
    pub fn from_base64(encoded: &str) -> SealboxResult<Self> {
        Self::from_slice(&base64_decode(encoded, "public key")?)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }

    pub fn to_base64(&self) -> String {
        base64_encode(&self.bytes)
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicKey")
            .field("b64", &self.to_base64())
            .finish()
    }
}

impl SecretKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Parse from a byte slice, rejecting anything but exactly 32 bytes.
    pub fn from_slice(slice: &[u8]) -> SealboxResult<Self> {
        let bytes: [u8; KEY_SIZE] = slice.try_into().map_err(|_| {
            SealboxError::InvalidKeyMaterial(format!(
                "secret key must be {} bytes, got {}",
                KEY_SIZE,
                slice.len()
            ))
        })?;
        Ok(Self { bytes })
    }

    /// Parse from a base64 string (the transport encoding of keys).
    pub fn from_base64(encoded: &str) -> SealboxResult<Self> {
        Self::from_slice(&base64_decode(encoded, "secret key")?)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }

    /// Emit as base64. The only sanctioned path for a secret key to leave
    /// the process; callers own what they do with the string.
    pub fn to_base64(&self) -> String {
        base64_encode(&self.bytes)
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

impl KeyPair {
    /// Generate a fresh key pair from the OS CSPRNG.
    ///
    /// Fails with `RandomSource` if the CSPRNG cannot produce bytes; that
    /// failure is fatal for the operation and is never retried here.
    pub fn generate() -> SealboxResult<Self> {
        let mut seed = [0u8; KEY_SIZE];
        OsRng
            .try_fill_bytes(&mut seed)
            .map_err(|e| SealboxError::RandomSource(e.to_string()))?;

        let secret = x25519_dalek::StaticSecret::from(seed);
        seed.zeroize();
        let public = x25519_dalek::PublicKey::from(&secret);

        Ok(Self {
            public: PublicKey::from_bytes(*public.as_bytes()),
            secret: SecretKey::from_bytes(secret.to_bytes()),
        })
    }
}

fn base64_encode(data: &[u8]) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    STANDARD.encode(data)
}

fn base64_decode(s: &str, what: &str) -> SealboxResult<Vec<u8>> {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    STANDARD
        .decode(s)
        .map_err(|e| SealboxError::InvalidKeyMaterial(format!("{what} base64 decode: {e}")))
}
