//! The box primitive: seal/open a single message under a derived AEAD key
//!
//! `BoxCipher` performs the X25519 exchange and key derivation once, then
//! seals or opens any number of messages. The streaming engine constructs
//! one cipher per operation and feeds it a distinct nonce per chunk.

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    XChaCha20Poly1305, XNonce,
};
use hkdf::Hkdf;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroize;

use sealbox_core::{SealboxError, SealboxResult};

use crate::keys::{PublicKey, SecretKey};
use crate::{KEY_SIZE, NONCE_SIZE};

/// Domain separation string for the box key derivation.
const BOX_KEY_INFO: &[u8] = b"sealbox/box-key/v1";

/// A 24-byte container base nonce.
///
/// The base nonce is written verbatim at the head of a container. The AEAD
/// nonce for chunk `i` is `base[0..16] || i (u64 LE)`, so every chunk of a
/// container is sealed under a distinct nonce and a chunk moved to a
/// different position fails authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nonce {
    bytes: [u8; NONCE_SIZE],
}

impl Nonce {
    /// Draw a fresh base nonce from the OS CSPRNG.
    pub fn generate() -> SealboxResult<Self> {
        let mut bytes = [0u8; NONCE_SIZE];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| SealboxError::RandomSource(e.to_string()))?;
        Ok(Self { bytes })
    }

    pub fn from_bytes(bytes: [u8; NONCE_SIZE]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.bytes
    }

    /// Derive the AEAD nonce for the chunk at `index`.
    pub fn for_chunk(&self, index: u64) -> [u8; NONCE_SIZE] {
        let mut nonce = self.bytes;
        nonce[16..].copy_from_slice(&index.to_le_bytes());
        nonce
    }
}

/// Authenticated encryption bound to one (public, secret) key exchange.
pub struct BoxCipher {
    cipher: XChaCha20Poly1305,
}

impl BoxCipher {
    /// Derive the shared AEAD key from `public` and `secret`.
    ///
    /// The construction is symmetric in the two key pairs: the cipher built
    /// from `(recipient_public, sender_secret)` equals the one built from
    /// `(sender_public, recipient_secret)`.
    ///
    /// Fails with `InvalidKeyMaterial` when the exchange produces a
    /// non-contributory (all-zero) shared secret, i.e. the peer key is a
    /// low-order point.
    pub fn new(public: &PublicKey, secret: &SecretKey) -> SealboxResult<Self> {
        let dh_secret = x25519_dalek::StaticSecret::from(*secret.as_bytes());
        let dh_public = x25519_dalek::PublicKey::from(*public.as_bytes());

        let shared = dh_secret.diffie_hellman(&dh_public);
        if !shared.was_contributory() {
            return Err(SealboxError::InvalidKeyMaterial(
                "public key is a low-order point".into(),
            ));
        }

        let hkdf = Hkdf::<Sha256>::new(None, shared.as_bytes());
        let mut key = [0u8; KEY_SIZE];
        hkdf.expand(BOX_KEY_INFO, &mut key)
            .map_err(|e| SealboxError::Crypto(format!("HKDF expand failed: {e}")))?;

        let cipher = XChaCha20Poly1305::new((&key).into());
        key.zeroize();

        Ok(Self { cipher })
    }

    /// Encrypt and authenticate `plaintext` under `nonce`.
    ///
    /// Returns ciphertext of length `plaintext.len() + TAG_SIZE`.
    pub fn seal(&self, nonce: &[u8; NONCE_SIZE], plaintext: &[u8]) -> SealboxResult<Vec<u8>> {
        self.cipher
            .encrypt(XNonce::from_slice(nonce), plaintext)
            .map_err(|e| SealboxError::Crypto(format!("seal failed: {e}")))
    }

    /// Verify and decrypt `ciphertext` under `nonce`.
    ///
    /// Fails with `AuthenticationFailure` on any MAC mismatch; no plaintext
    /// is returned for a chunk that does not authenticate.
    pub fn open(&self, nonce: &[u8; NONCE_SIZE], ciphertext: &[u8]) -> SealboxResult<Vec<u8>> {
        self.cipher
            .decrypt(XNonce::from_slice(nonce), ciphertext)
            .map_err(|_| SealboxError::AuthenticationFailure)
    }
}
