//! Single-shot sealed mode: whole-message encryption to a public key
//!
//! Blob layout (binary):
//! ```text
//! [32 bytes: ephemeral public key][24 bytes: nonce][N + 16 bytes: ciphertext + tag]
//! ```
//!
//! The sender's key pair is ephemeral and discarded after sealing, so the
//! recipient learns nothing about who produced the blob (anonymous-sender
//! semantics). The whole message is one AEAD call; use the streaming engine
//! instead when inputs can be large.

use sealbox_core::{SealboxError, SealboxResult};

use crate::boxer::{BoxCipher, Nonce};
use crate::keys::{KeyPair, PublicKey, SecretKey};
use crate::{KEY_SIZE, NONCE_SIZE, TAG_SIZE};

/// Fixed bytes a sealed blob adds on top of the plaintext length.
pub const SEALED_OVERHEAD: usize = KEY_SIZE + NONCE_SIZE + TAG_SIZE;

/// Seal `plaintext` to `recipient` under a fresh ephemeral key pair.
pub fn seal_once(plaintext: &[u8], recipient: &PublicKey) -> SealboxResult<Vec<u8>> {
    let ephemeral = KeyPair::generate()?;
    let nonce = Nonce::generate()?;

    let cipher = BoxCipher::new(recipient, &ephemeral.secret)?;
    let ciphertext = cipher.seal(nonce.as_bytes(), plaintext)?;

    let mut blob = Vec::with_capacity(SEALED_OVERHEAD + plaintext.len());
    blob.extend_from_slice(ephemeral.public.as_bytes());
    blob.extend_from_slice(nonce.as_bytes());
    blob.extend_from_slice(&ciphertext);
    Ok(blob)
}

/// Open a blob produced by [`seal_once`] with the recipient's secret key.
pub fn open_once(blob: &[u8], recipient_secret: &SecretKey) -> SealboxResult<Vec<u8>> {
    if blob.len() < SEALED_OVERHEAD {
        return Err(SealboxError::MalformedContainer("sealed blob too short"));
    }

    let (ephemeral_public, rest) = blob.split_at(KEY_SIZE);
    let (nonce_bytes, ciphertext) = rest.split_at(NONCE_SIZE);

    let ephemeral_public = PublicKey::from_slice(ephemeral_public)?;
    let mut nonce = [0u8; NONCE_SIZE];
    nonce.copy_from_slice(nonce_bytes);

    let cipher = BoxCipher::new(&ephemeral_public, recipient_secret)?;
    cipher.open(&nonce, ciphertext)
}
