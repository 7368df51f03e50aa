//! sealbox-crypto: public-key authenticated encryption primitive
//!
//! The "box" construction combines:
//! ```text
//! X25519(sender_secret, recipient_public)          key agreement
//!   → HKDF-SHA256 (domain = "sealbox/box-key/v1")  cipher key derivation
//!   → XChaCha20-Poly1305                           AEAD (24-byte nonce, 16-byte tag)
//! ```
//!
//! The construction is symmetric: `(recipient_public, sender_secret)` and
//! `(sender_public, recipient_secret)` derive the same cipher, so either
//! side of the exchange can seal or open.

pub mod boxer;
pub mod keys;
pub mod sealed;

pub use boxer::{BoxCipher, Nonce};
pub use keys::{KeyPair, PublicKey, SecretKey};
pub use sealed::{open_once, seal_once, SEALED_OVERHEAD};

/// Size of a public or secret key in bytes (256-bit Curve25519)
pub const KEY_SIZE: usize = 32;

/// Size of an XChaCha20-Poly1305 nonce (192-bit)
pub const NONCE_SIZE: usize = 24;

/// Size of a Poly1305 authentication tag
pub const TAG_SIZE: usize = 16;
