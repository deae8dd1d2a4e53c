//! # Transit-Seal: Envelope Encryption for Data in Transit
//!
//! `transit-seal` encrypts a payload with a fresh one-time symmetric key and IV, then wraps
//! that key with the recipient's RSA public key. Only the holder of the matching private key
//! can unwrap the key and recover the payload.
//!
//! ## Core Concepts
//!
//! - **`CipherConfiguration`**: Algorithm, padding, key/IV sizes, RSA padding and text
//!   encoding. Loadable from JSON or `TRANSIT_SEAL_*` environment variables.
//! - **`KeyPair`**: An RSA public key and an optional private key. Decryption without the
//!   private key fails with `Error::MissingPrivateKey` before any computation.
//! - **`EnvelopeCodec`**: Encrypts to and decrypts from an `Envelope` (ciphertext, wrapped
//!   key, IV), with string and Base64 forms.
//! - **`IvTransform`**: An optional hook that folds the IV into the ciphertext or the wrapped
//!   key, producing a `MixedEnvelope`, and separates it again on decryption.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use transit_seal::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = CipherConfiguration::default();
//!     let keys = KeyPair::generate(&config)?;
//!     let codec = EnvelopeCodec::new(&config)?;
//!
//!     // Encrypt with the public key only
//!     let envelope = codec.encrypt_str("hello world", keys.public_key())?;
//!
//!     // Decrypt with the private key
//!     let text = codec.decrypt_to_string(&envelope, &keys)?;
//!     assert_eq!(text, "hello world");
//!
//!     // Carry the IV inside the ciphertext instead of a separate field
//!     let mixer = PrependIvToCiphertext::for_config(&config);
//!     let mixed = codec.encrypt_mixed(b"payload", keys.public_key(), &mixer)?;
//!     assert_eq!(codec.decrypt_mixed(&mixed, &keys, &mixer)?, b"payload");
//!     Ok(())
//! }
//! ```

pub mod asymmetric;
pub mod common;
pub mod envelope;
#[cfg(feature = "key-store")]
pub mod key_store;
pub mod mixer;
pub mod symmetric;

#[cfg(test)]
mod test_support;

pub use asymmetric::KeyPair;
pub use common::{
    BlockPadding, CipherConfiguration, Error, Result, RsaPadding, SymmetricAlgorithm,
    TextEncoding,
};
pub use envelope::base64::{Base64Envelope, Base64MixedEnvelope};
pub use envelope::{Envelope, EnvelopeCodec, MixedEnvelope};
pub use mixer::IvTransform;

// --- Prelude ---
// The types needed for the common encrypt/decrypt round trip.
pub mod prelude {
    pub use crate::asymmetric::KeyPair;
    pub use crate::common::{
        BlockPadding, CipherConfiguration, Error, Result, RsaPadding, SymmetricAlgorithm,
        TextEncoding,
    };
    pub use crate::envelope::base64::{Base64Envelope, Base64MixedEnvelope};
    pub use crate::envelope::{Envelope, EnvelopeCodec, MixedEnvelope};
    pub use crate::mixer::{AppendIvToWrappedKey, IvTransform, MixerPair, PrependIvToCiphertext};
    pub use rsa::{RsaPrivateKey, RsaPublicKey};
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
