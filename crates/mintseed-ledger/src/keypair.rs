//! Signing identity loading.
//!
//! The keyfile is a JSON array of Ed25519 secret-key bytes, the format
//! common wallet tooling writes (64-byte expanded keypair, or a bare
//! 32-byte seed). Keys are loaded once at startup; no runtime rotation.
//!
//! Security notes:
//! - Raw secret bytes are held in `Zeroizing` buffers while parsing.
//! - Key material is never logged or serialized beyond its source file.

use std::path::Path;

use ed25519_dalek::{Signer, SigningKey};
use thiserror::Error;
use zeroize::Zeroizing;

use mintseed_core::Address;

/// Errors loading the signing identity.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("Failed to read keyfile: {0}")]
    Io(#[from] std::io::Error),

    #[error("Keyfile is not a JSON byte array: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Keyfile holds {0} bytes, expected 32 or 64")]
    InvalidLength(usize),

    #[error("Invalid key material: {0}")]
    InvalidKey(String),
}

/// Owned Ed25519 signing identity.
///
/// The public half doubles as the owner address on the ledger.
pub struct LedgerKeypair {
    signing: SigningKey,
    address: Address,
}

impl LedgerKeypair {
    fn from_signing_key(signing: SigningKey) -> Self {
        let address = Address::new(hex::encode(signing.verifying_key().to_bytes()))
            .expect("hex public key is a valid address");
        Self { signing, address }
    }

    /// Public identifier of this identity.
    #[must_use]
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Sign a gateway payload, returning the hex-encoded signature.
    #[must_use]
    pub fn sign(&self, payload: &[u8]) -> String {
        hex::encode(self.signing.sign(payload).to_bytes())
    }
}

impl std::fmt::Debug for LedgerKeypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Secret half intentionally absent.
        f.debug_struct("LedgerKeypair")
            .field("address", &self.address)
            .finish()
    }
}

/// Load the signing identity from a JSON keyfile.
///
/// # Errors
/// Returns `KeyError` if the file is missing, is not a JSON byte array, or
/// the encoded key length is invalid.
pub fn load_keypair(path: &Path) -> Result<LedgerKeypair, KeyError> {
    let content = std::fs::read_to_string(path)?;
    let bytes: Zeroizing<Vec<u8>> = Zeroizing::new(serde_json::from_str(&content)?);

    let signing = match bytes.len() {
        32 => {
            let mut seed = Zeroizing::new([0u8; 32]);
            seed.copy_from_slice(&bytes);
            SigningKey::from_bytes(&seed)
        }
        64 => {
            let mut pair = Zeroizing::new([0u8; 64]);
            pair.copy_from_slice(&bytes);
            SigningKey::from_keypair_bytes(&pair)
                .map_err(|e| KeyError::InvalidKey(e.to_string()))?
        }
        n => return Err(KeyError::InvalidLength(n)),
    };

    Ok(LedgerKeypair::from_signing_key(signing))
}
