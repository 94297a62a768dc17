//! Cryptographic operations for Bitcoin SV key and address generation.
//!
//! This module provides:
//! - Secure random key generation on secp256k1
//! - P2PKH address derivation (hash160 + Base58Check)
//! - WIF export of private keys
//! - The `KeyProvider` seam used by the search engine

mod address;
mod hash;
mod keypair;
mod provider;

pub use address::Address;
pub use hash::{base58check, hash160, sha256d};
pub use keypair::{Keypair, PrivateKey};
pub use provider::{Candidate, KeyProvider, Secp256k1Provider};

/// Errors raised while producing key material.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("Entropy source failure: {0}")]
    Entropy(#[from] rand::Error),

    #[error("Invalid secret key: {0}")]
    InvalidSecretKey(#[from] secp256k1::Error),
}
