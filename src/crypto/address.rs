//! Bitcoin SV P2PKH address representation.

use std::fmt;

use secp256k1::PublicKey;

use super::hash::{base58check, hash160};

/// Mainnet P2PKH version byte.
const P2PKH_VERSION: u8 = 0x00;

/// A Base58Check encoded address.
///
/// Addresses built from a public key always begin with
/// [`Address::VERSION_CHAR`]. [`Address::from_encoded`] accepts any string so
/// that deterministic providers can feed the search engine without real keys.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    /// Leading character of every mainnet P2PKH address.
    pub const VERSION_CHAR: char = '1';

    /// Derives the P2PKH address of a compressed public key.
    #[inline]
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        Self::from_pubkey_hash(&hash160(&public_key.serialize()))
    }

    /// Encodes a 20-byte public key hash.
    pub fn from_pubkey_hash(pubkey_hash: &[u8; 20]) -> Self {
        let mut payload = [0u8; 21];
        payload[0] = P2PKH_VERSION;
        payload[1..].copy_from_slice(pubkey_hash);
        Self(base58check(&payload))
    }

    /// Wraps an already encoded address without validating it.
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Returns the encoded address.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
