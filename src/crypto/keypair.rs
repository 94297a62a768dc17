//! Bitcoin SV keypair generation and WIF export.

use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;
use secp256k1::{PublicKey, Secp256k1, SecretKey, Signing};
use zeroize::Zeroize;

use super::hash::base58check;
use super::{Address, KeyError};

/// Mainnet WIF version byte.
const WIF_VERSION: u8 = 0x80;
/// Suffix marking a WIF key whose public key is serialized compressed.
const WIF_COMPRESSED: u8 = 0x01;

/// A 32-byte secp256k1 secret. Wiped from memory when dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey([u8; 32]);

impl PrivateKey {
    /// Wraps raw secret bytes. No curve-order check is performed here.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the secret bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns the mainnet, compressed-pubkey WIF encoding.
    pub fn to_wif(&self) -> String {
        let mut payload = [0u8; 34];
        payload[0] = WIF_VERSION;
        payload[1..33].copy_from_slice(&self.0);
        payload[33] = WIF_COMPRESSED;

        let wif = base58check(&payload);
        payload.zeroize();
        wif
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// Represents a keypair (private key + derived P2PKH address).
#[derive(Debug, Clone)]
pub struct Keypair {
    private_key: PrivateKey,
    public_key: PublicKey,
    address: Address,
}

impl Keypair {
    /// Generates a new random keypair from the operating system CSPRNG.
    ///
    /// Candidates outside the valid scalar range are redrawn. A failing
    /// entropy source is returned as [`KeyError::Entropy`] and never retried.
    pub fn generate<C: Signing>(secp: &Secp256k1<C>) -> Result<Self, KeyError> {
        let mut bytes = [0u8; 32];
        let secret_key = loop {
            OsRng.try_fill_bytes(&mut bytes)?;
            if let Ok(secret_key) = SecretKey::from_slice(&bytes) {
                break secret_key;
            }
        };

        let keypair = Self::from_parts(secp, &secret_key, bytes);
        bytes.zeroize();
        Ok(keypair)
    }

    /// Derives the keypair for an existing secret.
    pub fn from_secret_key(secret_bytes: [u8; 32]) -> Result<Self, KeyError> {
        let secp = Secp256k1::signing_only();
        let secret_key = SecretKey::from_slice(&secret_bytes)?;
        Ok(Self::from_parts(&secp, &secret_key, secret_bytes))
    }

    #[inline]
    fn from_parts<C: Signing>(
        secp: &Secp256k1<C>,
        secret_key: &SecretKey,
        secret_bytes: [u8; 32],
    ) -> Self {
        let public_key = PublicKey::from_secret_key(secp, secret_key);
        let address = Address::from_public_key(&public_key);

        Self {
            private_key: PrivateKey::from_bytes(secret_bytes),
            public_key,
            address,
        }
    }

    /// Returns the private key.
    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// Returns the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Returns a reference to the derived address.
    #[inline]
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Splits the keypair into its private key and address.
    pub fn into_parts(self) -> (PrivateKey, Address) {
        (self.private_key, self.address)
    }
}
