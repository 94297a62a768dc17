//! Key providers feeding the search loop.

use secp256k1::{Secp256k1, SignOnly};

use super::{Address, KeyError, Keypair, PrivateKey};

/// One generated candidate: a secret and the address it derives.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub private_key: PrivateKey,
    pub address: Address,
}

impl From<Keypair> for Candidate {
    fn from(keypair: Keypair) -> Self {
        let (private_key, address) = keypair.into_parts();
        Self {
            private_key,
            address,
        }
    }
}

/// Source of candidate keys.
///
/// Each worker owns its own clone, so implementations may keep per-thread
/// state. An `Err` aborts the whole run.
pub trait KeyProvider: Clone + Send + 'static {
    fn generate(&mut self) -> Result<Candidate, KeyError>;
}

/// Random secp256k1 keys with compressed P2PKH addresses.
#[derive(Clone)]
pub struct Secp256k1Provider {
    secp: Secp256k1<SignOnly>,
}

impl Secp256k1Provider {
    pub fn new() -> Self {
        Self {
            secp: Secp256k1::signing_only(),
        }
    }
}

impl Default for Secp256k1Provider {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyProvider for Secp256k1Provider {
    #[inline]
    fn generate(&mut self) -> Result<Candidate, KeyError> {
        Keypair::generate(&self.secp).map(Candidate::from)
    }
}
