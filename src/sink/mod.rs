//! Persistence of matched wallets.
//!
//! The engine never touches the filesystem; callers hand each
//! [`MatchRecord`] to a [`ResultSink`].

mod json_file;

use std::io;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::engine::MatchRecord;

pub use json_file::{default_output_dir, wallet_file_name, JsonFileSink};

/// One wallet file: the exported key, its address and an optional label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletRecord {
    pub key_wif: String,
    pub new_address: String,
    pub name: String,
}

impl WalletRecord {
    pub fn new(record: &MatchRecord, name: &str) -> Self {
        Self {
            key_wif: record.private_key.to_wif(),
            new_address: record.address.to_string(),
            name: name.to_owned(),
        }
    }
}

/// Errors raised while persisting a wallet.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize wallet record: {0}")]
    Json(#[from] serde_json::Error),
}

/// Destination for matched wallets.
pub trait ResultSink {
    /// Stores `record` and returns where it went.
    fn persist(&mut self, record: &WalletRecord) -> Result<PathBuf, SinkError>;
}

/// Keeps records in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<WalletRecord>,
}

impl ResultSink for MemorySink {
    fn persist(&mut self, record: &WalletRecord) -> Result<PathBuf, SinkError> {
        self.records.push(record.clone());
        Ok(PathBuf::from(wallet_file_name(&record.new_address)))
    }
}

/// Serializes `value` as JSON indented with four spaces.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::crypto::{Address, PrivateKey};

    fn record() -> MatchRecord {
        let mut secret = [0u8; 32];
        secret[31] = 1;
        MatchRecord {
            prefix: "Bg".into(),
            address: Address::from_encoded("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH"),
            private_key: PrivateKey::from_bytes(secret),
            attempts: 12,
            elapsed: Duration::from_millis(5),
            worker_id: 0,
        }
    }

    #[test]
    fn test_wallet_record_fields() {
        let wallet = WalletRecord::new(&record(), "savings");
        assert_eq!(wallet.key_wif, "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn");
        assert_eq!(wallet.new_address, "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
        assert_eq!(wallet.name, "savings");
    }

    #[test]
    fn test_pretty_json_layout() {
        let wallet = WalletRecord {
            key_wif: "K".into(),
            new_address: "1A".into(),
            name: String::new(),
        };
        assert_eq!(
            to_pretty_json(&wallet).unwrap(),
            "{\n    \"key_wif\": \"K\",\n    \"new_address\": \"1A\",\n    \"name\": \"\"\n}"
        );
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemorySink::default();
        let path = sink.persist(&WalletRecord::new(&record(), "")).unwrap();
        assert_eq!(
            path,
            PathBuf::from("walletbsv-1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH.json")
        );
        assert_eq!(sink.records.len(), 1);
    }
}
