//! One JSON file per wallet.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use super::{to_pretty_json, ResultSink, SinkError, WalletRecord};

/// File name used for the wallet of `address`.
pub fn wallet_file_name(address: &str) -> String {
    format!("walletbsv-{}.json", address)
}

/// `<install root>/walletsbsv/vanity_wallets`, where the install root is the
/// parent of the directory holding the running executable.
pub fn default_output_dir() -> io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let root = exe
        .parent()
        .and_then(Path::parent)
        .unwrap_or_else(|| Path::new("."));
    Ok(root.join("walletsbsv").join("vanity_wallets"))
}

/// Writes `walletbsv-<address>.json` files into a directory.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    dir: PathBuf,
}

impl JsonFileSink {
    /// Creates the sink, creating `dir` and its parents if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| SinkError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ResultSink for JsonFileSink {
    fn persist(&mut self, record: &WalletRecord) -> Result<PathBuf, SinkError> {
        let path = self.dir.join(wallet_file_name(&record.new_address));
        let json = to_pretty_json(record)?;

        fs::write(&path, json).map_err(|source| SinkError::Io {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), "wallet saved");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet(address: &str) -> WalletRecord {
        WalletRecord {
            key_wif: "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn".into(),
            new_address: address.into(),
            name: "label".into(),
        }
    }

    #[test]
    fn test_creates_nested_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("walletsbsv").join("vanity_wallets");
        let sink = JsonFileSink::new(&dir).unwrap();
        assert!(dir.is_dir());
        assert_eq!(sink.dir(), dir.as_path());
    }

    #[test]
    fn test_writes_named_file() {
        let tmp = tempfile::tempdir().unwrap();
        let mut sink = JsonFileSink::new(tmp.path()).unwrap();

        let path = sink.persist(&wallet("1ZUKUabc")).unwrap();
        assert_eq!(path, tmp.path().join("walletbsv-1ZUKUabc.json"));

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["new_address"], "1ZUKUabc");
        assert_eq!(written["name"], "label");
        assert_eq!(
            written["key_wif"],
            "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn"
        );
    }

    #[test]
    fn test_write_failure_reports_path() {
        let tmp = tempfile::tempdir().unwrap();
        let mut sink = JsonFileSink::new(tmp.path()).unwrap();
        // A directory where the file should go makes the write fail.
        fs::create_dir(tmp.path().join(wallet_file_name("1Blocked"))).unwrap();

        let err = sink.persist(&wallet("1Blocked")).unwrap_err();
        match err {
            SinkError::Io { path, .. } => assert!(path.ends_with("walletbsv-1Blocked.json")),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_default_output_dir_layout() {
        let dir = default_output_dir().unwrap();
        assert!(dir.ends_with("walletsbsv/vanity_wallets"));
    }
}
