//! Runtime configuration for the vanity address generator.

use std::io;
use std::num::NonZeroU64;
use std::path::PathBuf;

use clap::Parser;

use crate::engine::{SearchConfig, DEFAULT_PROGRESS_INTERVAL};
use crate::sink::default_output_dir;

/// Bitcoin SV Vanity Address Generator
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Prefix to search for after the leading '1', or a list separated by ',' or ';'
    /// (e.g. ZUKU,BSV,GKS or "ZUKU; BSV; GKS")
    pub prefixes: String,

    /// Attempts between status lines
    #[arg(
        default_value_t = DEFAULT_PROGRESS_INTERVAL,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub status_interval: u64,

    /// Number of worker threads (default: number of CPU cores)
    #[arg(short = 'w', long)]
    pub workers: Option<usize>,

    /// Directory for wallet files (default: <install root>/walletsbsv/vanity_wallets)
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// Label stored in each wallet file
    #[arg(short = 'n', long, default_value = "")]
    pub name: String,

    /// Do not clear the screen before a multi-prefix search
    #[arg(long, default_value = "false")]
    pub no_clear: bool,

    /// Log filter (RUST_LOG takes precedence)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// How results are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One prefix: JSON result on stdout, nothing written to disk
    Single,
    /// Several prefixes: wallet files plus console confirmations
    Multi,
}

impl Config {
    /// Returns the parsed prefix list in input order.
    pub fn prefix_list(&self) -> Vec<String> {
        parse_prefix_list(&self.prefixes)
    }

    /// Returns the presentation mode implied by the prefix list.
    pub fn mode(&self) -> Mode {
        if self.prefix_list().len() == 1 {
            Mode::Single
        } else {
            Mode::Multi
        }
    }

    /// Returns the number of workers, defaulting to CPU count
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get)
    }

    /// Returns the engine configuration.
    pub fn search_config(&self) -> SearchConfig {
        let interval = NonZeroU64::new(self.status_interval).unwrap_or(NonZeroU64::MIN);
        SearchConfig::new(interval, self.worker_count())
    }

    /// Returns the wallet directory.
    pub fn output_dir(&self) -> io::Result<PathBuf> {
        match &self.output_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_output_dir(),
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let prefixes = self.prefix_list();
        if prefixes.is_empty() {
            return Err(ConfigError::EmptyPrefixList);
        }

        if let Some(bad) = prefixes
            .iter()
            .find(|p| !p.chars().all(|c| c.is_ascii_alphanumeric()))
        {
            return Err(ConfigError::NonAlphanumeric(bad.clone()));
        }

        if self.workers == Some(0) {
            return Err(ConfigError::ZeroWorkers);
        }

        Ok(())
    }
}

/// Splits a raw prefix argument on `,` and `;`.
///
/// Surrounding quotes and whitespace are trimmed and empty entries dropped.
pub fn parse_prefix_list(raw: &str) -> Vec<String> {
    raw.trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .split([',', ';'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Prefix list is empty")]
    EmptyPrefixList,

    #[error("Prefix '{0}' must be alphanumeric")]
    NonAlphanumeric(String),

    #[error("Worker count must be at least 1")]
    ZeroWorkers,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("bsv_vanity").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["ZUKU"]);
        assert_eq!(config.status_interval, 100_000);
        assert_eq!(config.name, "");
        assert!(!config.no_clear);
        assert_eq!(config.mode(), Mode::Single);
        assert!(config.validate().is_ok());
        assert_eq!(config.search_config().progress_interval.get(), 100_000);
    }

    #[test]
    fn test_prefix_list_separators() {
        assert_eq!(parse_prefix_list("ZUKU,BSV,GKS"), vec!["ZUKU", "BSV", "GKS"]);
        assert_eq!(parse_prefix_list("\"ZUKU; BSV; GKS\""), vec!["ZUKU", "BSV", "GKS"]);
        assert_eq!(parse_prefix_list("A,,;B ;"), vec!["A", "B"]);
        assert!(parse_prefix_list(" ; , ").is_empty());
    }

    #[test]
    fn test_multi_mode_with_interval() {
        let config = parse(&["ZUKU;BSV", "50000", "-w", "2"]);
        assert_eq!(config.mode(), Mode::Multi);
        assert_eq!(config.status_interval, 50_000);
        assert_eq!(config.search_config().workers, 2);
    }

    #[test]
    fn test_invalid_prefix() {
        let config = parse(&["ZU-KU"]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonAlphanumeric(p)) if p == "ZU-KU"
        ));
    }

    #[test]
    fn test_empty_prefix_list() {
        let config = parse(&[",;"]);
        assert!(matches!(config.validate(), Err(ConfigError::EmptyPrefixList)));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let config = parse(&["A", "-w", "0"]);
        assert!(matches!(config.validate(), Err(ConfigError::ZeroWorkers)));
    }

    #[test]
    fn test_bad_interval_rejected_by_parser() {
        let args = ["bsv_vanity", "ZUKU", "lots"];
        assert!(Config::try_parse_from(args).is_err());
        let args = ["bsv_vanity", "ZUKU", "0"];
        assert!(Config::try_parse_from(args).is_err());
    }

    #[test]
    fn test_output_dir_override() {
        let config = parse(&["A", "-o", "/tmp/wallets"]);
        assert_eq!(config.output_dir().unwrap(), PathBuf::from("/tmp/wallets"));
    }
}
