//! # bsv_vanity
//!
//! Multi-prefix Bitcoin SV vanity address generator.
//!
//! ## Architecture
//!
//! - `crypto`: Key generation, P2PKH address derivation and WIF export
//! - `matcher`: Claim-once prefix set and difficulty estimates
//! - `engine`: The search loop, single-threaded or on a worker pool
//! - `worker`: Parallel execution and worker pool management
//! - `sink`: Persistence of matched wallets
//! - `report`: Console rendering of progress and matches
//! - `app`: Wiring of engine, reporter and sink for the CLI
//! - `config`: Runtime configuration

pub mod app;
pub mod config;
pub mod crypto;
pub mod engine;
pub mod logging;
pub mod matcher;
pub mod report;
pub mod sink;
pub mod worker;

pub use config::{Config, Mode};
pub use crypto::{Address, Candidate, KeyError, KeyProvider, Keypair, PrivateKey, Secp256k1Provider};
pub use engine::{
    MatchRecord, Progress, SearchConfig, SearchEngine, SearchError, SearchOutcome, SearchSummary,
    StopHandle,
};
pub use matcher::PrefixSet;
pub use sink::{JsonFileSink, ResultSink, SinkError, WalletRecord};
pub use worker::WorkerPool;
