//! End-to-end searches with the real secp256k1 provider.

use std::num::NonZeroU64;
use std::ops::ControlFlow;

use bsv_vanity::app::run_multi;
use bsv_vanity::report::{ConsoleReporter, ReportStyle};
use bsv_vanity::{JsonFileSink, Keypair, SearchConfig, SearchEngine, Secp256k1Provider};

// 'B' and 'C' are among the most frequent characters right after the leading
// '1', so each takes a few dozen attempts on average.
const EASY_PREFIXES: [&str; 2] = ["B", "C"];

fn engine(workers: usize) -> SearchEngine<Secp256k1Provider> {
    SearchEngine::new(
        Secp256k1Provider::new(),
        SearchConfig::new(NonZeroU64::new(1_000).unwrap(), workers),
    )
}

#[test]
fn test_single_worker_finds_real_keys() {
    let mut matches = Vec::new();
    let outcome = engine(1)
        .run(EASY_PREFIXES, |_| ControlFlow::Continue(()), |m| matches.push(m))
        .unwrap();

    assert!(outcome.is_completed());
    assert_eq!(matches.len(), 2);
    for record in &matches {
        assert!(record.address.as_str().starts_with(&format!("1{}", record.prefix)));
        let derived = Keypair::from_secret_key(*record.private_key.as_bytes()).unwrap();
        assert_eq!(derived.address(), &record.address);
        assert!(record.attempts <= outcome.summary().attempts);
    }
}

#[test]
fn test_worker_pool_finds_real_keys() {
    let mut matches = Vec::new();
    let outcome = engine(4)
        .run(EASY_PREFIXES, |_| ControlFlow::Continue(()), |m| matches.push(m))
        .unwrap();

    assert!(outcome.is_completed());
    let mut prefixes: Vec<_> = matches.iter().map(|m| m.prefix.as_str()).collect();
    prefixes.sort();
    assert_eq!(prefixes, EASY_PREFIXES);
    for record in &matches {
        let derived = Keypair::from_secret_key(*record.private_key.as_bytes()).unwrap();
        assert_eq!(derived.address(), &record.address);
    }
}

#[test]
fn test_multi_prefix_run_writes_wallet_files() {
    let tmp = tempfile::tempdir().unwrap();
    let mut sink = JsonFileSink::new(tmp.path().join("vanity_wallets")).unwrap();
    let mut reporter = ConsoleReporter::new(Vec::new(), ReportStyle::Lines);
    let prefixes: Vec<String> = EASY_PREFIXES.iter().map(|p| p.to_string()).collect();

    let run = run_multi(&engine(2), &prefixes, "test", &mut reporter, &mut sink).unwrap();

    assert!(run.outcome.is_completed());
    assert_eq!(run.saved.len(), 2);
    for path in &run.saved {
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        let address = json["new_address"].as_str().unwrap();
        assert!(path.ends_with(format!("walletbsv-{}.json", address)));
        assert_eq!(json["name"], "test");
        assert!(json["key_wif"].as_str().unwrap().len() == 52);
    }
}
