//! Claim-once prefix targets.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::crypto::Address;

/// True iff `address` is the version character followed by `prefix`.
///
/// Case-sensitive, anchored right after the version character.
#[inline]
pub fn matches_prefix(address: &str, prefix: &str) -> bool {
    address
        .strip_prefix(Address::VERSION_CHAR)
        .is_some_and(|rest| rest.starts_with(prefix))
}

#[derive(Debug)]
struct Target {
    prefix: String,
    claimed: AtomicBool,
}

/// The set of prefixes still waiting for an address.
///
/// Every method takes `&self`; wrap the set in an `Arc` to share it between
/// workers. A prefix is handed out by [`PrefixSet::check_and_claim`] exactly
/// once across all callers.
#[derive(Debug)]
pub struct PrefixSet {
    targets: Vec<Target>,
    remaining: AtomicUsize,
}

impl PrefixSet {
    /// Builds the set. Duplicates collapse into one target, first occurrence wins
    /// the position.
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let targets: Vec<Target> = prefixes
            .into_iter()
            .map(Into::into)
            .filter(|p: &String| seen.insert(p.clone()))
            .map(|prefix| Target {
                prefix,
                claimed: AtomicBool::new(false),
            })
            .collect();

        Self {
            remaining: AtomicUsize::new(targets.len()),
            targets,
        }
    }

    /// Checks `address` against every unclaimed prefix and claims the ones it
    /// satisfies. Returns only the prefixes claimed by this call.
    #[inline]
    pub fn check_and_claim(&self, address: &str) -> Vec<&str> {
        let mut claimed = Vec::new();
        if self.is_empty() {
            return claimed;
        }

        for target in &self.targets {
            if target.claimed.load(Ordering::Acquire) {
                continue;
            }
            if !matches_prefix(address, &target.prefix) {
                continue;
            }
            if target
                .claimed
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                self.remaining.fetch_sub(1, Ordering::AcqRel);
                claimed.push(target.prefix.as_str());
            }
        }

        claimed
    }

    /// True once every prefix has been claimed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Number of prefixes still outstanding.
    pub fn remaining(&self) -> usize {
        self.remaining.load(Ordering::Acquire)
    }

    /// Number of distinct prefixes the set was built with.
    pub fn total(&self) -> usize {
        self.targets.len()
    }

    /// Number of prefixes already claimed.
    pub fn claimed(&self) -> usize {
        self.total() - self.remaining()
    }

    /// Prefixes not yet claimed, in input order.
    pub fn outstanding(&self) -> Vec<&str> {
        self.targets
            .iter()
            .filter(|t| !t.claimed.load(Ordering::Acquire))
            .map(|t| t.prefix.as_str())
            .collect()
    }
}
