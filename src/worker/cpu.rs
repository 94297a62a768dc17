//! CPU-based worker for vanity address search.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crossbeam_channel::Sender;
use tracing::{debug, error};

use crate::crypto::KeyProvider;
use crate::engine::MatchRecord;
use crate::matcher::PrefixSet;

use super::WorkerEvent;

/// Attempts a worker accumulates locally before publishing them.
const BATCH_SIZE: u64 = 1000;

/// Counters shared by every worker in a pool.
#[derive(Debug, Default)]
pub struct WorkerStats {
    /// Total keys generated
    attempts: AtomicU64,
    /// Prefixes claimed
    matches: AtomicU64,
}

impl WorkerStats {
    /// Creates new worker stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `n` attempts and returns the new total.
    #[inline]
    pub fn add_attempts(&self, n: u64) -> u64 {
        self.attempts.fetch_add(n, Ordering::Relaxed) + n
    }

    /// Returns the total keys generated.
    pub fn total_attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    /// Returns the total matches found.
    pub fn total_matches(&self) -> u64 {
        self.matches.load(Ordering::Relaxed)
    }
}

/// A CPU worker that generates candidates and claims matching prefixes.
pub struct CpuWorker<P: KeyProvider> {
    id: usize,
    provider: P,
    targets: Arc<PrefixSet>,
    event_tx: Sender<WorkerEvent>,
    stop_flag: Arc<AtomicBool>,
    stats: Arc<WorkerStats>,
    start: Instant,
}

impl<P: KeyProvider> CpuWorker<P> {
    /// Creates a new CPU worker.
    pub fn new(
        id: usize,
        provider: P,
        targets: Arc<PrefixSet>,
        event_tx: Sender<WorkerEvent>,
        stop_flag: Arc<AtomicBool>,
        stats: Arc<WorkerStats>,
        start: Instant,
    ) -> Self {
        Self {
            id,
            provider,
            targets,
            event_tx,
            stop_flag,
            stats,
            start,
        }
    }

    /// Runs the worker loop.
    ///
    /// Generates candidates until:
    /// - Every prefix has been claimed
    /// - Stop flag is set
    /// - The provider fails (reported as [`WorkerEvent::Failed`])
    ///
    /// Attempts are published every batch and immediately before a match is
    /// sent, so a match carries the global count including its own attempt.
    pub fn run(mut self) {
        debug!(worker_id = self.id, "worker started");

        while !self.stop_flag.load(Ordering::Relaxed) && !self.targets.is_empty() {
            let mut pending = 0u64;

            for _ in 0..BATCH_SIZE {
                let candidate = match self.provider.generate() {
                    Ok(candidate) => candidate,
                    Err(error) => {
                        self.stats.add_attempts(pending);
                        error!(worker_id = self.id, error = %error, "key generation failed");
                        let _ = self.event_tx.send(WorkerEvent::Failed {
                            worker_id: self.id,
                            error,
                        });
                        return;
                    }
                };
                pending += 1;

                let claimed = self.targets.check_and_claim(candidate.address.as_str());
                if claimed.is_empty() {
                    continue;
                }

                let attempts = self.stats.add_attempts(pending);
                pending = 0;
                let elapsed = self.start.elapsed();

                for prefix in claimed {
                    self.stats.matches.fetch_add(1, Ordering::Relaxed);
                    debug!(worker_id = self.id, prefix, address = %candidate.address, "prefix claimed");

                    // Ignore a closed channel: the coordinator has gone away.
                    let _ = self.event_tx.send(WorkerEvent::Match(MatchRecord {
                        prefix: prefix.to_owned(),
                        address: candidate.address.clone(),
                        private_key: candidate.private_key.clone(),
                        attempts,
                        elapsed,
                        worker_id: self.id,
                    }));
                }

                if self.targets.is_empty() {
                    break;
                }
            }

            self.stats.add_attempts(pending);
        }

        debug!(worker_id = self.id, "worker stopped");
    }
}
