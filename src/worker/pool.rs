//! Worker pool management.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError};
use tracing::debug;

use crate::crypto::{KeyError, KeyProvider};
use crate::engine::MatchRecord;
use crate::matcher::PrefixSet;

use super::cpu::{CpuWorker, WorkerStats};

/// Messages from workers to the coordinating thread.
#[derive(Debug)]
pub enum WorkerEvent {
    /// A prefix was claimed
    Match(MatchRecord),
    /// The worker's key provider failed; the worker has exited
    Failed { worker_id: usize, error: KeyError },
}

/// Manages a pool of workers for parallel vanity address search.
pub struct WorkerPool {
    /// Number of workers
    num_workers: usize,
    /// Worker thread handles (Option to allow taking during join)
    handles: Option<Vec<JoinHandle<()>>>,
    /// Channel receiver for match and failure events
    event_rx: Receiver<WorkerEvent>,
    /// Shared stop flag
    stop_flag: Arc<AtomicBool>,
    /// Shared statistics
    stats: Arc<WorkerStats>,
}

impl WorkerPool {
    /// Spawns `num_workers` threads, each with its own clone of `provider`.
    ///
    /// The event channel holds one slot per prefix plus one per worker, which
    /// bounds everything workers can ever send, so sends never block.
    pub fn spawn<P: KeyProvider>(
        num_workers: usize,
        provider: &P,
        targets: Arc<PrefixSet>,
        start: Instant,
    ) -> io::Result<Self> {
        let (event_tx, event_rx) = bounded(targets.total() + num_workers);
        let stop_flag = Arc::new(AtomicBool::new(false));
        let stats = Arc::new(WorkerStats::new());

        let mut pool = Self {
            num_workers,
            handles: Some(Vec::with_capacity(num_workers)),
            event_rx,
            stop_flag,
            stats,
        };

        for id in 0..num_workers {
            let worker = CpuWorker::new(
                id,
                provider.clone(),
                targets.clone(),
                event_tx.clone(),
                pool.stop_flag.clone(),
                pool.stats.clone(),
                start,
            );

            // On failure, Drop stops and joins whatever was already spawned.
            let handle = thread::Builder::new()
                .name(format!("vanity-worker-{}", id))
                .spawn(move || worker.run())?;

            if let Some(handles) = pool.handles.as_mut() {
                handles.push(handle);
            }
        }

        debug!(workers = num_workers, "worker pool started");
        Ok(pool)
    }

    /// Waits for the next worker event.
    ///
    /// `Disconnected` means every worker has exited and all events were read.
    pub fn wait_for_event(&self, timeout: Duration) -> Result<WorkerEvent, RecvTimeoutError> {
        self.event_rx.recv_timeout(timeout)
    }

    /// Returns events already queued without blocking.
    pub fn drain(&self) -> impl Iterator<Item = WorkerEvent> + '_ {
        self.event_rx.try_iter()
    }

    /// Signals all workers to stop.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::Relaxed);
    }

    /// Stops the workers and waits for them to exit.
    pub fn join(&mut self) {
        self.stop();
        if let Some(handles) = self.handles.take() {
            for handle in handles {
                let _ = handle.join();
            }
            debug!(workers = self.num_workers, "worker pool joined");
        }
    }

    /// Returns the total attempts published by all workers.
    pub fn total_attempts(&self) -> u64 {
        self.stats.total_attempts()
    }

    /// Returns the total prefixes claimed.
    pub fn total_matches(&self) -> u64 {
        self.stats.total_matches()
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.join();
    }
}
