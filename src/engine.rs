//! The generate → derive → match search loop.
//!
//! [`SearchEngine::run`] drives a [`KeyProvider`] until every requested prefix
//! has been claimed, reporting matches and periodic progress through caller
//! supplied callbacks. With one worker the loop runs on the calling thread and
//! attempt counts are exact; with more, a [`WorkerPool`] searches in parallel
//! and this thread only aggregates.

use std::num::NonZeroU64;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::RecvTimeoutError;
use tracing::{debug, error, info};

use crate::crypto::{Address, KeyError, KeyProvider, PrivateKey};
use crate::matcher::PrefixSet;
use crate::worker::{WorkerEvent, WorkerPool};

/// How often the coordinator polls the shared counter when workers are busy.
const PROGRESS_POLL: Duration = Duration::from_millis(100);

/// Default number of attempts between progress reports.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 100_000;

/// Search parameters.
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// Attempts between `on_progress` calls
    pub progress_interval: NonZeroU64,
    /// Worker threads; 1 runs the loop on the calling thread
    pub workers: usize,
}

impl SearchConfig {
    pub fn new(progress_interval: NonZeroU64, workers: usize) -> Self {
        Self {
            progress_interval,
            workers: workers.max(1),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new(
            NonZeroU64::new(DEFAULT_PROGRESS_INTERVAL).unwrap_or(NonZeroU64::MIN),
            num_cpus::get(),
        )
    }
}

/// A prefix together with the key that satisfied it.
#[derive(Debug, Clone)]
pub struct MatchRecord {
    /// The prefix this address satisfied
    pub prefix: String,
    /// The matching address
    pub address: Address,
    /// The private key behind `address`
    pub private_key: PrivateKey,
    /// Attempts counted when the match was claimed
    pub attempts: u64,
    /// Time since the search started
    pub elapsed: Duration,
    /// Worker that found it (0 on the single-threaded path)
    pub worker_id: usize,
}

/// A periodic progress snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub attempts: u64,
    pub elapsed: Duration,
    /// Attempts per second; 0.0 while no time has elapsed
    pub rate: f64,
    pub found: usize,
    pub total: usize,
}

impl Progress {
    pub fn new(attempts: u64, elapsed: Duration, found: usize, total: usize) -> Self {
        Self {
            attempts,
            elapsed,
            rate: rate(attempts, elapsed),
            found,
            total,
        }
    }
}

/// Attempts per second, or 0.0 when `elapsed` is zero.
pub fn rate(attempts: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        attempts as f64 / secs
    } else {
        0.0
    }
}

/// Totals at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchSummary {
    pub attempts: u64,
    pub elapsed: Duration,
    pub found: usize,
    pub total: usize,
}

impl SearchSummary {
    /// Average attempts per second over the run.
    pub fn rate(&self) -> f64 {
        rate(self.attempts, self.elapsed)
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchOutcome {
    /// Every prefix was matched
    Completed(SearchSummary),
    /// Stopped early by a [`StopHandle`] or by `on_progress`
    Cancelled(SearchSummary),
}

impl SearchOutcome {
    pub fn summary(&self) -> &SearchSummary {
        match self {
            SearchOutcome::Completed(s) | SearchOutcome::Cancelled(s) => s,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, SearchOutcome::Completed(_))
    }
}

/// Errors that end a run.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Key generation failed: {0}")]
    Key(#[from] KeyError),

    #[error("Failed to spawn worker thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("All workers exited before the search finished")]
    WorkersExited,
}

/// Requests cancellation of a running search from any thread.
///
/// A request cancels the active run, or the next one if none is active.
#[derive(Debug, Clone)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn clear(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// Drives the vanity search.
pub struct SearchEngine<P: KeyProvider> {
    provider: P,
    config: SearchConfig,
    stop: StopHandle,
}

impl<P: KeyProvider> SearchEngine<P> {
    pub fn new(provider: P, config: SearchConfig) -> Self {
        Self {
            provider,
            config,
            stop: StopHandle(Arc::new(AtomicBool::new(false))),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Returns a handle for external cancellation (e.g., signal handlers).
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Searches until every distinct prefix in `prefixes` is matched.
    ///
    /// `on_match` runs on the calling thread once per claimed prefix, before
    /// the next progress report. Returning [`ControlFlow::Break`] from
    /// `on_progress` cancels the run. An empty prefix list completes at once
    /// without generating a key.
    ///
    /// Any pending stop request is consumed when this returns, so the engine
    /// can be run again.
    pub fn run<I, S, F, G>(
        &self,
        prefixes: I,
        mut on_progress: F,
        mut on_match: G,
    ) -> Result<SearchOutcome, SearchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnMut(&Progress) -> ControlFlow<()>,
        G: FnMut(MatchRecord),
    {
        let result = self.search(prefixes, &mut on_progress, &mut on_match);
        self.stop.clear();
        result
    }

    fn search<I, S, F, G>(
        &self,
        prefixes: I,
        on_progress: &mut F,
        on_match: &mut G,
    ) -> Result<SearchOutcome, SearchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnMut(&Progress) -> ControlFlow<()>,
        G: FnMut(MatchRecord),
    {
        let targets = Arc::new(PrefixSet::new(prefixes));
        let start = Instant::now();
        let untouched = || SearchSummary {
            attempts: 0,
            elapsed: start.elapsed(),
            found: 0,
            total: targets.total(),
        };

        if targets.is_empty() {
            return Ok(SearchOutcome::Completed(untouched()));
        }

        if self.stop.is_stopped() {
            info!("stop requested before the search started");
            return Ok(SearchOutcome::Cancelled(untouched()));
        }

        info!(
            prefixes = targets.total(),
            workers = self.config.workers,
            interval = self.config.progress_interval.get(),
            "search started"
        );

        let outcome = if self.config.workers == 1 {
            self.run_inline(&targets, start, on_progress, on_match)
        } else {
            self.run_pool(&targets, start, on_progress, on_match)
        }?;

        let summary = outcome.summary();
        info!(
            attempts = summary.attempts,
            found = summary.found,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            completed = outcome.is_completed(),
            "search finished"
        );
        if !outcome.is_completed() {
            info!(outstanding = ?targets.outstanding(), "prefixes left unmatched");
        }
        Ok(outcome)
    }

    fn run_inline<F, G>(
        &self,
        targets: &PrefixSet,
        start: Instant,
        on_progress: &mut F,
        on_match: &mut G,
    ) -> Result<SearchOutcome, SearchError>
    where
        F: FnMut(&Progress) -> ControlFlow<()>,
        G: FnMut(MatchRecord),
    {
        let interval = self.config.progress_interval.get();
        let mut provider = self.provider.clone();
        let mut attempts: u64 = 0;

        let summary = |attempts| SearchSummary {
            attempts,
            elapsed: start.elapsed(),
            found: targets.claimed(),
            total: targets.total(),
        };

        loop {
            if self.stop.is_stopped() {
                return Ok(SearchOutcome::Cancelled(summary(attempts)));
            }

            attempts += 1;
            let candidate = provider.generate().inspect_err(|e| {
                error!(attempts, error = %e, "key generation failed, aborting search");
            })?;

            let claimed = targets.check_and_claim(candidate.address.as_str());
            if !claimed.is_empty() {
                let elapsed = start.elapsed();
                for prefix in claimed {
                    debug!(prefix, address = %candidate.address, attempts, "prefix matched");
                    on_match(MatchRecord {
                        prefix: prefix.to_owned(),
                        address: candidate.address.clone(),
                        private_key: candidate.private_key.clone(),
                        attempts,
                        elapsed,
                        worker_id: 0,
                    });
                }
            }

            if targets.is_empty() {
                return Ok(SearchOutcome::Completed(summary(attempts)));
            }

            if attempts % interval == 0 {
                let progress =
                    Progress::new(attempts, start.elapsed(), targets.claimed(), targets.total());
                if on_progress(&progress).is_break() {
                    return Ok(SearchOutcome::Cancelled(summary(attempts)));
                }
            }
        }
    }

    fn run_pool<F, G>(
        &self,
        targets: &Arc<PrefixSet>,
        start: Instant,
        on_progress: &mut F,
        on_match: &mut G,
    ) -> Result<SearchOutcome, SearchError>
    where
        F: FnMut(&Progress) -> ControlFlow<()>,
        G: FnMut(MatchRecord),
    {
        let interval = self.config.progress_interval.get();
        let total = targets.total();
        let mut pool = WorkerPool::spawn(self.config.workers, &self.provider, targets.clone(), start)
            .map_err(SearchError::Spawn)?;

        let mut delivered = 0usize;
        let mut next_report = interval;
        let mut failure: Option<KeyError> = None;
        let mut workers_exited = false;

        loop {
            match pool.wait_for_event(PROGRESS_POLL) {
                Ok(WorkerEvent::Match(record)) => {
                    delivered += 1;
                    on_match(record);
                }
                Ok(WorkerEvent::Failed { worker_id, error }) => {
                    error!(worker_id, error = %error, "key generation failed, aborting search");
                    failure = Some(error);
                    break;
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    workers_exited = true;
                    break;
                }
            }

            if delivered == total || self.stop.is_stopped() {
                break;
            }

            let attempts = pool.total_attempts();
            if attempts >= next_report {
                next_report = (attempts / interval).saturating_add(1).saturating_mul(interval);
                let progress = Progress::new(attempts, start.elapsed(), delivered, total);
                if on_progress(&progress).is_break() {
                    break;
                }
            }
        }

        // Claims made while the pool was winding down are still valid finds.
        pool.join();
        for event in pool.drain() {
            match event {
                WorkerEvent::Match(record) => {
                    delivered += 1;
                    on_match(record);
                }
                WorkerEvent::Failed { worker_id, error } => {
                    debug!(worker_id, error = %error, "worker failed during shutdown");
                    if failure.is_none() {
                        failure = Some(error);
                    }
                }
            }
        }
        debug!(claimed = pool.total_matches(), delivered, "worker pool drained");

        if let Some(error) = failure {
            return Err(error.into());
        }

        let summary = SearchSummary {
            attempts: pool.total_attempts(),
            elapsed: start.elapsed(),
            found: delivered,
            total,
        };

        if delivered == total {
            Ok(SearchOutcome::Completed(summary))
        } else if workers_exited {
            Err(SearchError::WorkersExited)
        } else {
            Ok(SearchOutcome::Cancelled(summary))
        }
    }
}
