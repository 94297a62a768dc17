//! Glue between the search engine and its collaborators.
//!
//! Both entry points are generic over the reporter and sink, so the CLI and
//! the tests drive the same code.

use std::cell::RefCell;
use std::ops::ControlFlow;
use std::path::PathBuf;

use tracing::warn;

use crate::crypto::KeyProvider;
use crate::engine::{SearchEngine, SearchError, SearchOutcome};
use crate::report::{ProgressReporter, SearchEvent, SingleResult};
use crate::sink::{ResultSink, WalletRecord};

/// Result of a single-prefix run.
#[derive(Debug)]
pub struct SingleRun {
    pub outcome: SearchOutcome,
    /// Present when the prefix was found
    pub result: Option<SingleResult>,
}

/// Result of a multi-prefix run.
#[derive(Debug)]
pub struct MultiRun {
    pub outcome: SearchOutcome,
    /// Files written, in discovery order
    pub saved: Vec<PathBuf>,
    /// Matches that were found but could not be persisted
    pub save_failures: usize,
}

impl MultiRun {
    /// Warning for matches that were found but not persisted, if any.
    pub fn unsaved_notice(&self) -> Option<String> {
        (self.save_failures > 0).then(|| {
            format!(
                "{} wallet(s) were found but could not be saved",
                self.save_failures
            )
        })
    }
}

/// Searches for one prefix; the match is returned rather than persisted.
pub fn run_single<P, R>(
    engine: &SearchEngine<P>,
    prefix: &str,
    reporter: &mut R,
) -> Result<SingleRun, SearchError>
where
    P: KeyProvider,
    R: ProgressReporter,
{
    let prefixes = [prefix.to_owned()];
    let reporter = RefCell::new(reporter);
    reporter.borrow_mut().render(&SearchEvent::Started {
        prefixes: &prefixes,
        workers: engine.config().workers,
        interval: engine.config().progress_interval.get(),
    });

    let mut result = None;
    let outcome = engine.run(
        prefixes.iter().cloned(),
        |progress| {
            reporter.borrow_mut().render(&SearchEvent::Progress(progress));
            ControlFlow::Continue(())
        },
        |record| {
            reporter.borrow_mut().render(&SearchEvent::Matched(&record));
            result = Some(SingleResult::new(&record));
        },
    )?;

    reporter.borrow_mut().render(&SearchEvent::Finished(&outcome));
    Ok(SingleRun { outcome, result })
}

/// Searches for every prefix, persisting each match as it is found.
///
/// A sink failure is reported and counted; the search carries on.
pub fn run_multi<P, R, S>(
    engine: &SearchEngine<P>,
    prefixes: &[String],
    name: &str,
    reporter: &mut R,
    sink: &mut S,
) -> Result<MultiRun, SearchError>
where
    P: KeyProvider,
    R: ProgressReporter,
    S: ResultSink,
{
    let reporter = RefCell::new(reporter);
    reporter.borrow_mut().render(&SearchEvent::Started {
        prefixes,
        workers: engine.config().workers,
        interval: engine.config().progress_interval.get(),
    });

    let mut saved = Vec::new();
    let mut save_failures = 0;
    let outcome = engine.run(
        prefixes.iter().cloned(),
        |progress| {
            reporter.borrow_mut().render(&SearchEvent::Progress(progress));
            ControlFlow::Continue(())
        },
        |record| {
            let mut reporter = reporter.borrow_mut();
            reporter.render(&SearchEvent::Matched(&record));

            let wallet = WalletRecord::new(&record, name);
            match sink.persist(&wallet) {
                Ok(path) => {
                    reporter.render(&SearchEvent::Saved {
                        address: &wallet.new_address,
                        path: &path,
                    });
                    saved.push(path);
                }
                Err(error) => {
                    warn!(address = %wallet.new_address, error = %error, "failed to persist wallet");
                    reporter.render(&SearchEvent::SaveFailed {
                        address: &wallet.new_address,
                        error: &error,
                    });
                    save_failures += 1;
                }
            }
        },
    )?;

    reporter.borrow_mut().render(&SearchEvent::Finished(&outcome));
    Ok(MultiRun {
        outcome,
        saved,
        save_failures,
    })
}
