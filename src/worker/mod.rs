//! Worker pool for parallel vanity address search.
//!
//! This module provides:
//! - Multi-threaded CPU workers sharing one claim-once `PrefixSet`
//! - Batched attempt accounting through a shared atomic counter
//! - Match and failure events delivered to the coordinating thread

mod cpu;
mod pool;

pub use cpu::{CpuWorker, WorkerStats};
pub use pool::{WorkerEvent, WorkerPool};
