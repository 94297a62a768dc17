//! Prefix matching for vanity addresses.
//!
//! - `PrefixSet`: outstanding targets with claim-once semantics, shared by all workers
//! - Difficulty estimates and Base58 alphabet checks used at start-up

mod difficulty;
mod prefix_set;

pub use difficulty::{difficulty_description, estimated_attempts, is_base58, BASE58_ALPHABET};
pub use prefix_set::{matches_prefix, PrefixSet};
