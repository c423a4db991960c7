//! Inverted index for TF·IDF ranked retrieval.
//!
//! Construction is split in two: per-worker [`ShardIndex`]es built over
//! disjoint slices of the corpus, and the merged, weighted [`SearchIndex`]
//! that serves queries read-only for the rest of the process.

/// Per-worker partial index built over a disjoint subset of documents.
pub mod shard;
/// Merged, TF·IDF-weighted, frozen index served to the query evaluator.
pub mod weighted;

pub use shard::{Posting, ShardIndex};
pub use weighted::SearchIndex;
