//! Global configuration constants for tfrank.
//!
//! Compile-time capacity hints and front-end defaults live here; runtime
//! configuration (file paths, worker count) is handled via CLI arguments in
//! the `tfrank` binary.

/// Initial capacity hint for the per-query score accumulator.
///
/// Most queries touch far fewer documents than the corpus holds; starting
/// small keeps selective queries from paying for a corpus-sized allocation.
pub const SCORE_MAP_CAPACITY: usize = 256;

/// Default document file: a count line followed by one document per line.
pub const DEFAULT_DOCUMENTS_PATH: &str = "documents.txt";

/// Default query file: a count line followed by one query per line.
pub const DEFAULT_QUERIES_PATH: &str = "queries.txt";

/// Default worker count. Zero means one worker per logical CPU.
pub const DEFAULT_WORKERS: usize = 0;
