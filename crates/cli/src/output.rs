//! Result-block formatting.
//!
//! One block per query, written whole while the caller holds the sink lock
//! so blocks from concurrent workers never interleave.

use std::io::{self, Write};
use tfrank_core::engine::QueryOutcome;

/// Human-readable block: a header, then one line per hit with its 1-based
/// rank, or a no-results marker.
pub fn write_block(out: &mut impl Write, outcome: &QueryOutcome) -> io::Result<()> {
    writeln!(
        out,
        "Top-{} results for query {}: \"{}\"",
        outcome.requested, outcome.query_id, outcome.text
    )?;
    if outcome.hits.is_empty() {
        writeln!(out, "no results found")?;
    }
    for (rank, hit) in outcome.hits.iter().enumerate() {
        writeln!(out, "{}: doc={} score={:.6}", rank + 1, hit.doc_id, hit.score)?;
    }
    writeln!(out)
}

/// Machine-readable block: the whole outcome as one JSON line.
pub fn write_json(out: &mut impl Write, outcome: &QueryOutcome) -> io::Result<()> {
    serde_json::to_writer(&mut *out, outcome)?;
    writeln!(out)
}
