//! Concurrent build and query drivers.
//!
//! Both phases run `W` scoped OS threads over a shared [`LineSource`].
//! During the build each worker owns a private shard; the merge and
//! weighting run single-threaded once every worker has finished. During
//! queries the frozen index is shared read-only, and each finished block is
//! handed to the caller's sink as a unit.

/// Mutex-guarded record sources.
pub mod source;

pub use source::LineSource;

use crate::error::EngineError;
use crate::index::{SearchIndex, ShardIndex};
use crate::query::{evaluate, parse_query_line, SearchHit};
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use std::thread;

/// Reads the record-count header off the front of a source file.
pub fn read_count_header<R: BufRead>(reader: &mut R) -> Result<usize, EngineError> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    let header = line.trim();
    header
        .parse::<usize>()
        .map_err(|_| EngineError::MalformedCount(header.to_owned()))
}

/// Everything the output side needs to emit one query's block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryOutcome {
    /// Query identifier from the header.
    pub query_id: u32,
    /// Requested result count from the header.
    pub requested: usize,
    /// Query text after header blanking and the tokenizer fold.
    pub text: String,
    /// Ranked hits, best first, at most `requested` long.
    pub hits: Vec<SearchHit>,
}

/// Builds the frozen index: `workers` threads pull documents from `source`
/// into private shards, which are merged and weighted once every worker has
/// joined.
///
/// `total_docs` must be known up front — shards pre-allocate their
/// per-document vectors from it.
pub fn build_index<R>(
    source: &LineSource<R>,
    total_docs: usize,
    workers: usize,
) -> Result<SearchIndex, EngineError>
where
    R: BufRead + Send,
{
    let workers = workers.max(1);
    let shards = run_workers(workers, || {
        let mut shard = ShardIndex::new(total_docs);
        while let Some((doc_id, line)) = source.next_record()? {
            shard.ingest(doc_id, &line);
        }
        shard.finalize_max_freq();
        shard.finalize_tf();
        Ok(shard)
    })?;

    let index = SearchIndex::from_shards(shards);
    tracing::debug!(
        total_docs = index.total_docs(),
        terms = index.term_count(),
        workers,
        "index built"
    );
    Ok(index)
}

/// Answers every query pulled from `source`, handing each finished
/// [`QueryOutcome`] to `emit`.
///
/// Malformed query lines are logged and skipped. `emit` is called once per
/// query from whichever worker answered it; the caller serializes the
/// actual writing (a lock around the output is enough to keep blocks from
/// interleaving).
pub fn run_queries<R, F>(
    index: &SearchIndex,
    source: &LineSource<R>,
    workers: usize,
    emit: F,
) -> Result<(), EngineError>
where
    R: BufRead + Send,
    F: Fn(QueryOutcome) + Sync,
{
    let workers = workers.max(1);
    let emit = &emit;
    run_workers(workers, move || {
        while let Some((record, line)) = source.next_record()? {
            let query = match parse_query_line(&line) {
                Ok(query) => query,
                Err(reason) => {
                    tracing::warn!(record, %reason, "skipping malformed query line");
                    continue;
                }
            };
            let hits = evaluate(index, &query);
            emit(QueryOutcome {
                query_id: query.id,
                requested: query.k,
                text: query.tokens.into_folded(),
                hits,
            });
        }
        Ok(())
    })?;
    Ok(())
}

/// Spawns `workers` copies of `work` on scoped threads and joins them all.
/// A panicked worker surfaces as [`EngineError::WorkerPanicked`], but only
/// after every peer has been joined.
fn run_workers<T, W>(workers: usize, work: W) -> Result<Vec<T>, EngineError>
where
    T: Send,
    W: Fn() -> Result<T, EngineError> + Sync,
{
    thread::scope(|scope| {
        let work = &work;
        let handles: Vec<_> = (0..workers).map(|_| scope.spawn(move || work())).collect();

        let mut results = Vec::with_capacity(workers);
        let mut panicked = false;
        for handle in handles {
            match handle.join() {
                Ok(result) => results.push(result),
                Err(_) => panicked = true,
            }
        }
        if panicked {
            return Err(EngineError::WorkerPanicked);
        }
        results.into_iter().collect()
    })
}
