//! `tfrank` — batch TF·IDF ranked retrieval.
//!
//! Reads a document file and a query file (each prefixed with a record
//! count), builds the index with one worker per core, answers every query,
//! and prints one result block per query to stdout. Blocks from concurrent
//! workers never interleave; their order across queries is not defined.

use clap::Parser;
use parking_lot::Mutex;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tfrank_core::config;
use tfrank_core::engine::{self, LineSource};
use tracing_subscriber::EnvFilter;

mod output;

#[derive(Parser)]
#[command(name = "tfrank", about = "In-memory TF-IDF ranked retrieval")]
struct Args {
    /// Document file: a count line followed by one document per line
    #[arg(short, long, default_value = config::DEFAULT_DOCUMENTS_PATH)]
    documents: PathBuf,

    /// Query file: a count line followed by one query per line
    #[arg(short, long, default_value = config::DEFAULT_QUERIES_PATH)]
    queries: PathBuf,

    /// Worker threads (0 = one per logical CPU)
    #[arg(short, long, default_value_t = config::DEFAULT_WORKERS)]
    workers: usize,

    /// Emit one JSON object per query instead of text blocks
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn open(path: &Path) -> BufReader<File> {
    match File::open(path) {
        Ok(file) => BufReader::new(file),
        Err(e) => {
            eprintln!("Error: cannot open '{}': {e}", path.display());
            std::process::exit(1);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(
                    "tfrank=info"
                        .parse()
                        .expect("valid directive literal"),
                )
                .add_directive(
                    "tfrank_core=info"
                        .parse()
                        .expect("valid directive literal"),
                ),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let workers = if args.workers == 0 {
        std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
    } else {
        args.workers
    };

    let mut documents = open(&args.documents);
    let mut queries = open(&args.queries);

    let total_docs = engine::read_count_header(&mut documents)?;
    let total_queries = engine::read_count_header(&mut queries)?;
    tracing::info!(total_docs, total_queries, workers, "starting");

    let build_started = Instant::now();
    let document_source = LineSource::new(documents, total_docs);
    let index = engine::build_index(&document_source, total_docs, workers)?;
    tracing::info!(
        terms = index.term_count(),
        elapsed_s = build_started.elapsed().as_secs_f64(),
        "index built"
    );

    let sink = Mutex::new(BufWriter::new(io::stdout()));

    let query_started = Instant::now();
    let query_source = LineSource::new(queries, total_queries);
    engine::run_queries(&index, &query_source, workers, |outcome| {
        let mut out = sink.lock();
        let written = if args.json {
            output::write_json(&mut *out, &outcome)
        } else {
            output::write_block(&mut *out, &outcome)
        };
        if let Err(e) = written {
            tracing::error!(query_id = outcome.query_id, "failed to write result block: {e}");
        }
    })?;
    sink.into_inner().flush()?;
    tracing::info!(
        elapsed_s = query_started.elapsed().as_secs_f64(),
        "all queries answered"
    );

    Ok(())
}
