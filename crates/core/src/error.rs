//! Fatal engine error type.

use std::fmt;
use std::io;

/// Failures surfaced by the build and query drivers.
///
/// Malformed query headers are deliberately absent: the query driver logs
/// and skips those lines, and unknown query terms simply contribute nothing.
#[derive(Debug)]
pub enum EngineError {
    /// Reading from a document or query source failed mid-stream.
    Io(io::Error),
    /// A record-count header was not a decimal integer.
    MalformedCount(String),
    /// A worker thread panicked. Every peer is joined before this surfaces.
    WorkerPanicked,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Io(e) => write!(f, "source read failed: {e}"),
            EngineError::MalformedCount(header) => {
                write!(f, "record-count header is not a decimal integer: {header:?}")
            }
            EngineError::WorkerPanicked => write!(f, "a worker thread panicked"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for EngineError {
    fn from(e: io::Error) -> Self {
        EngineError::Io(e)
    }
}
