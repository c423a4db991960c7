//! Shared, atomically-pulled line sources.
//!
//! The build and query drivers hand every worker the same `LineSource`;
//! each pull takes the lock, reads one line, and stamps it with the next
//! record index. A record is therefore delivered to exactly one worker, and
//! indices are issued in the order records are pulled — which is what lets
//! a shard rely on seeing its documents in strictly increasing docID order.

use parking_lot::Mutex;
use std::io::{self, BufRead};

struct SourceState<R> {
    reader: R,
    issued: usize,
    total: usize,
}

/// A counted stream of `(record index, line)` pairs behind a single lock.
pub struct LineSource<R> {
    state: Mutex<SourceState<R>>,
}

impl<R: BufRead> LineSource<R> {
    /// Wraps `reader`, promising at most `total` records.
    pub fn new(reader: R, total: usize) -> Self {
        LineSource {
            state: Mutex::new(SourceState {
                reader,
                issued: 0,
                total,
            }),
        }
    }

    /// Pulls the next record, or `None` once `total` records have been
    /// issued or the reader ran dry.
    pub fn next_record(&self) -> io::Result<Option<(u32, String)>> {
        let mut state = self.state.lock();
        if state.issued >= state.total {
            return Ok(None);
        }
        let mut line = String::new();
        if state.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let record = state.issued as u32;
        state.issued += 1;
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some((record, line)))
    }
}
