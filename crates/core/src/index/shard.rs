//! Build-time shard index.
//!
//! Each worker owns one `ShardIndex` and feeds it documents in strictly
//! increasing docID order; a document is visited by exactly one shard. That
//! ordering is what makes the last-posting check in `add` sufficient: a
//! document being ingested can only ever match the tail of a postings list.

use crate::tokenizer::tokenize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single entry in a term's postings list: one (term, document) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    /// 0-based corpus index of the document.
    pub doc_id: u32,
    /// Number of times the term occurs in this document. Equals `positions.len()`.
    pub freq: u32,
    /// Normalized term frequency `freq / doc_max_freq[doc_id]`.
    /// Zero until `finalize_tf` runs.
    pub tf: f32,
    /// Word offsets of each occurrence within the document.
    pub positions: Vec<u32>,
}

impl Posting {
    fn first(doc_id: u32, position: u32) -> Self {
        Posting {
            doc_id,
            freq: 1,
            tf: 0.0,
            positions: vec![position],
        }
    }
}

/// Partial inverted index over the documents a single worker ingested,
/// plus the per-document maximum term frequency for those documents.
#[derive(Debug, Default, PartialEq)]
pub struct ShardIndex {
    /// term → postings, one per document containing the term, in first-seen
    /// docID order.
    dictionary: HashMap<String, Vec<Posting>>,
    /// Max term frequency per document. Length is the full corpus size;
    /// only indices owned by this shard become nonzero.
    doc_max_freq: Vec<u32>,
}

impl ShardIndex {
    /// Creates an empty shard sized for a corpus of `total_docs` documents.
    pub fn new(total_docs: usize) -> Self {
        ShardIndex {
            dictionary: HashMap::new(),
            doc_max_freq: vec![0; total_docs],
        }
    }

    /// Tokenizes one document line and records every term occurrence.
    pub fn ingest(&mut self, doc_id: u32, line: &str) {
        let tokens = tokenize(line);
        for (position, term) in tokens.iter().enumerate() {
            self.add(term, doc_id, position as u32);
        }
    }

    /// Records one term occurrence.
    ///
    /// Documents arrive in increasing docID order and never return, so if
    /// this document already holds a posting for `term` it must be the last
    /// entry of the list.
    fn add(&mut self, term: &str, doc_id: u32, position: u32) {
        if let Some(postings) = self.dictionary.get_mut(term) {
            match postings.last_mut() {
                Some(last) if last.doc_id == doc_id => {
                    last.freq += 1;
                    last.positions.push(position);
                }
                _ => postings.push(Posting::first(doc_id, position)),
            }
        } else {
            self.dictionary
                .insert(term.to_owned(), vec![Posting::first(doc_id, position)]);
        }
    }

    /// Computes the maximum term frequency of every document this shard
    /// ingested. Run once, after the last document.
    pub fn finalize_max_freq(&mut self) {
        for postings in self.dictionary.values() {
            for posting in postings {
                let slot = &mut self.doc_max_freq[posting.doc_id as usize];
                if *slot < posting.freq {
                    *slot = posting.freq;
                }
            }
        }
    }

    /// Sets every posting's `tf` to `freq / doc_max_freq[doc_id]`.
    ///
    /// The shard's own `doc_max_freq` is sufficient: each docID is owned by
    /// exactly one shard.
    pub fn finalize_tf(&mut self) {
        for postings in self.dictionary.values_mut() {
            for posting in postings {
                posting.tf =
                    posting.freq as f32 / self.doc_max_freq[posting.doc_id as usize] as f32;
            }
        }
    }

    /// Folds `other` into `self`, transferring ownership of its postings.
    ///
    /// Concatenation order is destination first, source appended at the
    /// tail; postings keep their internal order. `doc_max_freq` entries are
    /// overwritten wherever the source is positive — disjoint document
    /// ownership guarantees the destination is zero there.
    pub fn absorb(&mut self, mut other: ShardIndex) {
        for (term, mut postings) in other.dictionary.drain() {
            match self.dictionary.get_mut(&term) {
                Some(merged) => merged.append(&mut postings),
                None => {
                    self.dictionary.insert(term, postings);
                }
            }
        }
        for (merged, &incoming) in self.doc_max_freq.iter_mut().zip(&other.doc_max_freq) {
            if incoming > 0 {
                *merged = incoming;
            }
        }
    }

    /// Number of distinct terms in this shard.
    pub fn term_count(&self) -> usize {
        self.dictionary.len()
    }

    /// Postings list for `term`, if any ingested document contains it.
    pub fn postings(&self, term: &str) -> Option<&[Posting]> {
        self.dictionary.get(term).map(Vec::as_slice)
    }

    /// Per-document maximum term frequency, indexed by docID.
    pub fn doc_max_freq(&self) -> &[u32] {
        &self.doc_max_freq
    }

    /// Iterates every (term, postings) pair.
    pub fn terms(&self) -> impl Iterator<Item = (&str, &[Posting])> + '_ {
        self.dictionary
            .iter()
            .map(|(term, postings)| (term.as_str(), postings.as_slice()))
    }

    pub(crate) fn into_parts(self) -> (HashMap<String, Vec<Posting>>, Vec<u32>) {
        (self.dictionary, self.doc_max_freq)
    }
}
