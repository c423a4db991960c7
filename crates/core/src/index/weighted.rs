//! Frozen, weighted search index.
//!
//! Built once from the finished shards: the merge folds every shard into the
//! first, then the weighting passes compute the IDF table and document
//! magnitudes. From that point the index is immutable and safe for
//! unsynchronized concurrent reads.

use crate::index::shard::{Posting, ShardIndex};
use std::collections::HashMap;

/// The merged, TF·IDF-weighted inverted index.
#[derive(Debug)]
pub struct SearchIndex {
    /// term → postings, concatenated across shards.
    dictionary: HashMap<String, Vec<Posting>>,
    /// term → `log2(1 + N / df)`.
    idf: HashMap<String, f32>,
    /// Max term frequency per document, indexed by docID.
    doc_max_freq: Vec<u32>,
    /// Euclidean norm of each document's TF·IDF vector, indexed by docID.
    doc_magnitudes: Vec<f32>,
    /// Corpus size `N`. Stored explicitly rather than recovered from vector
    /// lengths.
    total_docs: usize,
}

impl SearchIndex {
    /// Merges the shards (into the first) and computes weights.
    ///
    /// Callers must have run `finalize_max_freq` and `finalize_tf` on every
    /// shard; the merge itself is single-threaded and consumes its sources.
    pub fn from_shards(shards: Vec<ShardIndex>) -> Self {
        let mut shards = shards.into_iter();
        let mut merged = shards.next().unwrap_or_default();
        for shard in shards {
            merged.absorb(shard);
        }

        let (dictionary, doc_max_freq) = merged.into_parts();
        let total_docs = doc_max_freq.len();
        let mut index = SearchIndex {
            dictionary,
            idf: HashMap::new(),
            doc_max_freq,
            doc_magnitudes: vec![0.0; total_docs],
            total_docs,
        };
        index.compute_weights();
        index
    }

    /// Two passes: accumulate each document's squared tf·idf weights while
    /// filling the IDF table, then take the square roots. Starts from a
    /// clean slate, so a second run leaves the index unchanged.
    fn compute_weights(&mut self) {
        self.idf.clear();
        self.idf.reserve(self.dictionary.len());
        self.doc_magnitudes.fill(0.0);

        let n = self.total_docs as f32;
        for (term, postings) in &self.dictionary {
            let idf = (1.0 + n / postings.len() as f32).log2();
            for posting in postings {
                let weight = posting.tf * idf;
                self.doc_magnitudes[posting.doc_id as usize] += weight * weight;
            }
            self.idf.insert(term.clone(), idf);
        }

        for magnitude in &mut self.doc_magnitudes {
            *magnitude = magnitude.sqrt();
        }
    }

    /// Postings list for `term`, if any document contains it.
    pub fn postings(&self, term: &str) -> Option<&[Posting]> {
        self.dictionary.get(term).map(Vec::as_slice)
    }

    /// Inverse document frequency of `term`, if indexed.
    pub fn idf(&self, term: &str) -> Option<f32> {
        self.idf.get(term).copied()
    }

    /// Euclidean norm of the document's TF·IDF vector. Zero exactly for
    /// documents that were empty after tokenization.
    ///
    /// Panics if `doc_id` is out of range.
    pub fn magnitude(&self, doc_id: u32) -> f32 {
        self.doc_magnitudes[doc_id as usize]
    }

    /// Maximum term frequency within the document.
    ///
    /// Panics if `doc_id` is out of range.
    pub fn doc_max_freq(&self, doc_id: u32) -> u32 {
        self.doc_max_freq[doc_id as usize]
    }

    /// Corpus size the index was built for.
    pub fn total_docs(&self) -> usize {
        self.total_docs
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        self.dictionary.len()
    }

    /// Iterates every (term, postings) pair.
    pub fn terms(&self) -> impl Iterator<Item = (&str, &[Posting])> + '_ {
        self.dictionary
            .iter()
            .map(|(term, postings)| (term.as_str(), postings.as_slice()))
    }
}
