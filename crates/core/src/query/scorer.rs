//! TF·IDF cosine scoring against the weighted index.
//!
//! Builds a weighted query vector, accumulates per-document dot products,
//! and normalizes by document magnitude. Top-k selection is a partial sort:
//! O(n log k) via a min-heap of size k.

use crate::config;
use crate::index::SearchIndex;
use crate::query::ParsedQuery;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// One ranked result: document ID and cosine score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// 0-based corpus index of the matched document.
    pub doc_id: u32,
    /// Cosine similarity of the document to the query vector.
    pub score: f32,
}

/// Scores the corpus against `query` and returns at most `query.k` hits in
/// descending score order. Equal scores may land in either order.
pub fn evaluate(index: &SearchIndex, query: &ParsedQuery) -> Vec<SearchHit> {
    if query.tokens.is_empty() || index.total_docs() == 0 {
        return Vec::new();
    }

    // Raw occurrence counts and the maximum count m.
    let mut counts: HashMap<&str, f32> = HashMap::with_capacity(query.tokens.len());
    let mut max_count = 0.0f32;
    for term in query.tokens.iter() {
        let count = counts.entry(term).or_insert(0.0);
        *count += 1.0;
        if *count > max_count {
            max_count = *count;
        }
    }

    // Query vector: (count / m) · idf, zero for terms the corpus never saw.
    let mut weights: HashMap<&str, f32> = HashMap::with_capacity(counts.len());
    for (term, count) in counts {
        let weight = match index.idf(term) {
            Some(idf) => count / max_count * idf,
            None => 0.0,
        };
        weights.insert(term, weight);
    }

    // Accumulate dot products over the raw token sequence: a term repeated
    // in the query contributes once per occurrence, scaling its postings by
    // its query-side count.
    let mut similarities: HashMap<u32, f32> =
        HashMap::with_capacity(config::SCORE_MAP_CAPACITY.min(index.total_docs()));
    for term in query.tokens.iter() {
        let weight = weights[term];
        if weight == 0.0 {
            continue;
        }
        let Some(postings) = index.postings(term) else {
            continue;
        };
        let idf = index.idf(term).unwrap_or(0.0);
        for posting in postings {
            *similarities.entry(posting.doc_id).or_insert(0.0) += posting.tf * idf * weight;
        }
    }

    // Cosine normalization. Every accumulated document appears in some
    // posting, so its magnitude is nonzero.
    for (doc_id, similarity) in similarities.iter_mut() {
        *similarity /= index.magnitude(*doc_id);
    }

    top_k(similarities, query.k)
}

/// Partial sort: keep the k best in a min-heap, then sort those descending.
fn top_k(scores: HashMap<u32, f32>, k: usize) -> Vec<SearchHit> {
    if k == 0 {
        return Vec::new();
    }
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f32>, u32)>> =
        BinaryHeap::with_capacity(scores.len().min(k) + 1);
    for (doc_id, score) in scores {
        heap.push(Reverse((OrderedFloat(score), doc_id)));
        if heap.len() > k {
            heap.pop();
        }
    }
    let mut hits: Vec<SearchHit> = heap
        .into_iter()
        .map(|Reverse((score, doc_id))| SearchHit {
            doc_id,
            score: score.0,
        })
        .collect();
    hits.sort_unstable_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    hits
}
