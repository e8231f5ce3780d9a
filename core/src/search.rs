use crate::index::{DocId, Index, Position};
use crate::score::tfidf;
use crate::tokenizer::{tokenize_query, StopWords};
use std::collections::BTreeSet;

/// One ranked query result.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub path: String,
    pub score: f32,
}

/// Read-only query engine over a loaded index snapshot. The stop-word set
/// must be the one the index was built with, so query terms are
/// stop-filtered exactly like indexed text.
pub struct Searcher<'a> {
    index: &'a Index,
    stop: &'a StopWords,
}

impl<'a> Searcher<'a> {
    pub fn new(index: &'a Index, stop: &'a StopWords) -> Self {
        Self { index, stop }
    }

    /// OR-ranked search: every document containing any query term is a
    /// candidate, scored by summed TF-IDF over all query terms. Zero and
    /// negative scores are kept.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let terms = tokenize_query(query, self.stop);
        if terms.is_empty() {
            return Vec::new();
        }
        let mut candidates: BTreeSet<DocId> = BTreeSet::new();
        for term in &terms {
            if let Some(docs) = self.index.doc_ids(term) {
                candidates.extend(docs);
            }
        }
        rank(candidates.into_iter().map(|doc_id| self.hit(doc_id, &terms)).collect())
    }

    /// Exact-phrase search: only documents containing every term at
    /// consecutive token positions match, and each document matches at most
    /// once no matter how many runs it contains.
    pub fn phrase_search(&self, query: &str) -> Vec<SearchHit> {
        let terms = tokenize_query(query, self.stop);
        if terms.is_empty() {
            return Vec::new();
        }
        // AND semantics: one unindexed term rules out every document.
        let mut doc_sets = Vec::with_capacity(terms.len());
        for term in &terms {
            match self.index.doc_ids(term) {
                Some(docs) => doc_sets.push(docs),
                None => return Vec::new(),
            }
        }
        let mut candidates: BTreeSet<DocId> = doc_sets[0].iter().copied().collect();
        for docs in &doc_sets[1..] {
            candidates = candidates.intersection(docs).copied().collect();
        }
        let hits = candidates
            .into_iter()
            .filter(|&doc_id| self.phrase_match(&terms, doc_id))
            .map(|doc_id| self.hit(doc_id, &terms))
            .collect();
        rank(hits)
    }

    /// True when `terms` occur as one contiguous run in `doc_id`: some start
    /// position `p` of the first term has every later term at `p + offset`.
    fn phrase_match(&self, terms: &[String], doc_id: DocId) -> bool {
        let mut entries = Vec::with_capacity(terms.len());
        for term in terms {
            match self.index.posting(term, doc_id) {
                Some(entry) => entries.push(entry),
                None => return false,
            }
        }
        entries[0].positions.iter().any(|&start| {
            entries[1..].iter().enumerate().all(|(at, entry)| {
                let wanted = start + at as Position + 1;
                entry.positions.binary_search(&wanted).is_ok()
            })
        })
    }

    /// Whole-document score: phrase hits are ranked by the same summed
    /// TF-IDF as general search, not by the matched occurrence alone.
    fn hit(&self, doc_id: DocId, terms: &[String]) -> SearchHit {
        let score: f32 = terms.iter().map(|term| tfidf(self.index, term, doc_id)).sum();
        let path = self.index.path(doc_id).unwrap_or_default().to_string();
        SearchHit { doc_id, path, score }
    }
}

/// Deterministic result order: score descending, then doc id ascending.
fn rank(mut hits: Vec<SearchHit>) -> Vec<SearchHit> {
    hits.sort_unstable_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.doc_id.cmp(&b.doc_id))
    });
    hits
}
