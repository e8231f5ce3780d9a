use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

pub type DocId = u32;
pub type Position = u32;

/// A document registered in the index. The path is the durable identifier
/// across runs; ids are only stable within one build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub path: String,
}

/// Every occurrence of one token in one document. Positions index the
/// document's filtered token sequence and are strictly increasing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingEntry {
    pub doc_id: DocId,
    pub positions: Vec<Position>,
}

/// Positional inverted index over one corpus: dictionary, posting lists,
/// term-frequency table, and document registry. Built in a single pass,
/// immutable once built.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub dictionary: HashMap<String, BTreeSet<DocId>>,
    /// Posting entries per token, sorted by doc_id.
    pub postings: HashMap<String, Vec<PostingEntry>>,
    pub frequencies: HashMap<String, BTreeMap<DocId, u32>>,
    pub documents: Vec<Document>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total document count N, counting documents that produced no tokens.
    pub fn num_docs(&self) -> u32 {
        self.documents.len() as u32
    }

    /// Number of documents containing `token` at least once.
    pub fn doc_frequency(&self, token: &str) -> u32 {
        self.dictionary.get(token).map_or(0, |docs| docs.len() as u32)
    }

    pub fn doc_ids(&self, token: &str) -> Option<&BTreeSet<DocId>> {
        self.dictionary.get(token)
    }

    /// Posting entry for `(token, doc_id)`, by binary search over the
    /// doc-id-sorted list.
    pub fn posting(&self, token: &str, doc_id: DocId) -> Option<&PostingEntry> {
        let entries = self.postings.get(token)?;
        let at = entries.binary_search_by_key(&doc_id, |e| e.doc_id).ok()?;
        Some(&entries[at])
    }

    /// Raw occurrence count of `token` in `doc_id`; 0 when absent.
    pub fn term_frequency(&self, token: &str, doc_id: DocId) -> u32 {
        self.frequencies
            .get(token)
            .and_then(|per_doc| per_doc.get(&doc_id))
            .copied()
            .unwrap_or(0)
    }

    pub fn path(&self, doc_id: DocId) -> Option<&str> {
        self.documents.get(doc_id as usize).map(|d| d.path.as_str())
    }

    /// Record one occurrence of `token` at `position` in `doc_id`, keeping
    /// dictionary, postings, and frequencies in step. Documents must be fed
    /// in increasing id order so posting lists stay sorted.
    pub fn add_occurrence(&mut self, token: &str, doc_id: DocId, position: Position) {
        self.dictionary
            .entry(token.to_string())
            .or_default()
            .insert(doc_id);
        let entries = self.postings.entry(token.to_string()).or_default();
        match entries.last_mut() {
            Some(entry) if entry.doc_id == doc_id => entry.positions.push(position),
            _ => entries.push(PostingEntry {
                doc_id,
                positions: vec![position],
            }),
        }
        *self
            .frequencies
            .entry(token.to_string())
            .or_default()
            .entry(doc_id)
            .or_insert(0) += 1;
    }

    /// Merge a partial index whose document ids continue exactly where this
    /// one ends. Parallel builds hand each worker a disjoint, pre-reserved
    /// id range, so appending posting entries preserves doc-id order.
    pub fn merge(&mut self, other: Index) {
        debug_assert!(other
            .documents
            .first()
            .map_or(true, |d| d.id as usize == self.documents.len()));
        self.documents.extend(other.documents);
        for (token, docs) in other.dictionary {
            self.dictionary.entry(token).or_default().extend(docs);
        }
        for (token, entries) in other.postings {
            self.postings.entry(token).or_default().extend(entries);
        }
        for (token, counts) in other.frequencies {
            self.frequencies.entry(token).or_default().extend(counts);
        }
    }

    /// Check every structural invariant. Loading a persisted snapshot
    /// rejects anything that fails here.
    pub fn validate(&self) -> Result<()> {
        for (slot, doc) in self.documents.iter().enumerate() {
            if doc.id as usize != slot {
                bail!("document registry out of order: id {} in slot {slot}", doc.id);
            }
        }
        if self.dictionary.len() != self.postings.len()
            || self.dictionary.len() != self.frequencies.len()
        {
            bail!("dictionary, postings, and frequencies disagree on vocabulary size");
        }
        for (token, docs) in &self.dictionary {
            let entries = match self.postings.get(token) {
                Some(entries) => entries,
                None => bail!("token {token:?} has no posting list"),
            };
            if entries.len() != docs.len()
                || !entries.iter().zip(docs).all(|(e, d)| e.doc_id == *d)
            {
                bail!("dictionary and posting list disagree for token {token:?}");
            }
            let counts = match self.frequencies.get(token) {
                Some(counts) => counts,
                None => bail!("token {token:?} has no frequency entries"),
            };
            if counts.len() != entries.len() {
                bail!("frequency table lists extra documents for token {token:?}");
            }
            for entry in entries {
                if entry.doc_id as usize >= self.documents.len() {
                    bail!("token {token:?} posted in unknown document {}", entry.doc_id);
                }
                if !entry.positions.windows(2).all(|w| w[0] < w[1]) {
                    bail!(
                        "positions for token {token:?} in document {} are not strictly increasing",
                        entry.doc_id
                    );
                }
                match counts.get(&entry.doc_id) {
                    Some(&count) if count as usize == entry.positions.len() => {}
                    _ => bail!(
                        "term frequency for token {token:?} in document {} does not match its positions",
                        entry.doc_id
                    ),
                }
            }
        }
        Ok(())
    }
}
