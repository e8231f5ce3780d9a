use crate::index::{DocId, Document, Index, Position};
use crate::tokenizer::{tokenize, StopWords};

/// Single-pass index construction. One builder populates one `Index`;
/// `finish` hands the index over and the builder holds nothing after that.
pub struct IndexBuilder<'a> {
    stop: &'a StopWords,
    index: Index,
    next_id: DocId,
}

impl<'a> IndexBuilder<'a> {
    pub fn new(stop: &'a StopWords) -> Self {
        Self::starting_at(stop, 0)
    }

    /// Start id assignment at `first_id`. Parallel builds give each worker a
    /// disjoint, pre-reserved range and merge the partial indexes in order.
    pub fn starting_at(stop: &'a StopWords, first_id: DocId) -> Self {
        Self {
            stop,
            index: Index::new(),
            next_id: first_id,
        }
    }

    /// Normalize `text` and fold every token occurrence into the index. A
    /// document that yields no tokens is still registered and consumes its
    /// id.
    pub fn add_document(&mut self, path: &str, text: &str) -> DocId {
        let id = self.next_id;
        self.next_id += 1;
        self.index.documents.push(Document {
            id,
            path: path.to_string(),
        });
        let tokens = tokenize(text, self.stop);
        tracing::debug!(doc_id = id, path, tokens = tokens.len(), "indexed document");
        for (position, token) in tokens.into_iter().enumerate() {
            self.index.add_occurrence(&token, id, position as Position);
        }
        id
    }

    pub fn finish(self) -> Index {
        self.index
    }
}
