//! Positional inverted index with TF-IDF ranking and exact-phrase queries.
//!
//! The crate is the library half of docsearch: the binaries scan, extract,
//! and prompt; everything that touches the index lives here.
//!
//! - `tokenizer`: text normalization and the shared stop-word set
//! - `index`: the four core structures and their invariants
//! - `builder`: single-pass population, with offset starts for parallel builds
//! - `score`: TF-IDF over the index's frequency data
//! - `search`: OR-ranked and exact-phrase query engines
//! - `persist`: versioned on-disk snapshot of the whole index

pub mod builder;
pub mod index;
pub mod persist;
pub mod score;
pub mod search;
pub mod tokenizer;

pub use builder::IndexBuilder;
pub use index::{DocId, Document, Index, Position, PostingEntry};
pub use search::{SearchHit, Searcher};
pub use tokenizer::StopWords;
