use crate::index::{DocId, Index};
use std::collections::{BTreeMap, HashMap};

/// Inverse document frequency: `ln(N / (1 + df))`. Zero or negative when a
/// term appears in most of the corpus; that is valid ranking signal and is
/// never clamped.
pub fn idf(index: &Index, token: &str) -> f32 {
    let df = index.doc_frequency(token);
    ((index.num_docs() as f32) / (1.0 + df as f32)).ln()
}

/// TF-IDF contribution of `token` to `doc_id`: raw occurrence count times
/// idf. Absent `(token, doc)` pairs contribute 0; scoring has no failure
/// mode.
pub fn tfidf(index: &Index, token: &str, doc_id: DocId) -> f32 {
    let tf = index.term_frequency(token, doc_id);
    if tf == 0 {
        return 0.0;
    }
    tf as f32 * idf(index, token)
}

/// Materialize the full token -> document -> score table. Query paths score
/// lazily per term instead; this exists for offline inspection and tests.
pub fn tfidf_table(index: &Index) -> HashMap<String, BTreeMap<DocId, f32>> {
    let mut table = HashMap::with_capacity(index.frequencies.len());
    for (token, counts) in &index.frequencies {
        let idf = idf(index, token);
        let scores = counts
            .iter()
            .map(|(&doc_id, &tf)| (doc_id, tf as f32 * idf))
            .collect();
        table.insert(token.clone(), scores);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::IndexBuilder;
    use crate::tokenizer::StopWords;

    fn two_doc_index() -> Index {
        let stop = StopWords::english();
        let mut builder = IndexBuilder::new(&stop);
        builder.add_document("a.txt", "cat dog cat");
        builder.add_document("b.txt", "dog bird");
        builder.finish()
    }

    #[test]
    fn idf_is_zero_when_df_plus_one_equals_n() {
        let index = two_doc_index();
        // "cat": df = 1, N = 2 -> ln(2 / 2) = 0.
        assert_eq!(idf(&index, "cat"), 0.0);
        assert_eq!(tfidf(&index, "cat", 0), 0.0);
    }

    #[test]
    fn idf_goes_negative_for_ubiquitous_terms() {
        let index = two_doc_index();
        // "dog": df = 2, N = 2 -> ln(2 / 3) < 0.
        assert!(idf(&index, "dog") < 0.0);
        assert!(tfidf(&index, "dog", 1) < 0.0);
    }

    #[test]
    fn absent_pairs_score_zero() {
        let index = two_doc_index();
        assert_eq!(tfidf(&index, "cat", 1), 0.0);
        assert_eq!(tfidf(&index, "unicorn", 0), 0.0);
    }

    #[test]
    fn table_is_deterministic_and_matches_lazy_scoring() {
        let index = two_doc_index();
        let table = tfidf_table(&index);
        assert_eq!(table, tfidf_table(&index));
        for (token, scores) in &table {
            for (&doc_id, &score) in scores {
                assert_eq!(score, tfidf(&index, token, doc_id));
            }
        }
    }
}
