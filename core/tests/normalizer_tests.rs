use docsearch_core::tokenizer::{tokenize, tokenize_query, StopWords};

#[test]
fn it_lowercases_and_strips_punctuation() {
    let stop = StopWords::english();
    let toks = tokenize("Rust's Memory-Safety, guaranteed!", &stop);
    assert_eq!(toks, vec!["rusts", "memorysafety", "guaranteed"]);
}

#[test]
fn it_filters_stopwords() {
    let stop = StopWords::english();
    let toks = tokenize("The quick brown fox and the lazy dog", &stop);
    assert!(!toks.contains(&"the".to_string()));
    assert!(!toks.contains(&"and".to_string()));
    assert_eq!(toks, vec!["quick", "brown", "fox", "lazy", "dog"]);
}

#[test]
fn custom_stop_words_replace_the_default_set() {
    let stop = StopWords::from_words(["fox"]);
    let toks = tokenize("the quick Fox", &stop);
    assert_eq!(toks, vec!["the", "quick"]);
}

#[test]
fn whitespace_only_and_empty_text_yield_no_tokens() {
    let stop = StopWords::english();
    assert!(tokenize("", &stop).is_empty());
    assert!(tokenize(" \t\n ", &stop).is_empty());
    assert!(tokenize("?!;", &stop).is_empty());
}

#[test]
fn query_terms_are_split_and_stop_filtered_but_not_stripped() {
    let stop = StopWords::english();
    assert_eq!(
        tokenize_query("The Memory-Safety of Rust's borrow checker", &stop),
        vec!["memory-safety", "rust's", "borrow", "checker"]
    );
    assert!(tokenize_query("", &stop).is_empty());
}
