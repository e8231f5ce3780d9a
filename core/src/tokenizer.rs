use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref NON_ALNUM: Regex = Regex::new(r"[^A-Za-z0-9\s]").expect("valid regex");
}

/// Default English stop words. One list serves both the index build and the
/// query tokenizer, so a term filtered at index time can never survive as a
/// query term.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "i","me","my","myself","we","our","ours","ourselves","you","you're","you've","you'll","you'd","your",
    "yours","yourself","yourselves","he","him","his","himself","she","she's","her","hers","herself","it",
    "it's","its","itself","they","them","their","theirs","themselves","what","which","who","whom","this",
    "that","that'll","these","those","am","is","are","was","were","be","been","being","have","has","had",
    "having","do","does","did","doing","a","an","the","and","but","if","or","because","as","until","while",
    "of","at","by","for","with","about","against","between","into","through","during","before","after","above",
    "below","to","from","up","down","in","out","on","off","over","under","again","further","then","once",
    "here","there","when","where","why","how","all","any","both","each","few","more","most","other","some",
    "such","no","nor","not","only","own","same","so","than","too","very","s","t","can","will","just",
    "don","don't","should","should've","now","d","ll","m","o","re","ve","y","ain","aren","aren't","couldn",
    "couldn't","didn","didn't","doesn","doesn't","hadn","hadn't","hasn","hasn't","haven","haven't","isn",
    "isn't","ma","mightn","mightn't","mustn","mustn't","needn","needn't","shan","shan't","shouldn","shouldn't",
    "wasn","wasn't","weren","weren't","won","won't","wouldn","wouldn't",
];

/// Immutable stop-word set, built once per indexing or query session and
/// passed by reference wherever text is tokenized.
#[derive(Debug, Clone)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn english() -> Self {
        Self::from_words(ENGLISH_STOP_WORDS.iter().copied())
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(|w| w.into().to_lowercase()).collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::english()
    }
}

/// Normalize raw text into index tokens: lowercase, delete every character
/// that is not an ASCII letter, digit, or whitespace, split on whitespace,
/// drop stop words. Indices into the returned vector (0, 1, 2, ...) are the
/// only token positions ever recorded.
pub fn tokenize(text: &str, stop: &StopWords) -> Vec<String> {
    let lowered = text.to_lowercase();
    let stripped = NON_ALNUM.replace_all(&lowered, "");
    stripped
        .split_whitespace()
        .filter(|word| !stop.contains(word))
        .map(str::to_string)
        .collect()
}

/// Split a query into terms: lowercase, split on whitespace, drop stop
/// words. Punctuation is kept as typed; only document text goes through the
/// character strip, so a punctuated query term matches nothing rather than
/// being rewritten into a different token.
pub fn tokenize_query(query: &str, stop: &StopWords) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|word| !stop.contains(word))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        let stop = StopWords::english();
        let toks = tokenize("Hello, World! 42nd?", &stop);
        assert_eq!(toks, vec!["hello", "world", "42nd"]);
    }

    #[test]
    fn positions_are_indices_into_the_filtered_sequence() {
        let stop = StopWords::english();
        let toks = tokenize("the quick brown fox", &stop);
        assert_eq!(toks, vec!["quick", "brown", "fox"]);
    }

    #[test]
    fn query_terms_keep_their_punctuation() {
        let stop = StopWords::english();
        let terms = tokenize_query("The Dog's bone!", &stop);
        assert_eq!(terms, vec!["dog's", "bone!"]);
    }
}
