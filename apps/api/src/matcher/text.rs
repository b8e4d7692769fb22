use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum token length kept by the tokenizer. Tokens of 2 characters or
/// fewer carry too little signal for the vector space.
const MIN_TOKEN_CHARS: usize = 3;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));

/// Tokenizes free text for the vector space model: lowercase, strip
/// punctuation, split on whitespace runs, drop tokens shorter than 3
/// characters. The same rule is applied when fitting the vocabulary and
/// when transforming a document, so both sides of a comparison live in the
/// same space.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let stripped = NON_WORD.replace_all(&lowered, "");
    stripped
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .map(String::from)
        .collect()
}

/// Returns the first `max_chars` characters of `text`, appending an ellipsis
/// marker when the text was truncated. Operates on characters, not bytes, so
/// multi-byte input never splits mid-codepoint.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let mut out = String::new();
    for (seen, ch) in text.chars().enumerate() {
        if seen == max_chars {
            out.push_str("...");
            return out;
        }
        out.push(ch);
    }
    out
}
