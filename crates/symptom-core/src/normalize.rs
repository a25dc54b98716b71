/// Text normalization for symptom queries.
///
/// Lowercases the text, removes every character that is neither a word character nor
/// whitespace, and splits on whitespace. Punctuation is deleted rather than replaced, so
/// "fever,chills" becomes the single token "feverchills" while "fever, chills" yields two.
use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));

/// Convert free text into its set of comparable tokens.
///
/// Empty, whitespace-only or punctuation-only input yields an empty set.
pub fn normalize(text: &str) -> HashSet<String> {
    let lowered = text.to_lowercase();
    let stripped = NON_WORD_RE.replace_all(&lowered, "");
    stripped
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// True when `text` holds a character that normalization would strip.
pub(crate) fn has_non_word(text: &str) -> bool {
    NON_WORD_RE.is_match(text)
}

/// Split a curated keyword into its comparison tokens.
///
/// Keywords are lowercased only; the knowledge base guarantees they carry no punctuation.
pub(crate) fn keyword_tokens(keyword: &str) -> Vec<String> {
    keyword
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
