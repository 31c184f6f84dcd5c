use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    static ref TOKEN_RE: Regex = Regex::new(r"[A-Za-z0-9]+").expect("valid regex");
}

/// Extracts a case-sensitive term frequency table from document content.
///
/// Tokens are maximal alphanumeric runs. A token terminated by an apostrophe
/// loses a trailing `s` (rough possessive stripping; an `'s` suffix spanning
/// two delimiters is not handled further). Tokens of length 2 or less are
/// dropped silently, including the trailing token at end of input.
pub fn extract_word_frequencies(text: &str) -> HashMap<String, u64> {
    let mut frequencies: HashMap<String, u64> = HashMap::new();

    for token_match in TOKEN_RE.find_iter(text) {
        let mut token = token_match.as_str();
        if token.ends_with('s') && text[token_match.end()..].starts_with('\'') {
            token = &token[..token.len() - 1];
        }
        if token.len() > 2 {
            *frequencies.entry(token.to_string()).or_insert(0) += 1;
        }
    }

    frequencies
}
