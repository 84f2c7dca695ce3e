//! Word tokenization for description text.

/// Split `text` into whitespace-delimited words, order preserved.
///
/// Tokens are compared byte-for-byte downstream, so no case folding or
/// punctuation stripping happens here. Blank input yields no words.
pub fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}
