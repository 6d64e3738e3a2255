use super::reference_token::ReferenceToken;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lower-cases `token` and drops every non-word character.
///
/// Pure punctuation normalizes to an empty string, which is a valid result.
pub fn normalize(token: &str) -> String {
    token
        .chars()
        .filter(|c| is_word_char(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Splits `text` on whitespace into reference tokens, preserving order and
/// the original spelling of each token.
pub fn tokenize(text: &str) -> Vec<ReferenceToken> {
    text.split_whitespace()
        .enumerate()
        .map(|(index, raw)| ReferenceToken::new(raw, normalize(raw), index))
        .collect()
}

/// Normalized, non-empty words of `text`, in order.
pub fn extract_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(normalize)
        .filter(|w| !w.is_empty())
        .collect()
}
