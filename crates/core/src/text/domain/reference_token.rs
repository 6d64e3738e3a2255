use serde::Serialize;

/// One whitespace-delimited token of the reference passage.
///
/// `display_text` keeps the original spelling and punctuation for highlighting;
/// `normalized_text` is what the matcher compares against.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceToken {
    pub display_text: String,
    pub normalized_text: String,
    pub is_matchable: bool,
    pub reference_index: usize,
}

impl ReferenceToken {
    pub fn new(display_text: &str, normalized_text: String, reference_index: usize) -> Self {
        Self {
            display_text: display_text.to_string(),
            is_matchable: display_text.chars().any(char::is_alphanumeric),
            normalized_text,
            reference_index,
        }
    }
}
