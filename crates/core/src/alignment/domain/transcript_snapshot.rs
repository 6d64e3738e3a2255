use crate::text::domain::normalizer::extract_words;

/// The cumulative transcript known so far, as normalized words.
///
/// Each recognizer update replaces the previous snapshot wholesale.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TranscriptSnapshot {
    words: Vec<String>,
    is_final: bool,
}

impl TranscriptSnapshot {
    pub fn new(words: Vec<String>, is_final: bool) -> Self {
        Self { words, is_final }
    }

    pub fn from_text(text: &str, is_final: bool) -> Self {
        Self::new(extract_words(text), is_final)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }
}
