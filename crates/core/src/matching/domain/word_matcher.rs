use serde::{Deserialize, Serialize};

use super::levenshtein::levenshtein;
use super::soundex::soundex;
use crate::shared::constants::DEFAULT_MAX_EDIT_DISTANCE;
use crate::text::domain::normalizer::normalize;

/// Tolerance used to decide whether a spoken word is the expected word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchPolicy {
    /// Largest Levenshtein distance still accepted as the same word.
    pub max_edit_distance: usize,
    /// Accept words whose Soundex codes are equal.
    pub phonetic: bool,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            max_edit_distance: DEFAULT_MAX_EDIT_DISTANCE,
            phonetic: true,
        }
    }
}

impl MatchPolicy {
    pub fn matches(&self, spoken: &str, expected: &str) -> bool {
        let spoken = normalize(spoken);
        let expected = normalize(expected);
        if spoken.is_empty() || expected.is_empty() {
            return false;
        }
        if self.phonetic && soundex(&spoken) == soundex(&expected) {
            return true;
        }
        levenshtein(&spoken, &expected) <= self.max_edit_distance
    }
}

/// Whether `spoken` denotes `expected` under the default policy: equal
/// Soundex codes, or an edit distance of at most one.
pub fn is_match(spoken: &str, expected: &str) -> bool {
    MatchPolicy::default().matches(spoken, expected)
}
