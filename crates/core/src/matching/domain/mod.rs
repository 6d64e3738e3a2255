pub mod levenshtein;
pub mod soundex;
pub mod word_matcher;
