/// Single-character insert/delete/substitute edit distance over `char`s.
///
/// `strsim` keeps one row sized to its second argument, so the shorter word
/// goes second.
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a.chars().count() >= b.chars().count() {
        strsim::levenshtein(a, b)
    } else {
        strsim::levenshtein(b, a)
    }
}
