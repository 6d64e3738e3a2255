use crate::text::domain::normalizer::normalize;

const CODE_LEN: usize = 4;

fn digit(c: char) -> Option<char> {
    match c {
        'b' | 'f' | 'p' | 'v' => Some('1'),
        'c' | 'g' | 'j' | 'k' | 'q' | 's' | 'x' | 'z' => Some('2'),
        'd' | 't' => Some('3'),
        'l' => Some('4'),
        'm' | 'n' => Some('5'),
        'r' => Some('6'),
        _ => None,
    }
}

/// Soundex code of `word`: the leading letter followed by three digits.
///
/// The input is normalized first; an empty normalization yields an empty
/// code. Adjacent letters sharing a digit class collapse to one digit, and the
/// leading letter's own class takes part, so "Pfister" encodes as `P236`.
/// Letters without a digit class separate runs.
pub fn soundex(word: &str) -> String {
    let normalized = normalize(word);
    let mut chars = normalized.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut code: String = first.to_uppercase().collect();
    let mut prev = digit(first);
    for c in chars {
        let d = digit(c);
        if let Some(d) = d.filter(|d| prev != Some(*d)) {
            code.push(d);
            if code.chars().count() == CODE_LEN {
                return code;
            }
        }
        prev = d;
    }

    while code.chars().count() < CODE_LEN {
        code.push('0');
    }
    code
}
