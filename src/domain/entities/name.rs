//! Holder name normalization.
//!
//! Certificates coming from different issuers spell the same holder in
//! different ways (`"Dr. Müller-Lüdenscheidt"` vs `"MUELLER<LUEDENSCHEIDT"`).
//! [`normalize`] reduces a raw holder name to the ordered tokens that identity
//! comparison works on.

/// Separator used by machine readable zones; every other separator is folded into it.
const SEPARATOR: char = '<';

/// Tokens that never take part in identity comparison.
const FILTERED_TOKENS: &[&str] = &["DR"];

const TRANSLITERATIONS: &[(&str, &str)] = &[("Ä", "AE"), ("Ö", "OE"), ("Ü", "UE"), ("ß", "SS")];

/// Normalizes a raw holder name into canonical, comparable tokens.
///
/// Order and duplicates are preserved. Never fails; an input without any
/// usable characters yields an empty vector.
pub fn normalize(raw: &str) -> Vec<String> {
    let upper = raw.to_uppercase();
    let trimmed = upper.trim().trim_start_matches(SEPARATOR);

    let mut folded: String = trimmed
        .chars()
        .map(|c| match c {
            ' ' | '.' | '-' => SEPARATOR,
            other => other,
        })
        .collect();

    for (from, to) in TRANSLITERATIONS {
        folded = folded.replace(from, to);
    }

    collapse_separators(&folded)
        .split(SEPARATOR)
        .filter(|token| !FILTERED_TOKENS.contains(token))
        .filter(|token| !token.trim().is_empty())
        .map(str::to_string)
        .collect()
}

fn collapse_separators(value: &str) -> String {
    let mut collapsed = String::with_capacity(value.len());
    let mut previous_was_separator = false;
    for c in value.chars() {
        let is_separator = c == SEPARATOR;
        if !(is_separator && previous_was_separator) {
            collapsed.push(c);
        }
        previous_was_separator = is_separator;
    }
    collapsed
}
