//! Text normalization shared by catalog indexing and query handling.
//!
//! Catalog keys and user input are reduced to one comparison form:
//!
//! 1. NFKD decomposition, combining marks dropped (`Café` → `cafe`, niqqud removed)
//! 2. Unicode lowercase
//! 3. Quote characters removed (`baker's` → `bakers`)
//! 4. Dashes, slashes, underscores, pipes and `+` become word separators
//! 5. Any other punctuation or symbol is removed (`(E120)` → `e120`)
//! 6. Whitespace collapsed to single spaces and trimmed
//!
//! The function is total and idempotent.

use unicode_categories::UnicodeCategories;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

const QUOTES: &[char] = &[
    '"', '\'', '`', '\u{00B4}', '\u{2018}', '\u{2019}', '\u{201A}', '\u{201B}', '\u{201C}',
    '\u{201D}', '\u{201E}', '\u{201F}', '\u{2039}', '\u{203A}', '\u{00AB}', '\u{00BB}',
    '\u{05F3}', '\u{05F4}',
];

const SEPARATORS: &[char] = &['-', '_', '/', '\\', '|', '+'];

/// Normalize text into its comparison form
#[must_use]
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        // Lowercasing can expand one character into several (and can emit marks, e.g. 'İ')
        for lower in ch.to_lowercase() {
            if !is_combining_mark(lower) {
                push_normalized(lower, &mut out, &mut pending_space);
            }
        }
    }

    out
}

/// Number of characters in the normalized form of `text`
#[must_use]
pub fn normalized_len(text: &str) -> usize {
    normalize(text).chars().count()
}

fn push_normalized(ch: char, out: &mut String, pending_space: &mut bool) {
    if QUOTES.contains(&ch) {
        return;
    }

    if ch.is_whitespace() || SEPARATORS.contains(&ch) || ch.is_punctuation_dash() {
        // Leading separators never produce a space
        *pending_space = !out.is_empty();
        return;
    }

    if ch.is_punctuation() || ch.is_symbol() || ch.is_control() {
        return;
    }

    if *pending_space {
        out.push(' ');
        *pending_space = false;
    }
    out.push(ch);
}

/// Word index at which `phrase` starts inside `text`, if it does.
///
/// Both arguments must already be normalized.
#[must_use]
pub fn word_offset(text: &str, phrase: &str) -> Option<usize> {
    if phrase.is_empty() {
        return None;
    }
    let words: Vec<&str> = text.split(' ').collect();
    let needle: Vec<&str> = phrase.split(' ').collect();
    if needle.len() > words.len() {
        return None;
    }
    words.windows(needle.len()).position(|w| w == needle.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_and_trim() {
        assert_eq!(normalize("  Carmine  "), "carmine");
    }

    #[test]
    fn test_diacritics_removed() {
        assert_eq!(normalize("Café"), normalize("cafe"));
        assert_eq!(normalize("CRÈME brûlée"), "creme brulee");
    }

    #[test]
    fn test_hebrew_niqqud_removed() {
        // "לָנוֹלִין" with vowel points
        assert_eq!(normalize("לָנוֹלִין"), "לנולין");
    }

    #[test]
    fn test_punctuation_removed() {
        assert_eq!(normalize("(E120)"), "e120");
        assert_eq!(normalize("Vitamin D3!?"), "vitamin d3");
        assert_eq!(normalize("e.120"), "e120");
    }

    #[test]
    fn test_quotes_removed() {
        assert_eq!(normalize("baker's yeast"), "bakers yeast");
        assert_eq!(normalize("“vegetable” glycerin"), "vegetable glycerin");
        assert_eq!(normalize("צה\"ל"), "צהל");
    }

    #[test]
    fn test_separators_become_spaces() {
        assert_eq!(normalize("Squalene / Squalane"), "squalene squalane");
        assert_eq!(normalize("plant-derived"), "plant derived");
        assert_eq!(normalize("shea_butter"), "shea butter");
        assert_eq!(normalize("omega–3"), "omega 3");
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(normalize("bees\t\n  wax"), "bees wax");
        assert_eq!(normalize(" - leading"), "leading");
        assert_eq!(normalize("trailing - "), "trailing");
    }

    #[test]
    fn test_full_width_folded() {
        assert_eq!(normalize("ＣＡＲＭＩＮＥ"), "carmine");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("?!."), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "Café",
            "Squalene / Squalane",
            "  (E120) Carmine, cochineal ",
            "İstanbul",
            "ＣＡＲＭＩＮＥ",
            "baker's — yeast",
            "לָנוֹלִין",
            "ﬁne ½ ™",
            "",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn test_normalized_len() {
        assert_eq!(normalized_len("a"), 1);
        assert_eq!(normalized_len(" A. "), 1);
        assert_eq!(normalized_len("é"), 1);
        assert_eq!(normalized_len("(E-120)"), 5);
    }

    #[test]
    fn test_word_offset() {
        assert_eq!(word_offset("hydrolyzed carmine extract", "carmine"), Some(1));
        assert_eq!(word_offset("carmine extract", "carmine extract"), Some(0));
        assert_eq!(word_offset("carmines", "carmine"), None);
        assert_eq!(word_offset("beeswax", "wax"), None);
        assert_eq!(word_offset("wax", ""), None);
    }
}
