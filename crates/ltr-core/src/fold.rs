//! Accent and case folding.

use std::ops::RangeInclusive;

use unicode_normalization::UnicodeNormalization;

/// The Combining Diacritical Marks block.
const COMBINING_DIACRITICS: RangeInclusive<char> = '\u{0300}'..='\u{036F}';

/// Strip diacritics: canonical decomposition, then drop combining
/// diacritical marks. The result is left decomposed.
pub fn fold_accents(unit: &str) -> String {
    unit.nfd()
        .filter(|c| !COMBINING_DIACRITICS.contains(c))
        .collect()
}

/// Lowercase with the Unicode default (locale-insensitive) mapping.
pub fn fold_case(unit: &str) -> String {
    unit.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accents_then_case() {
        assert_eq!(fold_case(&fold_accents("Café")), "cafe");
    }

    #[test]
    fn precomposed_and_decomposed_fold_alike() {
        assert_eq!(fold_accents("\u{e9}"), "e");
        assert_eq!(fold_accents("e\u{301}"), "e");
    }

    #[test]
    fn marks_outside_the_block_survive() {
        // U+20D7 COMBINING RIGHT ARROW ABOVE lives in a different block.
        assert_eq!(fold_accents("v\u{20d7}"), "v\u{20d7}");
    }

    #[test]
    fn no_recomposition() {
        // Hangul syllables decompose into jamo and stay that way.
        assert_eq!(fold_accents("\u{d55c}").chars().count(), 3);
    }

    #[test]
    fn plain_ascii_is_untouched() {
        assert_eq!(fold_accents("plain"), "plain");
        assert_eq!(fold_case("plain"), "plain");
    }

    #[test]
    fn case_folding_is_unicode_aware() {
        assert_eq!(fold_case("ÉCOLE"), "école");
        assert_eq!(fold_case("ΣΟΦΙΑ"), "σοφια");
    }
}
