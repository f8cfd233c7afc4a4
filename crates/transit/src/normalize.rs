//! Text normalization for diacritic-insensitive matching.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Case-fold and strip diacritics from a string.
///
/// Lower-cases the input, decomposes it (NFD), and drops combining marks,
/// so `"Università"` and `"UNIVERSITA"` normalize to the same form. Applied
/// identically to catalog names and incoming queries. Idempotent.
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_and_diacritic_insensitive() {
        assert_eq!(normalize("Àlba"), normalize("alba"));
        assert_eq!(normalize("Àlba"), normalize("ALBA"));
        assert_eq!(normalize("Stazione Università"), "stazione universita");
    }

    #[test]
    fn test_idempotent() {
        for s in ["Piazza Duomo", "Çà et là", "ŒUF", "no accents"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_plain_ascii_passes_through() {
        assert_eq!(normalize("via roma 12"), "via roma 12");
    }
}
