use unicode_normalization::UnicodeNormalization;

/// Placeholder the service prints where an area name would go when no
/// finer-grained data exists below city level for a code.
pub const NO_FINER_LISTING: &str = "以下に掲載がない場合";

/// Marker opening a building-exclusion clause appended to an area name,
/// e.g. "丸の内（次のビルを除く）".
pub const BUILDING_EXCLUSION: &str = "（次のビルを除く";

/// Normalize one field pulled out of HTML: NFC form, trimmed, inner
/// whitespace runs (including line breaks from wrapped markup) collapsed
/// to single spaces.
pub fn normalize_field(input: &str) -> String {
    let nfc: String = input.nfc().collect();
    nfc.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Clean one raw area string from a result page.
///
/// `None` means the service publishes nothing below city level:
/// either the placeholder row, or nothing left after cleanup.
/// A building-exclusion clause is dropped, keeping the area name before it.
pub fn clean_area(raw: &str) -> Option<String> {
    let area = normalize_field(raw);
    if area.contains(NO_FINER_LISTING) {
        return None;
    }
    if let Some(index) = area.find(BUILDING_EXCLUSION) {
        let kept = area[..index].trim_end().to_string();
        return if kept.is_empty() { None } else { Some(kept) };
    }
    if area.is_empty() {
        None
    } else {
        Some(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_field() {
        assert_eq!(normalize_field("  鵠沼石上  "), "鵠沼石上");
        assert_eq!(normalize_field("丸の\n        内"), "丸の 内");
        // e + combining acute accent -> é (precomposed)
        assert_eq!(normalize_field("e\u{0301}"), "é");
    }

    #[test]
    fn test_placeholder_clears_area() {
        assert_eq!(clean_area("以下に掲載がない場合"), None);
        assert_eq!(clean_area("  以下に掲載がない場合  "), None);
    }

    #[test]
    fn test_building_exclusion_truncates() {
        assert_eq!(
            clean_area("丸の内（次のビルを除く）"),
            Some("丸の内".to_string())
        );
        // Clause with nothing before it leaves no area
        assert_eq!(clean_area("（次のビルを除く）"), None);
    }

    #[test]
    fn test_plain_area_kept() {
        assert_eq!(clean_area("鵠沼石上"), Some("鵠沼石上".to_string()));
        assert_eq!(clean_area(""), None);
        assert_eq!(clean_area("   "), None);
    }
}
