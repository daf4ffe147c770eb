// Extraction for the legacy lookup page: one free-text address line inside
// the result block, prefecture+city and area separated by a double space.
//
//   <div class="address">神奈川県藤沢市  鵠沼石上</div>

use regex::Regex;
use zipaddr_model::{AddressRecord, PostalCode};

use crate::normalize;
use crate::Extractor;

/// Field delimiter inside the address line.
const FIELD_DELIMITER: &str = "  ";

pub struct SingleResult;

impl Extractor for SingleResult {
    fn extract(&self, page: &str, code: &PostalCode) -> Vec<AddressRecord> {
        let re = Regex::new(r#"(?s)<div class="address">\s*(.*?)\s*</div>"#)
            .expect("valid marker pattern");

        let Some(caps) = re.captures(page) else {
            tracing::debug!(code = %code, "No address marker on page");
            return Vec::new();
        };

        match parse_line(&caps[1]) {
            Some(record) => vec![record],
            None => Vec::new(),
        }
    }
}

/// Parse the address line into a record.
///
/// A code with no area renders the no-finer-listing placeholder after the
/// city; it is stripped before the split so such a line yields a record
/// with `area: None`.
fn parse_line(line: &str) -> Option<AddressRecord> {
    let line = line.trim();
    let line = match line.strip_suffix(normalize::NO_FINER_LISTING) {
        Some(rest) => rest.trim_end(),
        None => line,
    };

    let (prefecture_city, area) = match line.split_once(FIELD_DELIMITER) {
        Some((head, tail)) => (head.trim(), Some(tail)),
        None => (line, None),
    };

    let (prefecture, city) = split_prefecture(prefecture_city)?;
    Some(AddressRecord {
        prefecture,
        city,
        area: area.and_then(normalize::clean_area),
    })
}

/// Split "神奈川県藤沢市" into prefecture and city.
///
/// Prefecture names end in 都/道/府/県; the explicit alternatives keep the
/// 都 of 京都 from terminating the match early. A blob with no suffix, or
/// nothing after it, yields no record at all.
fn split_prefecture(text: &str) -> Option<(String, String)> {
    let re = Regex::new(r"^(東京都|北海道|大阪府|京都府|.{2,3}県)(.+)$").expect("valid pattern");
    let caps = re.captures(text)?;
    Some((
        normalize::normalize_field(&caps[1]),
        normalize::normalize_field(&caps[2]),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(line: &str) -> String {
        format!(
            r#"<html><body>
            <div class="result">
            <div class="address">{line}</div>
            </div>
            </body></html>"#,
        )
    }

    #[test]
    fn test_single_record() {
        let page = page("神奈川県藤沢市  鵠沼石上");
        let records = SingleResult.extract(&page, &PostalCode::new("2510025"));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].prefecture, "神奈川県");
        assert_eq!(records[0].city, "藤沢市");
        assert_eq!(records[0].area.as_deref(), Some("鵠沼石上"));
    }

    #[test]
    fn test_placeholder_line_has_no_area() {
        let page = page("神奈川県藤沢市  以下に掲載がない場合");
        let records = SingleResult.extract(&page, &PostalCode::new("2510000"));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].prefecture, "神奈川県");
        assert_eq!(records[0].city, "藤沢市");
        assert_eq!(records[0].area, None);
    }

    #[test]
    fn test_placeholder_without_delimiter() {
        let page = page("神奈川県藤沢市以下に掲載がない場合");
        let records = SingleResult.extract(&page, &PostalCode::new("2510000"));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].city, "藤沢市");
        assert_eq!(records[0].area, None);
    }

    #[test]
    fn test_tokyo_line() {
        let page = page("東京都千代田区  丸の内");
        let records = SingleResult.extract(&page, &PostalCode::new("1000005"));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].prefecture, "東京都");
        assert_eq!(records[0].city, "千代田区");
        assert_eq!(records[0].area.as_deref(), Some("丸の内"));
    }

    #[test]
    fn test_marker_tolerates_line_breaks() {
        let page = "<div class=\"address\">\n    神奈川県藤沢市  鵠沼石上\n</div>";
        let records = SingleResult.extract(page, &PostalCode::new("2510025"));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].area.as_deref(), Some("鵠沼石上"));
    }

    #[test]
    fn test_no_marker_is_empty() {
        let records = SingleResult.extract(
            "<html><body>該当する郵便番号はありません</body></html>",
            &PostalCode::new("0000000"),
        );
        assert!(records.is_empty());
    }

    #[test]
    fn test_split_prefecture() {
        assert_eq!(
            split_prefecture("神奈川県藤沢市"),
            Some(("神奈川県".to_string(), "藤沢市".to_string()))
        );
        assert_eq!(
            split_prefecture("東京都千代田区"),
            Some(("東京都".to_string(), "千代田区".to_string()))
        );
        // 京都府 must not be cut at the 都 of 京都
        assert_eq!(
            split_prefecture("京都府京都市上京区"),
            Some(("京都府".to_string(), "京都市上京区".to_string()))
        );
        assert_eq!(
            split_prefecture("北海道札幌市中央区"),
            Some(("北海道".to_string(), "札幌市中央区".to_string()))
        );
        // No suffix, or nothing after it
        assert_eq!(split_prefecture("藤沢市"), None);
        assert_eq!(split_prefecture("神奈川県"), None);
    }

    #[test]
    fn test_unparseable_line_yields_nothing() {
        let page = page("detached scrap of text");
        let records = SingleResult.extract(&page, &PostalCode::new("2510025"));
        assert!(records.is_empty());
    }
}
