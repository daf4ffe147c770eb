// Extraction for the current lookup page: a result table with one row per
// candidate area. Each row prints the hyphenated postal code, a prefecture
// cell, a city cell, and the area as the text of a detail link.

use regex::Regex;
use zipaddr_model::{AddressRecord, PostalCode};

use crate::normalize;
use crate::Extractor;

pub struct MultiResult;

impl Extractor for MultiResult {
    fn extract(&self, page: &str, code: &PostalCode) -> Vec<AddressRecord> {
        let re = Regex::new(&row_pattern(code)).expect("valid row pattern");

        let mut records = Vec::new();
        for caps in re.captures_iter(page) {
            let prefecture = normalize::normalize_field(&caps[1]);
            let city = normalize::normalize_field(&caps[2]);
            if prefecture.is_empty() || city.is_empty() {
                tracing::debug!("Skipping row with empty prefecture or city");
                continue;
            }
            records.push(AddressRecord {
                prefecture,
                city,
                area: normalize::clean_area(&caps[6]),
            });
        }

        tracing::debug!(code = %code, rows = records.len(), "Matched result rows");
        records
    }
}

/// Build the result-row pattern for one postal code.
///
/// The hyphenated code anchors the row, disambiguating it when the page
/// also lists neighbouring codes. Gaps between structural markers are
/// `\s*` so line breaks and indentation inside the markup match. The
/// numeric captures are the detail-link query parameters; only the link
/// text (the area) is consumed.
fn row_pattern(code: &PostalCode) -> String {
    format!(
        concat!(
            r#"<small>{code}</small></td>\s*"#,
            r#"<td class="data"><small>(.+)</small></td>\s*"#,
            r#"<td class="data"><small>(.+)</small></td>\s*"#,
            r#"<td>\s*<div class="data">\s*"#,
            r#"<p><small><a class="line" href="zipcode\.php\?pref=([0-9]+)&city=([0-9]+)&id=([0-9]+)&merge=">(.+)</a></small></p>"#,
        ),
        code = regex::escape(&code.hyphenated()),
    )
}
