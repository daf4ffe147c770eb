use serde::{Deserialize, Serialize};
use std::fmt;

/// A 7-digit Japanese postal code as queried, digits only (e.g., "2510025").
///
/// No validation is performed here: a malformed code simply fails to match
/// anything on the lookup page and yields an empty result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostalCode(String);

impl PostalCode {
    pub fn new(digits: impl Into<String>) -> Self {
        Self(digits.into())
    }

    /// The digits as queried, no hyphen.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Conventional `NNN-NNNN` rendering, split 3+4. This is the form the
    /// multi-result page prints inside each result row. Input that cannot be
    /// split (too short, or a multi-byte char straddling the split point)
    /// falls back to the raw string, which then matches nothing.
    pub fn hyphenated(&self) -> String {
        if self.0.len() > 3 && self.0.is_char_boundary(3) {
            format!("{}-{}", &self.0[..3], &self.0[3..])
        } else {
            self.0.clone()
        }
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PostalCode {
    fn from(digits: &str) -> Self {
        Self::new(digits)
    }
}

/// One address extracted from a lookup result page.
///
/// The three-level Japanese administrative granularity, coarsest first.
/// `prefecture` and `city` are always present together; `area` is `None`
/// when the service publishes nothing below city level for this code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    pub prefecture: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
}

impl AddressRecord {
    /// Concatenated `[prefecture][city][area]`, area omitted when absent.
    pub fn full(&self) -> String {
        let mut out = String::with_capacity(
            self.prefecture.len() + self.city.len() + self.area.as_deref().map_or(0, str::len),
        );
        out.push_str(&self.prefecture);
        out.push_str(&self.city);
        if let Some(area) = &self.area {
            out.push_str(area);
        }
        out
    }

    /// `[prefecture][city]` joined, the way the single-result page prints them.
    pub fn prefecture_city(&self) -> String {
        format!("{}{}", self.prefecture, self.city)
    }

    /// The record's fields in order: `[prefecture, city]` or
    /// `[prefecture, city, area]`.
    pub fn parts(&self) -> Vec<String> {
        let mut parts = vec![self.prefecture.clone(), self.city.clone()];
        if let Some(area) = &self.area {
            parts.push(area.clone());
        }
        parts
    }
}

impl fmt::Display for AddressRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full())
    }
}

/// A lookup result with provenance, the shape emitted as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressLookup {
    pub source: LookupSource,
    pub records: Vec<AddressRecord>,
}

/// Where one lookup result came from and when.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupSource {
    pub postal_code: PostalCode,
    pub url: String,
    pub fetched_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> AddressRecord {
        AddressRecord {
            prefecture: "神奈川県".to_string(),
            city: "藤沢市".to_string(),
            area: Some("鵠沼石上".to_string()),
        }
    }

    #[test]
    fn test_hyphenated() {
        assert_eq!(PostalCode::new("2510025").hyphenated(), "251-0025");
        // Too short to split, falls back to the raw string
        assert_eq!(PostalCode::new("251").hyphenated(), "251");
        assert_eq!(PostalCode::new("").hyphenated(), "");
        // Non-ASCII input never panics on the split point
        assert_eq!(PostalCode::new("二五一〇〇二五").hyphenated(), "二五一〇〇二五");
    }

    #[test]
    fn test_full_concatenation() {
        let record = sample_record();
        assert_eq!(record.full(), "神奈川県藤沢市鵠沼石上");
        assert_eq!(record.to_string(), "神奈川県藤沢市鵠沼石上");

        let no_area = AddressRecord { area: None, ..record };
        assert_eq!(no_area.full(), "神奈川県藤沢市");
    }

    #[test]
    fn test_parts() {
        let record = sample_record();
        assert_eq!(record.parts(), vec!["神奈川県", "藤沢市", "鵠沼石上"]);

        let no_area = AddressRecord { area: None, ..record };
        assert_eq!(no_area.parts(), vec!["神奈川県", "藤沢市"]);
    }

    #[test]
    fn test_json_roundtrip() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        let parsed: AddressRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);

        // Absent area is omitted from the JSON entirely
        let no_area = AddressRecord { area: None, ..record };
        let json = serde_json::to_string(&no_area).unwrap();
        assert!(!json.contains("area"));
    }
}
