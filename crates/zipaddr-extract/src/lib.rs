pub mod multi_result;
pub mod normalize;
pub mod single_result;

use zipaddr_model::{AddressRecord, PostalCode};

/// One extraction strategy over a fetched lookup page.
///
/// Implementations are pure: page text and the queried code in, records out
/// in document order. No match is an empty vec, never an error; the code
/// may simply be unassigned.
pub trait Extractor {
    fn extract(&self, page: &str, code: &PostalCode) -> Vec<AddressRecord>;
}

/// The two page formats the lookup service serves, selectable by
/// configuration. Each maps to one `Extractor` implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFormat {
    /// Result table listing one row per candidate area (current page).
    MultiResult,
    /// One free-text address line between fixed markers (legacy page).
    SingleResult,
}

impl PageFormat {
    pub fn extract(&self, page: &str, code: &PostalCode) -> Vec<AddressRecord> {
        match self {
            PageFormat::MultiResult => multi_result::MultiResult.extract(page, code),
            PageFormat::SingleResult => single_result::SingleResult.extract(page, code),
        }
    }
}
