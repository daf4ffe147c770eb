use crate::fetch::{EndpointConfig, FetchError, HttpFetcher, PageFetcher};
use zipaddr_extract::PageFormat;
use zipaddr_model::{AddressLookup, AddressRecord, LookupSource, PostalCode};

/// Resolves postal codes into addresses through one lookup endpoint.
///
/// Chains fetch → extract → shape. Stateless: every call performs one
/// fetch, and identical page text yields identical results.
pub struct AddressConverter<F> {
    fetcher: F,
    config: EndpointConfig,
}

impl AddressConverter<HttpFetcher> {
    /// Converter over a real HTTP client for the given endpoint.
    pub fn over_http(config: EndpointConfig) -> Result<Self, FetchError> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self { fetcher, config })
    }
}

impl<F: PageFetcher> AddressConverter<F> {
    pub fn with_fetcher(fetcher: F, config: EndpointConfig) -> Self {
        Self { fetcher, config }
    }

    /// Fetch and extract, keeping provenance. The JSON output shape.
    pub async fn lookup(&self, code: &PostalCode) -> Result<AddressLookup, FetchError> {
        let url = self.config.lookup_url(code);
        tracing::info!(url = %url, code = %code, "Fetching lookup page");

        let page = self.fetcher.fetch(&url).await?;
        tracing::debug!(chars = page.len(), "Received page text");

        let records = self.config.format.extract(&page, code);
        tracing::info!(records = records.len(), code = %code, "Extracted address records");

        Ok(AddressLookup {
            source: LookupSource {
                postal_code: code.clone(),
                url,
                fetched_at: chrono::Utc::now().to_rfc3339(),
            },
            records,
        })
    }

    /// Every record the page lists for this code, in document order.
    /// Empty means no data published for the code, not a failure.
    pub async fn address_records(
        &self,
        code: &PostalCode,
    ) -> Result<Vec<AddressRecord>, FetchError> {
        Ok(self.lookup(code).await?.records)
    }

    /// Concatenated `[prefecture][city][area]` of the first record,
    /// `None` when nothing matched.
    pub async fn convert_address(&self, code: &PostalCode) -> Result<Option<String>, FetchError> {
        let records = self.address_records(code).await?;
        Ok(records.first().map(AddressRecord::full))
    }

    /// The same concatenation for every record, in document order.
    pub async fn convert_addresses(&self, code: &PostalCode) -> Result<Vec<String>, FetchError> {
        let records = self.address_records(code).await?;
        Ok(records.iter().map(AddressRecord::full).collect())
    }

    /// The first record split into its display fields, `None` when nothing
    /// matched.
    ///
    /// The grouping follows the page format: the result table keeps
    /// prefecture and city separate, the legacy line prints them as one
    /// field.
    pub async fn convert_split_address(
        &self,
        code: &PostalCode,
    ) -> Result<Option<Vec<String>>, FetchError> {
        let records = self.address_records(code).await?;
        let Some(record) = records.first() else {
            return Ok(None);
        };

        let parts = match self.config.format {
            PageFormat::MultiResult => record.parts(),
            PageFormat::SingleResult => {
                let mut parts = vec![record.prefecture_city()];
                if let Some(area) = &record.area {
                    parts.push(area.clone());
                }
                parts
            }
        };
        Ok(Some(parts))
    }
}
