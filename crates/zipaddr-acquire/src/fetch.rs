use async_trait::async_trait;
use reqwest::header;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;
use zipaddr_extract::PageFormat;
use zipaddr_model::PostalCode;

/// How a lookup endpoint's response bytes are decoded. A fixed property of
/// the endpoint variant, not auto-detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    ShiftJis,
}

impl TextEncoding {
    /// Charset label handed to the HTTP client as the decode fallback.
    pub fn charset(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::ShiftJis => "shift_jis",
        }
    }
}

/// Everything fixed about one lookup endpoint: where it lives, which page
/// format it serves, how its responses decode, and the headers it is sent.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    pub base_url: String,
    pub format: PageFormat,
    pub encoding: TextEncoding,
    pub user_agent: String,
    pub accept_language: String,
    /// `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

impl EndpointConfig {
    /// The current lookup page: UTF-8, one result-table row per candidate area.
    pub fn multi_result() -> Self {
        Self {
            base_url: "https://www.post.japanpost.jp/cgi-zip/zipcode.php".to_string(),
            format: PageFormat::MultiResult,
            encoding: TextEncoding::Utf8,
            user_agent: "zipaddr/0.1 (postal address lookup)".to_string(),
            accept_language: "ja,en-US;q=0.9,en;q=0.8".to_string(),
            timeout: None,
        }
    }

    /// The legacy lookup page: Shift_JIS, one free-text address line.
    pub fn single_result() -> Self {
        Self {
            base_url: "https://www.post.japanpost.jp/smt-zip/zipcode.php".to_string(),
            format: PageFormat::SingleResult,
            encoding: TextEncoding::ShiftJis,
            ..Self::multi_result()
        }
    }

    /// The lookup URL for one code, embedded as the `zip` query parameter.
    pub fn lookup_url(&self, code: &PostalCode) -> String {
        format!("{}?zip={}", self.base_url, code.as_str())
    }
}

/// A failed page fetch. Always fatal to the lookup; never retried here.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure, timeout, or undecodable body.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status { status: StatusCode, url: String },
}

/// The capability to fetch one page of text.
///
/// Injected into the converter so tests hand it canned page text instead of
/// touching the network.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Fetch over HTTP with the endpoint's fixed headers and encoding.
///
/// The client's compression support supplies the Accept-Encoding hint and
/// the matching decompression. The legacy endpoint additionally announces
/// its charset.
pub struct HttpFetcher {
    client: reqwest::Client,
    encoding: TextEncoding,
    accept_language: String,
}

impl HttpFetcher {
    pub fn new(config: &EndpointConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            encoding: config.encoding,
            accept_language: config.accept_language.clone(),
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let mut request = self
            .client
            .get(url)
            .header(header::ACCEPT_LANGUAGE, self.accept_language.as_str());
        if self.encoding == TextEncoding::ShiftJis {
            request = request.header("Accept-Charset", self.encoding.charset());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: url.to_string(),
            });
        }

        // A charset named by the response Content-Type wins; the endpoint's
        // encoding covers legacy pages that omit it.
        let text = response.text_with_charset(self.encoding.charset()).await?;
        tracing::debug!(url = %url, chars = text.len(), "Decoded response body");
        Ok(text)
    }
}
