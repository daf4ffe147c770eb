pub mod convert;
pub mod fetch;

pub use convert::AddressConverter;
pub use fetch::{EndpointConfig, FetchError, HttpFetcher, PageFetcher, TextEncoding};
