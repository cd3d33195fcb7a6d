//! Remote Data Loader Module
//! Fetches CSV and JSON sources over HTTP (or from a local path) and decodes them.

use polars::prelude::*;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::io::Cursor;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error fetching {url}: {message}")]
    Network { url: String, message: String },
    #[error("Format error decoding {url}: {message}")]
    Format { url: String, message: String },
}

impl FetchError {
    fn network(url: &str, err: impl std::fmt::Display) -> Self {
        Self::Network {
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    fn format(url: &str, err: impl std::fmt::Display) -> Self {
        Self::Format {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

/// True for `http://` and `https://` sources; anything else is read from disk.
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Fetches raw source bytes with a blocking HTTP client. No retries.
pub struct DataLoader {
    client: Client,
}

impl DataLoader {
    /// Build a loader. `None` disables the request timeout entirely.
    pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::network("<client>", e))?;
        Ok(Self { client })
    }

    /// GET a source and return the body.
    pub fn fetch_bytes(&self, source: &str) -> Result<Vec<u8>, FetchError> {
        if !is_remote(source) {
            let bytes = std::fs::read(source).map_err(|e| FetchError::network(source, e))?;
            debug!(source, bytes = bytes.len(), "read local source");
            return Ok(bytes);
        }

        let body = self
            .client
            .get(source)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.bytes())
            .map_err(|e| FetchError::network(source, e))?;

        info!(source, bytes = body.len(), "fetched source");
        Ok(body.to_vec())
    }

    /// GET a source and decode it as JSON.
    pub fn fetch_json(&self, source: &str) -> Result<serde_json::Value, FetchError> {
        parse_json(source, &self.fetch_bytes(source)?)
    }

    /// GET a source and decode it as JSON straight into `T`.
    pub fn fetch_json_as<T: DeserializeOwned>(&self, source: &str) -> Result<T, FetchError> {
        let value = self.fetch_json(source)?;
        serde_json::from_value(value).map_err(|e| FetchError::format(source, e))
    }

    /// GET a source and decode it as a delimited table.
    pub fn fetch_table(&self, source: &str) -> Result<DataFrame, FetchError> {
        parse_table(source, self.fetch_bytes(source)?)
    }
}

/// Decode a JSON body. `source` is only used for error messages.
pub fn parse_json(source: &str, bytes: &[u8]) -> Result<serde_json::Value, FetchError> {
    serde_json::from_slice(bytes).map_err(|e| FetchError::format(source, e))
}

/// Decode a CSV body into a DataFrame, inferring column types from the header
/// and content.
pub fn parse_table(source: &str, bytes: Vec<u8>) -> Result<DataFrame, FetchError> {
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(FetchError::format(source, "empty body"));
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(10000))
        .with_ignore_errors(true)
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(|e| FetchError::format(source, e))?;

    debug!(source, rows = df.height(), columns = df.width(), "decoded table");
    Ok(df)
}
