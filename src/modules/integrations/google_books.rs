//! Google Books volumes API client
//!
//! Returns raw response bodies; parsing lives in `services::volume_parser`.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::domain::DomainError;
use crate::infrastructure::config::Config;
use crate::services::volume_parser;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/books/v1/volumes";

/// Query used when the caller searches for nothing
pub const DEFAULT_QUERY: &str = "subject:Computers";

/// `maxResults` of a single search call (the API maximum)
pub const MAX_RESULTS: u32 = 40;

/// `maxResults` of each call in a sweep
pub const SWEEP_BATCH_SIZE: u32 = 10;

/// Number of volumes a sweep tries to collect
pub const SWEEP_TARGET: u32 = 100;

/// Build the `q` parameter from free text.
///
/// Blank input becomes [`DEFAULT_QUERY`]; otherwise spaces are joined with `+` and
/// everything else is passed through, so operators like `inauthor:` keep working.
pub fn build_query(term: &str) -> String {
    if term.trim().is_empty() {
        DEFAULT_QUERY.to_string()
    } else {
        term.replace(' ', "+")
    }
}

/// Percent-encode a `q` value, keeping `+` separators and `:` operators readable
fn encode_query(query: &str) -> String {
    query
        .split('+')
        .map(|part| urlencoding::encode(part).replace("%3A", ":"))
        .collect::<Vec<_>>()
        .join("+")
}

#[derive(Clone, Debug)]
pub struct GoogleBooksClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GoogleBooksClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Internal(format!("Failed to build client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, DomainError> {
        Self::new(
            config.google_books_api_url.clone(),
            config.google_books_api_key.clone(),
            config.google_books_timeout,
        )
    }

    /// One search call returning up to [`MAX_RESULTS`] volumes by relevance
    pub async fn search_volumes(&self, query: &str) -> Result<String, DomainError> {
        let url = format!(
            "{}?q={}{}&maxResults={}&orderBy=relevance",
            self.base_url,
            encode_query(query),
            self.key_param(),
            MAX_RESULTS
        );
        self.get_text(&url).await
    }

    /// Collect up to [`SWEEP_TARGET`] volumes in batches of [`SWEEP_BATCH_SIZE`].
    ///
    /// Calls are issued one after another, never concurrently, to stay under the API's
    /// rate limits. Bodies are keyed by call order. The sweep ends early on the first
    /// short page; an empty page is not kept.
    pub async fn sweep_volumes(&self, query: &str) -> Result<BTreeMap<u32, String>, DomainError> {
        let mut pages = BTreeMap::new();
        let mut collected: u32 = 0;
        let max_calls = SWEEP_TARGET.div_ceil(SWEEP_BATCH_SIZE);

        for call in 0..max_calls {
            if collected >= SWEEP_TARGET {
                break;
            }

            let url = format!(
                "{}?q={}{}&maxResults={}&startIndex={}&orderBy=newest&printType=books",
                self.base_url,
                encode_query(query),
                self.key_param(),
                SWEEP_BATCH_SIZE,
                call * SWEEP_BATCH_SIZE
            );
            let body = self.get_text(&url).await?;
            let count = volume_parser::count_items(&body)?;

            if count == 0 {
                tracing::warn!("Sweep for '{}' hit an empty page at call {}", query, call);
                break;
            }

            pages.insert(call, body);
            collected += u32::try_from(count).unwrap_or(u32::MAX);

            if count < SWEEP_BATCH_SIZE as usize {
                break;
            }
        }

        tracing::debug!(
            "Sweep for '{}' collected {} volumes in {} calls",
            query,
            collected,
            pages.len()
        );
        Ok(pages)
    }

    /// Fetch one volume by its Google id
    pub async fn fetch_volume(&self, volume_id: &str) -> Result<String, DomainError> {
        let key = if self.api_key.is_empty() {
            String::new()
        } else {
            format!("?key={}", self.api_key)
        };
        let url = format!(
            "{}/{}{}",
            self.base_url,
            urlencoding::encode(volume_id),
            key
        );
        self.get_text(&url).await
    }

    fn key_param(&self) -> String {
        if self.api_key.is_empty() {
            String::new()
        } else {
            format!("&key={}", self.api_key)
        }
    }

    async fn get_text(&self, url: &str) -> Result<String, DomainError> {
        tracing::debug!("GET {}", self.redact(url));

        let resp = self.http.get(url).send().await?;

        if !resp.status().is_success() {
            return Err(DomainError::ExternalServiceUnavailable(format!(
                "Google Books API returned status: {}",
                resp.status()
            )));
        }

        Ok(resp.text().await?)
    }

    fn redact(&self, url: &str) -> String {
        if self.api_key.is_empty() {
            url.to_string()
        } else {
            url.replace(&self.api_key, "***")
        }
    }
}
