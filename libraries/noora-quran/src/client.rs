//! Quran API client.

use crate::error::{QuranApiError, Result};
use crate::types::{parse_verses, SurahDetailResponse, SurahListResponse};
use noora_core::{SurahInfo, Verse};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Public Quran API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.myquran.com/v2";

/// Verse ranges larger than this are fetched in multiple requests
const MAX_RANGE_PER_REQUEST: u32 = 30;

/// Client for the Quran verse data API.
///
/// Provides surah metadata and ordered verse ranges; ranges longer than the
/// API's practical page size are fetched in chunks transparently.
///
/// # Example
///
/// ```ignore
/// use noora_quran::QuranClient;
///
/// let client = QuranClient::with_default_base_url()?;
///
/// // Surah metadata
/// let surah = client.surah(18).await?;
/// println!("{} has {} verses", surah.name, surah.verse_count);
///
/// // Full verse range (chunked transparently)
/// let verses = client.verses(surah.number, 1, surah.verse_count).await?;
/// println!("fetched {} verses", verses.len());
/// ```
pub struct QuranClient {
    http: Client,
    base_url: String,
}

impl QuranClient {
    /// Create a client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        if base_url.is_empty() {
            return Err(QuranApiError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(QuranApiError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("NooraRecitation/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(QuranApiError::Request)?;

        Ok(Self { http, base_url })
    }

    /// Create a client against the public API.
    pub fn with_default_base_url() -> Result<Self> {
        Self::new(DEFAULT_BASE_URL)
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch metadata for every surah.
    pub async fn surah_list(&self) -> Result<Vec<SurahInfo>> {
        let path = "quran/surat/semua";
        let response: SurahListResponse = self.get(path).await?;

        if !response.status {
            return Err(QuranApiError::FailureStatus { path: path.into() });
        }

        let payloads = response.data.ok_or_else(|| QuranApiError::EmptyResponse {
            path: path.to_string(),
        })?;

        let mut surahs = Vec::with_capacity(payloads.len());
        for payload in payloads {
            match payload.into_surah_info() {
                Ok(info) => surahs.push(info),
                Err(err) => warn!(error = %err, "skipping malformed surah record"),
            }
        }

        info!(count = surahs.len(), "fetched surah list");
        Ok(surahs)
    }

    /// Fetch metadata for one surah.
    pub async fn surah(&self, number: u32) -> Result<SurahInfo> {
        let path = format!("quran/surat/{number}");
        let response: SurahDetailResponse = self.get(&path).await?;

        if !response.status {
            return Err(QuranApiError::FailureStatus { path });
        }

        response
            .data
            .ok_or(QuranApiError::EmptyResponse { path })?
            .into_surah_info()
    }

    /// Fetch a single verse.
    pub async fn verse(&self, surah: u32, ayah: u32) -> Result<Verse> {
        let path = format!("quran/ayat/{surah}/{ayah}");
        let body = self.get_value(&path).await?;

        parse_verses(body.get("data"))
            .into_iter()
            .next()
            .ok_or(QuranApiError::EmptyResponse { path })
    }

    /// Fetch an inclusive 1-based verse range, in order.
    ///
    /// Ranges longer than the API's page size are split into consecutive
    /// requests of at most 30 verses each; the concatenated result
    /// preserves verse ordering.
    pub async fn verses(&self, surah: u32, from: u32, to: u32) -> Result<Vec<Verse>> {
        if from == 0 || to < from {
            return Err(QuranApiError::InvalidRange { from, to });
        }

        let mut all = Vec::with_capacity((to - from + 1) as usize);
        let mut start = from;
        while start <= to {
            let end = (start + MAX_RANGE_PER_REQUEST - 1).min(to);
            let path = format!("quran/ayat/{surah}/{start}-{end}");
            let body = self.get_value(&path).await?;

            let chunk = parse_verses(body.get("data"));
            debug!(surah, start, end, fetched = chunk.len(), "verse chunk");
            all.extend(chunk);

            start = end + 1;
        }

        info!(surah, from, to, count = all.len(), "fetched verse range");
        Ok(all)
    }

    /// Fetch every verse of a surah.
    pub async fn all_verses(&self, surah: &SurahInfo) -> Result<Vec<Verse>> {
        self.verses(surah.number, 1, surah.verse_count).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let body = self.get_value(path).await?;
        serde_json::from_value(body)
            .map_err(|e| QuranApiError::ParseError(format!("{path}: {e}")))
    }

    async fn get_value(&self, path: &str) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(url = %url, "GET");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(QuranApiError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| QuranApiError::ParseError(format!("{path}: {e}")))
    }
}
