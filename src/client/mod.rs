//! Client for the Israeli Land Authority tender API.
//!
//! One [`LandClient`] owns its HTTP connection pool and its rate-limit
//! state; separate instances are fully independent. Every operation is a
//! single upstream call: throttled, retried on transient failures, and
//! normalized before pagination.

pub mod paginate;
pub mod query;
pub mod transport;

pub use paginate::paginate;
pub use query::build_payload;
pub use transport::SearchOutcome;

use crate::config::ResolvedConfig;
use crate::constants::{
    DETAILS_PATH, MAP_DETAILS_PATH, ORIGIN, REFERER, SEARCH_PATH, USER_AGENT,
};
use crate::errors::{AppError, AppResult};
use crate::models::SearchCriteria;
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};
use transport::{send_with_retry, RateLimiter, RetryConfig};
use url::Url;

/// Headers upstream requires on every request.
fn required_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(reqwest::header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
    headers.insert(
        reqwest::header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(reqwest::header::ORIGIN, HeaderValue::from_static(ORIGIN));
    headers.insert(reqwest::header::REFERER, HeaderValue::from_static(REFERER));
    headers
}

/// Client for Israeli Land Authority public tender data.
pub struct LandClient {
    http: reqwest::Client,
    base_url: String,
    limiter: RateLimiter,
    retry: RetryConfig,
}

impl LandClient {
    /// Creates a client with the default configuration.
    pub fn new() -> AppResult<Self> {
        Self::with_config(&ResolvedConfig::default())
    }

    /// Creates a client from a resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the underlying HTTP
    /// client cannot be constructed.
    pub fn with_config(config: &ResolvedConfig) -> AppResult<Self> {
        // Validate early so a bad override fails at construction time.
        Url::parse(&config.base_url)
            .map_err(|e| AppError::InvalidInput(format!("Invalid base URL '{}': {e}", config.base_url)))?;

        let http = reqwest::Client::builder()
            .default_headers(required_headers())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            limiter: RateLimiter::new(Duration::from_millis(config.rate_limit_delay_ms)),
            retry: RetryConfig {
                max_retries: config.max_retries,
                initial_delay_ms: config.retry_initial_delay_ms,
                max_delay_ms: config.retry_max_delay_ms,
            },
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Searches tenders with the given criteria.
    ///
    /// Builds the upstream payload, dispatches a single search call, and
    /// applies client-side pagination to the normalized result set.
    pub async fn search_tenders(&self, criteria: &SearchCriteria) -> AppResult<SearchOutcome> {
        let payload = build_payload(criteria);
        debug!(filters = payload.len(), "Dispatching tender search");

        self.limiter.acquire().await;
        let response = send_with_retry(
            self.http.post(self.endpoint(SEARCH_PATH)).json(&payload),
            &self.retry,
        )
        .await?;

        let outcome = SearchOutcome::from_response(response)?;
        info!(
            results = outcome.records.len(),
            page = criteria.page_number,
            "Search completed"
        );
        Ok(paginate(outcome, criteria.page_size, criteria.page_number))
    }

    /// Fetches detailed information for a specific tender.
    ///
    /// A nonexistent tender still comes back as HTTP 200 with an embedded
    /// message object; callers inspect the payload, not the status code.
    pub async fn get_tender_details(&self, michraz_id: i64) -> AppResult<Value> {
        self.limiter.acquire().await;
        send_with_retry(
            self.http
                .get(self.endpoint(DETAILS_PATH))
                .query(&[("michrazID", michraz_id)]),
            &self.retry,
        )
        .await
    }

    /// Fetches geographic/mapping data for a tender; may be sparse or
    /// empty for tenders without map data.
    pub async fn get_tender_map_details(&self, michraz_id: i64) -> AppResult<Value> {
        self.limiter.acquire().await;
        send_with_retry(
            self.http
                .get(self.endpoint(MAP_DETAILS_PATH))
                .query(&[("michrazID", michraz_id)]),
            &self.retry,
        )
        .await
    }

    /// Fetches all available tenders in one call.
    pub async fn get_all_tenders(&self) -> AppResult<SearchOutcome> {
        self.search_tenders(&SearchCriteria::all()).await
    }

    /// Fetches only currently active tenders.
    pub async fn get_active_tenders(&self) -> AppResult<SearchOutcome> {
        self.search_tenders(&SearchCriteria::active()).await
    }

    /// Fetches tenders with results from the last `days` days, measured
    /// from the wall clock at call time.
    pub async fn get_recent_results(&self, days: i64) -> AppResult<SearchOutcome> {
        let criteria = SearchCriteria::recent_results(days, Utc::now().date_naive());
        self.search_tenders(&criteria).await
    }

    /// Searches tenders by location.
    pub async fn search_by_location(
        &self,
        kod_yeshuv: Option<i64>,
        region: Option<String>,
        neighborhood: Option<String>,
        purpose: Option<String>,
    ) -> AppResult<SearchOutcome> {
        let criteria = SearchCriteria::by_location(kod_yeshuv, region, neighborhood, purpose);
        self.search_tenders(&criteria).await
    }

    /// Searches tenders by type or land use purpose.
    pub async fn search_by_type(
        &self,
        tender_types: Option<Vec<i64>>,
        purpose: Option<String>,
    ) -> AppResult<SearchOutcome> {
        let criteria = SearchCriteria::by_type(tender_types, purpose);
        self.search_tenders(&criteria).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = ResolvedConfig {
            base_url: "http://127.0.0.1:9/api/".to_string(),
            ..ResolvedConfig::default()
        };
        let client = LandClient::with_config(&config).unwrap();
        assert_eq!(
            client.endpoint(SEARCH_PATH),
            "http://127.0.0.1:9/api/SearchApi/Search"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config = ResolvedConfig {
            base_url: "not a url".to_string(),
            ..ResolvedConfig::default()
        };
        assert!(LandClient::with_config(&config).is_err());
    }

    #[test]
    fn test_required_headers_are_complete() {
        let headers = required_headers();
        assert_eq!(headers.get(reqwest::header::USER_AGENT).unwrap(), USER_AGENT);
        assert_eq!(headers.get(reqwest::header::CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(headers.get(reqwest::header::ORIGIN).unwrap(), ORIGIN);
        assert_eq!(headers.get(reqwest::header::REFERER).unwrap(), REFERER);
    }
}
