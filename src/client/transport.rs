//! Transport plumbing shared by all upstream calls: the inter-request
//! throttle, the bounded retry policy for transient failures, and the
//! normalization of the upstream's two response shapes into one type.

use crate::errors::{AppError, AppResult};
use serde_json::{Map, Value};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::warn;

/// Upstream status codes treated as transient and retried.
const RETRYABLE_STATUSES: &[u16] = &[429, 500, 502, 503, 504];

/// Token-less throttle: one permit refills every `delay`, capacity 1.
///
/// The last-dispatch instant is guarded by a mutex so sharing one client
/// across tasks serializes the read-modify-write instead of racing.
pub(crate) struct RateLimiter {
    delay: Duration,
    last: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            delay,
            last: Mutex::new(None),
        }
    }

    /// Blocks until at least `delay` has elapsed since the previous
    /// acquisition on this limiter, then records the current instant.
    pub(crate) async fn acquire(&self) {
        let mut last = self.last.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.delay {
                tokio::time::sleep(self.delay - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub(crate) struct RetryConfig {
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 1000,
            max_delay_ms: 10000,
        }
    }
}

/// Calculates exponential backoff delay in milliseconds.
///
/// Formula: `min(initial_delay * 2^attempt, max_delay)`
fn calculate_backoff(attempt: u32, config: &RetryConfig) -> u64 {
    let delay = config.initial_delay_ms.saturating_mul(2_u64.saturating_pow(attempt));
    delay.min(config.max_delay_ms)
}

/// Whether an HTTP status warrants another attempt.
fn is_retryable_status(status: u16) -> bool {
    RETRYABLE_STATUSES.contains(&status)
}

enum AttemptError {
    Transient(AppError),
    Fatal(AppError),
}

/// Sends a prepared request, retrying transient failures with exponential
/// backoff. Timeouts and connection errors count as failed attempts under
/// the same policy; any other failure propagates immediately.
pub(crate) async fn send_with_retry(
    request: reqwest::RequestBuilder,
    config: &RetryConfig,
) -> AppResult<Value> {
    for attempt in 0..=config.max_retries {
        let prepared = request.try_clone().ok_or_else(|| {
            AppError::NetworkError("Request body cannot be cloned for retry".into())
        })?;

        match send_once(prepared).await {
            Ok(value) => return Ok(value),
            Err(AttemptError::Transient(e)) if attempt < config.max_retries => {
                let delay_ms = calculate_backoff(attempt, config);
                warn!(
                    attempt = attempt + 1,
                    max_attempts = config.max_retries + 1,
                    delay_ms = delay_ms,
                    error = %e,
                    "Retrying upstream request after transient failure"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
            Err(AttemptError::Transient(e)) | Err(AttemptError::Fatal(e)) => return Err(e),
        }
    }

    // The loop always returns: the final iteration either succeeds or
    // takes the non-retrying error arm.
    Err(AppError::NetworkError(format!(
        "Upstream request failed after {} attempts",
        config.max_retries + 1
    )))
}

async fn send_once(request: reqwest::RequestBuilder) -> Result<Value, AttemptError> {
    let response = request.send().await.map_err(|e| {
        let err = AppError::NetworkError(format!("Upstream request failed: {e}"));
        if e.is_timeout() || e.is_connect() {
            AttemptError::Transient(err)
        } else {
            AttemptError::Fatal(err)
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        let err = AppError::NetworkError(format!("HTTP {}: upstream request failed", status.as_u16()));
        return Err(if is_retryable_status(status.as_u16()) {
            AttemptError::Transient(err)
        } else {
            AttemptError::Fatal(err)
        });
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| AttemptError::Fatal(AppError::ParseError(format!("Invalid JSON from upstream: {e}"))))
}

/// Normalized search response.
///
/// Upstream answers either with a bare array of records or with an object
/// wrapping a `results` array. Normalization happens once here; everything
/// downstream operates on `records` and the retained wrapper fields.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub records: Vec<Value>,
    /// Wrapper fields other than `results` when upstream used the
    /// envelope shape; `None` for the bare-array shape.
    pub envelope: Option<Map<String, Value>>,
}

impl SearchOutcome {
    /// Normalizes a raw search response.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` for any shape other than a bare array or an
    /// object carrying a `results` array.
    pub fn from_response(response: Value) -> AppResult<Self> {
        match response {
            Value::Array(records) => Ok(Self {
                records,
                envelope: None,
            }),
            Value::Object(mut wrapper) => match wrapper.remove("results") {
                Some(Value::Array(records)) => Ok(Self {
                    records,
                    envelope: Some(wrapper),
                }),
                Some(_) => Err(AppError::ParseError(
                    "Upstream 'results' field is not an array".into(),
                )),
                None => Err(AppError::ParseError(
                    "Upstream response object has no 'results' array".into(),
                )),
            },
            _ => Err(AppError::ParseError(
                "Upstream search response is neither an array nor an object".into(),
            )),
        }
    }

    /// Reassembles the upstream shape: records go back under `results`
    /// when a wrapper was present, otherwise a bare array.
    pub fn into_value(self) -> Value {
        match self.envelope {
            Some(mut wrapper) => {
                wrapper.insert("results".to_string(), Value::Array(self.records));
                Value::Object(wrapper)
            }
            None => Value::Array(self.records),
        }
    }
}
