//! Response classification, body decoding, and retry pacing shared by the
//! REST and sync calls.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// First retry delay; doubled per attempt.
const BASE_BACKOFF: Duration = Duration::from_millis(500);
/// Upper bound for exponential backoff.
const MAX_BACKOFF: Duration = Duration::from_secs(8);
/// Upper bound for honouring `Retry-After`.
const MAX_RETRY_AFTER_SECS: u64 = 30;
/// Wait used when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 5;
/// Longest error message kept from a response body.
const MAX_MESSAGE_CHARS: usize = 300;

/// Pass a successful response through; map anything else to an [`ApiError`].
///
/// A 429 becomes [`ApiError::RateLimited`]. Other failures become
/// [`ApiError::Api`] carrying the service's message.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ApiError::RateLimited {
            retry_after_secs: retry_after_secs(resp.headers()),
        });
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Api {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

/// Delay-seconds form of `Retry-After`. The HTTP-date form is not used by
/// the service and falls back to the default.
fn retry_after_secs(headers: &HeaderMap) -> u64 {
    headers
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

/// Error bodies are either plain text or `{"error": "..."}`.
fn error_message(body: &str) -> String {
    let trimmed = body.trim();
    let message = serde_json::from_str::<serde_json::Value>(trimmed)
        .ok()
        .and_then(|json| json.get("error")?.as_str().map(str::to_string))
        .unwrap_or_else(|| trimmed.to_string());

    if message.chars().count() > MAX_MESSAGE_CHARS {
        let mut short: String = message.chars().take(MAX_MESSAGE_CHARS).collect();
        short.push('…');
        short
    } else {
        message
    }
}

/// Decode a JSON body, naming `what` in the error.
pub fn decode<T: DeserializeOwned>(body: &str, what: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Parse(format!("{what}: {e}")))
}

/// Delay before retry number `attempt` (zero-based).
#[must_use]
pub fn backoff_delay(attempt: u32, error: &ApiError) -> Duration {
    if let ApiError::RateLimited { retry_after_secs } = error {
        return Duration::from_secs((*retry_after_secs).min(MAX_RETRY_AFTER_SECS));
    }
    BASE_BACKOFF
        .saturating_mul(2u32.saturating_pow(attempt))
        .min(MAX_BACKOFF)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reqwest::header::HeaderValue;
    use rstest::rstest;

    fn service_reply(status: u16, retry_after: Option<&str>, body: &str) -> reqwest::Response {
        let mut builder = ::http::Response::builder().status(status);
        if let Some(value) = retry_after {
            builder = builder.header("Retry-After", value);
        }
        reqwest::Response::from(builder.body(body.to_string()).unwrap())
    }

    #[rstest]
    #[case(Some("12"), 12)]
    #[case(Some(" 7 "), 7)]
    #[case(None, DEFAULT_RETRY_AFTER_SECS)]
    #[case(Some("Wed, 21 Oct 2026 07:28:00 GMT"), DEFAULT_RETRY_AFTER_SECS)]
    fn retry_after_reads_delay_seconds(#[case] header: Option<&str>, #[case] expected: u64) {
        let mut headers = HeaderMap::new();
        if let Some(value) = header {
            headers.insert(RETRY_AFTER, HeaderValue::from_str(value).unwrap());
        }
        assert_eq!(retry_after_secs(&headers), expected);
    }

    #[tokio::test]
    async fn too_many_requests_is_rate_limited() {
        let err = check_response(service_reply(429, Some("3"), ""))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::RateLimited { retry_after_secs: 3 }));
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn json_error_body_yields_its_message() {
        let err = check_response(service_reply(403, None, r#"{"error": "Forbidden"}"#))
            .await
            .unwrap_err();
        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "Forbidden");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn plain_text_error_body_is_kept_trimmed() {
        let err = check_response(service_reply(400, None, "  Invalid argument value\n"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "API error (400): Invalid argument value");
        assert!(!err.is_transient());
    }

    #[tokio::test]
    async fn success_passes_through() {
        let resp = check_response(service_reply(200, None, "[]")).await.unwrap();
        assert_eq!(resp.text().await.unwrap(), "[]");
    }

    #[test]
    fn long_error_bodies_are_cut() {
        let message = error_message(&"x".repeat(1000));
        assert_eq!(message.chars().count(), MAX_MESSAGE_CHARS + 1);
        assert!(message.ends_with('…'));
    }

    #[rstest]
    #[case(0, Duration::from_millis(500))]
    #[case(1, Duration::from_secs(1))]
    #[case(2, Duration::from_secs(2))]
    #[case(10, MAX_BACKOFF)]
    fn backoff_doubles_and_caps(#[case] attempt: u32, #[case] expected: Duration) {
        let err = ApiError::Api {
            status: 502,
            message: String::new(),
        };
        assert_eq!(backoff_delay(attempt, &err), expected);
    }

    #[test]
    fn backoff_honours_capped_retry_after() {
        let short = ApiError::RateLimited { retry_after_secs: 3 };
        let long = ApiError::RateLimited {
            retry_after_secs: 600,
        };
        assert_eq!(backoff_delay(0, &short), Duration::from_secs(3));
        assert_eq!(backoff_delay(0, &long), Duration::from_secs(30));
    }

    #[test]
    fn decode_names_the_payload() {
        let err = decode::<Vec<u32>>("{", "projects").unwrap_err();
        assert!(err.to_string().starts_with("parse error: projects:"));
    }
}
