//! Retry with exponential back-off and jitter for catalog requests.
//!
//! Only connection and timeout failures are retried. A 503, a malformed
//! body or any other status is returned to the caller on the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::error::FetchError;

const MAX_DELAY_MS: u64 = 30_000;

/// Connection and timeout failures only. Builder, redirect and body-decode
/// errors from `reqwest` fail the same way on every attempt.
pub(crate) fn is_retriable(err: &FetchError) -> bool {
    match err {
        FetchError::Http(e) => e.is_timeout() || e.is_connect(),
        FetchError::TransientUnavailable { .. }
        | FetchError::UnexpectedStatus { .. }
        | FetchError::Malformed { .. }
        | FetchError::Normalization { .. }
        | FetchError::InvalidBaseUrl { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on network
/// failures.
///
/// Back-off schedule with `backoff_base_ms = 500`:
///
/// | Attempt | Sleep before next attempt   |
/// |---------|-----------------------------|
/// | 1       | 500 ms × 2⁰ ± 25 % jitter   |
/// | 2       | 500 ms × 2¹ ± 25 % jitter   |
/// | 3       | 500 ms × 2² ± 25 % jitter   |
///
/// Delay is capped at 30 s.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "network error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
