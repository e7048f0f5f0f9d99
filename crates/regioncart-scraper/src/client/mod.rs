//! HTTP client for the retailer's internal catalog API.

mod catalog;

use std::time::Duration;

use reqwest::{Client, Method, Url};

use crate::error::FetchError;
use crate::retry::retry_with_backoff;

/// Gateway to the catalog API.
///
/// Every request goes through [`AuchanClient::fetch_json`], which applies the
/// timeout, maps 503 to [`FetchError::TransientUnavailable`], decodes the
/// body as JSON and retries connection and timeout failures with back-off.
pub struct AuchanClient {
    client: Client,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl AuchanClient {
    /// Creates a client rooted at `base_url` (e.g. `https://www.auchan.ru`).
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`FetchError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so relative endpoint paths join under
        // the base instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| FetchError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(FetchError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "URL cannot be used as a base".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Issues one request and returns the decoded JSON body.
    ///
    /// `body`, when present, is sent as a JSON payload. `context` names the
    /// request in error messages.
    ///
    /// # Errors
    ///
    /// - [`FetchError::TransientUnavailable`] on HTTP 503 (not retried).
    /// - [`FetchError::UnexpectedStatus`] on any other non-2xx status (not retried).
    /// - [`FetchError::Malformed`] if the body is not JSON (not retried).
    /// - [`FetchError::Http`] on connection or timeout failure after all
    ///   retries, or on any other transport error.
    pub async fn fetch_json(
        &self,
        method: Method,
        url: Url,
        body: Option<&serde_json::Value>,
        context: &str,
    ) -> Result<serde_json::Value, FetchError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let method = method.clone();
            let url = url.clone();
            async move {
                let mut request = self
                    .client
                    .request(method, url.clone())
                    .header(reqwest::header::ACCEPT, "application/json");
                if let Some(body) = body {
                    request = request.json(body);
                }

                let response = request.send().await?;
                let status = response.status();

                if status == reqwest::StatusCode::SERVICE_UNAVAILABLE {
                    return Err(FetchError::TransientUnavailable {
                        url: url.to_string(),
                    });
                }

                if !status.is_success() {
                    return Err(FetchError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                let text = response.text().await?;
                let value = serde_json::from_str::<serde_json::Value>(&text).map_err(|e| {
                    FetchError::Malformed {
                        context: context.to_owned(),
                        source: e,
                    }
                })?;
                tracing::debug!(%url, context, "fetched");
                Ok(value)
            }
        })
        .await
    }

    /// Builds an endpoint URL under the base with percent-encoded query
    /// parameters.
    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, FetchError> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| FetchError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join \"{path}\": {e}"),
            })?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
