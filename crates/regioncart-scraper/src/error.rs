use thiserror::Error;

/// Failure of a single catalog API request.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, TLS or timeout failure. The only retried class.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The site answered 503.
    #[error("service temporarily unavailable: {url}")]
    TransientUnavailable { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The body is not JSON or does not have the expected shape.
    #[error("malformed response for {context}: {source}")]
    Malformed {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("normalization error for product {product_id}: {reason}")]
    Normalization { product_id: String, reason: String },

    #[error("invalid API base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

/// Conditions that stop a crawl run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A region could not be resolved to a merchant and category list.
    #[error("bootstrap failed for region {region}: {source}")]
    Bootstrap {
        region: String,
        #[source]
        source: FetchError,
    },

    #[error("region {region} has no shops")]
    NoShops { region: String },

    #[error("crawl cancelled")]
    Cancelled,
}
