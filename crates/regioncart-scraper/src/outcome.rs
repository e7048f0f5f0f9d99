//! Per-request outcomes for the discovery and crawl phases.
//!
//! Inside those phases a failed request never aborts its siblings: the
//! failure is turned into a [`RequestOutcome::Skipped`] value that
//! contributes nothing and is counted in [`PhaseStats`].

use std::fmt;

use crate::error::FetchError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The site answered 503.
    TransientUnavailable,
    /// Body was not JSON or lacked the expected shape.
    Malformed(String),
    /// Network failure that survived every retry.
    Network(String),
    UnexpectedStatus(u16),
    Other(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::TransientUnavailable => f.write_str("temporarily unavailable"),
            SkipReason::Malformed(detail) => write!(f, "malformed response: {detail}"),
            SkipReason::Network(detail) => write!(f, "network error: {detail}"),
            SkipReason::UnexpectedStatus(status) => write!(f, "unexpected status {status}"),
            SkipReason::Other(detail) => f.write_str(detail),
        }
    }
}

impl From<FetchError> for SkipReason {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::TransientUnavailable { .. } => SkipReason::TransientUnavailable,
            malformed @ FetchError::Malformed { .. } => SkipReason::Malformed(malformed.to_string()),
            FetchError::Http(e) => SkipReason::Network(e.to_string()),
            FetchError::UnexpectedStatus { status, .. } => SkipReason::UnexpectedStatus(status),
            other @ (FetchError::Normalization { .. } | FetchError::InvalidBaseUrl { .. }) => {
                SkipReason::Other(other.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome<T> {
    Fetched(T),
    Skipped(SkipReason),
}

impl<T> From<Result<T, FetchError>> for RequestOutcome<T> {
    fn from(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(value) => RequestOutcome::Fetched(value),
            Err(err) => RequestOutcome::Skipped(err.into()),
        }
    }
}

/// Request tallies for one phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseStats {
    pub fetched: usize,
    pub transient_unavailable: usize,
    pub malformed: usize,
    pub network: usize,
    pub other: usize,
}

impl PhaseStats {
    pub fn record<T>(&mut self, outcome: &RequestOutcome<T>) {
        match outcome {
            RequestOutcome::Fetched(_) => self.fetched += 1,
            RequestOutcome::Skipped(SkipReason::TransientUnavailable) => {
                self.transient_unavailable += 1;
            }
            RequestOutcome::Skipped(SkipReason::Malformed(_)) => self.malformed += 1,
            RequestOutcome::Skipped(SkipReason::Network(_)) => self.network += 1,
            RequestOutcome::Skipped(SkipReason::UnexpectedStatus(_) | SkipReason::Other(_)) => {
                self.other += 1;
            }
        }
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.transient_unavailable + self.malformed + self.network + self.other
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.fetched + self.skipped()
    }
}
