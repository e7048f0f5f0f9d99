pub mod bootstrap;
pub mod client;
pub mod crawl;
pub mod discover;
pub mod error;
pub mod normalize;
pub mod outcome;
pub mod pipeline;
mod retry;
pub mod types;

pub use bootstrap::{bootstrap_region, RegionSeed};
pub use client::AuchanClient;
pub use error::{FetchError, PipelineError};
pub use outcome::{PhaseStats, RequestOutcome, SkipReason};
pub use pipeline::{CrawlOutput, CrawlPipeline, PipelineSettings};
