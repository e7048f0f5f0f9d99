mod report;
mod sink;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use regioncart_core::ResultSink;
use regioncart_scraper::{AuchanClient, CrawlPipeline, PipelineSettings};
use tracing_subscriber::EnvFilter;

use crate::sink::JsonFileSink;

#[derive(Debug, Parser)]
#[command(name = "regioncart")]
#[command(about = "Find catalog categories sold in both configured regions")]
struct Cli {
    /// Write results to this file instead of `REGIONCART_OUTPUT_PATH`
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Crawl both regions and persist the shared categories (default)
    Run,
    /// Print the resolved configuration and exit
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = regioncart_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if let Some(output) = cli.output {
        config.output_path = output;
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run(&config).await,
        Commands::Config => {
            println!("{config:#?}");
            Ok(())
        }
    }
}

async fn run(config: &regioncart_core::AppConfig) -> anyhow::Result<()> {
    let started = Instant::now();

    let client = AuchanClient::new(
        &config.api_base_url,
        config.request_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.retry_backoff_base_ms,
    )?;
    let pipeline = CrawlPipeline::new(
        &client,
        config.regions.clone(),
        PipelineSettings::from_app_config(config),
    );

    let output = pipeline.run_until(shutdown_signal()).await?;

    report::print_report(&output);

    let sink = JsonFileSink::new(&config.output_path);
    sink.persist(&output.aggregation.results)?;
    tracing::info!(
        path = %config.output_path.display(),
        categories = output.aggregation.results.len(),
        "results written"
    );

    println!("{}", report::elapsed_line(started.elapsed()));
    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM. A handler that fails to install
/// is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal");
}
