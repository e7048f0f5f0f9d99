//! End-of-run report printed to stdout.

use std::time::Duration;

use regioncart_scraper::{CrawlOutput, PhaseStats};

pub fn print_report(output: &CrawlOutput) {
    for line in store_lines(output) {
        println!("{line}");
    }
    for line in decision_lines(output) {
        println!("{line}");
    }
    println!("{}", stats_line("discovery", &output.discovery_stats));
    println!("{}", stats_line("products", &output.crawl_stats));
}

/// One line per region and crawled category, primary region first.
pub fn store_lines(output: &CrawlOutput) -> Vec<String> {
    output
        .regions
        .iter()
        .flat_map(move |(role, region)| {
            output
                .stores
                .get(role)
                .counts()
                .map(move |(code, count)| format!("{} {code:28} {count}", region.name))
        })
        .collect()
}

pub fn decision_lines(output: &CrawlOutput) -> Vec<String> {
    output
        .aggregation
        .decisions
        .iter()
        .map(|d| {
            let verdict = if d.kept { "keep" } else { "drop" };
            format!("{verdict}: {:28} {}", d.code, d.matched)
        })
        .collect()
}

pub fn stats_line(phase: &str, stats: &PhaseStats) -> String {
    format!(
        "{phase}: {} fetched, {} skipped ({} unavailable, {} malformed, {} network, {} other)",
        stats.fetched,
        stats.skipped(),
        stats.transient_unavailable,
        stats.malformed,
        stats.network,
        stats.other,
    )
}

pub fn elapsed_line(elapsed: Duration) -> String {
    format!("elapsed: {:.1}s", elapsed.as_secs_f64())
}
