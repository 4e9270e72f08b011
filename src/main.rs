//! # Briefly
//!
//! A news-briefing generator: pick topics, pull a CSV article feed, and get
//! a dated briefing edition as JSON and Markdown.
//!
//! ## Features
//!
//! - Fetches topic-filtered article feeds from the article service, with
//!   retry and graceful degradation
//! - Parses the CSV feed with a lenient hand-rolled tokenizer that survives
//!   quoted commas, embedded newlines, and ragged rows
//! - Falls back per topic to a canned headline catalog when the feed has no
//!   coverage
//! - Remembers the signed-in user via a session file and stamps editions
//!   with their name
//!
//! ## Usage
//!
//! ```sh
//! briefly -o ./briefings technology health politics
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Selection**: Resolve the topic set from CLI arguments or config
//! 2. **Acquisition**: Obtain CSV text (cached file, or live fetch with retry)
//! 3. **Parsing**: Tokenize the CSV into records
//! 4. **Assembly**: Group by topic, dedupe, fill gaps from the mock catalog
//! 5. **Output**: Write the JSON edition and the Markdown rundown

use chrono::Local;
use clap::Parser;
use itertools::Itertools;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod briefing;
mod cli;
mod config;
mod csv;
mod fetch;
mod models;
mod outputs;
mod session;
mod topics;
mod utils;

use briefing::{build_briefing, ensure_enough_topics};
use cli::Cli;
use config::AppConfig;
use fetch::{fetch_with_backoff, ArticleService};
use outputs::{json, markdown};
use session::Session;
use topics::Topic;
use utils::ensure_writable_dir;

/// Obtain the article feed CSV text.
///
/// Order of preference: an explicit cached file, then the live service, then
/// the config's fallback CSV. Returns the text and whether it came from the
/// live service. `None` means every source failed and the briefing will be
/// built entirely from the mock catalog.
#[instrument(level = "info", skip_all)]
async fn acquire_feed(args: &Cli, config: &AppConfig, topics: &[Topic]) -> (Option<String>, bool) {
    if let Some(path) = &args.cached_csv {
        info!(path, "Loading articles from cached CSV");
        match tokio::fs::read_to_string(path).await {
            Ok(text) => return (Some(text), false),
            Err(e) => {
                warn!(path, error = %e, "Failed to read cached CSV");
                return (None, false);
            }
        }
    }

    let live = if args.offline {
        info!("Offline mode; skipping live fetch");
        None
    } else if let Some(api_key) = &args.api_key {
        match ArticleService::new(
            &config.service_url,
            api_key,
            Duration::from_secs(config.request_timeout_secs),
        ) {
            Ok(service) => {
                if service.health().await {
                    match fetch_with_backoff(service, topics).await {
                        Ok(text) => Some(text),
                        Err(e) => {
                            warn!(error = %e, "Unable to fetch live articles; using cached headlines");
                            None
                        }
                    }
                } else {
                    warn!("Unable to connect to article service; using cached headlines");
                    None
                }
            }
            Err(e) => {
                warn!(error = %e, "Article service unavailable; using cached headlines");
                None
            }
        }
    } else {
        info!("No API key provided; using cached headlines");
        None
    };

    if live.is_some() {
        return (live, true);
    }

    // Last resort before the mock catalog: the config's fallback CSV.
    if let Some(path) = &config.cached_csv {
        info!(path, "Falling back to configured cached CSV");
        match tokio::fs::read_to_string(path).await {
            Ok(text) => return (Some(text), false),
            Err(e) => warn!(path, error = %e, "Failed to read fallback CSV"),
        }
    }

    (None, false)
}

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("briefly starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.output_dir, ?args.topics, "Parsed CLI arguments");

    // Early check: ensure the output dir is writable
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Load config & session ----
    let config = AppConfig::load(args.config.as_deref()).await?;
    let session = Session::load(&args.session_file).await;
    match session.display_name() {
        Some(name) => info!(user = %name, "Generating briefing for signed-in user"),
        None => info!("Generating anonymous briefing"),
    }

    // ---- Resolve topic selection ----
    let topics: Vec<Topic> = if args.topics.is_empty() {
        info!(defaults = ?config.default_topics, "No topics given; using config defaults");
        config.default_topic_set()
    } else {
        args.topics
            .iter()
            .map(|t| t.parse().expect("Topic::from_str is infallible"))
            .unique()
            .collect()
    };
    ensure_enough_topics(&topics)?;
    info!(topics = ?topics.iter().map(|t| t.slug().to_string()).collect::<Vec<_>>(), "Topic selection resolved");

    // ---- Acquire and parse the feed ----
    let (feed_text, feed_is_live) = acquire_feed(&args, &config, &topics).await;
    let records = match &feed_text {
        Some(text) => {
            let records = csv::parse_records(text);
            info!(count = records.len(), live = feed_is_live, "Loaded articles from CSV");
            if records.is_empty() {
                warn!("No articles found in CSV; using mock headlines");
            }
            records
        }
        None => {
            warn!("No article feed available; using mock headlines");
            Vec::new()
        }
    };

    // ---- Assemble the edition ----
    let briefing = build_briefing(&topics, &records, feed_is_live, &session);
    info!(
        edition = %briefing.time_of_day,
        date = %briefing.local_date,
        headlines = briefing.headline_count(),
        "Briefing assembled"
    );

    // ---- JSON output ----
    match json::write_briefing(&briefing, &args.output_dir).await {
        Ok(path) => info!(%path, "Wrote briefing JSON"),
        Err(e) => error!(error = %e, "Failed to write briefing JSON"),
    }

    // ---- Markdown output ----
    let md = markdown::briefing_to_markdown(&briefing);
    let md_path = format!(
        "{}/{}_{}.md",
        args.output_dir, briefing.local_date, briefing.time_of_day
    );
    info!(path = %md_path, "Writing Markdown");
    if let Err(e) = tokio::fs::write(&md_path, md).await {
        error!(path = %md_path, error = %e, "Failed writing Markdown");
    } else {
        info!(path = %md_path, "Wrote briefing rundown");
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        date = %Local::now().date_naive(),
        "Execution complete"
    );

    Ok(())
}
