//! Command-line interface definitions.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Secrets and paths can also be provided via environment variables.

use clap::Parser;

/// Command-line arguments for the briefing generator.
///
/// # Examples
///
/// ```sh
/// # Live briefing on the default topics
/// briefly -o ./briefings
///
/// # Explicit topics (at least two)
/// briefly -o ./briefings technology health "space exploration"
///
/// # Rebuild from a previously downloaded feed without touching the service
/// briefly -o ./briefings --cached-csv ./articles.csv
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Topics to brief on; at least two. Defaults come from the config file.
    pub topics: Vec<String>,

    /// Output directory for JSON and Markdown editions
    #[arg(short, long, default_value = "./briefings")]
    pub output_dir: String,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Path to a local articles CSV; skips the article service entirely
    #[arg(long)]
    pub cached_csv: Option<String>,

    /// Skip the live fetch even if an API key is available
    #[arg(long)]
    pub offline: bool,

    /// Article service API key
    #[arg(long, env = "BRIEFLY_API_KEY")]
    pub api_key: Option<String>,

    /// Path to the session file holding the signed-in user
    #[arg(long, env = "BRIEFLY_SESSION_FILE", default_value = "./session.json")]
    pub session_file: String,
}
