//! JSON output generation.
//!
//! Serializes briefing editions for machine consumers. Files are organized
//! by date with edition names:
//! ```text
//! output_dir/
//! └── 2025-05-06/
//!     ├── morning.json
//!     ├── afternoon.json
//!     └── evening.json
//! ```
//! Re-running an edition in the same slot overwrites it, which is the
//! desired behavior: the latest run is the edition.

use crate::models::Briefing;
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write a [`Briefing`] to `{output_dir}/{date}/{time_of_day}.json`.
///
/// Creates the date directory if needed and returns the path written.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir))]
pub async fn write_briefing(
    briefing: &Briefing,
    output_dir: &str,
) -> Result<String, Box<dyn Error>> {
    let json = serde_json::to_string(briefing)?;

    let date_dir = format!("{}/{}", output_dir, briefing.local_date);
    info!(%date_dir, "Ensuring JSON directory exists");
    if let Err(e) = fs::create_dir_all(&date_dir).await {
        error!(%date_dir, error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = format!("{}/{}.json", date_dir, briefing.time_of_day);
    info!(path = %path, "Writing JSON");
    fs::write(&path, json).await?;
    info!(path = %path, "Wrote briefing JSON file");

    Ok(path)
}
