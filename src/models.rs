//! Data models for headlines and briefing editions.
//!
//! This module defines the core data structures used throughout the
//! application:
//! - [`Headline`]: A single selectable article headline
//! - [`TopicSection`]: Headlines for one topic within an edition
//! - [`Briefing`]: One complete briefing edition, serialized to JSON/Markdown
//!
//! It also owns the conversion from raw CSV [`Record`]s to [`Headline`]s,
//! which absorbs two known quirks of the upstream feed: publisher cells that
//! are Python dict reprs, and titles that carry a trailing ` - Source`
//! suffix.

use crate::csv::Record;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Matches a trailing ` - Source` or ` | Source` suffix on a headline title.
static TITLE_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*[-|]\s*[^-|]+$").unwrap());

/// Maximum summary length when falling back to truncated article text.
const SUMMARY_MAX_CHARS: usize = 150;

/// A single article headline offered for a briefing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Headline {
    /// The headline text, with any trailing source suffix stripped.
    pub title: String,
    /// The publisher name, e.g. "Reuters".
    pub source: String,
    /// Link to the full article; `"#"` when unknown.
    pub url: String,
    /// Short description, or a truncated slice of the article body.
    #[serde(default)]
    pub summary: String,
}

impl Headline {
    /// Construct a canned headline with no summary, for the mock catalog.
    pub fn mock(title: &str, source: &str, url: &str) -> Self {
        Headline {
            title: title.to_string(),
            source: source.to_string(),
            url: url.to_string(),
            summary: String::new(),
        }
    }

    /// Build a headline from a parsed CSV record.
    ///
    /// Expects the feed's column names (`topic`, `publisher`, `title`, `url`,
    /// `description`/`text`) but tolerates any of them missing. Returns the
    /// lower-cased topic alongside the headline so callers can group without
    /// re-reading the record.
    pub fn from_record(record: &Record) -> (String, Headline) {
        let topic = record
            .get("topic")
            .filter(|t| !t.is_empty())
            .map(|t| t.to_lowercase())
            .unwrap_or_else(|| "unknown".to_string());

        let source = record
            .get("publisher")
            .filter(|p| !p.is_empty())
            .map(|p| publisher_name(p))
            .unwrap_or_else(|| "Unknown source".to_string());

        let title = record
            .get("title")
            .filter(|t| !t.is_empty())
            .map(|t| clean_title(t))
            .unwrap_or_else(|| "No title".to_string());

        let url = record
            .get("url")
            .filter(|u| !u.is_empty())
            .cloned()
            .unwrap_or_else(|| "#".to_string());

        let summary = record
            .get("description")
            .filter(|d| !d.is_empty())
            .cloned()
            .or_else(|| {
                record
                    .get("text")
                    .filter(|t| !t.is_empty())
                    .map(|t| crate::utils::ellipsize(t, SUMMARY_MAX_CHARS))
            })
            .unwrap_or_default();

        (topic, Headline { title, source, url, summary })
    }
}

/// Extract a publisher name from a feed cell.
///
/// The scraping pipeline sometimes writes the whole publisher object as a
/// Python dict repr, e.g. `{'title': 'Reuters', 'href': '...'}`. Converting
/// single quotes to double quotes usually yields valid JSON; when it doesn't,
/// the raw cell is used as-is.
fn publisher_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        let json_str = trimmed.replace('\'', "\"");
        match serde_json::from_str::<serde_json::Value>(&json_str) {
            Ok(value) => {
                return value
                    .get("title")
                    .and_then(|t| t.as_str())
                    .unwrap_or("Unknown source")
                    .to_string();
            }
            Err(e) => {
                warn!(error = %e, "Invalid publisher format, using raw string");
            }
        }
    }
    raw.to_string()
}

/// Strip a trailing ` - Source` or ` | Source` suffix from a title.
///
/// Only applied when the title actually contains a separator, so hyphenated
/// headlines without a suffix pass through untouched.
fn clean_title(title: &str) -> String {
    if title.contains(" - ") || title.contains(" | ") {
        TITLE_SUFFIX_RE.replace(title, "").trim().to_string()
    } else {
        title.to_string()
    }
}

/// Headlines for one topic within a briefing edition.
#[derive(Debug, Deserialize, Serialize)]
pub struct TopicSection {
    /// Lower-case topic identifier, e.g. `"technology"`.
    pub slug: String,
    /// Display name, e.g. `"Technology"`.
    pub name: String,
    /// Emoji icon for the topic.
    pub icon: String,
    /// Whether the headlines came from the live feed (`true`) or the
    /// mock catalog (`false`).
    pub live: bool,
    /// The headlines in feed order, deduplicated by URL.
    pub headlines: Vec<Headline>,
}

/// One complete briefing edition.
///
/// Each run of the application produces one `Briefing`, serialized to both
/// JSON (for downstream consumers) and Markdown (the readable rundown).
///
/// # Edition Naming
///
/// The `time_of_day` field categorizes editions as:
/// - `"morning"`: 00:00 - 08:00
/// - `"afternoon"`: 08:00 - 16:00
/// - `"evening"`: 16:00 - 24:00
#[derive(Debug, Deserialize, Serialize)]
pub struct Briefing {
    /// The date of generation in `YYYY-MM-DD` format.
    pub local_date: String,
    /// The edition name: "morning", "afternoon", or "evening".
    pub time_of_day: String,
    /// The exact local time of generation.
    pub local_time: String,
    /// Name of the signed-in user this briefing was generated for, if any.
    pub generated_for: Option<String>,
    /// One section per selected topic, in selection order.
    pub sections: Vec<TopicSection>,
}

impl Briefing {
    /// Total number of headlines across all sections.
    pub fn headline_count(&self) -> usize {
        self.sections.iter().map(|s| s.headlines.len()).sum()
    }

    /// Whether every section had live coverage.
    pub fn is_fully_live(&self) -> bool {
        !self.sections.is_empty() && self.sections.iter().all(|s| s.live)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_record_full() {
        let rec = record(&[
            ("topic", "Technology"),
            ("publisher", "Reuters"),
            ("title", "Chips are fast now"),
            ("url", "https://example.com/chips"),
            ("description", "A short description."),
        ]);
        let (topic, headline) = Headline::from_record(&rec);
        assert_eq!(topic, "technology");
        assert_eq!(headline.title, "Chips are fast now");
        assert_eq!(headline.source, "Reuters");
        assert_eq!(headline.url, "https://example.com/chips");
        assert_eq!(headline.summary, "A short description.");
    }

    #[test]
    fn test_from_record_defaults() {
        let (topic, headline) = Headline::from_record(&HashMap::new());
        assert_eq!(topic, "unknown");
        assert_eq!(headline.title, "No title");
        assert_eq!(headline.source, "Unknown source");
        assert_eq!(headline.url, "#");
        assert_eq!(headline.summary, "");
    }

    #[test]
    fn test_publisher_dict_repr() {
        assert_eq!(
            publisher_name("{'href': 'https://reuters.com', 'title': 'Reuters'}"),
            "Reuters"
        );
    }

    #[test]
    fn test_publisher_plain_string() {
        assert_eq!(publisher_name("Associated Press"), "Associated Press");
    }

    #[test]
    fn test_publisher_malformed_dict_falls_back_to_raw() {
        let raw = "{'title': 'O'Reilly'}";
        // Apostrophe breaks the quote substitution; raw string wins.
        assert_eq!(publisher_name(raw), raw);
    }

    #[test]
    fn test_clean_title_strips_source_suffix() {
        assert_eq!(
            clean_title("Markets rally on rate cut - Financial Times"),
            "Markets rally on rate cut"
        );
        assert_eq!(
            clean_title("Storm warning issued | BBC News"),
            "Storm warning issued"
        );
    }

    #[test]
    fn test_clean_title_leaves_plain_titles() {
        assert_eq!(clean_title("A well-known problem"), "A well-known problem");
    }

    #[test]
    fn test_summary_falls_back_to_truncated_text() {
        let long_text = "x".repeat(400);
        let rec = record(&[("title", "T"), ("text", &long_text)]);
        let (_, headline) = Headline::from_record(&rec);
        assert_eq!(headline.summary.chars().count(), 150 + 3);
        assert!(headline.summary.ends_with("..."));
    }

    #[test]
    fn test_briefing_serialization_round_trip() {
        let briefing = Briefing {
            local_date: "2025-05-06".to_string(),
            time_of_day: "evening".to_string(),
            local_time: "20:30:00".to_string(),
            generated_for: Some("Ada".to_string()),
            sections: vec![TopicSection {
                slug: "science".to_string(),
                name: "Science".to_string(),
                icon: "🔬".to_string(),
                live: true,
                headlines: vec![Headline::mock("T", "S", "https://example.com")],
            }],
        };

        let json = serde_json::to_string(&briefing).unwrap();
        let back: Briefing = serde_json::from_str(&json).unwrap();
        assert_eq!(back.local_date, "2025-05-06");
        assert_eq!(back.headline_count(), 1);
        assert!(back.is_fully_live());
    }

    #[test]
    fn test_is_fully_live_mixed_sections() {
        let briefing = Briefing {
            local_date: "2025-05-06".to_string(),
            time_of_day: "morning".to_string(),
            local_time: "07:00:00".to_string(),
            generated_for: None,
            sections: vec![
                TopicSection {
                    slug: "health".to_string(),
                    name: "Health".to_string(),
                    icon: "🏥".to_string(),
                    live: true,
                    headlines: vec![],
                },
                TopicSection {
                    slug: "sports".to_string(),
                    name: "Sports".to_string(),
                    icon: "⚽".to_string(),
                    live: false,
                    headlines: vec![],
                },
            ],
        };
        assert!(!briefing.is_fully_live());
    }
}
