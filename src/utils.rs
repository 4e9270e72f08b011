//! Utility functions for edition naming, string manipulation, and file
//! system checks.

use chrono::{Local, NaiveTime};
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Classify current time into morning, afternoon, or evening.
///
/// Determines the edition name for briefing output. The boundaries are:
/// - **Morning**: 00:00 - 08:00
/// - **Afternoon**: 08:00 - 16:00
/// - **Evening**: 16:00 - 24:00
#[instrument]
pub fn time_of_day() -> String {
    let morning_high = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
    let afternoon_high = NaiveTime::from_hms_opt(16, 0, 0).unwrap();

    let tod = Local::now().time();
    let which = if tod < morning_high {
        "morning"
    } else if tod < afternoon_high {
        "afternoon"
    } else {
        "evening"
    };
    tracing::debug!(%tod, %which, "Computed time_of_day");
    which.to_string()
}

/// Capitalize the first character of a string.
///
/// Used for formatting edition and custom-topic names
/// (e.g. "morning" -> "Morning").
pub fn upcase(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut at `max` bytes with an ellipsis and byte-count
/// indicator appended. The caller is expected to pass ASCII-safe limits;
/// multi-byte content is cut at the nearest char boundary below `max`.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Truncate text to at most `max` characters, appending `...` when cut.
///
/// Used to derive headline summaries from full article bodies. Operates on
/// characters, not bytes, so multi-byte text never splits mid-codepoint.
pub fn ellipsize(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{truncated}...")
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then probe-writes a file and removes it.
/// Run before the pipeline so a bad output path fails fast instead of after
/// the feed has been fetched.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    // Small sync write; simpler error surface than async here.
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_upcase() {
        assert_eq!(upcase("morning"), "Morning");
        assert_eq!(upcase("crypto"), "Crypto");
        assert_eq!(upcase(""), "");
        assert_eq!(upcase("a"), "A");
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_ellipsize_short_text_untouched() {
        assert_eq!(ellipsize("short", 150), "short");
    }

    #[test]
    fn test_ellipsize_cuts_on_chars() {
        let s = "é".repeat(200);
        let result = ellipsize(&s, 150);
        assert_eq!(result.chars().count(), 153);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_edition_boundaries() {
        // Boundary logic mirrored here since Local::now() can't be mocked.
        let morning_high = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        let afternoon_high = NaiveTime::from_hms_opt(16, 0, 0).unwrap();

        let six_thirty = NaiveTime::from_hms_opt(6, 30, 0).unwrap();
        assert!(six_thirty < morning_high);

        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        assert!(noon >= morning_high && noon < afternoon_high);

        let eight_pm = NaiveTime::from_hms_opt(20, 0, 0).unwrap();
        assert!(eight_pm >= afternoon_high);
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_missing_dir() {
        let dir = std::env::temp_dir().join("briefly_utils_test_dir");
        let path = dir.to_str().unwrap().to_string();
        let _ = std::fs::remove_dir_all(&dir);

        ensure_writable_dir(&path).await.unwrap();
        assert!(dir.is_dir());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
