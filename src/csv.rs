//! Lenient CSV tokenizer for article feeds.
//!
//! The article service hands back a CSV file produced by an upstream scraping
//! pipeline. The data is messy: article bodies contain commas, embedded
//! newlines, and quoted speech, and the occasional row is short a column.
//! This parser is deliberately forgiving — it never raises an error for
//! malformed input. Under-length rows are dropped, over-length rows are
//! truncated to the header width, and blank lines disappear. Callers detect
//! "no data" by checking for an empty result and fall back to the mock
//! headline catalog.
//!
//! # Grammar
//!
//! A single left-to-right scan with one character of lookahead and four
//! pieces of state: finished rows, the current row, the current field buffer,
//! and an in-quotes flag.
//!
//! - `"` toggles quoted mode. Inside quotes, `""` emits a literal quote.
//!   The toggle applies anywhere in a field, not only at field boundaries;
//!   `ab"cd"ef` parses as `abcdef` rather than erroring. Upstream feeds
//!   contain rows that depend on this, so it is kept as-is.
//! - `,` outside quotes closes the current field.
//! - `\n` or `\r` outside quotes closes the current row; `\r\n` counts as a
//!   single terminator. Rows whose fields are all empty are not emitted.
//! - Everything else, including newlines inside quotes, is field data.
//! - End of input flushes any pending field and row under the same rules.

use std::collections::HashMap;
use tracing::{debug, warn};

/// One parsed data row, keyed by lower-cased header name.
pub type Record = HashMap<String, String>;

/// Tokenize raw CSV text into rows of fields.
///
/// Handles quoted fields containing commas, escaped quotes (`""`), and
/// embedded newlines. Blank lines yield no row. Trailing content with no
/// final newline is still captured.
pub fn parse_rows(input: &str) -> Vec<Vec<String>> {
    let chars: Vec<char> = input.chars().collect();
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        match c {
            '"' => {
                if in_quotes && next == Some('"') {
                    // Escaped quote within a quoted field.
                    field.push('"');
                    i += 2;
                    continue;
                }
                in_quotes = !in_quotes;
            }
            ',' if !in_quotes => {
                row.push(std::mem::take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if !field.is_empty() || !row.is_empty() {
                    row.push(std::mem::take(&mut field));
                    if row.iter().any(|f| !f.is_empty()) {
                        rows.push(std::mem::take(&mut row));
                    } else {
                        row.clear();
                    }
                }
                // \r\n is one terminator.
                if c == '\r' && next == Some('\n') {
                    i += 1;
                }
            }
            _ => field.push(c),
        }

        i += 1;
    }

    // Flush whatever is pending at end of input.
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        if row.iter().any(|f| !f.is_empty()) {
            rows.push(row);
        }
    }

    rows
}

/// Parse CSV text into records keyed by header name.
///
/// Row 0 supplies the column names (trimmed, lower-cased). Each subsequent
/// row with at least as many fields as the header becomes a [`Record`];
/// shorter rows are silently dropped and extra trailing fields are ignored.
/// Duplicate header names resolve to the last occurrence.
pub fn parse_records(input: &str) -> Vec<Record> {
    let rows = parse_rows(input);

    let Some((header, data)) = rows.split_first() else {
        warn!("No rows found in CSV");
        return Vec::new();
    };

    let headers: Vec<String> = header.iter().map(|h| h.trim().to_lowercase()).collect();
    debug!(?headers, "Parsed CSV header row");

    let mut records = Vec::new();
    for values in data {
        if values.len() < headers.len() {
            debug!(
                fields = values.len(),
                expected = headers.len(),
                "Dropping under-length CSV row"
            );
            continue;
        }
        let record: Record = headers
            .iter()
            .enumerate()
            .map(|(idx, h)| (h.clone(), values.get(idx).cloned().unwrap_or_default()))
            .collect();
        records.push(record);
    }

    debug!(count = records.len(), "Parsed CSV records");
    records
}
