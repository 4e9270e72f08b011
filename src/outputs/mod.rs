//! Output generation modules for briefing editions.
//!
//! # Submodules
//!
//! - [`json`]: Writes [`crate::models::Briefing`] data to JSON files for
//!   downstream consumers (e.g. the broadcast generator)
//! - [`markdown`]: Renders a briefing as a readable Markdown rundown
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── 2025-05-06/
//! │   ├── morning.json
//! │   ├── afternoon.json
//! │   └── evening.json
//! ├── 2025-05-06_morning.md
//! └── 2025-05-06_evening.md
//! ```

pub mod json;
pub mod markdown;
