//! Markdown rundown generation.
//!
//! Renders a briefing edition as a human-readable document: an edition
//! header, one section per topic with its icon, and a bulleted headline list
//! with source, summary, and link. Sections built from the mock catalog are
//! labeled as cached so nobody mistakes placeholder headlines for live news.

use crate::models::Briefing;
use crate::utils::upcase;

/// Render a [`Briefing`] as Markdown.
pub fn briefing_to_markdown(briefing: &Briefing) -> String {
    let mut md = String::new();

    md.push_str(&format!(
        "# {} Briefing — {}\n\n",
        upcase(&briefing.time_of_day),
        briefing.local_date
    ));
    match &briefing.generated_for {
        Some(name) => md.push_str(&format!(
            "Generated for {} at {}.\n\n",
            name, briefing.local_time
        )),
        None => md.push_str(&format!("Generated at {}.\n\n", briefing.local_time)),
    }

    for section in &briefing.sections {
        md.push_str(&format!("## {} {}\n\n", section.icon, section.name));
        if !section.live {
            md.push_str("_Cached headlines — no live coverage for this topic._\n\n");
        }
        for headline in &section.headlines {
            md.push_str(&format!("- **{}** — {}\n", headline.title, headline.source));
            if !headline.summary.is_empty() {
                md.push_str(&format!("  {}\n", headline.summary));
            }
            if headline.url != "#" {
                md.push_str(&format!("  <{}>\n", headline.url));
            }
        }
        md.push('\n');
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Headline, TopicSection};

    fn sample_briefing() -> Briefing {
        Briefing {
            local_date: "2025-05-06".to_string(),
            time_of_day: "evening".to_string(),
            local_time: "19:45:00".to_string(),
            generated_for: Some("Ada".to_string()),
            sections: vec![
                TopicSection {
                    slug: "technology".to_string(),
                    name: "Technology".to_string(),
                    icon: "💻".to_string(),
                    live: true,
                    headlines: vec![Headline {
                        title: "Chips are fast now".to_string(),
                        source: "Reuters".to_string(),
                        url: "https://example.com/chips".to_string(),
                        summary: "Very fast indeed.".to_string(),
                    }],
                },
                TopicSection {
                    slug: "sports".to_string(),
                    name: "Sports".to_string(),
                    icon: "⚽".to_string(),
                    live: false,
                    headlines: vec![Headline::mock("Placeholder", "News Source", "#")],
                },
            ],
        }
    }

    #[test]
    fn test_header_and_user() {
        let md = briefing_to_markdown(&sample_briefing());
        assert!(md.starts_with("# Evening Briefing — 2025-05-06\n"));
        assert!(md.contains("Generated for Ada at 19:45:00."));
    }

    #[test]
    fn test_live_section_rendering() {
        let md = briefing_to_markdown(&sample_briefing());
        assert!(md.contains("## 💻 Technology"));
        assert!(md.contains("- **Chips are fast now** — Reuters"));
        assert!(md.contains("  Very fast indeed."));
        assert!(md.contains("<https://example.com/chips>"));
    }

    #[test]
    fn test_cached_section_is_labeled() {
        let md = briefing_to_markdown(&sample_briefing());
        assert!(md.contains("## ⚽ Sports"));
        assert!(md.contains("_Cached headlines"));
        // Placeholder URLs are not rendered as links.
        assert!(!md.contains("<#>"));
    }

    #[test]
    fn test_anonymous_header() {
        let mut briefing = sample_briefing();
        briefing.generated_for = None;
        let md = briefing_to_markdown(&briefing);
        assert!(md.contains("Generated at 19:45:00."));
        assert!(!md.contains("Generated for"));
    }
}
