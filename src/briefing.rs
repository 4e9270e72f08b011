//! Briefing assembly: grouping feed records by topic and filling gaps from
//! the mock catalog.
//!
//! The feed is best-effort, so assembly never fails: a topic with no live
//! coverage gets its canned headlines and the section is marked not live.

use crate::csv::Record;
use crate::models::{Briefing, Headline, TopicSection};
use crate::session::Session;
use crate::topics::Topic;
use crate::utils::time_of_day;
use chrono::Local;
use itertools::Itertools;
use std::collections::HashMap;
use std::error::Error;
use tracing::{info, instrument, warn};

/// A briefing needs contrast between stories, so one topic is not enough.
pub const MIN_TOPICS: usize = 2;

/// Validate the topic selection size.
pub fn ensure_enough_topics(topics: &[Topic]) -> Result<(), Box<dyn Error>> {
    if topics.len() < MIN_TOPICS {
        return Err(format!(
            "Please select at least {MIN_TOPICS} topics to continue (got {})",
            topics.len()
        )
        .into());
    }
    Ok(())
}

/// Group feed records into headlines keyed by lower-cased topic.
///
/// Feed order is preserved within each topic. Duplicate URLs are dropped;
/// headlines without a URL (`"#"`) are never treated as duplicates of each
/// other.
pub fn group_by_topic(records: &[Record]) -> HashMap<String, Vec<Headline>> {
    let mut grouped: HashMap<String, Vec<Headline>> = HashMap::new();
    for record in records {
        let (topic, headline) = Headline::from_record(record);
        grouped.entry(topic).or_default().push(headline);
    }

    grouped
        .into_iter()
        .map(|(topic, headlines)| {
            let deduped: Vec<Headline> = headlines
                .into_iter()
                .enumerate()
                .unique_by(|(i, h)| {
                    if h.url == "#" {
                        format!("#{i}")
                    } else {
                        h.url.clone()
                    }
                })
                .map(|(_, h)| h)
                .collect();
            (topic, deduped)
        })
        .collect()
}

/// Assemble a briefing edition from the selected topics and parsed feed.
///
/// `feed_is_live` records whether `records` came from the article service
/// (as opposed to a cached file). Topics missing from the feed fall back to
/// the mock catalog individually, so one dry topic doesn't spoil the rest.
#[instrument(level = "info", skip_all, fields(topics = topics.len(), records = records.len()))]
pub fn build_briefing(
    topics: &[Topic],
    records: &[Record],
    feed_is_live: bool,
    session: &Session,
) -> Briefing {
    let mut grouped = group_by_topic(records);

    let sections: Vec<TopicSection> = topics
        .iter()
        .map(|topic| {
            let live_headlines = grouped.remove(topic.slug()).unwrap_or_default();
            let (live, headlines) = if live_headlines.is_empty() {
                warn!(topic = %topic, "No articles found for topic; using mock headlines");
                (false, topic.mock_headlines())
            } else {
                info!(topic = %topic, count = live_headlines.len(), "Topic has feed coverage");
                (feed_is_live, live_headlines)
            };
            TopicSection {
                slug: topic.slug().to_string(),
                name: topic.name(),
                icon: topic.icon().to_string(),
                live,
                headlines,
            }
        })
        .collect();

    let briefing = Briefing {
        local_date: Local::now().date_naive().to_string(),
        time_of_day: time_of_day(),
        local_time: Local::now().time().to_string(),
        generated_for: session.display_name(),
        sections,
    };

    info!(
        sections = briefing.sections.len(),
        headlines = briefing.headline_count(),
        fully_live = briefing.is_fully_live(),
        "Assembled briefing"
    );
    briefing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(topic: &str, title: &str, url: &str) -> Record {
        [
            ("topic".to_string(), topic.to_string()),
            ("publisher".to_string(), "Wire".to_string()),
            ("title".to_string(), title.to_string()),
            ("url".to_string(), url.to_string()),
            ("description".to_string(), "desc".to_string()),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_ensure_enough_topics() {
        assert!(ensure_enough_topics(&[Topic::Science]).is_err());
        assert!(ensure_enough_topics(&[Topic::Science, Topic::Health]).is_ok());
    }

    #[test]
    fn test_group_by_topic_lowercases_and_groups() {
        let records = vec![
            record("Technology", "A", "https://example.com/a"),
            record("technology", "B", "https://example.com/b"),
            record("Health", "C", "https://example.com/c"),
        ];
        let grouped = group_by_topic(&records);
        assert_eq!(grouped["technology"].len(), 2);
        assert_eq!(grouped["health"].len(), 1);
    }

    #[test]
    fn test_group_by_topic_dedupes_urls() {
        let records = vec![
            record("science", "A", "https://example.com/same"),
            record("science", "A again", "https://example.com/same"),
            record("science", "B", "https://example.com/other"),
        ];
        let grouped = group_by_topic(&records);
        assert_eq!(grouped["science"].len(), 2);
        assert_eq!(grouped["science"][0].title, "A");
    }

    #[test]
    fn test_group_by_topic_keeps_multiple_placeholder_urls() {
        let mut a = record("science", "A", "");
        a.remove("url");
        let mut b = record("science", "B", "");
        b.remove("url");
        let grouped = group_by_topic(&[a, b]);
        assert_eq!(grouped["science"].len(), 2);
    }

    #[test]
    fn test_build_briefing_live_sections() {
        let records = vec![record("technology", "A", "https://example.com/a")];
        let briefing = build_briefing(
            &[Topic::Technology, Topic::Sports],
            &records,
            true,
            &Session::default(),
        );

        assert_eq!(briefing.sections.len(), 2);

        let tech = &briefing.sections[0];
        assert_eq!(tech.slug, "technology");
        assert!(tech.live);
        assert_eq!(tech.headlines.len(), 1);

        // No sports coverage in the feed: mock fallback, marked not live.
        let sports = &briefing.sections[1];
        assert!(!sports.live);
        assert_eq!(sports.headlines.len(), 5);
    }

    #[test]
    fn test_build_briefing_cached_feed_never_live() {
        let records = vec![record("technology", "A", "https://example.com/a")];
        let briefing = build_briefing(
            &[Topic::Technology, Topic::Business],
            &records,
            false,
            &Session::default(),
        );
        assert!(!briefing.sections[0].live);
    }

    #[test]
    fn test_build_briefing_empty_feed_all_mocks() {
        let briefing = build_briefing(
            &[Topic::Health, Topic::Politics],
            &[],
            true,
            &Session::default(),
        );
        assert!(!briefing.is_fully_live());
        assert_eq!(briefing.headline_count(), 10);
    }

    #[test]
    fn test_build_briefing_custom_topic_fallback() {
        let topic = Topic::Custom("space exploration".to_string());
        let briefing = build_briefing(
            &[topic, Topic::Science],
            &[],
            true,
            &Session::default(),
        );
        assert_eq!(briefing.sections[0].slug, "space exploration");
        assert!(briefing.sections[0].headlines[0]
            .title
            .contains("space exploration"));
    }

    #[test]
    fn test_build_briefing_records_user() {
        let mut session = Session::default();
        session.login(
            crate::session::User {
                name: "Grace Hopper".to_string(),
                email: "grace@example.com".to_string(),
                avatar: None,
            },
            false,
        );
        let briefing = build_briefing(
            &[Topic::Science, Topic::Health],
            &[],
            false,
            &session,
        );
        assert_eq!(briefing.generated_for.as_deref(), Some("Grace"));
    }
}
