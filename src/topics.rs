//! Topic catalog: the closed set of built-in briefing topics plus
//! user-defined custom topics.
//!
//! Built-in topics carry fixed display metadata (name and icon) and a canned
//! headline set used when no live coverage is available. Custom topics get
//! generated placeholder headlines instead.

use crate::models::Headline;
use std::fmt;
use std::str::FromStr;

/// A briefing topic selected by the user.
///
/// The built-in variants are the predefined topics the article service knows
/// how to search for; anything else is carried through as [`Topic::Custom`]
/// with a normalized (trimmed, lower-cased) name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Topic {
    Technology,
    Business,
    Science,
    Health,
    Politics,
    Sports,
    Custom(String),
}

impl Topic {
    /// Human-readable display name, e.g. `"Technology"`.
    pub fn name(&self) -> String {
        match self {
            Topic::Technology => "Technology".to_string(),
            Topic::Business => "Business".to_string(),
            Topic::Science => "Science".to_string(),
            Topic::Health => "Health".to_string(),
            Topic::Politics => "Politics".to_string(),
            Topic::Sports => "Sports".to_string(),
            Topic::Custom(name) => crate::utils::upcase(name),
        }
    }

    /// Emoji icon shown next to the topic in briefing output.
    pub fn icon(&self) -> &'static str {
        match self {
            Topic::Technology => "💻",
            Topic::Business => "📈",
            Topic::Science => "🔬",
            Topic::Health => "🏥",
            Topic::Politics => "🏛️",
            Topic::Sports => "⚽",
            Topic::Custom(_) => "📰",
        }
    }

    /// Lower-case identifier used for CSV grouping and section keys.
    pub fn slug(&self) -> &str {
        match self {
            Topic::Technology => "technology",
            Topic::Business => "business",
            Topic::Science => "science",
            Topic::Health => "health",
            Topic::Politics => "politics",
            Topic::Sports => "sports",
            Topic::Custom(name) => name,
        }
    }

    /// Whether this is one of the predefined topics.
    pub fn is_builtin(&self) -> bool {
        !matches!(self, Topic::Custom(_))
    }

    /// Canned headlines shown when no live articles cover this topic.
    ///
    /// Built-in topics get a fixed editorial set; custom topics get
    /// generated placeholders.
    pub fn mock_headlines(&self) -> Vec<Headline> {
        match self {
            Topic::Technology => vec![
                Headline::mock(
                    "OpenAI Releases GPT-5 with Revolutionary Reasoning Capabilities",
                    "TechCrunch",
                    "https://techcrunch.com/gpt-5-release",
                ),
                Headline::mock(
                    "Apple Vision Pro 2 Features Mind-Control Interface Technology",
                    "The Verge",
                    "https://theverge.com/apple-vision-pro-2",
                ),
                Headline::mock(
                    "Meta's New AI Chip Promises 10x Performance Improvement",
                    "Wired",
                    "https://wired.com/meta-ai-chip",
                ),
                Headline::mock(
                    "Google Quantum Computer Solves Climate Modeling in Minutes",
                    "MIT Technology Review",
                    "https://technologyreview.com/google-quantum",
                ),
                Headline::mock(
                    "Tesla's Neural Implant Enables Paralyzed Patients to Walk Again",
                    "Reuters",
                    "https://reuters.com/tesla-neural-implant",
                ),
            ],
            Topic::Business => vec![
                Headline::mock(
                    "Bitcoin Reaches $150,000 as Institutional Adoption Accelerates",
                    "Financial Times",
                    "https://ft.com/bitcoin-150k",
                ),
                Headline::mock(
                    "Amazon's Drone Delivery Network Now Covers 80% of US Cities",
                    "Bloomberg",
                    "https://bloomberg.com/amazon-drone-delivery",
                ),
                Headline::mock(
                    "Netflix Subscriber Growth Surges 40% with AI-Personalized Content",
                    "Wall Street Journal",
                    "https://wsj.com/netflix-ai-growth",
                ),
                Headline::mock(
                    "Microsoft's AI Revenue Exceeds $50 Billion, Overtaking Cloud Services",
                    "Forbes",
                    "https://forbes.com/microsoft-ai-revenue",
                ),
                Headline::mock(
                    "Uber's Autonomous Fleet Completes 1 Million Safe Rides This Month",
                    "Business Insider",
                    "https://businessinsider.com/uber-autonomous-million",
                ),
            ],
            Topic::Science => vec![
                Headline::mock(
                    "CRISPR Gene Therapy Successfully Cures Type 1 Diabetes in Trials",
                    "Nature",
                    "https://nature.com/crispr-diabetes-cure",
                ),
                Headline::mock(
                    "NASA's Europa Mission Discovers Potential Signs of Microbial Life",
                    "Science Magazine",
                    "https://science.org/nasa-europa-life",
                ),
                Headline::mock(
                    "Fusion Reactor Achieves Net Energy Gain for 30 Consecutive Days",
                    "Physics Today",
                    "https://physicstoday.org/fusion-breakthrough",
                ),
                Headline::mock(
                    "AI Model Predicts Alzheimer's Disease 10 Years Before Symptoms",
                    "New England Journal",
                    "https://nejm.org/ai-alzheimers-prediction",
                ),
                Headline::mock(
                    "Antarctic Ice Sheet Collapse Could Raise Sea Levels by 15 Feet",
                    "Climate Science",
                    "https://climatescience.org/antarctic-collapse",
                ),
            ],
            Topic::Health => vec![
                Headline::mock(
                    "New mRNA Vaccine Shows 95% Effectiveness Against All Cancer Types",
                    "The Lancet",
                    "https://thelancet.com/mrna-cancer-vaccine",
                ),
                Headline::mock(
                    "AI-Powered Drug Discovery Reduces Development Time to 6 Months",
                    "Health Affairs",
                    "https://healthaffairs.org/ai-drug-discovery",
                ),
                Headline::mock(
                    "Longevity Treatment Extends Human Lifespan by 20 Years in Trials",
                    "JAMA",
                    "https://jamanetwork.com/longevity-treatment",
                ),
                Headline::mock(
                    "Virtual Reality Therapy Cures 80% of Chronic Pain Cases",
                    "Mayo Clinic Proceedings",
                    "https://mayoclinicproceedings.org/vr-pain-therapy",
                ),
                Headline::mock(
                    "Robotic Surgery Success Rate Reaches 99.9% with New AI System",
                    "Medical News Today",
                    "https://medicalnewstoday.com/robotic-surgery-ai",
                ),
            ],
            Topic::Politics => vec![
                Headline::mock(
                    "Global Climate Accord Mandates Carbon Neutrality by 2035",
                    "Associated Press",
                    "https://apnews.com/climate-accord-2035",
                ),
                Headline::mock(
                    "US Congress Passes Universal Basic Income Pilot Program",
                    "Washington Post",
                    "https://washingtonpost.com/ubi-pilot-program",
                ),
                Headline::mock(
                    "EU Announces Digital Currency to Replace Traditional Banking",
                    "Politico",
                    "https://politico.eu/digital-currency-banking",
                ),
                Headline::mock(
                    "International AI Governance Treaty Signed by 150 Nations",
                    "Reuters",
                    "https://reuters.com/ai-governance-treaty",
                ),
                Headline::mock(
                    "Space Mining Rights Agreement Reached Between Major Powers",
                    "BBC News",
                    "https://bbc.com/space-mining-agreement",
                ),
            ],
            Topic::Sports => vec![
                Headline::mock(
                    "AI-Enhanced Athletes Break 3 World Records at Tokyo Olympics",
                    "ESPN",
                    "https://espn.com/ai-athletes-olympics",
                ),
                Headline::mock(
                    "Virtual Reality Sports Leagues Attract 500M Global Viewers",
                    "Sports Illustrated",
                    "https://si.com/vr-sports-leagues",
                ),
                Headline::mock(
                    "Biometric Monitoring Prevents 90% of Sports Injuries This Season",
                    "Athletic Business",
                    "https://athleticbusiness.com/biometric-monitoring",
                ),
                Headline::mock(
                    "Sustainable Sports Venues Powered Entirely by Renewable Energy",
                    "Green Sports Alliance",
                    "https://greensportsalliance.org/renewable-venues",
                ),
                Headline::mock(
                    "Neural Interface Allows Paralyzed Athletes to Compete Virtually",
                    "Paralympic News",
                    "https://paralympic.org/neural-interface-athletes",
                ),
            ],
            Topic::Custom(name) => vec![
                Headline::mock(&format!("Latest developments in {name}"), "News Source", "#"),
                Headline::mock(&format!("{name} industry update"), "Industry Today", "#"),
                Headline::mock(&format!("Breaking: {name} news"), "Breaking News", "#"),
                Headline::mock(&format!("{name} market analysis"), "Market Watch", "#"),
                Headline::mock(&format!("{name} trends and insights"), "Trend Report", "#"),
            ],
        }
    }
}

impl FromStr for Topic {
    type Err = std::convert::Infallible;

    /// Parses case-insensitively; unrecognized names become [`Topic::Custom`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Ok(match normalized.as_str() {
            "technology" => Topic::Technology,
            "business" => Topic::Business,
            "science" => Topic::Science,
            "health" => Topic::Health,
            "politics" => Topic::Politics,
            "sports" => Topic::Sports,
            _ => Topic::Custom(normalized),
        })
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_builtin_topics() {
        assert_eq!("technology".parse::<Topic>().unwrap(), Topic::Technology);
        assert_eq!("Sports".parse::<Topic>().unwrap(), Topic::Sports);
        assert_eq!("  POLITICS ".parse::<Topic>().unwrap(), Topic::Politics);
    }

    #[test]
    fn test_parse_custom_topic_normalizes() {
        assert_eq!(
            "  Space Exploration ".parse::<Topic>().unwrap(),
            Topic::Custom("space exploration".to_string())
        );
    }

    #[test]
    fn test_builtin_metadata() {
        assert_eq!(Topic::Technology.name(), "Technology");
        assert_eq!(Topic::Technology.icon(), "💻");
        assert_eq!(Topic::Technology.slug(), "technology");
        assert!(Topic::Technology.is_builtin());
    }

    #[test]
    fn test_custom_metadata() {
        let topic = Topic::Custom("crypto".to_string());
        assert_eq!(topic.name(), "Crypto");
        assert_eq!(topic.icon(), "📰");
        assert_eq!(topic.slug(), "crypto");
        assert!(!topic.is_builtin());
    }

    #[test]
    fn test_builtin_mock_headlines() {
        for topic in [
            Topic::Technology,
            Topic::Business,
            Topic::Science,
            Topic::Health,
            Topic::Politics,
            Topic::Sports,
        ] {
            let mocks = topic.mock_headlines();
            assert_eq!(mocks.len(), 5, "topic {topic} should have 5 mocks");
            assert!(mocks.iter().all(|h| !h.title.is_empty()));
        }
    }

    #[test]
    fn test_custom_mock_headlines_mention_topic() {
        let mocks = Topic::Custom("quantum".to_string()).mock_headlines();
        assert_eq!(mocks.len(), 5);
        assert!(mocks[0].title.contains("quantum"));
        assert_eq!(mocks[0].url, "#");
    }
}
