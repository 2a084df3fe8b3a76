//! Content and SEO strategy model
//!
//! A [`ContentStrategy`] is produced wholesale by one generation call. Saved
//! strategies carry the keyword they were generated for and a creation
//! timestamp that doubles as their id.

use chrono::{SecondsFormat, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::sync::OnceLock;

/// One search intent behind the keyword
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordUserIntent {
    /// Intent type (e.g., "Informational")
    pub intent: String,
    /// What the searcher wants to achieve
    pub description: String,
    /// Queries representative of this intent
    pub example_queries: Vec<String>,
}

impl KeywordUserIntent {
    /// Classify the free-text intent
    pub fn kind(&self) -> IntentKind {
        IntentKind::classify(&self.intent)
    }
}

/// Coarse intent family, used to pick an icon or badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentKind {
    /// Looking for information
    Informational,
    /// Ready to act
    Transactional,
    /// Comparing options
    Commercial,
    /// Looking for a specific site
    Navigational,
    /// Anything else
    Other,
}

impl IntentKind {
    /// Classify a free-text intent label
    pub fn classify(intent: &str) -> Self {
        let lower = intent.to_lowercase();
        if lower.contains("informational") {
            IntentKind::Informational
        } else if lower.contains("transactional") {
            IntentKind::Transactional
        } else if lower.contains("commercial") || lower.contains("investigation") {
            IntentKind::Commercial
        } else if lower.contains("navigational") {
            IntentKind::Navigational
        } else {
            IntentKind::Other
        }
    }
}

/// Supporting topic of a content pillar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterTopic {
    /// Topic title
    pub cluster_title: String,
    /// Search intent the topic answers
    pub user_intent: String,
    /// Short pitch
    pub cluster_description: String,
    /// Content format (e.g., "How-to Guide")
    pub suggested_format: String,
    /// Long-tail keywords
    pub specific_keywords: Vec<String>,
    /// Draft copy
    pub draft_content: String,
}

/// Main content pillar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPillar {
    /// Pillar title
    pub pillar_title: String,
    /// What the pillar covers
    pub pillar_description: String,
    /// Hook that sets the content apart
    pub content_angle: String,
    /// Supporting topics
    pub cluster_topics: Vec<ClusterTopic>,
}

/// Competitor ranking for the keyword
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    /// Site or company name
    pub competitor_name: String,
    /// Their approach for this keyword
    pub strategy_summary: String,
    /// What they do well
    pub strengths: Vec<String>,
    /// Gaps to exploit
    pub weaknesses: Vec<String>,
}

/// Roadmap for appearing in AI search overviews
///
/// Flattened into the strategy on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AiOverview {
    /// Introduction
    #[serde(rename = "aiOverviewIntro")]
    pub intro: String,
    /// Content structuring tips
    #[serde(rename = "aiOverviewContent")]
    pub content_tips: Vec<String>,
    /// Schema markup recommendations
    #[serde(rename = "aiOverviewSchema")]
    pub schema_tips: Vec<String>,
    /// E-E-A-T signal enhancements
    #[serde(rename = "aiOverviewEEAT")]
    pub eeat_tips: Vec<String>,
}

/// Content and SEO strategy for one keyword
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentStrategy {
    /// Intent analysis
    #[serde(rename = "keywordUserIntents")]
    pub intents: Vec<KeywordUserIntent>,
    /// AI overview roadmap
    #[serde(flatten)]
    pub ai_overview: AiOverview,
    /// Content pillars
    pub content_pillars: Vec<ContentPillar>,
    /// Competitor landscape
    pub competitor_analysis: Vec<Competitor>,
}

impl ContentStrategy {
    /// Title of the first pillar, if any
    pub fn first_pillar_title(&self) -> Option<&str> {
        self.content_pillars.first().map(|p| p.pillar_title.as_str())
    }

    /// Render the plain-text export document
    pub fn to_text(&self, keyword: &str) -> String {
        let mut text = format!("Content & SEO Strategy for \"{}\"\n\n", keyword);
        let _ = self.write_text(&mut text);
        text
    }

    fn write_text(&self, out: &mut String) -> std::fmt::Result {
        self.write_intents(out)?;
        self.write_pillars(out)?;
        self.write_ai_overview(out)?;
        self.write_competitors(out)
    }

    fn write_intents(&self, out: &mut String) -> std::fmt::Result {
        if self.intents.is_empty() {
            return Ok(());
        }
        out.push_str("## 🎯 User Intent Analysis ##\n\n");
        for intent in &self.intents {
            writeln!(out, "### Intent: {} ###", intent.intent)?;
            writeln!(out, "Description: {}", intent.description)?;
            writeln!(out, "Example Queries:\n{}\n", bullet_list(&intent.example_queries))?;
        }
        Ok(())
    }

    fn write_pillars(&self, out: &mut String) -> std::fmt::Result {
        if self.content_pillars.is_empty() {
            return Ok(());
        }
        out.push_str("## 🌳 Content Pillar Deep Dive ##\n\n");
        for (index, pillar) in self.content_pillars.iter().enumerate() {
            writeln!(out, "### Pillar {}: {} ###", index + 1, pillar.pillar_title)?;
            writeln!(out, "{}\n", pillar.pillar_description)?;
            writeln!(out, "💡 Content Angle: {}\n", pillar.content_angle)?;
            for cluster in &pillar.cluster_topics {
                writeln!(out, "#### Cluster: {} ####", cluster.cluster_title)?;
                if !cluster.user_intent.is_empty() {
                    writeln!(out, "🎯 User Intent: {}\n", cluster.user_intent)?;
                }
                writeln!(out, "* {} *\n", cluster.cluster_description)?;
                writeln!(out, "- Suggested Format: {}", cluster.suggested_format)?;
                writeln!(out, "- Keywords: {}", cluster.specific_keywords.join(", "))?;
                if !cluster.draft_content.is_empty() {
                    writeln!(out, "- Content Draft: \"{}\"", cluster.draft_content)?;
                }
                out.push('\n');
            }
        }
        Ok(())
    }

    fn write_ai_overview(&self, out: &mut String) -> std::fmt::Result {
        let overview = &self.ai_overview;
        out.push_str("## 🚀 Google AI Overview Strategy ##\n\n");
        writeln!(out, "### Introduction ###\n{}\n", overview.intro)?;

        let sections = [
            ("Content Structuring Tips", &overview.content_tips),
            ("Schema Markup Recommendations", &overview.schema_tips),
            ("E-E-A-T Signal Enhancements", &overview.eeat_tips),
        ];
        for (heading, points) in sections {
            writeln!(out, "### {} ###", heading)?;
            for point in points {
                writeln!(out, "- {}", point)?;
            }
            out.push('\n');
        }
        Ok(())
    }

    fn write_competitors(&self, out: &mut String) -> std::fmt::Result {
        if self.competitor_analysis.is_empty() {
            return Ok(());
        }
        out.push_str("## 👥 Competitor Landscape ##\n\n");
        for competitor in &self.competitor_analysis {
            writeln!(out, "### {} ###", competitor.competitor_name)?;
            writeln!(out, "Summary: {}", competitor.strategy_summary)?;
            writeln!(out, "Strengths:\n{}", bullet_list(&competitor.strengths))?;
            writeln!(out, "Weaknesses:\n{}\n", bullet_list(&competitor.weaknesses))?;
        }
        Ok(())
    }
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// File name for an exported strategy
///
/// Every character outside `[a-z0-9]` (ignoring case) becomes `_`, and the
/// result is lowercased.
pub fn export_file_name(keyword: &str) -> String {
    static UNSAFE_CHARS: OnceLock<Regex> = OnceLock::new();
    let re = UNSAFE_CHARS.get_or_init(|| Regex::new(r"(?i)[^a-z0-9]").unwrap());

    let safe = re.replace_all(keyword, "_").to_lowercase();
    format!("content-strategy-{}.txt", safe)
}

// =============================================================================
// Saved Strategies
// =============================================================================

/// A strategy the user chose to keep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedStrategy {
    /// Creation timestamp (RFC 3339, UTC)
    pub id: String,
    /// Keyword the strategy was generated for
    pub keyword: String,
    /// The strategy itself
    #[serde(flatten)]
    pub strategy: ContentStrategy,
}

impl SavedStrategy {
    /// Stamp a strategy with the current time
    pub fn new(keyword: impl Into<String>, strategy: ContentStrategy) -> Self {
        Self {
            id: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            keyword: keyword.into(),
            strategy,
        }
    }

    /// Check whether this record holds the same strategy for `keyword`
    ///
    /// Two strategies are considered the same when they share the keyword
    /// and the title of their first pillar.
    pub fn is_same_as(&self, keyword: &str, strategy: &ContentStrategy) -> bool {
        self.keyword == keyword
            && self.strategy.first_pillar_title().is_some()
            && self.strategy.first_pillar_title() == strategy.first_pillar_title()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn sample_strategy(first_pillar: &str) -> ContentStrategy {
        ContentStrategy {
            intents: vec![KeywordUserIntent {
                intent: "Transactional".to_string(),
                description: "Muốn vay ngay".to_string(),
                example_queries: vec!["vay nhanh".to_string(), "vay online".to_string()],
            }],
            ai_overview: AiOverview {
                intro: "Intro".to_string(),
                content_tips: vec!["Answer first".to_string()],
                schema_tips: vec!["FAQPage".to_string()],
                eeat_tips: vec!["Author bio".to_string()],
            },
            content_pillars: vec![ContentPillar {
                pillar_title: first_pillar.to_string(),
                pillar_description: "Desc".to_string(),
                content_angle: "Angle".to_string(),
                cluster_topics: vec![ClusterTopic {
                    cluster_title: "Cluster".to_string(),
                    user_intent: "So sánh".to_string(),
                    cluster_description: "Pitch".to_string(),
                    suggested_format: "Guide".to_string(),
                    specific_keywords: vec!["a".to_string(), "b".to_string()],
                    draft_content: "Draft".to_string(),
                }],
            }],
            competitor_analysis: vec![Competitor {
                competitor_name: "Rival".to_string(),
                strategy_summary: "Summary".to_string(),
                strengths: vec!["S1".to_string()],
                weaknesses: vec!["W1".to_string(), "W2".to_string()],
            }],
        }
    }

    #[test]
    fn test_strategy_wire_format_is_flat() {
        let json = serde_json::to_value(sample_strategy("P")).unwrap();

        assert_eq!(json["keywordUserIntents"][0]["exampleQueries"][1], "vay online");
        assert_eq!(json["aiOverviewIntro"], "Intro");
        assert_eq!(json["aiOverviewEEAT"][0], "Author bio");
        assert_eq!(json["contentPillars"][0]["clusterTopics"][0]["draftContent"], "Draft");
        assert_eq!(json["competitorAnalysis"][0]["competitorName"], "Rival");
        assert!(json.get("aiOverview").is_none());
    }

    #[test]
    fn test_saved_strategy_wire_format() {
        let saved = SavedStrategy {
            id: "2024-05-01T10:00:00.000Z".to_string(),
            keyword: "vay tiền".to_string(),
            strategy: sample_strategy("P"),
        };

        let json = serde_json::to_value(&saved).unwrap();
        assert_eq!(json["id"], "2024-05-01T10:00:00.000Z");
        assert_eq!(json["keyword"], "vay tiền");
        assert_eq!(json["contentPillars"][0]["pillarTitle"], "P");

        let back: SavedStrategy = serde_json::from_value(json).unwrap();
        assert_eq!(back, saved);
    }

    #[test]
    fn test_saved_strategy_rejects_missing_fields() {
        let result = serde_json::from_value::<SavedStrategy>(json!({
            "id": "x",
            "keyword": "y",
            "aiOverviewIntro": "i"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_saved_strategy_id_is_rfc3339() {
        let saved = SavedStrategy::new("kw", sample_strategy("P"));
        assert!(chrono::DateTime::parse_from_rfc3339(&saved.id).is_ok());
        assert!(saved.id.ends_with('Z'));
    }

    #[test]
    fn test_is_same_as() {
        let saved = SavedStrategy::new("kw", sample_strategy("Pillar A"));

        assert!(saved.is_same_as("kw", &sample_strategy("Pillar A")));
        assert!(!saved.is_same_as("kw", &sample_strategy("Pillar B")));
        assert!(!saved.is_same_as("other", &sample_strategy("Pillar A")));
    }

    #[test]
    fn test_intent_kind() {
        assert_eq!(IntentKind::classify("Informational"), IntentKind::Informational);
        assert_eq!(IntentKind::classify("TRANSACTIONAL"), IntentKind::Transactional);
        assert_eq!(
            IntentKind::classify("Commercial Investigation"),
            IntentKind::Commercial
        );
        assert_eq!(IntentKind::classify("Navigational"), IntentKind::Navigational);
        assert_eq!(IntentKind::classify("Local"), IntentKind::Other);
        assert_eq!(sample_strategy("P").intents[0].kind(), IntentKind::Transactional);
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(
            export_file_name("Vay mua xe máy"),
            "content-strategy-vay_mua_xe_m_y.txt"
        );
        assert_eq!(export_file_name("iPhone 15"), "content-strategy-iphone_15.txt");
    }

    #[test]
    fn test_to_text() {
        let text = sample_strategy("Pillar A").to_text("vay tiền");

        let expected = "Content & SEO Strategy for \"vay tiền\"\n\n\
## 🎯 User Intent Analysis ##\n\n\
### Intent: Transactional ###\n\
Description: Muốn vay ngay\n\
Example Queries:\n- vay nhanh\n- vay online\n\n\
## 🌳 Content Pillar Deep Dive ##\n\n\
### Pillar 1: Pillar A ###\n\
Desc\n\n\
💡 Content Angle: Angle\n\n\
#### Cluster: Cluster ####\n\
🎯 User Intent: So sánh\n\n\
* Pitch *\n\n\
- Suggested Format: Guide\n\
- Keywords: a, b\n\
- Content Draft: \"Draft\"\n\n\
## 🚀 Google AI Overview Strategy ##\n\n\
### Introduction ###\nIntro\n\n\
### Content Structuring Tips ###\n- Answer first\n\n\
### Schema Markup Recommendations ###\n- FAQPage\n\n\
### E-E-A-T Signal Enhancements ###\n- Author bio\n\n\
## 👥 Competitor Landscape ##\n\n\
### Rival ###\n\
Summary: Summary\n\
Strengths:\n- S1\n\
Weaknesses:\n- W1\n- W2\n\n";

        assert_eq!(text, expected);
    }

    #[test]
    fn test_to_text_skips_empty_sections() {
        let mut strategy = sample_strategy("P");
        strategy.intents.clear();
        strategy.competitor_analysis.clear();
        strategy.content_pillars[0].cluster_topics[0].user_intent.clear();
        strategy.content_pillars[0].cluster_topics[0].draft_content.clear();

        let text = strategy.to_text("kw");
        assert!(!text.contains("User Intent Analysis"));
        assert!(!text.contains("Competitor Landscape"));
        assert!(!text.contains("🎯 User Intent:"));
        assert!(!text.contains("Content Draft"));
        assert!(text.contains("## 🚀 Google AI Overview Strategy ##"));
    }
}
