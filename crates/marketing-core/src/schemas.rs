//! Response-shape descriptors for every generation operation
//!
//! Each descriptor is sent as the request's `responseSchema` and reused to
//! validate the answer before decoding.

use genai_client::schema::{ObjectSchema, SchemaType};

use crate::keywords::KeywordCategory;

/// Upper bound on keywords returned by a discovery search
pub const MAX_DISCOVERED_KEYWORDS: usize = 15;

fn string(description: &str) -> SchemaType {
    SchemaType::string().describe(description)
}

fn string_list(description: &str) -> SchemaType {
    SchemaType::array(SchemaType::string()).describe(description)
}

fn level(description: &str) -> SchemaType {
    SchemaType::string_enum(&["High", "Medium", "Low"]).describe(description)
}

/// A list of keywords
pub fn keyword_list() -> SchemaType {
    SchemaType::array(SchemaType::object(
        ObjectSchema::new()
            .field("keyword", string("The search keyword in Vietnamese."))
            .field("volume", level("Estimated qualitative search volume."))
            .field("intent", string("The likely user intent behind the search query."))
            .field(
                "cpc",
                string(
                    "Estimated Cost Per Click (CPC) range in Vietnamese Dong (VND), \
                     representing competitor spending.",
                ),
            )
            .field(
                "competition",
                level("The level of competition from other advertisers for this keyword."),
            )
            .field(
                "semrushLink",
                string(
                    "A plausible example link to a SEMrush keyword overview report for this \
                     keyword in the Vietnam database (e.g., \
                     https://www.semrush.com/analytics/keywordoverview/?q=...&db=vn).",
                ),
            ),
    ))
}

/// Keywords for the four fixed categories
pub fn broad_keywords() -> SchemaType {
    let object = KeywordCategory::FIXED
        .iter()
        .fold(ObjectSchema::new(), |object, category| {
            object.field(category.wire_key(), keyword_list())
        });
    SchemaType::object(object)
}

/// Keywords found for an ad-hoc search term
pub fn discovered_keywords() -> SchemaType {
    keyword_list().max_items(MAX_DISCOVERED_KEYWORDS)
}

/// Deep-dive analysis of one keyword
pub fn keyword_details() -> SchemaType {
    let cpc_breakdown = ObjectSchema::new()
        .field(
            "lowRangeVND",
            string("The lower end of the estimated CPC range in Vietnamese Dong (VND)."),
        )
        .field(
            "highRangeVND",
            string("The higher end of the estimated CPC range in Vietnamese Dong (VND)."),
        )
        .field(
            "notes",
            string("Brief notes on bidding strategy or factors influencing the CPC, in Vietnamese."),
        );

    SchemaType::object(
        ObjectSchema::new()
            .field(
                "intentExplanation",
                string("A detailed explanation of the user's intent for this keyword, in Vietnamese."),
            )
            .field("cpcBreakdown", SchemaType::object(cpc_breakdown))
            .field(
                "relatedKeywords",
                string_list("A list of 5 semantically related, long-tail keywords in Vietnamese."),
            )
            .field(
                "commonQuestions",
                string_list(
                    "A list of 3 common questions users ask related to this keyword, in Vietnamese.",
                ),
            ),
    )
}

fn user_intent() -> SchemaType {
    SchemaType::object(
        ObjectSchema::new()
            .field(
                "intent",
                string(
                    "The type of user intent (e.g., 'Informational', 'Transactional', \
                     'Commercial Investigation', 'Navigational').",
                ),
            )
            .field(
                "description",
                string(
                    "A detailed explanation of what the user wants to achieve with this intent \
                     for the given keyword, in Vietnamese.",
                ),
            )
            .field(
                "exampleQueries",
                string_list(
                    "A list of 2-3 example search queries in Vietnamese that represent this intent.",
                ),
            ),
    )
}

fn cluster_topic() -> SchemaType {
    SchemaType::object(
        ObjectSchema::new()
            .field("clusterTitle", string("The catchy title of the cluster topic."))
            .field(
                "userIntent",
                string(
                    "The specific user search intent this cluster topic addresses, in Vietnamese \
                     (e.g., 'So sánh lãi suất vay' or 'Tìm hiểu điều kiện vay').",
                ),
            )
            .field(
                "clusterDescription",
                string(
                    "A short, appealing description for the cluster topic that directly \
                     addresses and expands on the user intent.",
                ),
            )
            .field(
                "suggestedFormat",
                string(
                    "A suggested content format (e.g., 'How-to Guide', 'Comparison Article', \
                     'Video Script').",
                ),
            )
            .field(
                "specificKeywords",
                string_list("A list of 3-5 specific, long-tail keywords related to the cluster topic."),
            )
            .field(
                "draftContent",
                string(
                    "A detailed and engaging draft of the content with AT LEAST 500 characters, \
                     written in appealing, persuasive Vietnamese. This should be a substantial \
                     piece of content ready to use as a strong starting point.",
                ),
            ),
    )
}

fn content_pillar() -> SchemaType {
    SchemaType::object(
        ObjectSchema::new()
            .field("pillarTitle", string("The title of the main content pillar."))
            .field(
                "pillarDescription",
                string(
                    "A description of what this pillar covers and how its clusters build \
                     topical authority.",
                ),
            )
            .field(
                "contentAngle",
                string("A unique angle or hook to make the content stand out."),
            )
            .field(
                "clusterTopics",
                SchemaType::array(cluster_topic())
                    .describe("An array of related cluster topics that support the main pillar."),
            ),
    )
}

fn competitor() -> SchemaType {
    SchemaType::object(
        ObjectSchema::new()
            .field(
                "competitorName",
                string("The name of the competitor website or company."),
            )
            .field(
                "strategySummary",
                string(
                    "A brief summary of the competitor's content strategy for the target keyword.",
                ),
            )
            .field(
                "strengths",
                string_list("A list of 2-3 key strengths of the competitor's content."),
            )
            .field(
                "weaknesses",
                string_list(
                    "A list of 2-3 key weaknesses or opportunities to outperform the competitor.",
                ),
            ),
    )
}

/// Content and SEO strategy
pub fn content_strategy() -> SchemaType {
    SchemaType::object(
        ObjectSchema::new()
            .field(
                "keywordUserIntents",
                SchemaType::array(user_intent())
                    .describe("An analysis of the different user intents for the main keyword."),
            )
            .field(
                "aiOverviewIntro",
                string(
                    "A brief introduction about getting featured in Google AI Overviews for this \
                     specific keyword, in Vietnamese.",
                ),
            )
            .field(
                "aiOverviewContent",
                string_list(
                    "Actionable tips on structuring content for the keyword to appear in AI \
                     Overviews, in Vietnamese.",
                ),
            )
            .field(
                "aiOverviewSchema",
                string_list(
                    "Specific Schema Markup recommendations relevant to the keyword, in Vietnamese.",
                ),
            )
            .field(
                "aiOverviewEEAT",
                string_list(
                    "Strategies to enhance E-E-A-T signals for content related to the keyword, \
                     in Vietnamese.",
                ),
            )
            .field(
                "contentPillars",
                SchemaType::array(content_pillar()).describe(
                    "Three comprehensive content pillar suggestions based on the keyword, each \
                     with 4 cluster topics and specific keywords for each cluster.",
                ),
            )
            .field(
                "competitorAnalysis",
                SchemaType::array(competitor())
                    .describe("An analysis of the top 3 competitors for the given keyword."),
            ),
    )
}

/// Rate estimates for a budget scenario
pub fn estimated_metrics() -> SchemaType {
    let number = |description: &str| SchemaType::number().describe(description);

    SchemaType::object(
        ObjectSchema::new()
            .field(
                "cpc",
                number("Estimated Cost Per Click in Vietnamese Dong (VND). Must be a number."),
            )
            .field(
                "ctr",
                number(
                    "Estimated Click-Through Rate as a percentage (e.g., 1.5 for 1.5%). \
                     Must be a number.",
                ),
            )
            .field(
                "cvr",
                number(
                    "Estimated Conversion Rate as a percentage (e.g., 2.5 for 2.5%). \
                     Must be a number.",
                ),
            )
            .field(
                "aov",
                number(
                    "Estimated Average Order Value (or loan value) in Vietnamese Dong (VND). \
                     Must be a number.",
                ),
            ),
    )
}

/// Integrated marketing communications plan
pub fn imc_plan() -> SchemaType {
    let objectives = ObjectSchema::new()
        .field(
            "business",
            string("The Business Objective (e.g., increase sales, gain market share)."),
        )
        .field(
            "marketing",
            string(
                "The Marketing Objective, focusing on changing consumer behavior \
                 (e.g., increase usage, attract new users).",
            ),
        )
        .field(
            "communication",
            string(
                "The Communication Objective, focusing on changing consumer perception \
                 (e.g., increase brand awareness, build brand image).",
            ),
        );

    let target_audience = ObjectSchema::new()
        .field("summary", string("A summary of the target audience persona."))
        .field(
            "demographic",
            string("Demographic details (age, gender, income, occupation)."),
        )
        .field(
            "geographic",
            string("Geographic details (city, rural/urban, region)."),
        )
        .field(
            "psychographic",
            string("Psychographic details (lifestyle, values, interests)."),
        )
        .field(
            "behavioral",
            string("Behavioral details (purchase habits, brand loyalty, usage rate)."),
        );

    let consumer_insight = ObjectSchema::new()
        .field(
            "truth",
            string("The 'Truth': a simple, obvious fact about the consumer or category."),
        )
        .field(
            "tension",
            string("The 'Tension': a conflict or frustration the consumer feels related to the truth."),
        )
        .field(
            "motivation",
            string("The 'Motivation': the consumer's desire or goal that the brand can tap into."),
        )
        .field("insight", string("The final, concise consumer insight statement."));

    let big_idea = ObjectSchema::new()
        .field(
            "idea",
            string("The overarching Big Idea for the campaign that solves the consumer's tension."),
        )
        .field(
            "keyMessage",
            string(
                "The core, consistent Key Message that will be communicated across all channels.",
            ),
        )
        .field(
            "brandRole",
            string("The role the brand plays in the consumer's life related to the Big Idea."),
        );

    let phase = ObjectSchema::new()
        .field(
            "phaseName",
            string("The name of the campaign phase (e.g., 'Teasing', 'Launch', 'Sustain')."),
        )
        .field("duration", string("The duration of this phase (e.g., '2 Weeks')."))
        .field("objective", string("The specific objective of this phase."))
        .field(
            "keyHook",
            string(
                "The main activity or 'hook' for this phase (e.g., 'Viral Video Launch', \
                 'KOL Collaboration').",
            ),
        )
        .field(
            "supportingTactics",
            string_list("A list of supporting activities and channels for this phase."),
        )
        .field(
            "keyMessage",
            string("The specific message for this phase, adapted from the main Key Message."),
        );

    let kpi = ObjectSchema::new()
        .field("metric", string("The name of the Key Performance Indicator (KPI)."))
        .field("description", string("What this KPI measures."))
        .field(
            "tool",
            string(
                "The tool used to measure it (e.g., 'Google Analytics', 'Meta Business Suite').",
            ),
        );

    let budget_line = ObjectSchema::new()
        .field("channel", string("The marketing channel or activity."))
        .field(
            "percentage",
            SchemaType::number().describe("The percentage of the budget allocated."),
        )
        .field("amount", string("The allocated amount in VND."))
        .field("rationale", string("The reason for this allocation."));

    let budget_allocation = ObjectSchema::new()
        .field(
            "approach",
            string("The budgeting approach used (Top-down or Bottom-up)."),
        )
        .field("breakdown", SchemaType::array(SchemaType::object(budget_line)));

    let measurement = ObjectSchema::new()
        .field("kpis", SchemaType::array(SchemaType::object(kpi)))
        .field("budgetAllocation", SchemaType::object(budget_allocation));

    SchemaType::object(
        ObjectSchema::new()
            .field("objectives", SchemaType::object(objectives))
            .field("targetAudience", SchemaType::object(target_audience))
            .field("consumerInsight", SchemaType::object(consumer_insight))
            .field("bigIdea", SchemaType::object(big_idea))
            .field("deploymentPlan", SchemaType::array(SchemaType::object(phase)))
            .field("measurement", SchemaType::object(measurement)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imc::ImcPlan;
    use crate::keywords::{BroadKeywords, Keyword, KeywordDetails};
    use crate::strategy::{tests::sample_strategy, ContentStrategy};
    use genai_client::schema::{validate_value, ValidationError};
    use serde_json::json;

    fn keyword_json(text: &str) -> serde_json::Value {
        json!({
            "keyword": text,
            "volume": "Low",
            "intent": "Informational",
            "cpc": "1.000 - 2.000",
            "competition": "High",
            "semrushLink": ""
        })
    }

    #[test]
    fn test_keyword_schema_matches_model() {
        let value = json!([keyword_json("a"), keyword_json("b")]);
        assert!(validate_value(&value, &keyword_list()).is_ok());
        let decoded: Vec<Keyword> = serde_json::from_value(value).unwrap();
        assert_eq!(decoded.len(), 2);
    }

    #[test]
    fn test_broad_schema_requires_every_category() {
        let mut value = json!({
            "motorcycleLoanKeywords": [keyword_json("xe")],
            "phoneLoanKeywords": [],
            "tabletLoanKeywords": [],
            "cashLoanKeywords": []
        });
        assert!(validate_value(&value, &broad_keywords()).is_ok());
        assert!(serde_json::from_value::<BroadKeywords>(value.clone()).is_ok());

        value.as_object_mut().unwrap().remove("cashLoanKeywords");
        assert_eq!(
            validate_value(&value, &broad_keywords()),
            Err(ValidationError::MissingRequiredField {
                path: "$".to_string(),
                field: "cashLoanKeywords".to_string(),
            })
        );
    }

    #[test]
    fn test_discovery_schema_caps_results() {
        let fifteen: Vec<_> = (0..15).map(|i| keyword_json(&i.to_string())).collect();
        assert!(validate_value(&json!(fifteen), &discovered_keywords()).is_ok());

        let sixteen: Vec<_> = (0..16).map(|i| keyword_json(&i.to_string())).collect();
        assert!(matches!(
            validate_value(&json!(sixteen), &discovered_keywords()),
            Err(ValidationError::ArrayTooLong { max: 15, .. })
        ));
    }

    #[test]
    fn test_volume_enum_is_enforced() {
        let mut bad = keyword_json("a");
        bad["volume"] = json!("Very High");
        assert!(matches!(
            validate_value(&json!([bad]), &keyword_list()),
            Err(ValidationError::NotInEnum { .. })
        ));
    }

    #[test]
    fn test_strategy_schema_matches_model() {
        let value = serde_json::to_value(sample_strategy("P")).unwrap();
        assert!(validate_value(&value, &content_strategy()).is_ok());
        assert!(serde_json::from_value::<ContentStrategy>(value).is_ok());
    }

    #[test]
    fn test_details_schema_matches_model() {
        let value = json!({
            "intentExplanation": "x",
            "cpcBreakdown": { "lowRangeVND": "1", "highRangeVND": "2", "notes": "n" },
            "relatedKeywords": ["a", "b", "c", "d", "e"],
            "commonQuestions": ["q1", "q2", "q3"]
        });
        assert!(validate_value(&value, &keyword_details()).is_ok());
        assert!(serde_json::from_value::<KeywordDetails>(value).is_ok());
    }

    #[test]
    fn test_imc_schema_rejects_string_percentage() {
        let value = json!({
            "objectives": { "business": "b", "marketing": "m", "communication": "c" },
            "targetAudience": {
                "summary": "s", "demographic": "d", "geographic": "g",
                "psychographic": "p", "behavioral": "b"
            },
            "consumerInsight": { "truth": "t", "tension": "t", "motivation": "m", "insight": "i" },
            "bigIdea": { "idea": "i", "keyMessage": "k", "brandRole": "r" },
            "deploymentPlan": [],
            "measurement": {
                "kpis": [],
                "budgetAllocation": {
                    "approach": "Top-down",
                    "breakdown": [{ "channel": "TV", "percentage": 50, "amount": "x", "rationale": "r" }]
                }
            }
        });
        assert!(validate_value(&value, &imc_plan()).is_ok());
        assert!(serde_json::from_value::<ImcPlan>(value.clone()).is_ok());

        let mut bad = value;
        bad["measurement"]["budgetAllocation"]["breakdown"][0]["percentage"] = json!("50%");
        assert_eq!(
            validate_value(&bad, &imc_plan()),
            Err(ValidationError::TypeMismatch {
                path: "$.measurement.budgetAllocation.breakdown[0].percentage".to_string(),
                expected: "NUMBER",
                found: "string",
            })
        );
    }

    #[test]
    fn test_metrics_schema_serializes_for_the_wire() {
        let json = serde_json::to_value(estimated_metrics()).unwrap();
        assert_eq!(json["type"], "OBJECT");
        assert_eq!(json["properties"]["ctr"]["type"], "NUMBER");
        assert_eq!(json["required"], json!(["cpc", "ctr", "cvr", "aov"]));
    }
}
