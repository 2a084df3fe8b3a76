//! Integrated marketing communications (IMC) plan model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the campaign budget is allocated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BudgetMethod {
    /// Split a preset total across activities
    #[default]
    #[serde(rename = "Top-down")]
    TopDown,
    /// Cost the required activities and sum them
    #[serde(rename = "Bottom-up")]
    BottomUp,
}

impl BudgetMethod {
    /// Display and wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetMethod::TopDown => "Top-down",
            BudgetMethod::BottomUp => "Bottom-up",
        }
    }
}

impl fmt::Display for BudgetMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Top-down" => Ok(BudgetMethod::TopDown),
            "Bottom-up" => Ok(BudgetMethod::BottomUp),
            other => Err(format!("Unknown budget method: {}", other)),
        }
    }
}

/// Inputs of IMC plan generation
#[derive(Debug, Clone, PartialEq)]
pub struct ImcBrief {
    /// Product or brand
    pub product: String,
    /// Business problem or goal
    pub problem: String,
    /// Target audience description
    pub audience: String,
    /// Total campaign budget in VND (≤ 0 means unspecified)
    pub budget: f64,
    /// Budgeting approach
    pub budget_method: BudgetMethod,
}

impl Default for ImcBrief {
    fn default() -> Self {
        Self {
            product: "Sữa tươi Vinamilk Green Farm".to_string(),
            problem: "Tăng doanh thu từ dòng sữa tươi Green Farm lên 15% mỗi năm và cải thiện \
                      hình ảnh thương hiệu trong nhóm khách hàng trẻ."
                .to_string(),
            audience: "Khách hàng trẻ (25 – 40 tuổi), thu nhập khá, sống ở thành thị, quan tâm \
                       đến sản phẩm organic và lối sống lành mạnh."
                .to_string(),
            budget: 1_000_000_000.0,
            budget_method: BudgetMethod::TopDown,
        }
    }
}

/// Business, marketing and communication objectives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objectives {
    /// Business objective
    pub business: String,
    /// Marketing objective
    pub marketing: String,
    /// Communication objective
    pub communication: String,
}

/// Segmented target audience
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetAudience {
    /// Persona summary
    pub summary: String,
    /// Age, gender, income, occupation
    pub demographic: String,
    /// Location
    pub geographic: String,
    /// Lifestyle, values, interests
    pub psychographic: String,
    /// Purchase habits
    pub behavioral: String,
}

/// Truth, tension and motivation leading to an insight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerInsight {
    /// Obvious fact about the consumer
    pub truth: String,
    /// Conflict the consumer feels
    pub tension: String,
    /// Desire the brand can tap into
    pub motivation: String,
    /// Insight statement
    pub insight: String,
}

/// Campaign big idea
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BigIdea {
    /// The idea
    pub idea: String,
    /// Message repeated across channels
    pub key_message: String,
    /// Role of the brand
    pub brand_role: String,
}

/// One phase of the deployment plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentPhase {
    /// Phase name (e.g., "Launch")
    pub phase_name: String,
    /// Duration (e.g., "2 Weeks")
    pub duration: String,
    /// Phase objective
    pub objective: String,
    /// Main activity
    pub key_hook: String,
    /// Supporting activities and channels
    pub supporting_tactics: Vec<String>,
    /// Phase message
    pub key_message: String,
}

/// Key performance indicator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpi {
    /// KPI name
    pub metric: String,
    /// What it measures
    pub description: String,
    /// Measurement tool
    pub tool: String,
}

/// Budget share of one channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLine {
    /// Channel or activity
    pub channel: String,
    /// Share of the budget in percent
    pub percentage: f64,
    /// Amount in VND (free text)
    pub amount: String,
    /// Reason for the allocation
    pub rationale: String,
}

/// Budget allocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAllocation {
    /// Approach used
    pub approach: String,
    /// Per-channel breakdown
    pub breakdown: Vec<BudgetLine>,
}

impl BudgetAllocation {
    /// Sum of the breakdown percentages
    pub fn total_percentage(&self) -> f64 {
        self.breakdown.iter().map(|line| line.percentage).sum()
    }
}

/// KPIs and budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    /// KPIs
    pub kpis: Vec<Kpi>,
    /// Budget allocation
    pub budget_allocation: BudgetAllocation,
}

/// Integrated marketing communications plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImcPlan {
    /// Objectives
    pub objectives: Objectives,
    /// Target audience
    pub target_audience: TargetAudience,
    /// Consumer insight
    pub consumer_insight: ConsumerInsight,
    /// Big idea
    pub big_idea: BigIdea,
    /// Ordered campaign phases
    pub deployment_plan: Vec<DeploymentPhase>,
    /// KPIs and budget
    pub measurement: Measurement,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_budget_method() {
        assert_eq!(BudgetMethod::default(), BudgetMethod::TopDown);
        assert_eq!("Bottom-up".parse::<BudgetMethod>(), Ok(BudgetMethod::BottomUp));
        assert!("Sideways".parse::<BudgetMethod>().is_err());
        assert_eq!(
            serde_json::to_value(BudgetMethod::BottomUp).unwrap(),
            json!("Bottom-up")
        );
        assert_eq!(BudgetMethod::TopDown.to_string(), "Top-down");
    }

    #[test]
    fn test_brief_defaults() {
        let brief = ImcBrief::default();
        assert_eq!(brief.product, "Sữa tươi Vinamilk Green Farm");
        assert!(brief.problem.starts_with("Tăng doanh thu"));
        assert!(brief.problem.contains("cải thiện hình ảnh"));
        assert!(brief.audience.contains("quan tâm đến sản phẩm"));
        assert_eq!(brief.budget, 1_000_000_000.0);
        assert_eq!(brief.budget_method, BudgetMethod::TopDown);
    }

    #[test]
    fn test_plan_wire_format() {
        let plan: ImcPlan = serde_json::from_value(json!({
            "objectives": { "business": "b", "marketing": "m", "communication": "c" },
            "targetAudience": {
                "summary": "s", "demographic": "d", "geographic": "g",
                "psychographic": "p", "behavioral": "bh"
            },
            "consumerInsight": { "truth": "t", "tension": "te", "motivation": "mo", "insight": "i" },
            "bigIdea": { "idea": "x", "keyMessage": "k", "brandRole": "r" },
            "deploymentPlan": [{
                "phaseName": "Launch", "duration": "2 Weeks", "objective": "o",
                "keyHook": "h", "supportingTactics": ["KOL"], "keyMessage": "km"
            }],
            "measurement": {
                "kpis": [{ "metric": "Reach", "description": "d", "tool": "GA" }],
                "budgetAllocation": {
                    "approach": "Top-down",
                    "breakdown": [
                        { "channel": "TV", "percentage": 60, "amount": "600.000.000", "rationale": "r" },
                        { "channel": "Social", "percentage": 40.5, "amount": "400.000.000", "rationale": "r" }
                    ]
                }
            }
        }))
        .unwrap();

        assert_eq!(plan.big_idea.key_message, "k");
        assert_eq!(plan.deployment_plan[0].supporting_tactics, vec!["KOL"]);
        assert_eq!(plan.measurement.budget_allocation.total_percentage(), 100.5);
    }
}
