//! Campaign metrics derivation
//!
//! Pure functions mapping a budget and four rate estimates to the derived
//! funnel, plus the numeric coercion applied to service-estimated inputs and
//! the display helpers used to embed amounts in prompts and summaries.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Inputs
// =============================================================================

/// Inputs of the metrics projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsInputs {
    /// Monthly budget in VND
    pub budget: f64,
    /// Cost per click in VND
    pub cpc: f64,
    /// Click-through rate in percentage points
    pub ctr: f64,
    /// Conversion rate in percentage points
    pub cvr: f64,
    /// Average revenue per conversion in VND
    pub aov: f64,
}

impl Default for MetricsInputs {
    fn default() -> Self {
        Self {
            budget: 50_000_000.0,
            cpc: 8_000.0,
            ctr: 1.5,
            cvr: 2.5,
            aov: 15_000_000.0,
        }
    }
}

impl MetricsInputs {
    /// Replace the four rate inputs with service estimates, keeping the budget
    pub fn with_estimates(self, estimates: EstimatedMetrics) -> Self {
        Self {
            budget: self.budget,
            cpc: estimates.cpc,
            ctr: estimates.ctr,
            cvr: estimates.cvr,
            aov: estimates.aov,
        }
    }

    /// Derive the funnel for these inputs
    pub fn derive(&self) -> MarketingMetrics {
        MarketingMetrics::derive(self)
    }
}

// =============================================================================
// Derived Metrics
// =============================================================================

/// Derived campaign funnel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MarketingMetrics {
    /// Ad impressions
    pub impressions: f64,
    /// Clicks
    pub total_clicks: f64,
    /// Conversions
    pub total_conversions: f64,
    /// Cost per thousand impressions
    pub cpm: f64,
    /// Cost per acquisition
    pub cpa: f64,
    /// Revenue
    pub total_revenue: f64,
    /// Return on ad spend
    pub roas: f64,
}

/// One funnel stage for display
#[derive(Debug, Clone, PartialEq)]
pub struct FunnelStage {
    /// Stage label
    pub label: &'static str,
    /// Rounded stage value
    pub value: f64,
}

impl MarketingMetrics {
    /// Derive the funnel
    ///
    /// A non-positive or non-finite budget, cost per click or click-through
    /// rate yields all zeros. Results are not rounded.
    ///
    /// # Example
    ///
    /// ```rust
    /// use marketing_core::metrics::{MarketingMetrics, MetricsInputs};
    ///
    /// let metrics = MarketingMetrics::derive(&MetricsInputs::default());
    /// assert_eq!(metrics.total_clicks, 6250.0);
    /// assert_eq!(metrics.cpa, 320_000.0);
    /// ```
    pub fn derive(inputs: &MetricsInputs) -> Self {
        let MetricsInputs {
            budget,
            cpc,
            ctr,
            cvr,
            aov,
        } = *inputs;

        if !is_positive(budget) || !is_positive(cpc) || !is_positive(ctr) {
            return Self::default();
        }

        let cvr = finite_or_zero(cvr);
        let aov = finite_or_zero(aov);

        let total_clicks = budget / cpc;
        let impressions = total_clicks / (ctr / 100.0);
        let cpm = (budget / impressions) * 1000.0;
        let total_conversions = total_clicks * (cvr / 100.0);
        let total_revenue = total_conversions * aov;
        let roas = total_revenue / budget;
        let cpa = if total_conversions > 0.0 {
            budget / total_conversions
        } else {
            0.0
        };

        Self {
            impressions,
            total_clicks,
            total_conversions,
            cpm,
            cpa,
            total_revenue,
            roas,
        }
    }

    /// Funnel stages with rounded values, skipping empty stages
    pub fn funnel(&self) -> Vec<FunnelStage> {
        [
            ("Impressions", self.impressions),
            ("Clicks", self.total_clicks),
            ("Conversions", self.total_conversions),
        ]
        .into_iter()
        .map(|(label, value)| FunnelStage {
            label,
            value: value.round(),
        })
        .filter(|stage| stage.value > 0.0)
        .collect()
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

// =============================================================================
// Estimated Inputs
// =============================================================================

/// Service-estimated rate inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct EstimatedMetrics {
    /// Cost per click in VND
    pub cpc: f64,
    /// Click-through rate in percentage points
    pub ctr: f64,
    /// Conversion rate in percentage points
    pub cvr: f64,
    /// Average revenue per conversion in VND
    pub aov: f64,
}

impl EstimatedMetrics {
    /// Coerce a loosely-typed JSON answer into numbers
    ///
    /// Each field is read independently: numbers pass through, numeric
    /// strings are parsed (blank is 0), booleans become 1 or 0, and anything
    /// else, including a missing field or a non-finite value, becomes 0. A
    /// value that is not an object yields all zeros.
    pub fn from_value(value: &Value) -> Self {
        let field = |name: &str| coerce_number(value.get(name));
        Self {
            cpc: field("cpc"),
            ctr: field("ctr"),
            cvr: field("cvr"),
            aov: field("aov"),
        }
    }
}

/// Coerce an optional JSON value to a finite number
pub fn coerce_number(value: Option<&Value>) -> f64 {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(0.0)
            }
        }
        Some(Value::Bool(true)) => 1.0,
        _ => 0.0,
    };
    finite_or_zero(number)
}

// =============================================================================
// Formatting
// =============================================================================

/// Render a number with vi-VN grouping
///
/// Thousands are separated by `.`, and up to three fraction digits follow a
/// `,` separator.
///
/// ```rust
/// use marketing_core::metrics::format_grouped;
///
/// assert_eq!(format_grouped(50_000_000.0), "50.000.000");
/// assert_eq!(format_grouped(1234.5), "1.234,5");
/// ```
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let scaled = (value.abs() * 1000.0).round() as u128;
    let whole = scaled / 1000;
    let fraction = scaled % 1000;

    let mut out = String::new();
    if value < 0.0 && scaled > 0 {
        out.push('-');
    }
    out.push_str(&group_digits(whole));
    if fraction > 0 {
        let digits = format!("{:03}", fraction);
        out.push(',');
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}

/// Render a rounded count with vi-VN grouping
pub fn format_count(value: f64) -> String {
    format_grouped(value.round())
}

/// Render a rounded amount in Vietnamese dong
pub fn format_vnd(value: f64) -> String {
    format!("{} ₫", format_count(value))
}

fn group_digits(n: u128) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}
