//! Keyword research data model
//!
//! Keywords arrive from the generation service grouped into four fixed
//! consumer-finance categories plus a custom-search bucket. This module holds
//! the wire types and the categorized collection the keyword explorer binds to.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Keyword
// =============================================================================

/// Qualitative level used for search volume and competition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    /// High
    High,
    /// Medium
    Medium,
    /// Low
    Low,
}

impl Level {
    /// All levels, highest first
    pub const ALL: [Level; 3] = [Level::High, Level::Medium, Level::Low];

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::High => "High",
            Level::Medium => "Medium",
            Level::Low => "Low",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A search keyword with its estimated market data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    /// The keyword itself
    #[serde(rename = "keyword")]
    pub text: String,
    /// Estimated search volume
    pub volume: Level,
    /// Likely user intent (free text)
    pub intent: String,
    /// Estimated cost-per-click range in VND (free text)
    pub cpc: String,
    /// Advertiser competition
    pub competition: Level,
    /// Link to an external keyword report
    #[serde(rename = "semrushLink")]
    pub external_link: String,
}

/// Base URL of the keyword overview report
pub const KEYWORD_OVERVIEW_URL: &str = "https://www.semrush.com/analytics/keywordoverview/";

impl Keyword {
    /// Build a placeholder for a keyword that is no longer in memory
    ///
    /// Used when a saved strategy is loaded after the keyword list that
    /// produced it has been replaced.
    pub fn stub(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            volume: Level::Medium,
            intent: "Informational".to_string(),
            cpc: "0".to_string(),
            competition: Level::Low,
            external_link: String::new(),
        }
    }

    /// Link to the keyword's overview report
    ///
    /// Falls back to a Vietnam-database report URL when the service did not
    /// supply a link.
    pub fn research_link(&self) -> String {
        if !self.external_link.trim().is_empty() {
            return self.external_link.clone();
        }
        format!(
            "{}?q={}&db=vn",
            KEYWORD_OVERVIEW_URL,
            urlencoding::encode(&self.text)
        )
    }
}

// =============================================================================
// Categories
// =============================================================================

/// Keyword bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    /// Results of the last ad-hoc search
    Custom,
    /// Motorcycle purchase loans
    MotorcycleLoan,
    /// Phone purchase loans
    PhoneLoan,
    /// Tablet purchase loans
    TabletLoan,
    /// Cash loans
    CashLoan,
}

impl KeywordCategory {
    /// All categories in display order
    pub const ALL: [KeywordCategory; 5] = [
        KeywordCategory::Custom,
        KeywordCategory::MotorcycleLoan,
        KeywordCategory::PhoneLoan,
        KeywordCategory::TabletLoan,
        KeywordCategory::CashLoan,
    ];

    /// The categories filled by a broad fetch
    pub const FIXED: [KeywordCategory; 4] = [
        KeywordCategory::MotorcycleLoan,
        KeywordCategory::PhoneLoan,
        KeywordCategory::TabletLoan,
        KeywordCategory::CashLoan,
    ];

    /// Display title
    pub fn title(&self) -> &'static str {
        match self {
            KeywordCategory::Custom => "Custom Search Results",
            KeywordCategory::MotorcycleLoan => "Vay Mua Xe Máy",
            KeywordCategory::PhoneLoan => "Vay Mua Điện Thoại",
            KeywordCategory::TabletLoan => "Vay Mua Máy Tính Bảng",
            KeywordCategory::CashLoan => "Vay Tiền Mặt",
        }
    }

    /// JSON key of the category in service responses
    pub fn wire_key(&self) -> &'static str {
        match self {
            KeywordCategory::Custom => "customSearchKeywords",
            KeywordCategory::MotorcycleLoan => "motorcycleLoanKeywords",
            KeywordCategory::PhoneLoan => "phoneLoanKeywords",
            KeywordCategory::TabletLoan => "tabletLoanKeywords",
            KeywordCategory::CashLoan => "cashLoanKeywords",
        }
    }
}

/// Result of a broad keyword fetch: the four fixed categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BroadKeywords {
    /// Motorcycle purchase loans
    pub motorcycle_loan_keywords: Vec<Keyword>,
    /// Phone purchase loans
    pub phone_loan_keywords: Vec<Keyword>,
    /// Tablet purchase loans
    pub tablet_loan_keywords: Vec<Keyword>,
    /// Cash loans
    pub cash_loan_keywords: Vec<Keyword>,
}

/// Keywords grouped by category
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategorizedKeywords {
    custom: Vec<Keyword>,
    motorcycle_loan: Vec<Keyword>,
    phone_loan: Vec<Keyword>,
    tablet_loan: Vec<Keyword>,
    cash_loan: Vec<Keyword>,
}

impl CategorizedKeywords {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Keywords of one category
    pub fn get(&self, category: KeywordCategory) -> &[Keyword] {
        match category {
            KeywordCategory::Custom => &self.custom,
            KeywordCategory::MotorcycleLoan => &self.motorcycle_loan,
            KeywordCategory::PhoneLoan => &self.phone_loan,
            KeywordCategory::TabletLoan => &self.tablet_loan,
            KeywordCategory::CashLoan => &self.cash_loan,
        }
    }

    /// Replace one category wholesale
    pub fn set(&mut self, category: KeywordCategory, keywords: Vec<Keyword>) {
        let slot = match category {
            KeywordCategory::Custom => &mut self.custom,
            KeywordCategory::MotorcycleLoan => &mut self.motorcycle_loan,
            KeywordCategory::PhoneLoan => &mut self.phone_loan,
            KeywordCategory::TabletLoan => &mut self.tablet_loan,
            KeywordCategory::CashLoan => &mut self.cash_loan,
        };
        *slot = keywords;
    }

    /// Replace the four fixed categories, leaving custom results intact
    pub fn apply_broad(&mut self, broad: BroadKeywords) {
        self.motorcycle_loan = broad.motorcycle_loan_keywords;
        self.phone_loan = broad.phone_loan_keywords;
        self.tablet_loan = broad.tablet_loan_keywords;
        self.cash_loan = broad.cash_loan_keywords;
    }

    /// Overwrite the custom-search bucket
    pub fn replace_custom(&mut self, keywords: Vec<Keyword>) {
        self.custom = keywords;
    }

    /// Every category with its keywords, in display order
    pub fn all(&self) -> impl Iterator<Item = (KeywordCategory, &[Keyword])> {
        KeywordCategory::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }

    /// Every keyword, in display order
    pub fn keywords(&self) -> impl Iterator<Item = &Keyword> {
        self.all().flat_map(|(_, keywords)| keywords.iter())
    }

    /// First keyword with exactly this text
    pub fn find(&self, text: &str) -> Option<&Keyword> {
        self.keywords().find(|k| k.text == text)
    }

    /// Keep only keywords whose text contains `query` (case-insensitive)
    ///
    /// A blank query returns the collection unchanged.
    pub fn filter(&self, query: &str) -> CategorizedKeywords {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.clone();
        }

        let mut filtered = CategorizedKeywords::new();
        for (category, keywords) in self.all() {
            let matching = keywords
                .iter()
                .filter(|k| k.text.to_lowercase().contains(&query))
                .cloned()
                .collect();
            filtered.set(category, matching);
        }
        filtered
    }

    /// Number of keywords across every category
    pub fn total(&self) -> usize {
        self.all().map(|(_, keywords)| keywords.len()).sum()
    }

    /// Check if no category holds a keyword
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

// =============================================================================
// Keyword Details
// =============================================================================

/// Granular cost-per-click estimate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpcBreakdown {
    /// Low end of the range in VND
    #[serde(rename = "lowRangeVND")]
    pub low_range_vnd: String,
    /// High end of the range in VND
    #[serde(rename = "highRangeVND")]
    pub high_range_vnd: String,
    /// Bidding notes
    pub notes: String,
}

/// Deep-dive analysis of a single keyword
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordDetails {
    /// What the searcher wants
    pub intent_explanation: String,
    /// Cost-per-click estimate
    pub cpc_breakdown: CpcBreakdown,
    /// Related long-tail keywords
    pub related_keywords: Vec<String>,
    /// Questions searchers commonly ask
    pub common_questions: Vec<String>,
}
