//! View state
//!
//! One controller per view. Each owns its form inputs, its request slots and
//! the last result, and exposes the begin/finish pair the shell calls around
//! a gateway request. Controllers never talk to the gateway themselves.

use marketing_core::metrics::FunnelStage;
use marketing_core::strategy::export_file_name;
use marketing_core::{
    BroadKeywords, CategorizedKeywords, ContentStrategy, EstimatedMetrics, GatewayError,
    ImcBrief, ImcPlan, Keyword, KeywordDetails, MarketingMetrics, MetricsInputs,
};

use crate::request::{Completion, RequestSlot, RequestTracker, Ticket};

/// Error shown when the broad keyword fetch fails
pub const FETCH_KEYWORDS_ERROR: &str = "Failed to fetch keywords. Please try again.";
/// Error shown when keyword details fail to load
pub const KEYWORD_DETAILS_ERROR: &str = "Failed to load keyword details.";
/// Error shown when metrics estimation fails
pub const ESTIMATE_METRICS_ERROR: &str = "Failed to estimate metrics. Please try again.";
/// Error shown when strategy generation fails
pub const GENERATE_STRATEGY_ERROR: &str = "Failed to generate content strategy. Please try again.";
/// Error shown when IMC plan generation fails
pub const GENERATE_IMC_PLAN_ERROR: &str = "Failed to generate IMC plan. Please try again.";

/// Default metrics scenario
pub const DEFAULT_SCENARIO: &str =
    "A standard Google Ads campaign targeting general consumer finance keywords in Vietnam.";

/// Scenario suggested when `keyword` is selected
pub fn suggested_scenario(keyword: &str) -> String {
    format!(
        "A Google Ads campaign focused on maximizing conversions for the keyword \"{}\" in key Vietnamese cities.",
        keyword
    )
}

fn log_failure(view: &'static str, err: &GatewayError) {
    tracing::warn!(view, error = %err, "view request failed");
}

// =============================================================================
// Keyword Explorer
// =============================================================================

/// Broad keyword discovery and custom search
#[derive(Debug, Clone, Default)]
pub struct KeywordExplorer {
    categorized: CategorizedKeywords,
    search_term: String,
    filter: String,
    has_searched: bool,
    broad: RequestTracker,
    custom: RequestTracker,
    error: Option<String>,
}

impl KeywordExplorer {
    /// Create an empty explorer
    pub fn new() -> Self {
        Self::default()
    }

    /// All keywords received so far
    pub fn categorized(&self) -> &CategorizedKeywords {
        &self.categorized
    }

    /// Keywords matching the current filter
    pub fn visible(&self) -> CategorizedKeywords {
        self.categorized.filter(&self.filter)
    }

    /// Custom search term
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Edit the custom search term
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Keyword list filter
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Edit the keyword list filter
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    /// Whether any fetch has been started
    pub fn has_searched(&self) -> bool {
        self.has_searched
    }

    /// Whether the broad fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.broad.is_loading()
    }

    /// Whether the custom search is in flight
    pub fn is_custom_loading(&self) -> bool {
        self.custom.is_loading()
    }

    /// Whether either fetch is in flight
    pub fn is_busy(&self) -> bool {
        self.is_loading() || self.is_custom_loading()
    }

    /// Shared error of both fetches
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether custom search is enabled
    pub fn can_search(&self) -> bool {
        !self.search_term.trim().is_empty() && !self.is_busy()
    }

    /// Whether the broad fetch is enabled
    pub fn can_fetch(&self) -> bool {
        !self.is_busy()
    }

    /// Start the broad fetch
    pub fn begin_fetch(&mut self) -> Ticket {
        self.error = None;
        self.has_searched = true;
        self.broad.begin()
    }

    /// Apply the broad fetch outcome
    ///
    /// Success replaces the four fixed categories and keeps custom results.
    pub fn finish_fetch(
        &mut self,
        ticket: Ticket,
        result: Result<BroadKeywords, GatewayError>,
    ) -> Completion {
        if self.broad.settle(ticket) == Completion::Stale {
            return Completion::Stale;
        }
        match result {
            Ok(broad) => self.categorized.apply_broad(broad),
            Err(err) => {
                log_failure("keywords", &err);
                self.error = Some(FETCH_KEYWORDS_ERROR.to_string());
            }
        }
        Completion::Applied
    }

    /// Start a custom search
    pub fn begin_search(&mut self) -> Ticket {
        self.error = None;
        self.has_searched = true;
        self.custom.begin()
    }

    /// Apply the custom search outcome
    ///
    /// Success overwrites the custom bucket; failure shows the gateway's
    /// own message.
    pub fn finish_search(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<Keyword>, GatewayError>,
    ) -> Completion {
        if self.custom.settle(ticket) == Completion::Stale {
            return Completion::Stale;
        }
        match result {
            Ok(keywords) => self.categorized.replace_custom(keywords),
            Err(err) => {
                log_failure("keywords", &err);
                self.error = Some(err.to_string());
            }
        }
        Completion::Applied
    }
}

// =============================================================================
// Keyword Focus
// =============================================================================

/// Detail panel for the selected keyword
#[derive(Debug, Clone, Default)]
pub struct FocusPanel {
    details: RequestSlot<KeywordDetails>,
}

impl FocusPanel {
    /// Loaded details
    pub fn details(&self) -> Option<&KeywordDetails> {
        self.details.value()
    }

    /// Whether details are loading
    pub fn is_loading(&self) -> bool {
        self.details.is_loading()
    }

    /// Detail error
    pub fn error(&self) -> Option<&str> {
        self.details.error()
    }

    /// Start loading details, discarding the previous ones
    pub fn begin(&mut self) -> Ticket {
        self.details.begin_replacing()
    }

    /// Apply the detail fetch outcome
    pub fn finish(&mut self, ticket: Ticket, result: Result<KeywordDetails, GatewayError>) -> Completion {
        self.details.finish(ticket, result, |err| {
            log_failure("focus", &err);
            KEYWORD_DETAILS_ERROR.to_string()
        })
    }

    /// Clear the panel
    pub fn clear(&mut self) {
        self.details.reset();
    }
}

// =============================================================================
// Metrics
// =============================================================================

/// Budget projection
#[derive(Debug, Clone)]
pub struct MetricsView {
    inputs: MetricsInputs,
    scenario: String,
    request: RequestTracker,
    error: Option<String>,
}

impl Default for MetricsView {
    fn default() -> Self {
        Self {
            inputs: MetricsInputs::default(),
            scenario: DEFAULT_SCENARIO.to_string(),
            request: RequestTracker::default(),
            error: None,
        }
    }
}

impl MetricsView {
    /// Create a view with the default inputs
    pub fn new() -> Self {
        Self::default()
    }

    /// Current inputs
    pub fn inputs(&self) -> &MetricsInputs {
        &self.inputs
    }

    /// Campaign budget
    pub fn budget(&self) -> f64 {
        self.inputs.budget
    }

    /// Edit the budget; negative and non-numeric values become 0
    pub fn set_budget(&mut self, budget: f64) {
        self.inputs.budget = if budget.is_nan() { 0.0 } else { budget.max(0.0) };
    }

    /// Campaign scenario
    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    /// Edit the scenario
    pub fn set_scenario(&mut self, scenario: impl Into<String>) {
        self.scenario = scenario.into();
    }

    /// Derived metrics, recomputed from the current inputs
    pub fn metrics(&self) -> MarketingMetrics {
        self.inputs.derive()
    }

    /// Display funnel
    pub fn funnel(&self) -> Vec<FunnelStage> {
        self.metrics().funnel()
    }

    /// Whether estimation is in flight
    pub fn is_loading(&self) -> bool {
        self.request.is_loading()
    }

    /// Estimation error
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether estimation is enabled
    pub fn can_estimate(&self) -> bool {
        !self.is_loading() && !self.scenario.trim().is_empty() && self.inputs.budget > 0.0
    }

    /// Start an estimation
    pub fn begin(&mut self) -> Ticket {
        self.error = None;
        self.request.begin()
    }

    /// Apply the estimation outcome; estimates replace the four rate inputs
    pub fn finish(&mut self, ticket: Ticket, result: Result<EstimatedMetrics, GatewayError>) -> Completion {
        if self.request.settle(ticket) == Completion::Stale {
            return Completion::Stale;
        }
        match result {
            Ok(estimates) => self.inputs = self.inputs.with_estimates(estimates),
            Err(err) => {
                log_failure("metrics", &err);
                self.error = Some(ESTIMATE_METRICS_ERROR.to_string());
            }
        }
        Completion::Applied
    }
}

// =============================================================================
// Content Strategy
// =============================================================================

/// Plain-text export of a strategy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyExport {
    /// Suggested file name
    pub file_name: String,
    /// Document contents
    pub contents: String,
}

/// Content strategy for the selected keyword
#[derive(Debug, Clone, Default)]
pub struct StrategyView {
    strategy: RequestSlot<ContentStrategy>,
}

impl StrategyView {
    /// Current strategy
    pub fn strategy(&self) -> Option<&ContentStrategy> {
        self.strategy.value()
    }

    /// Whether generation is in flight
    pub fn is_loading(&self) -> bool {
        self.strategy.is_loading()
    }

    /// Generation error
    pub fn error(&self) -> Option<&str> {
        self.strategy.error()
    }

    /// Start generation, discarding the previous strategy
    pub fn begin(&mut self) -> Ticket {
        self.strategy.begin_replacing()
    }

    /// Apply the generation outcome
    pub fn finish(&mut self, ticket: Ticket, result: Result<ContentStrategy, GatewayError>) -> Completion {
        self.strategy.finish(ticket, result, |err| {
            log_failure("strategy", &err);
            GENERATE_STRATEGY_ERROR.to_string()
        })
    }

    /// Show a previously saved strategy
    pub fn show(&mut self, strategy: ContentStrategy) {
        self.strategy.set(strategy);
    }

    /// Clear the strategy and its error
    pub fn clear(&mut self) {
        self.strategy.reset();
    }

    /// Render the current strategy for download
    pub fn export(&self, keyword: &str) -> Option<StrategyExport> {
        self.strategy().map(|strategy| StrategyExport {
            file_name: export_file_name(keyword),
            contents: strategy.to_text(keyword),
        })
    }
}

// =============================================================================
// IMC Planner
// =============================================================================

/// IMC plan generation
#[derive(Debug, Clone, Default)]
pub struct ImcView {
    brief: ImcBrief,
    plan: RequestSlot<ImcPlan>,
}

impl ImcView {
    /// Current brief
    pub fn brief(&self) -> &ImcBrief {
        &self.brief
    }

    /// Edit the brief
    pub fn brief_mut(&mut self) -> &mut ImcBrief {
        &mut self.brief
    }

    /// Generated plan
    pub fn plan(&self) -> Option<&ImcPlan> {
        self.plan.value()
    }

    /// Whether generation is in flight
    pub fn is_loading(&self) -> bool {
        self.plan.is_loading()
    }

    /// Generation error
    pub fn error(&self) -> Option<&str> {
        self.plan.error()
    }

    /// Whether generation is enabled
    pub fn can_generate(&self) -> bool {
        let brief = &self.brief;
        !self.is_loading()
            && [&brief.product, &brief.problem, &brief.audience]
                .iter()
                .all(|field| !field.trim().is_empty())
    }

    /// Start generation, discarding the previous plan
    pub fn begin(&mut self) -> Ticket {
        self.plan.begin_replacing()
    }

    /// Apply the generation outcome
    pub fn finish(&mut self, ticket: Ticket, result: Result<ImcPlan, GatewayError>) -> Completion {
        self.plan.finish(ticket, result, |err| {
            log_failure("imc", &err);
            GENERATE_IMC_PLAN_ERROR.to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketing_core::Level;

    fn invalid() -> GatewayError {
        GatewayError::InvalidInput("Search term must not be empty.".to_string())
    }

    fn keyword(text: &str) -> Keyword {
        Keyword {
            text: text.to_string(),
            volume: Level::High,
            intent: "Transactional".to_string(),
            cpc: "1.000".to_string(),
            competition: Level::Medium,
            external_link: String::new(),
        }
    }

    #[test]
    fn test_explorer_search_enablement() {
        let mut explorer = KeywordExplorer::new();
        assert!(!explorer.can_search());

        explorer.set_search_term("   ");
        assert!(!explorer.can_search());

        explorer.set_search_term("vay");
        assert!(explorer.can_search());

        let _t = explorer.begin_fetch();
        assert!(!explorer.can_search());
    }

    #[test]
    fn test_explorer_fetch_disabled_while_busy() {
        let mut explorer = KeywordExplorer::new();
        assert!(explorer.can_fetch());

        let t = explorer.begin_search();
        assert!(!explorer.can_fetch());

        explorer.finish_search(t, Ok(vec![]));
        assert!(explorer.can_fetch());

        let _t = explorer.begin_fetch();
        assert!(!explorer.can_fetch());
    }

    #[test]
    fn test_explorer_broad_failure_message() {
        let mut explorer = KeywordExplorer::new();
        let t = explorer.begin_fetch();
        assert!(explorer.has_searched());

        explorer.finish_fetch(t, Err(invalid()));
        assert_eq!(explorer.error(), Some(FETCH_KEYWORDS_ERROR));
        assert!(!explorer.is_loading());
    }

    #[test]
    fn test_explorer_custom_failure_uses_gateway_message() {
        let mut explorer = KeywordExplorer::new();
        let t = explorer.begin_search();
        explorer.finish_search(t, Err(invalid()));
        assert_eq!(explorer.error(), Some("Search term must not be empty."));
    }

    #[test]
    fn test_explorer_broad_keeps_custom_bucket() {
        let mut explorer = KeywordExplorer::new();

        let t = explorer.begin_search();
        explorer.finish_search(t, Ok(vec![keyword("custom")]));

        let t = explorer.begin_fetch();
        explorer.finish_fetch(
            t,
            Ok(BroadKeywords {
                cash_loan_keywords: vec![keyword("cash")],
                ..Default::default()
            }),
        );

        assert!(explorer.categorized().find("custom").is_some());
        assert!(explorer.categorized().find("cash").is_some());
        assert_eq!(explorer.categorized().total(), 2);
    }

    #[test]
    fn test_explorer_filter() {
        let mut explorer = KeywordExplorer::new();
        let t = explorer.begin_search();
        explorer.finish_search(t, Ok(vec![keyword("Vay Tiền"), keyword("trả góp")]));

        explorer.set_filter("VAY");
        assert_eq!(explorer.visible().total(), 1);
        assert_eq!(explorer.categorized().total(), 2);
    }

    #[test]
    fn test_explorer_loading_flags_are_independent() {
        let mut explorer = KeywordExplorer::new();
        let broad = explorer.begin_fetch();
        let _custom = explorer.begin_search();

        explorer.finish_fetch(broad, Ok(BroadKeywords::default()));
        assert!(!explorer.is_loading());
        assert!(explorer.is_custom_loading());
        assert!(explorer.is_busy());
    }

    #[test]
    fn test_metrics_defaults() {
        let view = MetricsView::new();
        assert_eq!(view.budget(), 50_000_000.0);
        assert_eq!(view.scenario(), DEFAULT_SCENARIO);
        assert_eq!(view.inputs().cpc, 8_000.0);
        assert!(view.can_estimate());
    }

    #[test]
    fn test_metrics_budget_clamps() {
        let mut view = MetricsView::new();
        view.set_budget(-5.0);
        assert_eq!(view.budget(), 0.0);
        assert!(!view.can_estimate());

        view.set_budget(f64::NAN);
        assert_eq!(view.budget(), 0.0);
    }

    #[test]
    fn test_metrics_blank_scenario_disables_estimate() {
        let mut view = MetricsView::new();
        view.set_scenario(" ");
        assert!(!view.can_estimate());
    }

    #[test]
    fn test_metrics_estimates_replace_rates() {
        let mut view = MetricsView::new();
        let t = view.begin();
        assert!(!view.can_estimate());

        view.finish(
            t,
            Ok(EstimatedMetrics {
                cpc: 10_000.0,
                ctr: 2.0,
                cvr: 1.0,
                aov: 5_000_000.0,
            }),
        );

        assert_eq!(view.inputs().cpc, 10_000.0);
        assert_eq!(view.budget(), 50_000_000.0);
        assert_eq!(view.metrics().total_clicks, 5_000.0);
    }

    #[test]
    fn test_metrics_failure_keeps_inputs() {
        let mut view = MetricsView::new();
        let t = view.begin();
        view.finish(t, Err(invalid()));

        assert_eq!(view.error(), Some(ESTIMATE_METRICS_ERROR));
        assert_eq!(*view.inputs(), MetricsInputs::default());
    }

    #[test]
    fn test_suggested_scenario() {
        assert_eq!(
            suggested_scenario("vay tiền"),
            "A Google Ads campaign focused on maximizing conversions for the keyword \"vay tiền\" in key Vietnamese cities."
        );
    }

    #[test]
    fn test_imc_plan_cleared_on_dispatch() {
        let mut view = ImcView::default();
        let t = view.begin();
        view.finish(t, Err(invalid()));
        assert_eq!(view.error(), Some(GENERATE_IMC_PLAN_ERROR));

        let _t = view.begin();
        assert_eq!(view.error(), None);
        assert!(view.plan().is_none());
        assert!(view.is_loading());
    }

    #[test]
    fn test_imc_brief_editable() {
        let mut view = ImcView::default();
        assert!(view.can_generate());

        view.brief_mut().audience = " ".to_string();
        assert!(!view.can_generate());

        view.brief_mut().budget = 0.0;
        assert_eq!(view.brief().budget, 0.0);
        assert_eq!(view.brief().product, ImcBrief::default().product);
    }

    #[test]
    fn test_focus_failure_message() {
        let mut panel = FocusPanel::default();
        let t = panel.begin();
        panel.finish(t, Err(invalid()));
        assert_eq!(panel.error(), Some(KEYWORD_DETAILS_ERROR));

        panel.clear();
        assert_eq!(panel.error(), None);
    }

    #[test]
    fn test_strategy_export_requires_strategy() {
        let view = StrategyView::default();
        assert!(view.export("kw").is_none());
    }
}
