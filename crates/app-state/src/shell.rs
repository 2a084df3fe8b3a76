//! Application shell
//!
//! The shell owns every view controller plus the cross-view state: the active
//! view, the selected keyword and the saved strategy list. Cross-view changes
//! go through [`ShellAction`]s; view requests go through the async methods on
//! [`Shell`], which take a ticket, call the gateway with the state lock
//! released, and hand the outcome back to the controller.

use marketing_core::{ImcBrief, Keyword, MarketingGateway, SavedStrategy};
use parking_lot::Mutex;
use std::sync::Arc;
use storage::{StoreError, StrategyStore};
use thiserror::Error;

use crate::request::{Completion, Ticket};
use crate::views::{
    suggested_scenario, FocusPanel, ImcView, KeywordExplorer, MetricsView, StrategyExport,
    StrategyView,
};

// =============================================================================
// Error Types
// =============================================================================

/// Shell errors
#[derive(Debug, Error)]
pub enum ShellError {
    /// The requested action is currently disabled
    #[error("{0} is not available right now")]
    Disabled(&'static str),

    /// Strategy generation needs a selected keyword
    #[error("No keyword selected")]
    NoKeywordSelected,

    /// There is no strategy with content pillars to save
    #[error("Nothing to save")]
    NothingToSave,

    /// The same strategy is already saved for this keyword
    #[error("Strategy already saved")]
    AlreadySaved,

    /// No saved strategy has this id
    #[error("Saved strategy not found: {0}")]
    StrategyNotFound(String),

    /// Writing the saved list failed
    #[error("Failed to persist saved strategies: {0}")]
    Persistence(#[from] StoreError),
}

/// Result type for shell operations
pub type Result<T> = std::result::Result<T, ShellError>;

// =============================================================================
// Actions and State
// =============================================================================

/// Top-level views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    /// Keyword explorer
    #[default]
    Keywords,
    /// Budget projection
    Metrics,
    /// Content strategy
    Strategy,
    /// IMC planner
    Imc,
}

/// Named cross-view actions
#[derive(Debug, Clone, PartialEq)]
pub enum ShellAction {
    /// Switch the active view
    ChangeView(View),
    /// Select a keyword and load its details
    SelectKeyword(Keyword),
    /// Close the keyword detail panel
    CloseFocus,
    /// Save the current strategy for the selected keyword
    SaveStrategy,
    /// Delete a saved strategy by id
    DeleteStrategy(String),
    /// Show a saved strategy by id
    LoadStrategy(String),
}

/// Follow-up work of a reduced action
#[derive(Debug)]
enum Effect {
    None,
    FetchDetails { ticket: Ticket, keyword: String },
    Persist,
}

/// Everything a renderer binds to
#[derive(Debug, Clone, Default)]
pub struct ShellState {
    view: View,
    selected: Option<Keyword>,
    saved: Vec<SavedStrategy>,
    explorer: KeywordExplorer,
    focus: FocusPanel,
    metrics: MetricsView,
    strategy: StrategyView,
    imc: ImcView,
}

impl ShellState {
    /// State with a pre-loaded saved list
    pub fn with_saved(saved: Vec<SavedStrategy>) -> Self {
        Self {
            saved,
            ..Default::default()
        }
    }

    /// Active view
    pub fn view(&self) -> View {
        self.view
    }

    /// Selected keyword
    pub fn selected_keyword(&self) -> Option<&Keyword> {
        self.selected.as_ref()
    }

    /// Saved strategies in save order
    pub fn saved_strategies(&self) -> &[SavedStrategy] {
        &self.saved
    }

    /// Keyword explorer
    pub fn explorer(&self) -> &KeywordExplorer {
        &self.explorer
    }

    /// Keyword detail panel
    pub fn focus(&self) -> &FocusPanel {
        &self.focus
    }

    /// Metrics view
    pub fn metrics(&self) -> &MetricsView {
        &self.metrics
    }

    /// Strategy view
    pub fn strategy(&self) -> &StrategyView {
        &self.strategy
    }

    /// IMC planner
    pub fn imc(&self) -> &ImcView {
        &self.imc
    }

    /// Whether the current strategy is already in the saved list
    pub fn is_strategy_saved(&self) -> bool {
        match (&self.selected, self.strategy.strategy()) {
            (Some(keyword), Some(strategy)) => self
                .saved
                .iter()
                .any(|saved| saved.is_same_as(&keyword.text, strategy)),
            _ => false,
        }
    }

    /// Whether the save action is enabled
    pub fn can_save(&self) -> bool {
        self.selected.is_some()
            && self
                .strategy
                .strategy()
                .is_some_and(|s| !s.content_pillars.is_empty())
            && !self.is_strategy_saved()
    }

    /// Export of the current strategy for the selected keyword
    pub fn export_strategy(&self) -> Option<StrategyExport> {
        let keyword = self.selected.as_ref()?;
        self.strategy.export(&keyword.text)
    }

    fn select(&mut self, keyword: Keyword) -> Effect {
        self.metrics.set_scenario(suggested_scenario(&keyword.text));
        self.strategy.clear();
        let ticket = self.focus.begin();
        let text = keyword.text.clone();
        self.selected = Some(keyword);
        Effect::FetchDetails {
            ticket,
            keyword: text,
        }
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.focus.clear();
    }

    fn reduce(&mut self, action: ShellAction) -> Result<Effect> {
        match action {
            ShellAction::ChangeView(view) => {
                self.view = view;
                Ok(Effect::None)
            }
            ShellAction::SelectKeyword(keyword) => Ok(self.select(keyword)),
            ShellAction::CloseFocus => {
                self.clear_selection();
                Ok(Effect::None)
            }
            ShellAction::SaveStrategy => {
                let (keyword, strategy) = match (&self.selected, self.strategy.strategy()) {
                    (Some(keyword), Some(strategy)) if !strategy.content_pillars.is_empty() => {
                        (keyword.text.clone(), strategy.clone())
                    }
                    _ => return Err(ShellError::NothingToSave),
                };
                if self.is_strategy_saved() {
                    return Err(ShellError::AlreadySaved);
                }
                self.saved.push(SavedStrategy::new(keyword, strategy));
                Ok(Effect::Persist)
            }
            ShellAction::DeleteStrategy(id) => {
                let index = self
                    .saved
                    .iter()
                    .position(|s| s.id == id)
                    .ok_or(ShellError::StrategyNotFound(id))?;
                self.saved.remove(index);
                Ok(Effect::Persist)
            }
            ShellAction::LoadStrategy(id) => {
                let saved = self
                    .saved
                    .iter()
                    .find(|s| s.id == id)
                    .cloned()
                    .ok_or(ShellError::StrategyNotFound(id))?;
                let keyword = self
                    .explorer
                    .categorized()
                    .find(&saved.keyword)
                    .cloned()
                    .unwrap_or_else(|| Keyword::stub(saved.keyword.as_str()));

                let effect = self.select(keyword);
                self.strategy.show(saved.strategy);
                self.view = View::Strategy;
                Ok(effect)
            }
        }
    }
}

// =============================================================================
// Shell
// =============================================================================

/// Shared application shell
pub struct Shell {
    gateway: Arc<dyn MarketingGateway>,
    store: Arc<dyn StrategyStore>,
    state: Mutex<ShellState>,
    persist_lock: tokio::sync::Mutex<()>,
}

impl Shell {
    /// Create a shell, loading the saved strategy list once
    ///
    /// A list that cannot be read is logged and replaced by an empty one.
    pub async fn start(gateway: Arc<dyn MarketingGateway>, store: Arc<dyn StrategyStore>) -> Self {
        let saved = match store.load_all().await {
            Ok(saved) => {
                tracing::info!(count = saved.len(), "loaded saved strategies");
                saved
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load saved strategies");
                Vec::new()
            }
        };
        Self::with_state(gateway, store, ShellState::with_saved(saved))
    }

    /// Create a shell around existing state
    pub fn with_state(
        gateway: Arc<dyn MarketingGateway>,
        store: Arc<dyn StrategyStore>,
        state: ShellState,
    ) -> Self {
        Self {
            gateway,
            store,
            state: Mutex::new(state),
            persist_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> ShellState {
        self.state.lock().clone()
    }

    /// Read the current state without copying it
    pub fn read<R>(&self, f: impl FnOnce(&ShellState) -> R) -> R {
        f(&self.state.lock())
    }

    /// Apply a named action and run its follow-up work
    pub async fn dispatch(&self, action: ShellAction) -> Result<()> {
        let effect = self.state.lock().reduce(action)?;

        match effect {
            Effect::None => Ok(()),
            Effect::FetchDetails { ticket, keyword } => {
                tracing::debug!(keyword = %keyword, "loading keyword details");
                let result = self.gateway.fetch_keyword_details(&keyword).await;
                self.state.lock().focus.finish(ticket, result);
                Ok(())
            }
            Effect::Persist => self.persist().await,
        }
    }

    async fn persist(&self) -> Result<()> {
        let _guard = self.persist_lock.lock().await;

        // Write the list as it is now, so a later action never loses to an earlier write
        let saved = self.state.lock().saved.clone();
        if let Err(e) = self.store.save_all(&saved).await {
            tracing::error!(error = %e, count = saved.len(), "failed to persist saved strategies");
            return Err(e.into());
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Form edits
    // -------------------------------------------------------------------------

    /// Edit the custom search term
    pub fn set_search_term(&self, term: impl Into<String>) {
        self.state.lock().explorer.set_search_term(term);
    }

    /// Edit the keyword filter
    pub fn set_filter(&self, filter: impl Into<String>) {
        self.state.lock().explorer.set_filter(filter);
    }

    /// Edit the metrics budget
    pub fn set_budget(&self, budget: f64) {
        self.state.lock().metrics.set_budget(budget);
    }

    /// Edit the metrics scenario
    pub fn set_scenario(&self, scenario: impl Into<String>) {
        self.state.lock().metrics.set_scenario(scenario);
    }

    /// Edit the IMC brief
    pub fn edit_imc_brief(&self, edit: impl FnOnce(&mut ImcBrief)) {
        edit(self.state.lock().imc.brief_mut());
    }

    // -------------------------------------------------------------------------
    // View requests
    // -------------------------------------------------------------------------

    /// Fetch keywords for the four fixed categories
    pub async fn fetch_keywords(&self) -> Result<Completion> {
        let ticket = {
            let mut state = self.state.lock();
            if !state.explorer.can_fetch() {
                return Err(ShellError::Disabled("Keyword fetch"));
            }
            state.clear_selection();
            state.explorer.begin_fetch()
        };

        let result = self.gateway.fetch_broad_keywords().await;
        Ok(self.state.lock().explorer.finish_fetch(ticket, result))
    }

    /// Discover keywords for the current search term
    pub async fn discover_keywords(&self) -> Result<Completion> {
        let (ticket, term) = {
            let mut state = self.state.lock();
            if !state.explorer.can_search() {
                return Err(ShellError::Disabled("Keyword search"));
            }
            state.clear_selection();
            let term = state.explorer.search_term().to_string();
            (state.explorer.begin_search(), term)
        };

        let result = self.gateway.discover_keywords(&term).await;
        Ok(self.state.lock().explorer.finish_search(ticket, result))
    }

    /// Generate a content strategy for the selected keyword
    pub async fn generate_strategy(&self) -> Result<Completion> {
        let (ticket, keyword) = {
            let mut state = self.state.lock();
            let keyword = state
                .selected
                .as_ref()
                .map(|k| k.text.clone())
                .ok_or(ShellError::NoKeywordSelected)?;
            state.view = View::Strategy;
            (state.strategy.begin(), keyword)
        };

        let result = self.gateway.generate_content_strategy(&keyword).await;
        Ok(self.state.lock().strategy.finish(ticket, result))
    }

    /// Estimate rate inputs for the current budget and scenario
    pub async fn estimate_metrics(&self) -> Result<Completion> {
        let (ticket, budget, scenario) = {
            let mut state = self.state.lock();
            if !state.metrics.can_estimate() {
                return Err(ShellError::Disabled("Metrics estimation"));
            }
            let budget = state.metrics.budget();
            let scenario = state.metrics.scenario().to_string();
            (state.metrics.begin(), budget, scenario)
        };

        let result = self.gateway.estimate_metrics(budget, &scenario).await;
        Ok(self.state.lock().metrics.finish(ticket, result))
    }

    /// Generate an IMC plan for the current brief
    pub async fn generate_imc_plan(&self) -> Result<Completion> {
        let (ticket, brief) = {
            let mut state = self.state.lock();
            if !state.imc.can_generate() {
                return Err(ShellError::Disabled("IMC plan generation"));
            }
            let brief = state.imc.brief().clone();
            (state.imc.begin(), brief)
        };

        let result = self.gateway.generate_imc_plan(&brief).await;
        Ok(self.state.lock().imc.finish(ticket, result))
    }
}
