//! Application state for the marketing assistant
//!
//! View controllers, request tickets and the shell that ties them to the
//! generation gateway and the saved strategy store.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod request;
pub mod shell;
pub mod views;

pub use request::{Completion, RequestSlot, RequestTracker, Ticket};
pub use shell::{Shell, ShellAction, ShellError, ShellState, View};
pub use views::{
    FocusPanel, ImcView, KeywordExplorer, MetricsView, StrategyExport, StrategyView,
};
