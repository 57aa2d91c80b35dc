//! Per-card comparison state.
//!
//! Every suggestion card owns one [`ComparisonSession`]. Sessions share no
//! state with each other; the only rule they enforce is that a card never has
//! two comparisons in flight at once.
//!
//! ```text
//! Idle ──▶ Running ──▶ Succeeded(report)
//!   ▲         │
//!   │         └──────▶ Failed(message)
//!   └──── next compare() starts over
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use super::{
    executor::QueryExecutor,
    orchestrator::Comparator,
    types::{CompareRequest, CompareResult}
};
use crate::error::{AppResult, comparison_in_flight, error_message};

/// State of one card's comparison.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ComparisonState {
    #[default]
    Idle,
    Running,
    /// Both executions were attempted; per-side errors live in the report
    Succeeded(CompareResult),
    /// The comparison itself failed
    Failed(String)
}

/// Comparison state owned by a single suggestion card.
#[derive(Debug, Default)]
pub struct ComparisonSession {
    card:  String,
    state: Mutex<ComparisonState>
}

impl ComparisonSession {
    pub fn new(card: impl Into<String>) -> Self {
        Self {
            card:  card.into(),
            state: Mutex::new(ComparisonState::Idle)
        }
    }

    pub fn card(&self) -> &str {
        &self.card
    }

    pub fn state(&self) -> ComparisonState {
        self.lock().clone()
    }

    pub fn is_running(&self) -> bool {
        matches!(*self.lock(), ComparisonState::Running)
    }

    /// Report of the last successful comparison, if the card shows one
    pub fn last_result(&self) -> Option<CompareResult> {
        match &*self.lock() {
            ComparisonState::Succeeded(result) => Some(result.clone()),
            _ => None
        }
    }

    /// Discard the displayed outcome. Has no effect while running.
    pub fn reset(&self) {
        let mut state = self.lock();
        if !matches!(*state, ComparisonState::Running) {
            *state = ComparisonState::Idle;
        }
    }

    /// Run a comparison for this card.
    ///
    /// The new outcome replaces whatever the card showed before.
    ///
    /// # Errors
    ///
    /// - input error when the request is incomplete (state is left as is)
    /// - conflict when a comparison for this card is already running
    /// - comparison error when the execution service is unavailable (state
    ///   becomes [`ComparisonState::Failed`])
    pub async fn compare<E: QueryExecutor>(
        &self,
        comparator: &Comparator<E>,
        request: &CompareRequest
    ) -> AppResult<CompareResult> {
        let request = request.normalized()?;
        let run = self.begin()?;
        let outcome = comparator.run(&request).await;
        run.finish(&outcome);
        outcome
    }

    fn begin(&self) -> AppResult<RunGuard<'_>> {
        let mut state = self.lock();
        if matches!(*state, ComparisonState::Running) {
            return Err(comparison_in_flight(&self.card));
        }
        *state = ComparisonState::Running;
        debug!(card = %self.card, "comparison started");
        Ok(RunGuard {
            session:  self,
            finished: false
        })
    }

    fn lock(&self) -> MutexGuard<'_, ComparisonState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Marks the session as running until finished; a run dropped before
/// finishing puts the card back to idle.
struct RunGuard<'a> {
    session:  &'a ComparisonSession,
    finished: bool
}

impl RunGuard<'_> {
    fn finish(mut self, outcome: &AppResult<CompareResult>) {
        let next = match outcome {
            Ok(result) => ComparisonState::Succeeded(result.clone()),
            Err(e) => ComparisonState::Failed(error_message(e))
        };
        *self.session.lock() = next;
        self.finished = true;
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            *self.session.lock() = ComparisonState::Idle;
        }
    }
}
