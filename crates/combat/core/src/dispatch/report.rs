//! Dispatch outcome summary.

use crate::error::{GameError, ResolveError};
use crate::modifier::EventType;

/// An action or deferred event that degraded to a no-op.
#[derive(Clone, Debug, PartialEq)]
pub struct DispatchFailure {
    pub event: EventType,
    /// Modifier whose action failed; `None` for dispatcher-level failures.
    pub modifier: Option<String>,
    pub action: Option<&'static str>,
    pub error: ResolveError,
}

impl DispatchFailure {
    pub fn error_code(&self) -> &'static str {
        self.error.error_code()
    }
}

/// What one `process_event` call did, including its deferred follow-ups.
#[derive(Clone, Debug, PartialEq)]
pub struct DispatchReport {
    pub event: EventType,
    pub modifiers_considered: usize,
    pub effects_fired: usize,
    pub actions_run: usize,
    /// Follow-up events dispatched after the primary event.
    pub deferred_processed: usize,
    /// Follow-up events dropped at the chain limit.
    pub deferred_dropped: usize,
    pub failures: Vec<DispatchFailure>,
}

impl DispatchReport {
    pub fn new(event: EventType) -> Self {
        Self {
            event,
            modifiers_considered: 0,
            effects_fired: 0,
            actions_run: 0,
            deferred_processed: 0,
            deferred_dropped: 0,
            failures: Vec::new(),
        }
    }

    /// No action failed and no follow-up was dropped.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.deferred_dropped == 0
    }

    pub fn has_failure(&self, code: &str) -> bool {
        self.failures.iter().any(|f| f.error_code() == code)
    }
}
