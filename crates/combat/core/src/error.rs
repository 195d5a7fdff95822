//! Common error infrastructure for combat-core.
//!
//! Nothing in the rules core is fatal to a combat session. Resolution errors are
//! produced by individual actions and conditions, logged by the dispatcher and
//! collected into the dispatch report; they never abort the remaining effects.

use crate::actor::ActorId;
use crate::modifier::{ContextKey, EventType};

/// Severity level of an error, used for categorization and logging priority.
///
/// - **Recoverable**: a collaborator or target was unavailable for this event only
/// - **Validation**: modifier data is malformed and will fail every time
/// - **Internal**: an invariant the core maintains was broken
/// - **Fatal**: reserved for the embedding session; the core never produces it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug in the core.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all combat-core errors.
///
/// Provides uniform classification so diagnostics can be filtered and counted
/// without matching on concrete error enums.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors raised while evaluating a condition or resolving an action.
///
/// Every variant degrades to a no-op for the single action or behavior that
/// produced it.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ResolveError {
    /// The event context does not carry a value the action needs.
    #[error("event context has no `{key}` value")]
    MissingContext { key: ContextKey },

    /// The action targets another actor but the event has none.
    #[error("action requires a target actor but the event has none")]
    MissingTarget,

    /// A collaborator the action relies on is not available.
    #[error("collaborator unavailable for actor {actor}: {collaborator}")]
    CollaboratorUnavailable {
        actor: ActorId,
        collaborator: &'static str,
    },

    /// A parameter in the modifier data is out of its valid range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// A named behavior was referenced but never registered.
    #[error("no behavior registered for modifier `{0}`")]
    UnknownBehavior(String),

    /// Deferred events kept producing more deferred events.
    #[error("chained event limit of {limit} reached while deferring {event}")]
    ChainLimitReached { event: EventType, limit: u32 },
}

impl GameError for ResolveError {
    fn severity(&self) -> ErrorSeverity {
        use ResolveError::*;
        match self {
            MissingContext { .. } | MissingTarget => ErrorSeverity::Recoverable,
            CollaboratorUnavailable { .. } => ErrorSeverity::Recoverable,
            InvalidParameter { .. } | UnknownBehavior(_) => ErrorSeverity::Validation,
            ChainLimitReached { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use ResolveError::*;
        match self {
            MissingContext { .. } => "RESOLVE_MISSING_CONTEXT",
            MissingTarget => "RESOLVE_MISSING_TARGET",
            CollaboratorUnavailable { .. } => "RESOLVE_COLLABORATOR_UNAVAILABLE",
            InvalidParameter { .. } => "RESOLVE_INVALID_PARAMETER",
            UnknownBehavior(_) => "RESOLVE_UNKNOWN_BEHAVIOR",
            ChainLimitReached { .. } => "RESOLVE_CHAIN_LIMIT_REACHED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_context_is_recoverable() {
        let err = ResolveError::MissingContext {
            key: ContextKey::DamageReduced,
        };
        assert!(err.severity().is_recoverable());
        assert_eq!(err.error_code(), "RESOLVE_MISSING_CONTEXT");
        assert_eq!(
            err.to_string(),
            "event context has no `damage_reduced` value"
        );
    }

    #[test]
    fn chain_limit_is_internal() {
        let err = ResolveError::ChainLimitReached {
            event: EventType::OnTurnStart,
            limit: 4,
        };
        assert!(err.severity().is_internal());
    }
}
