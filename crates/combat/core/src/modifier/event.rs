//! Combat occurrences modifiers react to.

/// Event types raised by the turn loop, card-play handling and the core
/// itself (stack transitions are raised as deferred follow-up events).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventType {
    OnCombatStart,
    OnTurnStart,
    OnTurnEnd,
    OnCardPlayed,
    OnDamageDealt,
    OnDamageTaken,
    OnCriticalHit,
    OnEnemyKilled,
    OnGuardGained,
    /// A stack counter increased.
    OnStackGained,
    /// A stack counter dropped to zero.
    OnStackDepleted,
    /// A stack counter reached its cap.
    OnStackMaxed,
}

impl EventType {
    /// Events the core raises on its own as deferred follow-ups.
    pub const fn is_derived(self) -> bool {
        matches!(
            self,
            Self::OnStackGained | Self::OnStackDepleted | Self::OnStackMaxed
        )
    }
}
