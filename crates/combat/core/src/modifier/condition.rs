//! Condition definitions.
//!
//! Conditions are pure predicates over the event context, the owning actor
//! and the modifier's persistent state. Evaluation lives in
//! [`crate::resolve::conditions`].

use crate::actor::ActorKind;
use crate::card::CardType;
use crate::damage::DamageType;
use crate::stacks::StackKind;
use crate::status::StatusEffectKind;

/// Numeric comparison used by threshold conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Comparison {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl Comparison {
    pub fn compare(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Self::Equal => (lhs - rhs).abs() < f64::EPSILON,
            Self::NotEqual => (lhs - rhs).abs() >= f64::EPSILON,
            Self::Less => lhs < rhs,
            Self::LessOrEqual => lhs <= rhs,
            Self::Greater => lhs > rhs,
            Self::GreaterOrEqual => lhs >= rhs,
        }
    }
}

/// Which actor a condition or action refers to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Subject {
    /// The actor owning the modifier.
    #[default]
    Owner,
    /// The event's target.
    Target,
    /// The event's source (the attacker when damage is taken).
    Source,
}

/// One condition kind with its strongly-typed parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConditionKind {
    HasStack {
        stack: StackKind,
    },
    StackCount {
        stack: StackKind,
        comparison: Comparison,
        value: u32,
    },
    HasStatus {
        status: StatusEffectKind,
        #[cfg_attr(feature = "serde", serde(default))]
        subject: Subject,
    },
    /// Owner health as a percentage of max.
    HealthPercent {
        comparison: Comparison,
        percent: f64,
    },
    /// Owner mana as a percentage of max.
    ManaPercent {
        comparison: Comparison,
        percent: f64,
    },
    TurnNumber {
        comparison: Comparison,
        turn: u32,
    },
    CardType {
        card_type: CardType,
    },
    DamageType {
        damage_type: DamageType,
    },
    TargetType {
        kind: ActorKind,
    },
    /// Passes with `percent` chance; the roll is derived from the dispatch seed.
    RandomChance {
        percent: f64,
    },
    /// The current hit is a critical strike.
    IsCritical,
}

/// A condition plus its negation flag.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Condition {
    pub kind: ConditionKind,
    /// Negates this condition's result before the AND with its siblings.
    #[cfg_attr(feature = "serde", serde(default))]
    pub invert: bool,
}

impl Condition {
    pub fn new(kind: ConditionKind) -> Self {
        Self {
            kind,
            invert: false,
        }
    }

    pub fn inverted(kind: ConditionKind) -> Self {
        Self { kind, invert: true }
    }
}

impl From<ConditionKind> for Condition {
    fn from(kind: ConditionKind) -> Self {
        Self::new(kind)
    }
}
