//! Combat actors: the player and enemies.
//!
//! An actor owns its vitals (health, mana, guard, stagger), its attributes and
//! derived percentage stats, its resistances and its [`StackStore`]. Status
//! effects are held by a separate collaborator keyed by [`ActorId`].

use std::collections::BTreeMap;
use std::fmt;

use crate::config::CombatConfig;
use crate::damage::DamageType;
use crate::stacks::StackStore;

/// Identifier of an actor in the current combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorId(pub u32);

impl ActorId {
    pub const PLAYER: Self = Self(0);

    pub const fn enemy(index: u32) -> Self {
        Self(index + 1)
    }

    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_player() {
            write!(f, "player")
        } else {
            write!(f, "enemy#{}", self.0)
        }
    }
}

/// Classification used by target-type conditions.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorKind {
    Player,
    Minion,
    Elite,
    Boss,
}

impl ActorKind {
    pub const fn is_enemy(self) -> bool {
        !matches!(self, Self::Player)
    }
}

// ============================================================================
// Vitals
// ============================================================================

/// A bounded pool such as health or mana.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Meter {
    pub current: f64,
    pub max: f64,
}

impl Meter {
    pub fn full(max: f64) -> Self {
        Self { current: max, max }
    }

    /// Current value as a percentage of max (0 when max is 0).
    pub fn percent(&self) -> f64 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.current / self.max * 100.0
        }
    }

    /// Restores up to `amount`, returns the amount actually restored.
    pub fn restore(&mut self, amount: f64) -> f64 {
        let before = self.current;
        self.current = (self.current + amount.max(0.0)).min(self.max);
        self.current - before
    }

    /// Drains up to `amount`, returns the amount actually drained.
    pub fn drain(&mut self, amount: f64) -> f64 {
        let before = self.current;
        self.current = (self.current - amount.max(0.0)).max(0.0);
        before - self.current
    }

    /// Spends exactly `amount` if available.
    pub fn spend(&mut self, amount: f64) -> bool {
        if amount > self.current {
            return false;
        }
        self.current -= amount;
        true
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }
}

/// Damage-absorbing buffer consumed before health.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Guard {
    pub current: f64,
    pub max: f64,
    /// Fraction of current guard lost at each turn boundary.
    pub decay: f64,
}

impl Guard {
    pub fn new(max: f64, decay: f64) -> Self {
        Self {
            current: 0.0,
            max,
            decay: decay.clamp(0.0, 1.0),
        }
    }

    pub fn gain(&mut self, amount: f64) -> f64 {
        let before = self.current;
        self.current = (self.current + amount.max(0.0)).min(self.max);
        self.current - before
    }

    /// Absorbs as much of `damage` as possible, returns `(absorbed, remaining)`.
    pub fn absorb(&mut self, damage: f64) -> (f64, f64) {
        let absorbed = damage.max(0.0).min(self.current);
        self.current -= absorbed;
        (absorbed, damage.max(0.0) - absorbed)
    }

    /// Applies one turn of decay.
    pub fn decay_turn(&mut self) -> f64 {
        let lost = self.current * self.decay;
        self.current -= lost;
        lost
    }
}

/// Secondary meter that stuns an actor on reaching its threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stagger {
    pub current: u32,
    pub threshold: u32,
}

impl Stagger {
    pub fn new(threshold: u32) -> Self {
        Self {
            current: 0,
            threshold,
        }
    }

    /// Adds stagger. Returns true when the threshold is reached; the meter
    /// then resets.
    pub fn add(&mut self, amount: u32) -> bool {
        self.current = self.current.saturating_add(amount);
        if self.threshold > 0 && self.current >= self.threshold {
            self.current = 0;
            return true;
        }
        false
    }
}

// ============================================================================
// Attributes and derived stats
// ============================================================================

/// Core character attributes used for damage scaling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    pub strength: u32,
    pub dexterity: u32,
    pub intelligence: u32,
}

impl Attributes {
    pub const fn new(strength: u32, dexterity: u32, intelligence: u32) -> Self {
        Self {
            strength,
            dexterity,
            intelligence,
        }
    }
}

/// Percentage stats modifiers write into.
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
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKind {
    /// Increased damage for attack cards.
    AttackDamage,
    /// Increased damage for spell cards.
    SpellDamage,
    /// Increased damage for non-physical damage types.
    ElementalDamage,
    /// Added critical strike chance, in percent points.
    CritChance,
    /// Increased critical multiplier, in percent.
    CritMultiplier,
    /// Increased guard gained.
    GuardEffectiveness,
    /// Flat speed.
    Speed,
}

/// How a stat modification is applied.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatDelta {
    /// Adds the value.
    Flat(f64),
    /// Scales the current value by `1 + percent / 100`.
    Percent(f64),
}

/// Settable percentage stats of an actor.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedStats {
    values: BTreeMap<StatKind, f64>,
}

impl DerivedStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stat: StatKind) -> f64 {
        self.values.get(&stat).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, stat: StatKind, value: f64) {
        self.values.insert(stat, value);
    }

    /// Applies a delta and returns the new value.
    pub fn apply(&mut self, stat: StatKind, delta: StatDelta) -> f64 {
        let current = self.get(stat);
        let next = match delta {
            StatDelta::Flat(value) => current + value,
            StatDelta::Percent(percent) => current * (1.0 + percent / 100.0),
        };
        self.set(stat, next);
        next
    }

    /// Builder: set a stat.
    pub fn with(mut self, stat: StatKind, value: f64) -> Self {
        self.set(stat, value);
        self
    }
}

/// Per-damage-type resistance values.
///
/// Physical resistance is a flat reduction; every other type is a percentage.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resistances {
    values: BTreeMap<DamageType, f64>,
}

impl Resistances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, damage_type: DamageType) -> f64 {
        self.values.get(&damage_type).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, damage_type: DamageType, value: f64) {
        self.values.insert(damage_type, value);
    }

    pub fn with(mut self, damage_type: DamageType, value: f64) -> Self {
        self.set(damage_type, value);
        self
    }
}

// ============================================================================
// Combat Actor
// ============================================================================

/// Outcome of applying damage to an actor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DamageTaken {
    pub absorbed_by_guard: f64,
    pub health_lost: f64,
    pub killed: bool,
    /// The blow filled the stagger meter.
    pub staggered: bool,
}

/// A player or enemy participating in combat.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatActor {
    pub id: ActorId,
    pub kind: ActorKind,
    pub health: Meter,
    pub mana: Meter,
    pub guard: Guard,
    pub stagger: Stagger,
    pub attributes: Attributes,
    pub stats: DerivedStats,
    pub resistances: Resistances,
    pub stacks: StackStore,
    /// Unlocked progression names used to activate modifiers.
    pub unlocks: Vec<String>,
}

impl CombatActor {
    pub fn new(id: ActorId, kind: ActorKind, max_health: f64, max_mana: f64) -> Self {
        Self {
            id,
            kind,
            health: Meter::full(max_health),
            mana: Meter::full(max_mana),
            guard: Guard::new(max_health, CombatConfig::DEFAULT_GUARD_DECAY),
            stagger: Stagger::new(CombatConfig::DEFAULT_STAGGER_THRESHOLD),
            attributes: Attributes::default(),
            stats: DerivedStats::new(),
            resistances: Resistances::new(),
            stacks: StackStore::new(),
            unlocks: Vec::new(),
        }
    }

    /// Creates the player actor.
    pub fn player(max_health: f64, max_mana: f64) -> Self {
        Self::new(ActorId::PLAYER, ActorKind::Player, max_health, max_mana)
    }

    /// Creates an enemy actor.
    pub fn enemy(index: u32, kind: ActorKind, max_health: f64) -> Self {
        Self::new(ActorId::enemy(index), kind, max_health, 0.0)
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_resistances(mut self, resistances: Resistances) -> Self {
        self.resistances = resistances;
        self
    }

    pub fn with_unlocks<I, S>(mut self, unlocks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unlocks = unlocks.into_iter().map(Into::into).collect();
        self
    }

    /// Applies balance values from the combat configuration.
    pub fn configured(mut self, config: &CombatConfig) -> Self {
        self.guard.decay = config.guard_decay.clamp(0.0, 1.0);
        self.stagger.threshold = config.stagger_threshold;
        self
    }

    pub fn is_alive(&self) -> bool {
        !self.health.is_empty()
    }

    /// Applies damage: guard absorbs first, the remainder reduces health.
    /// The whole blow, guarded or not, builds stagger.
    pub fn take_damage(&mut self, amount: f64) -> DamageTaken {
        let (absorbed, remaining) = self.guard.absorb(amount);
        let health_lost = self.health.drain(remaining);
        let killed = health_lost > 0.0 && self.health.is_empty();
        let staggered = !killed && self.stagger.add(amount.max(0.0) as u32);
        DamageTaken {
            absorbed_by_guard: absorbed,
            health_lost,
            killed,
            staggered,
        }
    }

    /// Gains guard, scaled by guard effectiveness.
    pub fn gain_guard(&mut self, amount: f64) -> f64 {
        let effectiveness = 1.0 + self.stats.get(StatKind::GuardEffectiveness) / 100.0;
        self.guard.gain(amount * effectiveness)
    }

    /// Changes health by `percent` of max health. Negative values deal
    /// self-damage that bypasses guard. Returns the signed change.
    pub fn modify_health_percent(&mut self, percent: f64) -> f64 {
        let amount = self.health.max * percent / 100.0;
        if amount >= 0.0 {
            self.health.restore(amount)
        } else {
            -self.health.drain(-amount)
        }
    }

    /// Turn-boundary upkeep owned by the actor: guard decay and turn-scoped
    /// stacks.
    pub fn start_turn(&mut self) {
        self.guard.decay_turn();
        self.stacks.reset_turn_scoped();
    }

    /// Combat-start reset of per-combat state.
    pub fn begin_combat(&mut self) {
        self.stacks.reset_all();
        self.stacks.drain_changes();
        self.guard.current = 0.0;
        self.stagger.current = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_absorbs_before_health() {
        let mut actor = CombatActor::player(50.0, 3.0);
        actor.gain_guard(12.0);

        let taken = actor.take_damage(20.0);
        assert_eq!(taken.absorbed_by_guard, 12.0);
        assert_eq!(taken.health_lost, 8.0);
        assert_eq!(actor.health.current, 42.0);
        assert!(!taken.killed);
    }

    #[test]
    fn lethal_damage_reports_kill() {
        let mut enemy = CombatActor::enemy(0, ActorKind::Minion, 10.0);
        let taken = enemy.take_damage(25.0);
        assert_eq!(taken.health_lost, 10.0);
        assert!(taken.killed);
        assert!(!enemy.is_alive());
    }

    #[test]
    fn guard_decays_by_fraction() {
        let mut actor = CombatActor::player(100.0, 3.0);
        actor.gain_guard(40.0);
        actor.start_turn();
        assert_eq!(actor.guard.current, 20.0);
    }

    #[test]
    fn heavy_blows_stagger_through_guard() {
        let mut enemy = CombatActor::enemy(1, ActorKind::Elite, 200.0);
        enemy.stagger.threshold = 30;
        enemy.gain_guard(50.0);

        let first = enemy.take_damage(20.0);
        assert!(!first.staggered);
        assert_eq!(first.health_lost, 0.0);

        let second = enemy.take_damage(15.0);
        assert!(second.staggered);
        assert_eq!(enemy.stagger.current, 0);
    }

    #[test]
    fn stagger_stuns_and_resets() {
        let mut stagger = Stagger::new(10);
        assert!(!stagger.add(6));
        assert!(stagger.add(6));
        assert_eq!(stagger.current, 0);
    }

    #[test]
    fn percent_stat_delta_scales_current_value() {
        let mut stats = DerivedStats::new().with(StatKind::AttackDamage, 20.0);
        assert_eq!(stats.apply(StatKind::AttackDamage, StatDelta::Percent(50.0)), 30.0);
        assert_eq!(stats.apply(StatKind::SpellDamage, StatDelta::Flat(15.0)), 15.0);
    }

    #[test]
    fn health_percent_can_heal_or_hurt() {
        let mut actor = CombatActor::player(80.0, 3.0);
        assert_eq!(actor.modify_health_percent(-25.0), -20.0);
        assert_eq!(actor.modify_health_percent(10.0), 8.0);
        assert_eq!(actor.health.current, 68.0);
    }
}
