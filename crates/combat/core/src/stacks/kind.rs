//! Stack kinds and their per-kind profiles.

/// A named, capped resource counter an actor can accumulate.
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
pub enum StackKind {
    /// Builds from self-inflicted costs; amplifies all damage.
    Corruption,
    /// Gained by alternating card categories; amplifies damage and speed.
    Flow,
    /// Gained by playing distinct card types in one turn.
    BattleRhythm,
    /// Gained by chaining cards; grants speed.
    Momentum,
    /// Sharpens critical strikes.
    Focus,
    /// Stacks quickly from attacks; small damage and speed bonus.
    Frenzy,
    /// Spell charges consumed by surges.
    ArcaneCharge,
    /// Defensive stacks that fall off at the start of each turn.
    Fortitude,
}

/// Static tuning for one stack kind.
///
/// Derived values are pure functions of the current count and are recomputed
/// on every read.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackProfile {
    pub base_max: u32,
    /// Damage increase per stack, in percent.
    pub damage_per_stack: f64,
    /// Upper bound on the total damage increase, in percent.
    pub damage_cap: f64,
    /// Flat speed per stack.
    pub speed_per_stack: f64,
    /// Critical strike chance per stack, in percent.
    pub crit_chance_per_stack: f64,
    /// Whether the counter is cleared by the turn-start reset.
    pub resets_on_turn_start: bool,
}

impl StackProfile {
    const fn new(base_max: u32, damage_per_stack: f64, damage_cap: f64) -> Self {
        Self {
            base_max,
            damage_per_stack,
            damage_cap,
            speed_per_stack: 0.0,
            crit_chance_per_stack: 0.0,
            resets_on_turn_start: false,
        }
    }

    const fn speed(mut self, per_stack: f64) -> Self {
        self.speed_per_stack = per_stack;
        self
    }

    const fn crit(mut self, per_stack: f64) -> Self {
        self.crit_chance_per_stack = per_stack;
        self
    }

    const fn turn_scoped(mut self) -> Self {
        self.resets_on_turn_start = true;
        self
    }

    /// Damage increase in percent: `min(stacks × per_stack, cap)`.
    pub fn damage_bonus_percent(&self, stacks: u32) -> f64 {
        (stacks as f64 * self.damage_per_stack).min(self.damage_cap)
    }

    /// Damage multiplier: `1 + damage_bonus_percent / 100`.
    pub fn damage_multiplier(&self, stacks: u32) -> f64 {
        1.0 + self.damage_bonus_percent(stacks) / 100.0
    }

    pub fn speed_bonus(&self, stacks: u32) -> f64 {
        stacks as f64 * self.speed_per_stack
    }

    pub fn crit_chance_bonus(&self, stacks: u32) -> f64 {
        stacks as f64 * self.crit_chance_per_stack
    }
}

impl StackKind {
    /// Returns the tuning profile for this kind.
    pub const fn profile(self) -> StackProfile {
        match self {
            Self::Corruption => StackProfile::new(10, 3.0, 30.0),
            Self::Flow => StackProfile::new(5, 5.0, 25.0).speed(2.0),
            Self::BattleRhythm => StackProfile::new(3, 10.0, 30.0),
            Self::Momentum => StackProfile::new(10, 0.0, 0.0).speed(1.0),
            Self::Focus => StackProfile::new(5, 0.0, 0.0).crit(4.0),
            Self::Frenzy => StackProfile::new(20, 1.0, 20.0).speed(0.5),
            Self::ArcaneCharge => StackProfile::new(4, 8.0, 32.0),
            Self::Fortitude => StackProfile::new(10, 0.0, 0.0).turn_scoped(),
        }
    }
}
