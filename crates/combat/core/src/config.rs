/// Combat balance parameters and tunable limits.
///
/// Runtime-tunable values live on the struct so they can be loaded from a
/// balance table; fixed container capacities are associated constants.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Fraction of non-physical damage that always gets through resistances.
    pub resistance_floor: f64,
    /// Critical multiplier used when a card or weapon does not provide one.
    pub default_crit_multiplier: f64,
    /// Critical chance (percent) every damage roll starts from.
    pub base_crit_chance: f64,
    /// Upper bound on deferred events drained after a single primary dispatch.
    pub max_chained_events: u32,
    /// Fraction of current guard lost at each turn boundary.
    pub guard_decay: f64,
    /// Stagger required to stun an actor.
    pub stagger_threshold: u32,
}

impl CombatConfig {
    // ===== fixed capacities =====
    pub const MAX_STATUS_EFFECTS: usize = 16;
    pub const MAX_EXTRA_HITS: usize = 8;
    /// Undrained stack changes kept per store; older entries are dropped.
    pub const MAX_STACK_JOURNAL: usize = 64;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_RESISTANCE_FLOOR: f64 = 0.1;
    pub const DEFAULT_CRIT_MULTIPLIER: f64 = 1.5;
    pub const DEFAULT_BASE_CRIT_CHANCE: f64 = 5.0;
    pub const DEFAULT_MAX_CHAINED_EVENTS: u32 = 16;
    pub const DEFAULT_GUARD_DECAY: f64 = 0.5;
    pub const DEFAULT_STAGGER_THRESHOLD: u32 = 100;

    pub fn new() -> Self {
        Self {
            resistance_floor: Self::DEFAULT_RESISTANCE_FLOOR,
            default_crit_multiplier: Self::DEFAULT_CRIT_MULTIPLIER,
            base_crit_chance: Self::DEFAULT_BASE_CRIT_CHANCE,
            max_chained_events: Self::DEFAULT_MAX_CHAINED_EVENTS,
            guard_decay: Self::DEFAULT_GUARD_DECAY,
            stagger_threshold: Self::DEFAULT_STAGGER_THRESHOLD,
        }
    }

    pub fn with_max_chained_events(mut self, max_chained_events: u32) -> Self {
        self.max_chained_events = max_chained_events;
        self
    }

    pub fn with_base_crit_chance(mut self, base_crit_chance: f64) -> Self {
        self.base_crit_chance = base_crit_chance;
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
