//! Damage modifier aggregation.
//!
//! Modifiers are grouped the same way for every damage type:
//! `base + added → × (1 + Σ increased) → × Π (1 + more) → critical`.

use std::collections::BTreeMap;

use super::types::DamageType;

/// Aggregated inputs for one damage type.
///
/// `increased` and `more` entries are fractions: `0.5` means +50%.
/// Critical chance is in percent points.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DamageModifiers {
    pub base: f64,
    pub added: f64,
    /// Additive percentage modifiers, summed before applying.
    pub increased: Vec<f64>,
    /// Multiplicative percentage modifiers, applied one after another.
    pub more: Vec<f64>,
    pub crit_chance: f64,
    /// Critical chance from outside the damage source (stacks, stats, events).
    pub crit_chance_bonus: Vec<f64>,
    pub crit_multiplier: f64,
    /// Multiplicative boosts to the critical multiplier itself.
    pub crit_multiplier_boosts: Vec<f64>,
}

impl Default for DamageModifiers {
    fn default() -> Self {
        Self {
            base: 0.0,
            added: 0.0,
            increased: Vec::new(),
            more: Vec::new(),
            crit_chance: 0.0,
            crit_chance_bonus: Vec::new(),
            crit_multiplier: 1.0,
            crit_multiplier_boosts: Vec::new(),
        }
    }
}

impl DamageModifiers {
    pub fn new(base: f64) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    pub fn added(mut self, value: f64) -> Self {
        self.added += value;
        self
    }

    pub fn increased(mut self, fraction: f64) -> Self {
        self.increased.push(fraction);
        self
    }

    pub fn more(mut self, fraction: f64) -> Self {
        self.more.push(fraction);
        self
    }

    pub fn crit_chance(mut self, percent: f64) -> Self {
        self.crit_chance = percent;
        self
    }

    pub fn crit_bonus(mut self, percent: f64) -> Self {
        self.crit_chance_bonus.push(percent);
        self
    }

    pub fn crit_multiplier(mut self, multiplier: f64) -> Self {
        self.crit_multiplier = multiplier;
        self
    }

    pub fn crit_multiplier_boost(mut self, fraction: f64) -> Self {
        self.crit_multiplier_boosts.push(fraction);
        self
    }

    /// `Σ increased`.
    pub fn increased_total(&self) -> f64 {
        self.increased.iter().sum()
    }

    /// `Π (1 + more_i)`.
    pub fn more_product(&self) -> f64 {
        self.more.iter().map(|m| 1.0 + m).product()
    }

    /// `clamp(crit_chance + Σ bonus, 0, 100)`.
    pub fn effective_crit_chance(&self) -> f64 {
        let bonus: f64 = self.crit_chance_bonus.iter().sum();
        (self.crit_chance + bonus).clamp(0.0, 100.0)
    }

    /// `crit_multiplier × Π (1 + boost_i)`.
    pub fn effective_crit_multiplier(&self) -> f64 {
        self.crit_multiplier_boosts
            .iter()
            .fold(self.crit_multiplier, |acc, boost| acc * (1.0 + boost))
    }
}

/// Modifiers for several damage types at once.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageModifierSet {
    by_type: BTreeMap<DamageType, DamageModifiers>,
}

impl DamageModifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, damage_type: DamageType) -> Option<&DamageModifiers> {
        self.by_type.get(&damage_type)
    }

    /// Returns the modifiers for `damage_type`, creating empty ones on demand.
    pub fn entry(&mut self, damage_type: DamageType) -> &mut DamageModifiers {
        self.by_type.entry(damage_type).or_default()
    }

    pub fn insert(&mut self, damage_type: DamageType, modifiers: DamageModifiers) {
        self.by_type.insert(damage_type, modifiers);
    }

    pub fn iter(&self) -> impl Iterator<Item = (DamageType, &DamageModifiers)> + '_ {
        self.by_type.iter().map(|(t, m)| (*t, m))
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crit_multiplier_boosts_compound() {
        let modifiers = DamageModifiers::new(10.0)
            .crit_multiplier(1.5)
            .crit_multiplier_boost(0.2)
            .crit_multiplier_boost(0.5);
        assert!((modifiers.effective_crit_multiplier() - 2.7).abs() < 1e-9);
    }

    #[test]
    fn crit_chance_sums_bonuses_before_clamp() {
        let modifiers = DamageModifiers::new(1.0)
            .crit_chance(80.0)
            .crit_bonus(30.0)
            .crit_bonus(-5.0);
        assert_eq!(modifiers.effective_crit_chance(), 100.0);
    }
}
