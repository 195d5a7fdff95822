//! Card damage: folds actor, weapon and event-context inputs into the
//! damage formula and resolves every damage component against the target.

use crate::actor::{CombatActor, StatKind};
use crate::card::{CardDescriptor, WeaponProfile};
use crate::config::CombatConfig;
use crate::modifier::EventContext;
use crate::rng::RngOracle;
use crate::status::{StatusEffectKind, StatusManager};

use super::calculation::{DamageCalculation, calculate_with_roll};
use super::modifiers::DamageModifiers;
use super::resistance::mitigate;
use super::types::DamageType;

/// Weakened never reduces a hit by more than this, in percent.
const MAX_WEAKENED: f64 = 90.0;

/// A card played by `character`, optionally with a weapon and a target.
///
/// With a status manager attached, the target's Vulnerable and the
/// character's Weakened magnitudes (percent points) become more-multipliers.
#[derive(Clone, Copy)]
pub struct CardAttack<'a> {
    pub card: &'a CardDescriptor,
    pub character: &'a CombatActor,
    pub weapon: Option<&'a WeaponProfile>,
    pub target: Option<&'a CombatActor>,
    pub status: Option<&'a dyn StatusManager>,
}

impl<'a> CardAttack<'a> {
    pub fn new(card: &'a CardDescriptor, character: &'a CombatActor) -> Self {
        Self {
            card,
            character,
            weapon: None,
            target: None,
            status: None,
        }
    }

    pub fn with_weapon(mut self, weapon: &'a WeaponProfile) -> Self {
        self.weapon = Some(weapon);
        self
    }

    pub fn against(mut self, target: &'a CombatActor) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_status(mut self, status: &'a dyn StatusManager) -> Self {
        self.status = Some(status);
        self
    }

    /// Weapon contributions only apply to attack cards.
    fn weapon(&self) -> Option<&'a WeaponProfile> {
        self.weapon.filter(|_| self.card.is_attack())
    }

    /// Increased-damage fractions that apply to a component of `damage_type`.
    fn increased_for(&self, damage_type: DamageType, ctx: &EventContext) -> Vec<f64> {
        let stats = &self.character.stats;
        let mut increased = Vec::new();
        if self.card.is_attack() {
            increased.push(stats.get(StatKind::AttackDamage) / 100.0);
        }
        if self.card.is_spell() {
            increased.push(stats.get(StatKind::SpellDamage) / 100.0);
        }
        if damage_type.is_elemental() {
            increased.push(stats.get(StatKind::ElementalDamage) / 100.0);
        }
        increased.push(self.card.embossing_increased());
        increased.extend(ctx.increased_damage.iter().copied());
        increased.retain(|v| *v != 0.0);
        increased
    }

    fn more(&self, ctx: &EventContext) -> Vec<f64> {
        let mut more = Vec::new();
        let stacks = self.character.stacks.damage_multiplier();
        if stacks != 1.0 {
            more.push(stacks - 1.0);
        }
        more.extend(ctx.more_damage.iter().copied());
        if ctx.damage_multiplier != 1.0 {
            more.push(ctx.damage_multiplier - 1.0);
        }
        if let Some(status) = self.status {
            let vulnerable = self.target.map_or(0.0, |t| {
                status.total_magnitude(t.id, StatusEffectKind::Vulnerable)
            });
            if vulnerable > 0.0 {
                more.push(vulnerable / 100.0);
            }
            let weakened = status.total_magnitude(self.character.id, StatusEffectKind::Weakened);
            if weakened > 0.0 {
                more.push(-weakened.min(MAX_WEAKENED) / 100.0);
            }
        }
        more
    }

    /// Assemble the modifiers of the card's own damage type.
    pub fn modifiers(&self, ctx: &EventContext, config: &CombatConfig) -> DamageModifiers {
        let attributes = &self.character.attributes;
        let stats = &self.character.stats;
        let weapon = self.weapon();

        let mut added = self.card.scaling.added_damage(attributes);
        if let Some(weapon) = weapon {
            added += weapon.damage + weapon.scaling.added_damage(attributes);
        }
        added += ctx.damage.unwrap_or(0.0);

        let crit_multiplier = weapon
            .and_then(|w| w.crit_multiplier)
            .unwrap_or(config.default_crit_multiplier);

        let mut modifiers = DamageModifiers::new(self.card.base_damage)
            .added(added)
            .crit_multiplier(crit_multiplier)
            .crit_multiplier_boost(stats.get(StatKind::CritMultiplier) / 100.0);
        // A hit already flagged critical ignores chance bonuses, negative ones included.
        modifiers = if ctx.is_critical {
            modifiers.crit_chance(100.0)
        } else {
            modifiers
                .crit_chance(config.base_crit_chance + weapon.map_or(0.0, |w| w.crit_chance))
                .crit_bonus(stats.get(StatKind::CritChance))
                .crit_bonus(self.character.stacks.crit_chance_bonus())
                .crit_bonus(ctx.crit_chance_bonus)
        };
        modifiers.increased = self.increased_for(self.card.damage_type, ctx);
        modifiers.more = self.more(ctx);
        modifiers
    }
}

impl std::fmt::Debug for CardAttack<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardAttack")
            .field("card", &self.card.name)
            .field("character", &self.character.id)
            .field("weapon", &self.weapon.map(|w| &w.name))
            .field("target", &self.target.map(|t| t.id))
            .field("with_status", &self.status.is_some())
            .finish()
    }
}

/// Result of resolving a card's damage.
#[derive(Clone, Debug, PartialEq)]
pub struct CardDamage {
    /// One calculation per damage component, the card's own type first.
    pub components: Vec<DamageCalculation>,
    /// Damage of a single hit after resistances.
    pub per_hit: f64,
    /// `1 + Σ extra hit fractions`.
    pub hit_multiplier: f64,
    pub total: f64,
    pub is_critical: bool,
}

/// Resolve card damage with a critical roll in `[0, 100)`.
///
/// Added elemental components share the card's increased and more modifiers
/// and its critical outcome, and are resisted separately by the target.
pub fn calculate_card_damage_with_roll(
    attack: &CardAttack<'_>,
    ctx: &EventContext,
    config: &CombatConfig,
    roll: f64,
) -> CardDamage {
    let primary_modifiers = attack.modifiers(ctx, config);
    let primary = calculate_with_roll(attack.card.damage_type, &primary_modifiers, roll);

    let mut components = vec![primary];
    for extra in &ctx.added_elemental_damage {
        let mut modifiers = DamageModifiers::new(extra.amount)
            .crit_chance(if primary.is_critical { 100.0 } else { 0.0 })
            .crit_multiplier(primary.critical_multiplier);
        modifiers.increased = attack.increased_for(extra.damage_type, ctx);
        modifiers.more = attack.more(ctx);
        components.push(calculate_with_roll(extra.damage_type, &modifiers, roll));
    }

    let per_hit: f64 = components
        .iter()
        .map(|c| match attack.target {
            Some(target) => mitigate(
                c.final_damage,
                c.damage_type,
                &target.resistances,
                config.resistance_floor,
            ),
            None => c.final_damage,
        })
        .sum();

    let hit_multiplier = ctx.hit_multiplier();
    CardDamage {
        components,
        per_hit,
        hit_multiplier,
        total: per_hit * hit_multiplier,
        is_critical: primary.is_critical,
    }
}

/// Resolve card damage, rolling the critical strike from `rng` with `seed`.
pub fn calculate_card_damage(
    attack: &CardAttack<'_>,
    ctx: &EventContext,
    config: &CombatConfig,
    rng: &(impl RngOracle + ?Sized),
    seed: u64,
) -> CardDamage {
    calculate_card_damage_with_roll(attack, ctx, config, rng.roll_percent(seed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{ActorKind, Attributes, Resistances};
    use crate::card::{AttributeScaling, CardType};
    use crate::modifier::{ElementalDamage, ExtraHit};
    use crate::stacks::StackKind;
    use crate::status::{StatusEffect, StatusLedger};

    const NO_CRIT: f64 = 99.99;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn strike() -> CardDescriptor {
        CardDescriptor::new("Strike", CardType::Attack, DamageType::Physical).with_damage(10.0)
    }

    #[test]
    fn weapon_and_attributes_add_damage() {
        let card = strike().with_scaling(AttributeScaling::new(0.5, 0.0, 0.0));
        let player = CombatActor::player(50.0, 3.0).with_attributes(Attributes::new(10, 0, 0));
        let weapon = WeaponProfile::new("Axe", 4.0);
        let attack = CardAttack::new(&card, &player).with_weapon(&weapon);

        let damage = calculate_card_damage_with_roll(
            &attack,
            &EventContext::new(),
            &CombatConfig::default(),
            NO_CRIT,
        );
        assert!(approx(damage.total, 19.0), "got {}", damage.total);
        assert!(!damage.is_critical);
    }

    #[test]
    fn weapon_is_ignored_for_non_attack_cards() {
        let card = CardDescriptor::new("Ember", CardType::Skill, DamageType::Fire).with_damage(6.0);
        let player = CombatActor::player(50.0, 3.0);
        let weapon = WeaponProfile::new("Axe", 4.0);
        let attack = CardAttack::new(&card, &player).with_weapon(&weapon);

        let damage = calculate_card_damage_with_roll(
            &attack,
            &EventContext::new(),
            &CombatConfig::default(),
            NO_CRIT,
        );
        assert!(approx(damage.total, 6.0));
    }

    #[test]
    fn context_bonuses_and_stacks_fold_in() {
        let card = strike();
        let mut player = CombatActor::player(50.0, 3.0);
        player.stacks.add_stacks(StackKind::BattleRhythm, 1);
        let mut ctx = EventContext::new();
        ctx.add_damage(5.0);
        ctx.increased_damage.push(0.5);
        ctx.damage_multiplier = 1.2;

        let attack = CardAttack::new(&card, &player);
        let config = CombatConfig::default();
        let damage = calculate_card_damage_with_roll(&attack, &ctx, &config, NO_CRIT);
        // 15 × 1.5 × 1.1 (rhythm) × 1.2
        assert!(approx(damage.total, 29.7), "got {}", damage.total);
    }

    #[test]
    fn forced_critical_uses_weapon_multiplier() {
        let card = strike();
        let player = CombatActor::player(50.0, 3.0);
        let weapon = WeaponProfile::new("Dagger", 0.0).with_crit(10.0, 2.0);
        let mut ctx = EventContext::new();
        ctx.is_critical = true;

        let attack = CardAttack::new(&card, &player).with_weapon(&weapon);
        let config = CombatConfig::default();
        let damage = calculate_card_damage_with_roll(&attack, &ctx, &config, NO_CRIT);
        assert!(damage.is_critical);
        assert!(approx(damage.total, 20.0));
    }

    #[test]
    fn components_resist_separately_and_extra_hits_multiply() {
        let card = strike();
        let player = CombatActor::player(50.0, 3.0);
        let enemy = CombatActor::enemy(0, ActorKind::Minion, 30.0).with_resistances(
            Resistances::new()
                .with(DamageType::Physical, 4.0)
                .with(DamageType::Fire, 50.0),
        );
        let mut ctx = EventContext::new();
        ctx.added_elemental_damage.push(ElementalDamage {
            damage_type: DamageType::Fire,
            amount: 8.0,
        });
        ctx.extra_hits.push(ExtraHit { damage_fraction: 0.5 });

        let attack = CardAttack::new(&card, &player).against(&enemy);
        let config = CombatConfig::default();
        let damage = calculate_card_damage_with_roll(&attack, &ctx, &config, NO_CRIT);

        assert_eq!(damage.components.len(), 2);
        // (10 - 4) + 8 × 0.5 = 10 per hit, × 1.5
        assert!(approx(damage.per_hit, 10.0));
        assert!(approx(damage.total, 15.0));
    }

    #[test]
    fn forced_critical_ignores_negative_chance() {
        let card = strike();
        let mut player = CombatActor::player(50.0, 3.0);
        player.stats.set(StatKind::CritChance, -80.0);
        let mut ctx = EventContext::new();
        ctx.is_critical = true;

        let attack = CardAttack::new(&card, &player);
        let config = CombatConfig::default();
        let damage = calculate_card_damage_with_roll(&attack, &ctx, &config, NO_CRIT);
        assert!(damage.is_critical);
        assert_eq!(damage.components[0].crit_chance, 100.0);
        assert!(approx(damage.total, 15.0));
    }

    #[test]
    fn vulnerable_target_and_weakened_character_scale_damage() {
        let card = strike();
        let player = CombatActor::player(50.0, 3.0);
        let enemy = CombatActor::enemy(0, ActorKind::Elite, 60.0);
        let mut status = StatusLedger::new().with_actors([player.id, enemy.id]);
        let vulnerable = StatusEffect::new(StatusEffectKind::Vulnerable, 50.0, 2);
        let weakened = StatusEffect::new(StatusEffectKind::Weakened, 20.0, 1);
        status.add_status_effect(enemy.id, vulnerable);
        status.add_status_effect(player.id, weakened);

        let config = CombatConfig::default();
        let ctx = EventContext::new();
        let without = CardAttack::new(&card, &player).against(&enemy);
        let plain = calculate_card_damage_with_roll(&without, &ctx, &config, NO_CRIT);
        assert!(approx(plain.total, 10.0));

        let with = without.with_status(&status);
        let damage = calculate_card_damage_with_roll(&with, &ctx, &config, NO_CRIT);
        // 10 × 1.5 × 0.8
        assert!(approx(damage.total, 12.0), "got {}", damage.total);
    }
}
