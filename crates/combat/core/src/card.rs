//! Card, embossing and weapon descriptors.
//!
//! These arrive already parsed from the content layer; the core only reads
//! them.

use bitflags::bitflags;

use crate::actor::Attributes;
use crate::damage::DamageType;

/// Card type as printed on the card.
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
pub enum CardType {
    Attack,
    Guard,
    Skill,
    Power,
    Aura,
}

bitflags! {
    /// Keyword tags carried by a card.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct CardTags: u16 {
        const SPELL = 1 << 0;
        const PROJECTILE = 1 << 1;
        const AOE = 1 << 2;
        const MELEE = 1 << 3;
        const RITUAL = 1 << 4;
        const EXHAUST = 1 << 5;
    }
}

/// Broad category used by modifiers that track "what kind of action was last".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum CardCategory {
    Attack,
    Spell,
    Other,
}

/// Per-attribute damage scaling coefficients.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AttributeScaling {
    pub strength: f64,
    pub dexterity: f64,
    pub intelligence: f64,
}

impl AttributeScaling {
    pub const fn new(strength: f64, dexterity: f64, intelligence: f64) -> Self {
        Self {
            strength,
            dexterity,
            intelligence,
        }
    }

    /// Added damage contributed by `attributes`.
    pub fn added_damage(&self, attributes: &Attributes) -> f64 {
        self.strength * attributes.strength as f64
            + self.dexterity * attributes.dexterity as f64
            + self.intelligence * attributes.intelligence as f64
    }
}

/// A card-attached modifier that raises mana cost in exchange for damage.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Embossing {
    pub name: String,
    pub mana_cost_increase: u32,
    /// Increased damage (fraction) granted per point of the card's total mana cost.
    pub increased_per_mana: f64,
}

impl Embossing {
    pub fn new(name: impl Into<String>, mana_cost_increase: u32, increased_per_mana: f64) -> Self {
        Self {
            name: name.into(),
            mana_cost_increase,
            increased_per_mana,
        }
    }
}

/// A card or ability as seen by the rules core.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardDescriptor {
    pub name: String,
    pub card_type: CardType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: CardTags,
    pub mana_cost: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_damage: f64,
    pub damage_type: DamageType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scaling: AttributeScaling,
    #[cfg_attr(feature = "serde", serde(default))]
    pub embossings: Vec<Embossing>,
    /// Persistent tags written by modifiers (e.g. marked for echo).
    #[cfg_attr(feature = "serde", serde(default))]
    pub persistent_tags: Vec<String>,
}

impl CardDescriptor {
    pub fn new(name: impl Into<String>, card_type: CardType, damage_type: DamageType) -> Self {
        Self {
            name: name.into(),
            card_type,
            tags: CardTags::empty(),
            mana_cost: 0,
            base_damage: 0.0,
            damage_type,
            scaling: AttributeScaling::default(),
            embossings: Vec::new(),
            persistent_tags: Vec::new(),
        }
    }

    pub fn with_tags(mut self, tags: CardTags) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_damage(mut self, base_damage: f64) -> Self {
        self.base_damage = base_damage;
        self
    }

    pub fn with_cost(mut self, mana_cost: u32) -> Self {
        self.mana_cost = mana_cost;
        self
    }

    pub fn with_scaling(mut self, scaling: AttributeScaling) -> Self {
        self.scaling = scaling;
        self
    }

    pub fn with_embossing(mut self, embossing: Embossing) -> Self {
        self.embossings.push(embossing);
        self
    }

    pub fn is_attack(&self) -> bool {
        self.card_type == CardType::Attack
    }

    pub fn is_spell(&self) -> bool {
        self.tags.contains(CardTags::SPELL)
    }

    pub fn category(&self) -> CardCategory {
        if self.is_spell() {
            CardCategory::Spell
        } else if self.is_attack() {
            CardCategory::Attack
        } else {
            CardCategory::Other
        }
    }

    /// Printed cost plus every embossing's increase.
    pub fn effective_mana_cost(&self) -> u32 {
        self.embossings
            .iter()
            .fold(self.mana_cost, |cost, e| cost.saturating_add(e.mana_cost_increase))
    }

    /// Increased damage (fraction) granted by embossings; scales with total cost.
    pub fn embossing_increased(&self) -> f64 {
        let cost = self.effective_mana_cost() as f64;
        self.embossings
            .iter()
            .map(|e| e.increased_per_mana * cost)
            .sum()
    }

    pub fn has_persistent_tag(&self, tag: &str) -> bool {
        self.persistent_tags.iter().any(|t| t == tag)
    }
}

/// The weapon equipped by the character playing an attack card.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponProfile {
    pub name: String,
    /// Flat added damage for attack cards.
    pub damage: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub scaling: AttributeScaling,
    /// Critical chance in percent points.
    #[cfg_attr(feature = "serde", serde(default))]
    pub crit_chance: f64,
    /// Critical multiplier; `None` uses the configured default.
    #[cfg_attr(feature = "serde", serde(default))]
    pub crit_multiplier: Option<f64>,
}

impl WeaponProfile {
    pub fn new(name: impl Into<String>, damage: f64) -> Self {
        Self {
            name: name.into(),
            damage,
            scaling: AttributeScaling::default(),
            crit_chance: 0.0,
            crit_multiplier: None,
        }
    }

    pub fn with_scaling(mut self, scaling: AttributeScaling) -> Self {
        self.scaling = scaling;
        self
    }

    pub fn with_crit(mut self, chance: f64, multiplier: f64) -> Self {
        self.crit_chance = chance;
        self.crit_multiplier = Some(multiplier);
        self
    }
}
