//! Damage types.

/// Damage type for resistances and damage calculation.
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
pub enum DamageType {
    /// Weapons and bodies. Resisted by a flat amount.
    Physical,
    Fire,
    Cold,
    Lightning,
    /// Corruption and decay.
    Chaos,
}

impl DamageType {
    /// Every type except physical counts as elemental for scaling purposes.
    pub const fn is_elemental(self) -> bool {
        !matches!(self, Self::Physical)
    }

    /// Physical resistance is a flat reduction, all others are percentages.
    pub const fn resisted_flat(self) -> bool {
        matches!(self, Self::Physical)
    }
}
