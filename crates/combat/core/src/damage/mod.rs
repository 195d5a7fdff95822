//! Damage pipeline.
//!
//! ```text
//! base + added → × (1 + Σ increased) → × Π (1 + more) → critical → resistance
//! ```
//!
//! Resistance is applied on the receiving side, after the source's formula.

mod calculation;
mod card;
mod modifiers;
mod resistance;
mod types;

pub use calculation::{DamageCalculation, calculate_damage, calculate_with_roll};
pub use card::{CardAttack, CardDamage, calculate_card_damage, calculate_card_damage_with_roll};
pub use modifiers::{DamageModifierSet, DamageModifiers};
pub use resistance::{apply_resistance, mitigate};
pub use types::DamageType;
