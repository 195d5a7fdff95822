//! Resistance application on the receiving actor.

use crate::actor::Resistances;

use super::types::DamageType;

/// Reduce `damage` by a resistance value.
///
/// - Physical: flat reduction, `max(0, damage - resistance)`
/// - Others: percentage reduction with a floor,
///   `damage × max(floor, 1 - resistance / 100)`
pub fn apply_resistance(damage: f64, damage_type: DamageType, resistance: f64, floor: f64) -> f64 {
    if damage <= 0.0 {
        return 0.0;
    }
    if damage_type.resisted_flat() {
        (damage - resistance).max(0.0)
    } else {
        damage * (1.0 - resistance / 100.0).max(floor)
    }
}

/// Reduce `damage` by the target's resistance to `damage_type`.
pub fn mitigate(damage: f64, damage_type: DamageType, target: &Resistances, floor: f64) -> f64 {
    apply_resistance(damage, damage_type, target.get(damage_type), floor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombatConfig;

    const FLOOR: f64 = CombatConfig::DEFAULT_RESISTANCE_FLOOR;

    #[test]
    fn elemental_resistance_respects_floor() {
        let reduced = apply_resistance(100.0, DamageType::Fire, 95.0, FLOOR);
        assert!((reduced - 10.0).abs() < 1e-9, "got {reduced}");
    }

    #[test]
    fn elemental_resistance_is_a_percentage() {
        let reduced = apply_resistance(80.0, DamageType::Cold, 25.0, FLOOR);
        assert!((reduced - 60.0).abs() < 1e-9);
    }

    #[test]
    fn negative_elemental_resistance_amplifies() {
        let reduced = apply_resistance(50.0, DamageType::Lightning, -50.0, FLOOR);
        assert!((reduced - 75.0).abs() < 1e-9);
    }

    #[test]
    fn physical_resistance_is_flat() {
        assert_eq!(apply_resistance(50.0, DamageType::Physical, 20.0, FLOOR), 30.0);
        assert_eq!(apply_resistance(10.0, DamageType::Physical, 20.0, FLOOR), 0.0);
    }

    #[test]
    fn mitigate_reads_target_resistances() {
        let resistances = Resistances::new()
            .with(DamageType::Physical, 5.0)
            .with(DamageType::Chaos, 50.0);
        assert_eq!(mitigate(12.0, DamageType::Physical, &resistances, FLOOR), 7.0);
        assert_eq!(mitigate(12.0, DamageType::Chaos, &resistances, FLOOR), 6.0);
        assert_eq!(mitigate(12.0, DamageType::Fire, &resistances, FLOOR), 12.0);
    }
}
