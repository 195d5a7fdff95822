//! Deterministic random rolls for critical strikes and chance conditions.
//!
//! Every roll is a pure function of a seed. The seed is mixed from the combat
//! seed, the dispatch nonce, the rolling actor and a per-roll slot, so a
//! combat replays identically and evaluating a chance condition never mutates
//! any state.

use crate::actor::ActorId;

/// RNG oracle for deterministic random number generation.
///
/// Implementations must produce the same value for the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a percentage in `[0, 100)`.
    ///
    /// Used for critical strikes and `random-chance` conditions.
    fn roll_percent(&self, seed: u64) -> f64 {
        (self.next_u32(seed) as f64 / (u32::MAX as f64 + 1.0)) * 100.0
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Oracle that always returns the same roll. Useful for scripted encounters.
#[derive(Clone, Copy, Debug)]
pub struct FixedRoll(pub f64);

impl RngOracle for FixedRoll {
    fn next_u32(&self, _seed: u64) -> u32 {
        ((self.0.clamp(0.0, 100.0) / 100.0) * u32::MAX as f64) as u32
    }

    fn roll_percent(&self, _seed: u64) -> f64 {
        self.0
    }
}

/// Roll slots used when one dispatch needs several independent rolls.
pub mod slot {
    /// Slot for condition rolls. Effect and condition indices are mixed in
    /// with [`super::derive_seed`], never added to the slot.
    pub const CONDITION: u32 = 0x1000;
    /// Critical strike roll for card damage.
    pub const CRITICAL: u32 = 0x2000;
}

/// Compute a deterministic seed from combat state components.
///
/// * `combat_seed` - Base seed chosen at combat start
/// * `nonce` - Dispatch sequence number (increments each dispatch)
/// * `actor` - Actor the roll is made for
/// * `slot` - Distinguishes multiple rolls in the same dispatch
pub fn compute_seed(combat_seed: u64, nonce: u64, actor: ActorId, slot: u32) -> u64 {
    let mut hash = combat_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor.0 as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (slot as u64).wrapping_mul(0x85ebca6b);

    avalanche(hash)
}

/// Derive the seed of one roll among many sharing `seed`.
///
/// Injective in `stream` for a fixed `seed`, so distinct streams never share
/// a roll.
pub fn derive_seed(seed: u64, stream: u64) -> u64 {
    avalanche(seed ^ stream.wrapping_mul(0xc2b2ae3d27d4eb4f))
}

/// Condition roll stream: effect index in the high half, condition index in
/// the low half.
pub fn condition_stream(effect_index: u32, condition_index: u32) -> u64 {
    (effect_index as u64) << 32 | condition_index as u64
}

#[inline]
fn avalanche(mut hash: u64) -> u64 {
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_is_deterministic() {
        let rng = PcgRng;
        assert_eq!(rng.next_u32(42), rng.next_u32(42));
        assert_ne!(rng.next_u32(42), rng.next_u32(43));
    }

    #[test]
    fn roll_percent_stays_in_range() {
        let rng = PcgRng;
        for seed in 0..2_000u64 {
            let roll = rng.roll_percent(compute_seed(7, seed, ActorId::PLAYER, slot::CRITICAL));
            assert!((0.0..100.0).contains(&roll), "roll {roll} out of range");
        }
    }

    #[test]
    fn seeds_differ_per_slot_and_actor() {
        let a = compute_seed(1, 1, ActorId::PLAYER, slot::CONDITION);
        let b = compute_seed(1, 1, ActorId::PLAYER, slot::CONDITION + 1);
        let c = compute_seed(1, 1, ActorId(2), slot::CONDITION);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn condition_streams_never_collide() {
        let base = compute_seed(3, 9, ActorId::PLAYER, slot::CONDITION);
        let mut seen = std::collections::HashSet::new();
        for effect in [0, 1, 15, 16, 255, 256, u32::MAX] {
            for condition in [0, 1, 15, 16, 4096] {
                assert!(seen.insert(derive_seed(base, condition_stream(effect, condition))));
            }
        }
        let critical = compute_seed(3, 9, ActorId::PLAYER, slot::CRITICAL);
        assert!(!seen.contains(&critical));
    }
}
