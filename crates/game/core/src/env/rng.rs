//! RNG oracle for deterministic random number generation.
//!
//! Every random decision in a match (crit rolls, block rolls, random target
//! draws) derives its seed from the match seed, a roll counter carried in the
//! match state, the acting unit, and a per-roll context. Given the same seed
//! and the same inputs, a match resolves identically.

use crate::state::UnitId;

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Uniform value in `[0, 1)`.
    fn unit_interval(&self, seed: u64) -> f64 {
        self.next_u32(seed) as f64 / (u32::MAX as f64 + 1.0)
    }

    /// Uniform index in `[0, len)`. Returns 0 for `len == 0`.
    fn below(&self, seed: u64, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.next_u32(seed) as usize % len
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR variant: 64-bit state, 32-bit output, single multiply plus
/// xorshift and rotate.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    /// `state' = (state × multiplier + increment) mod 2^64`
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
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Compute a deterministic seed from match state components.
///
/// * `match_seed` - Seed fixed when the match starts
/// * `nonce` - Roll counter (increments on every roll)
/// * `actor_id` - Unit the roll is made for
/// * `context` - Distinguishes independent rolls for the same actor
pub fn compute_seed(match_seed: u64, nonce: u64, actor_id: u32, context: u32) -> u64 {
    // SplitMix64 / FxHash style mixing
    let mut hash = match_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Purpose of a roll, mixed into its seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum RollContext {
    Crit = 0,
    Block = 1,
    TargetDraw = 2,
}

/// Roll source for a single tick or player action.
///
/// Borrows the oracle and owns a copy of the roll counter; callers write
/// [`Dice::nonce`] back into the match state once they are done.
pub struct Dice<'a, R: RngOracle + ?Sized> {
    rng: &'a R,
    seed: u64,
    nonce: u64,
}

impl<'a, R: RngOracle + ?Sized> Dice<'a, R> {
    pub fn new(rng: &'a R, seed: u64, nonce: u64) -> Self {
        Self { rng, seed, nonce }
    }

    /// Current roll counter.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    fn next_seed(&mut self, actor: UnitId, context: RollContext) -> u64 {
        let seed = compute_seed(self.seed, self.nonce, actor.0, context as u32);
        self.nonce += 1;
        seed
    }

    /// Returns true with probability `p`.
    pub fn chance(&mut self, actor: UnitId, context: RollContext, p: f64) -> bool {
        let seed = self.next_seed(actor, context);
        self.rng.unit_interval(seed) < p
    }

    /// Uniform index in `[0, len)`.
    pub fn pick(&mut self, actor: UnitId, context: RollContext, len: usize) -> usize {
        let seed = self.next_seed(actor, context);
        self.rng.below(seed, len)
    }

    /// Fisher-Yates shuffle in place.
    pub fn shuffle<T>(&mut self, actor: UnitId, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.pick(actor, RollContext::TargetDraw, i + 1);
            items.swap(i, j);
        }
    }
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
    fn unit_interval_stays_below_one() {
        struct Max;
        impl RngOracle for Max {
            fn next_u32(&self, _seed: u64) -> u32 {
                u32::MAX
            }
        }
        assert!(Max.unit_interval(0) < 1.0);
        assert_eq!(Max.below(0, 0), 0);
    }

    #[test]
    fn dice_advances_nonce_per_roll() {
        let mut dice = Dice::new(&PcgRng, 7, 0);
        dice.chance(UnitId(1), RollContext::Crit, 0.5);
        dice.pick(UnitId(1), RollContext::TargetDraw, 4);
        assert_eq!(dice.nonce(), 2);
    }

    #[test]
    fn shuffle_keeps_every_element() {
        let mut dice = Dice::new(&PcgRng, 99, 0);
        let mut items = [1, 2, 3, 4, 5, 6];
        dice.shuffle(UnitId(3), &mut items);
        let mut sorted = items;
        sorted.sort();
        assert_eq!(sorted, [1, 2, 3, 4, 5, 6]);
    }
}
