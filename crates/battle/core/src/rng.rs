//! Seeded random number generation for battle rolls.
//!
//! Every battle owns exactly one [`PcgRng`]. The generator travels with the
//! snapshot lineage and is never shared between battles, so the seed alone
//! determines every velocity and hit roll.
//!
//! # Determinism
//!
//! Given the same seed the generator produces the same sequence on every
//! platform. Changing the number or order of draws changes outcomes for a
//! fixed seed.

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR variant: 64-bit state, 32-bit output.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a generator from a battle seed.
    ///
    /// The seed is avalanched first so that consecutive seeds (as used by
    /// batch runs) start from unrelated states.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            state: scramble_seed(seed),
        }
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Draws the next 32-bit value and advances the generator.
    pub fn next_u32(&mut self) -> u32 {
        let current = self.state;
        self.state = Self::pcg_step(current);
        Self::pcg_output(current)
    }

    /// Draws a value in range [min, max] inclusive.
    pub fn range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = max - min + 1;
        min + (self.next_u32() % span)
    }
}

/// SplitMix64-style finalizer applied to the raw seed.
fn scramble_seed(seed: u64) -> u64 {
    let mut hash = seed.wrapping_add(0x9e3779b97f4a7c15);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xc4ceb9fe1a85ec53);
    hash ^= hash >> 33;
    hash
}
