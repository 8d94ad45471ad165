//! Random number generators.
//!
//! A thin wrapper over the `rand_mt` Mersenne Twister, plus the seeding
//! scheme that gives every worker its own stream. Streams are derived from a
//! base seed and a stream id through a SplitMix64 finaliser, so neighbouring
//! ids start the generator from unrelated states.

use pr_core::Real;
use rand_mt::Mt19937GenRand64;

/// Derive the seed of stream `stream` from `base`.
///
/// Deterministic, and distinct streams of the same base yield distinct
/// seeds.
pub fn stream_seed(base: u64, stream: u64) -> u64 {
    let mut z = base ^ stream.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// A uniform pseudo-random number generator based on the Mersenne Twister
/// MT19937-64 algorithm.
pub struct MersenneTwisterUniformRng {
    rng: Mt19937GenRand64,
}

impl MersenneTwisterUniformRng {
    /// Create a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mt19937GenRand64::new(seed),
        }
    }

    /// Create the generator for stream `stream` of base seed `base`.
    pub fn for_stream(base: u64, stream: u64) -> Self {
        Self::new(stream_seed(base, stream))
    }

    /// Generate the next uniform deviate in `[0, 1)`.
    pub fn next_real(&mut self) -> Real {
        // Top 53 bits fill the mantissa exactly
        (self.rng.next_u64() >> 11) as Real * (1.0 / (1u64 << 53) as Real)
    }

    /// Generate the next uniform deviate in `[low, high)`.
    pub fn next_in(&mut self, low: Real, high: Real) -> Real {
        low + (high - low) * self.next_real()
    }
}
