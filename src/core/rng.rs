//! Deterministic Random Number Generator
//!
//! Uses Xorshift128+ for fast, reproducible randomness.
//! Every random decision made while generating a puzzle (source word
//! selection, fallback draw, letter shuffle) is taken from an instance of
//! this type, so a puzzle can be regenerated exactly from its seed.

/// Deterministic PRNG using the Xorshift128+ algorithm.
///
/// # Example
///
/// ```
/// use code_unscramble::core::rng::DeterministicRng;
///
/// let mut a = DeterministicRng::new(12345);
/// let mut b = DeterministicRng::new(12345);
/// assert_eq!(a.next_u64(), b.next_u64());
/// ```
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    state: [u64; 2],
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl DeterministicRng {
    /// Create a new RNG from a 64-bit seed.
    ///
    /// Uses SplitMix64 to initialize the internal state, so sequential
    /// seeds still produce unrelated streams.
    pub fn new(seed: u64) -> Self {
        let mut s = seed;
        let state0 = splitmix64(&mut s);
        let state1 = splitmix64(&mut s);

        // All-zero state would lock the generator at zero
        let state = if state0 == 0 && state1 == 0 {
            [1, 1]
        } else {
            [state0, state1]
        };

        Self { state }
    }

    /// Create an RNG seeded from fresh OS entropy.
    ///
    /// Used when no seed is configured; the drawn seed is returned so it
    /// can be logged and the run reproduced.
    pub fn from_entropy() -> (Self, u64) {
        let seed = uuid::Uuid::new_v4().as_u64_pair().0;
        (Self::new(seed), seed)
    }

    /// Generate the next 64-bit random value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let s0 = self.state[0];
        let mut s1 = self.state[1];
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state[0] = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
        self.state[1] = s1.rotate_left(37);

        result
    }

    /// Generate a random integer in range [0, max).
    ///
    /// Rejection sampling removes modulo bias.
    #[inline]
    pub fn next_int(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        let max = max as u64;
        let zone = u64::MAX - (u64::MAX % max);
        loop {
            let value = self.next_u64();
            if value < zone {
                return (value % max) as u32;
            }
        }
    }

    /// Shuffle a slice in place using Fisher-Yates.
    ///
    /// Every permutation is equally likely.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        let len = slice.len();
        for i in (1..len).rev() {
            let j = self.next_int((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Draw `count` distinct elements (by position) without replacement.
    ///
    /// Partial Fisher-Yates over a copy of the input. Returns fewer than
    /// `count` items only when the slice is shorter than `count`.
    pub fn sample<T: Clone>(&mut self, slice: &[T], count: usize) -> Vec<T> {
        let mut pool: Vec<T> = slice.to_vec();
        let take = count.min(pool.len());
        for i in 0..take {
            let remaining = (pool.len() - i) as u32;
            let j = i + self.next_int(remaining) as usize;
            pool.swap(i, j);
        }
        pool.truncate(take);
        pool
    }
}

/// SplitMix64 for seed initialization.
#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

// =============================================================================
// TESTS
// =============================================================================
