//! Seeded pseudo-random number generation
//!
//! The engine never draws from ambient global state. Every operation that
//! needs randomness (paid-round sampling, random grouping, the lottery draw)
//! takes a `RandomSource`, so the experiment runtime decides how sources are
//! seeded and tests can replay a session exactly.

/// Uniform random source injected into the engine
pub trait RandomSource {
    /// Next uniformly distributed 64-bit value
    fn next_u64(&mut self) -> u64;

    /// Next uniformly distributed 32-bit value (upper half of `next_u64`)
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Uniform value in `[0, max)`; returns 0 when `max == 0`
    ///
    /// Multiply-high reduction keeps the high bits, which are the strong
    /// ones for xorshift-family generators.
    fn next_range(&mut self, max: u64) -> u64 {
        if max == 0 {
            return 0;
        }
        ((self.next_u64() as u128 * max as u128) >> 64) as u64
    }

    /// Uniform float in `[0, 1)`
    fn next_unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Seeded random number generator
///
/// Deterministic: same seed + stream = same sequence
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a new RNG from a 32-byte session seed and a stream index
    pub fn new(seed: &[u8; 32], stream: u32) -> Self {
        let mut state = 0u64;
        for (i, chunk) in seed.chunks(8).enumerate() {
            let mut bytes = [0u8; 8];
            bytes[..chunk.len()].copy_from_slice(chunk);
            state ^= u64::from_le_bytes(bytes).wrapping_add(i as u64);
        }

        state ^= (stream as u64).wrapping_mul(0x517cc1b727220a95);

        // xorshift has a fixed point at zero
        if state == 0 {
            state = 0x9e3779b97f4a7c15;
        }

        let mut rng = Self { state };
        for _ in 0..8 {
            rng.next_u64();
        }

        rng
    }

    /// Convenience constructor from a single integer seed
    pub fn from_u64(seed: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&seed.to_le_bytes());
        Self::new(&bytes, 0)
    }

    /// Derive an independent RNG for a specific round of the session
    pub fn for_round(&self, round: u32) -> Self {
        let mut new_state = self.state;
        new_state ^= (round as u64).wrapping_mul(0x9e3779b97f4a7c15);
        if new_state == 0 {
            new_state = 0x517cc1b727220a95;
        }

        let mut rng = Self { state: new_state };
        rng.next_u64();
        rng
    }
}

impl RandomSource for SeededRng {
    fn next_u64(&mut self) -> u64 {
        // xorshift64*
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545f4914f6cdd1d)
    }
}
