// ============================================================================
// Level Random Sources
// Pseudo-random generators used only to pick skip list node heights
// ============================================================================

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Source of uniform `u32` draws for node height selection.
///
/// The skip list never relies on the quality of these numbers for
/// correctness, only for balance. Tests inject a fixed seed so that the
/// level structure is reproducible.
pub trait LevelRng: Send {
    fn next_u32(&mut self) -> u32;
}

impl<R: LevelRng + ?Sized> LevelRng for Box<R> {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

// ============================================================================
// Park-Miller Minimal Standard
// ============================================================================

/// Deterministic Lehmer generator (`seed = seed * 16807 mod 2^31 - 1`).
#[derive(Debug, Clone)]
pub struct ParkMiller {
    seed: u32,
}

impl ParkMiller {
    pub const DEFAULT_SEED: u32 = 0xdead_beef;

    const MODULUS: u32 = 2_147_483_647; // 2^31 - 1
    const MULTIPLIER: u64 = 16_807; // bits 14, 8, 7, 5, 2, 1, 0

    pub fn new(seed: u32) -> Self {
        let mut seed = seed & Self::MODULUS;
        // 0 and M are fixed points of the recurrence
        if seed == 0 || seed == Self::MODULUS {
            seed = 1;
        }
        Self { seed }
    }
}

impl Default for ParkMiller {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

impl LevelRng for ParkMiller {
    fn next_u32(&mut self) -> u32 {
        // (seed * A) % M computed without division, using
        // ((x << 31) % M) == x
        let product = u64::from(self.seed) * Self::MULTIPLIER;
        let mut next = (product >> 31) + (product & u64::from(Self::MODULUS));
        if next > u64::from(Self::MODULUS) {
            next -= u64::from(Self::MODULUS);
        }
        self.seed = next as u32;
        self.seed
    }
}

// ============================================================================
// Entropy-Seeded Source
// ============================================================================

/// Level source seeded from operating system entropy.
pub struct EntropyRng {
    inner: StdRng,
}

impl EntropyRng {
    pub fn new() -> Self {
        Self {
            inner: StdRng::from_entropy(),
        }
    }
}

impl Default for EntropyRng {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelRng for EntropyRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_park_miller_is_reproducible() {
        let mut a = ParkMiller::new(42);
        let mut b = ParkMiller::new(42);
        for _ in 0..1000 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_park_miller_known_sequence() {
        // 16807^n mod (2^31 - 1) starting from seed 1
        let mut rng = ParkMiller::new(1);
        assert_eq!(rng.next_u32(), 16_807);
        assert_eq!(rng.next_u32(), 282_475_249);
        assert_eq!(rng.next_u32(), 1_622_650_073);
    }

    #[test]
    fn test_park_miller_degenerate_seeds() {
        let mut zero = ParkMiller::new(0);
        let mut modulus = ParkMiller::new(2_147_483_647);
        let mut one = ParkMiller::new(1);
        let expected = one.next_u32();
        assert_eq!(zero.next_u32(), expected);
        assert_eq!(modulus.next_u32(), expected);
    }

    #[test]
    fn test_park_miller_stays_in_range() {
        let mut rng = ParkMiller::default();
        for _ in 0..10_000 {
            let value = rng.next_u32();
            assert!(value > 0 && value < 2_147_483_647);
        }
    }

    #[test]
    fn test_boxed_source_delegates() {
        let mut boxed: Box<dyn LevelRng> = Box::new(ParkMiller::new(7));
        let mut plain = ParkMiller::new(7);
        assert_eq!(boxed.next_u32(), plain.next_u32());
    }

    #[test]
    fn test_entropy_source_produces_values() {
        let mut rng = EntropyRng::new();
        let draws: Vec<u32> = (0..16).map(|_| rng.next_u32()).collect();
        // 16 identical draws from a CSPRNG would be astronomically unlikely
        assert!(draws.iter().any(|&d| d != draws[0]));
    }
}
