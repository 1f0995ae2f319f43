//! Random source abstraction for problem generation.
//!
//! The engine never reaches for ambient randomness. Hosts inject a
//! [`RandomSource`]: the runtime uses an entropy-seeded generator, while tests
//! and replays use the deterministic [`PcgRng`].

/// Uniform random source consumed by the generator.
///
/// Only [`RandomSource::next_u32`] is required; the remaining methods derive
/// from it and may be overridden by implementations backed by a richer RNG.
pub trait RandomSource {
    /// Next uniformly distributed 32-bit value.
    fn next_u32(&mut self) -> u32;

    fn next_u64(&mut self) -> u64 {
        (u64::from(self.next_u32()) << 32) | u64::from(self.next_u32())
    }

    /// Value in `[min, max]` inclusive. Returns `min` when the range is empty.
    fn range(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        let span = max.abs_diff(min) + 1;
        min.wrapping_add((self.next_u64() % span) as i64)
    }

    /// Fair coin flip.
    fn coin(&mut self) -> bool {
        self.next_u32() >> 31 == 1
    }

    /// Index in `0..len`. Returns `0` when `len` is zero.
    fn index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        (self.next_u64() % len as u64) as usize
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }

    fn range(&mut self, min: i64, max: i64) -> i64 {
        (**self).range(min, max)
    }

    fn coin(&mut self) -> bool {
        (**self).coin()
    }

    fn index(&mut self, len: usize) -> usize {
        (**self).index(len)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }

    fn range(&mut self, min: i64, max: i64) -> i64 {
        (**self).range(min, max)
    }

    fn coin(&mut self) -> bool {
        (**self).coin()
    }

    fn index(&mut self, len: usize) -> usize {
        (**self).index(len)
    }
}

/// Uniformly picks one element of `items`, or `None` when it is empty.
pub fn choose<T: Copy, R: RandomSource + ?Sized>(rng: &mut R, items: &[T]) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.index(items.len())).copied()
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// Uses the PCG-XSH-RR variant: 64 bits of LCG state, 32 bits of output per
/// step. The same seed always yields the same sequence, which makes sessions
/// replayable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    pub fn seeded(seed: u64) -> Self {
        let mut rng = Self { state: 0 };
        rng.state = Self::pcg_step(rng.state);
        rng.state = rng.state.wrapping_add(seed);
        rng.state = Self::pcg_step(rng.state);
        rng
    }

    /// `state' = state * multiplier + increment (mod 2^64)`
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

impl RandomSource for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = Self::pcg_step(old);
        Self::pcg_output(old)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = PcgRng::seeded(42);
        let mut b = PcgRng::seeded(42);
        for _ in 0..32 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = PcgRng::seeded(1);
        let mut b = PcgRng::seeded(2);
        let left: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let right: Vec<u32> = (0..8).map(|_| b.next_u32()).collect();
        assert_ne!(left, right);
    }

    #[test]
    fn range_stays_inclusive() {
        let mut rng = PcgRng::seeded(7);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..1_000 {
            let value = rng.range(3, 6);
            assert!((3..=6).contains(&value));
            seen_min |= value == 3;
            seen_max |= value == 6;
        }
        assert!(seen_min && seen_max);
        assert_eq!(rng.range(9, 9), 9);
        assert_eq!(rng.range(9, 2), 9);
    }

    #[test]
    fn choose_handles_empty_slices() {
        let mut rng = PcgRng::seeded(0);
        let empty: [u8; 0] = [];
        assert_eq!(choose(&mut rng, &empty), None);
        assert_eq!(choose(&mut rng, &[5]), Some(5));
    }

    #[test]
    fn coin_produces_both_sides() {
        let mut rng = PcgRng::seeded(99);
        let heads = (0..1_000).filter(|_| rng.coin()).count();
        assert!(heads > 350 && heads < 650, "heads = {heads}");
    }
}
