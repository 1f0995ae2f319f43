//! Random sources injected into the session worker.
use mathgame_core::{PcgRng, RandomSource};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Entropy-seeded generator backed by `rand`.
#[derive(Debug, Clone)]
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

impl RandomSource for EntropyRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn range(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        self.inner.gen_range(min..=max)
    }

    fn coin(&mut self) -> bool {
        self.inner.gen_bool(0.5)
    }

    fn index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.inner.gen_range(0..len)
    }
}

/// Boxed random source owned by the session worker.
pub type SessionRng = Box<dyn RandomSource + Send>;

/// Deterministic when `seed` is set, entropy-backed otherwise.
pub fn session_rng(seed: Option<u64>) -> SessionRng {
    match seed {
        Some(seed) => Box::new(PcgRng::seeded(seed)),
        None => Box::new(EntropyRng::new()),
    }
}
