use rand::{rngs::StdRng, seq::SliceRandom, RngCore, SeedableRng};

/// Seeded uniform generator. Every random choice in the engine and
/// the AI goes through one of these so that a seed replays a game exactly.
#[derive(Debug, Clone)]
pub struct RngState {
    rng: StdRng,
}

impl RngState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

/// Derives an independent seed for the `round`-th recycle of a deck.
pub(crate) fn derive_seed(base: u64, round: u32) -> u64 {
    base ^ (u64::from(round) + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
