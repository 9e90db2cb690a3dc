//! Functional xorshift32 random state.
//!
//! Every draw consumes an [`RngState`] by value and returns the next one,
//! so the caller decides where state is stored. Replaying the same seed
//! through the same sequence of draws reproduces every value exactly.

use serde::{Deserialize, Serialize};

/// Replacement for a zero seed, which would lock xorshift at zero forever.
pub const ZERO_SEED_REPLACEMENT: i32 = 0x6D2B_79F5;

const TWO_POW_32: f64 = 4_294_967_296.0;

/// Immutable 32-bit generator state. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RngState(i32);

impl RngState {
    /// Creates a state from a seed, remapping zero.
    pub fn from_seed(seed: i32) -> Self {
        Self(sanitize_seed(seed))
    }

    /// Draws a fresh seed from the thread-local OS-seeded generator.
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random::<i32>())
    }

    /// Raw seed value.
    pub fn seed(self) -> i32 {
        self.0
    }

    /// Advances the generator once, returning the new raw 32-bit word.
    pub fn next_u32(self) -> (u32, RngState) {
        let mut x = self.0 as u32;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        (x, RngState::from_seed(x as i32))
    }

    /// Uniform draw in `[0, 1)`.
    pub fn next_f64(self) -> (f64, RngState) {
        let (word, next) = self.next_u32();
        (f64::from(word) / TWO_POW_32, next)
    }

    /// Uniform index in `[0, n)`; `0` when `n == 0` (still consumes a draw).
    pub fn next_index(self, n: usize) -> (usize, RngState) {
        let (u, next) = self.next_f64();
        if n == 0 {
            return (0, next);
        }
        (((u * n as f64) as usize).min(n - 1), next)
    }

    /// Fair coin.
    pub fn next_bool(self) -> (bool, RngState) {
        let (u, next) = self.next_f64();
        (u < 0.5, next)
    }
}

/// Remaps the illegal zero seed.
pub fn sanitize_seed(seed: i32) -> i32 {
    if seed == 0 {
        ZERO_SEED_REPLACEMENT
    } else {
        seed
    }
}
