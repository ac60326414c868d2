//! Deterministic random number generation for lockstep simulation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence on every peer
//! - **Forkable**: Create independent branches (e.g. one per client prediction)
//! - **Serializable**: O(1) state capture and restore
//! - **Context streams**: Independent sequences for different purposes
//!
//! ## Usage
//!
//! ```
//! use rust_gas::core::GameRng;
//!
//! let mut host = GameRng::new(42);
//! let mut client = GameRng::new(42);
//!
//! // Both peers draw the same targets from the same stream.
//! assert_eq!(host.next(0, 8), client.next(0, 8));
//!
//! // Separate domains don't disturb each other.
//! let mut targeting = host.for_context("targeting");
//! let mut loot = host.for_context("loot");
//! let _ = (targeting.next(0, 100), loot.next(0, 100));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

const FNV64_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV64_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Deterministic RNG shared by every strategy that needs randomness.
///
/// Uses ChaCha8 so the stream is identical across platforms and builds.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    /// The derived seed is 64-bit FNV-1a over the little-endian seed and
    /// the context bytes, so it does not depend on pointer width.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let context_seed = self
            .seed
            .to_le_bytes()
            .iter()
            .chain(context.as_bytes())
            .fold(FNV64_OFFSET, |hash, byte| {
                (hash ^ u64::from(*byte)).wrapping_mul(FNV64_PRIME)
            });

        Self {
            inner: ChaCha8Rng::seed_from_u64(context_seed),
            seed: context_seed,
            fork_counter: 0,
        }
    }

    /// Integer in `[min, max)`. Returns `min` when the range is empty.
    pub fn next(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.inner.gen_range(min..max)
    }

    /// Get the current state for checkpointing.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses the ChaCha8 word position for O(1) capture regardless of
/// how many numbers have been drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
    /// Fork counter for deterministic branching
    pub fork_counter: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.next(0, 1000), rng2.next(0, 1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.next(0, 1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.next(0, 1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_next_empty_range() {
        let mut rng = GameRng::new(7);
        assert_eq!(rng.next(3, 3), 3);
        assert_eq!(rng.next(5, 1), 5);
    }

    #[test]
    fn test_next_in_bounds() {
        let mut rng = GameRng::new(9);
        for _ in 0..200 {
            let v = rng.next(-3, 4);
            assert!((-3..4).contains(&v));
        }
    }

    #[test]
    fn test_fork_is_deterministic() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        let forked1 = rng1.fork();
        let forked2 = rng2.fork();

        assert_eq!(forked1.seed, forked2.seed);
        assert_ne!(forked1.seed, 42);
    }

    #[test]
    fn test_context_is_deterministic() {
        let rng1 = GameRng::new(42);
        let rng2 = GameRng::new(42);

        let mut ctx1 = rng1.for_context("targeting");
        let mut ctx2 = rng2.for_context("targeting");

        for _ in 0..10 {
            assert_eq!(ctx1.next(0, 1000), ctx2.next(0, 1000));
        }
    }

    #[test]
    fn test_context_produces_different_sequence() {
        let rng = GameRng::new(42);
        let mut ctx1 = rng.for_context("targeting");
        let mut ctx2 = rng.for_context("loot");

        let seq1: Vec<_> = (0..10).map(|_| ctx1.next(0, 1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| ctx2.next(0, 1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_context_seed_is_pinned() {
        // Peers on any target width must derive the same stream.
        assert_eq!(GameRng::new(42).for_context("targeting").seed(), 3_463_897_891_575_147_758);
        assert_eq!(GameRng::new(0).for_context("targeting").seed(), 10_236_484_984_531_188_032);
    }

    #[test]
    fn test_state_roundtrip() {
        let mut rng = GameRng::new(42);
        for _ in 0..100 {
            rng.next(0, 1000);
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.next(0, 1000)).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.next(0, 1000)).collect();

        assert_eq!(expected, actual);
    }
}
