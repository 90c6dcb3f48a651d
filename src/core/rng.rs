//! Per-game die sources.
//!
//! ## Key Features
//!
//! - **Injected**: every `LudoGame` owns its own source, no process-wide RNG
//! - **Deterministic**: same seed produces identical rolls
//! - **Forkable**: derive independent dice for follow-up games from one seed
//! - **Serializable**: O(1) state capture and restore
//!
//! ```
//! use ludo_engine::core::{DieSource, GameRng};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! for _ in 0..10 {
//!     let roll = a.roll_die();
//!     assert!((1..=6).contains(&roll));
//!     assert_eq!(roll, b.roll_die());
//! }
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Number of faces on the die.
pub const DIE_FACES: u8 = 6;

/// Anything that can produce die values in `1..=6`.
pub trait DieSource {
    /// Roll one die.
    fn roll_die(&mut self) -> u8;
}

/// Deterministic RNG backed by ChaCha8.
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

    /// Derive an independent die, e.g. for a rematch in the same lobby.
    ///
    /// The n-th fork of a given seed always yields the same sequence, and
    /// never the parent's.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self::new(fork_seed)
    }

    /// Create an RNG seeded from the thread-local entropy source.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random integer in the given inclusive range.
    pub fn gen_range(&mut self, range: std::ops::RangeInclusive<u8>) -> u8 {
        self.inner.gen_range(range)
    }

    /// Get the current state for serialization.
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

impl DieSource for GameRng {
    fn roll_die(&mut self) -> u8 {
        self.gen_range(1..=DIE_FACES)
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses the ChaCha8 word position, so capture is O(1) regardless of
/// how many rolls have been made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
    /// Forks taken so far
    #[serde(default)]
    pub fork_counter: u64,
}

/// Scripted die that replays a fixed sequence, cycling when exhausted.
///
/// Values are clamped into `1..=6`.
///
/// ```
/// use ludo_engine::core::{DieSource, LoadedDice};
///
/// let mut dice = LoadedDice::new([6, 2]);
/// assert_eq!(dice.roll_die(), 6);
/// assert_eq!(dice.roll_die(), 2);
/// assert_eq!(dice.roll_die(), 6);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedDice {
    values: Vec<u8>,
    cursor: usize,
}

impl LoadedDice {
    /// Create a scripted die. An empty script always rolls 1.
    pub fn new(values: impl IntoIterator<Item = u8>) -> Self {
        Self {
            values: values.into_iter().map(|v| v.clamp(1, DIE_FACES)).collect(),
            cursor: 0,
        }
    }
}

impl DieSource for LoadedDice {
    fn roll_die(&mut self) -> u8 {
        if self.values.is_empty() {
            return 1;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

impl<D: DieSource + ?Sized> DieSource for Box<D> {
    fn roll_die(&mut self) -> u8 {
        (**self).roll_die()
    }
}
