//! Engine configuration.
//!
//! Board dimensions are fixed constants in `board`; only per-game behaviour
//! is configurable.

use serde::{Deserialize, Serialize};

/// Per-game engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seed for the game's RNG.
    /// `None` draws a fresh seed from entropy when the game is created.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Re-check the chosen piece against the legal moves in `advance`.
    /// When disabled the caller is fully trusted.
    #[serde(default = "default_true")]
    pub strict_moves: bool,

    /// Keep an in-memory history of rolls and moves.
    #[serde(default = "default_true")]
    pub record_history: bool,
}

fn default_true() -> bool {
    true
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            strict_moves: true,
            record_history: true,
        }
    }
}

impl GameConfig {
    /// Use a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable or disable the legality re-check in `advance`.
    #[must_use]
    pub fn with_strict_moves(mut self, strict: bool) -> Self {
        self.strict_moves = strict;
        self
    }

    /// Enable or disable action history.
    #[must_use]
    pub fn with_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }
}
