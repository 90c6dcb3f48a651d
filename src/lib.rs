//! # ludo-engine
//!
//! Rules engine for a four-color race board game played turn by turn.
//!
//! ## Design Principles
//!
//! 1. **Bit-exact board arithmetic**: a 40-square shared track, one start
//!    square per color every 10 squares, and a private four-slot finish lane
//!    per color encoded in disjoint integer ranges.
//!
//! 2. **One engine per lobby**: `LudoGame` owns its players, turn state and
//!    die source. Nothing is global; callers serialize access.
//!
//! 3. **Explicit trust boundary**: the raw mutators document their
//!    preconditions; `LudoGame::check_action` and the `play_*` wrappers are
//!    the validated entry points.
//!
//! ## Modules
//!
//! - `core`: colors, players, configuration, errors, RNG, history records
//! - `board`: pure color-to-coordinate geometry
//! - `rules`: turn state machine, move generation, execution, win detection
//! - `game`: the `LudoGame` facade

pub mod core;
pub mod board;
pub mod rules;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, Capture, Color, DieSource, EngineError, EngineResult, GameConfig, GameRng,
    GameRngState, LoadedDice, Player, PlayerId, BASE, PIECE_COUNT,
};

pub use crate::board::{BOARD_SIZE, FINISH_LANE_LEN};

pub use crate::rules::{AdvanceResult, PossibleMove, TurnPhase, TurnState};

pub use crate::game::{AdvanceOutcome, LudoGame, RollOutcome};
