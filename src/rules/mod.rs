//! Game rules.
//!
//! - `turn`: whose turn it is and in which phase, reindexing on removal
//! - `movegen`: legal candidate moves for a die value
//! - `executor`: applying a move and resolving captures
//! - `win`: win detection
//!
//! Everything here is synchronous and in-memory. The functions trust their
//! inputs to come from a consistent game; `LudoGame` is the validated entry
//! point.

pub mod turn;
pub mod movegen;
pub mod executor;
pub mod win;

pub use turn::{remove_from_order, TurnPhase, TurnState};
pub use movegen::{possible_moves, target_square, Moves, PossibleMove, ENTRY_ROLL};
pub use executor::{advance_position, apply_advance, AdvanceResult};
pub use win::has_won;
