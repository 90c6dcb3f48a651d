//! Engine error type.
//!
//! Turn violations (`NotYourTurn`, `WrongPhase`, `GameOver`) are only raised by
//! the validated entry points on `LudoGame`. The raw mutators trust their
//! caller and document that as a precondition.

use thiserror::Error;

use super::color::Color;
use super::player::PlayerId;
use crate::rules::TurnPhase;

/// Errors returned by engine operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("unknown color ordinal {0}")]
    InvalidColor(u8),

    #[error("invalid turn state: {0}")]
    InvalidState(&'static str),

    #[error("player {0} is not part of this game")]
    UnknownPlayer(PlayerId),

    #[error("it is {active}'s turn, not {player}'s")]
    NotYourTurn { player: PlayerId, active: PlayerId },

    #[error("expected phase {expected:?}, game is in {actual:?}")]
    WrongPhase { expected: TurnPhase, actual: TurnPhase },

    #[error("player {0} has not rolled the die")]
    NoRoll(PlayerId),

    #[error("piece index {0} out of range")]
    InvalidPieceIndex(usize),

    #[error("piece {piece} has no legal move for a roll of {die}")]
    IllegalMove { piece: usize, die: u8 },

    #[error("game already won by {0}")]
    GameOver(PlayerId),

    #[error("a game needs 1 to 4 players, got {0}")]
    InvalidPlayerCount(usize),

    #[error("color {0} is used by more than one player")]
    DuplicateColor(Color),

    #[error("player {0} appears more than once")]
    DuplicatePlayer(PlayerId),
}

/// Result alias used throughout the engine.
pub type EngineResult<T> = Result<T, EngineError>;
