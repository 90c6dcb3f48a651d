//! Core engine types: colors, players, configuration, errors, RNG, history.
//!
//! This module contains the building blocks shared by the board geometry,
//! the rules and the `LudoGame` facade.

pub mod color;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;

pub use color::{Color, COLOR_COUNT};
pub use player::{all_ready, Player, PlayerId, BASE, PIECE_COUNT};
pub use rng::{DieSource, GameRng, GameRngState, LoadedDice, DIE_FACES};
pub use config::GameConfig;
pub use action::{Action, ActionRecord, Capture, Captures};
pub use error::{EngineError, EngineResult};
