//! Player identification and per-player piece storage.
//!
//! ## PlayerId
//!
//! Opaque identifier owned by the caller (typically a connection id). The
//! engine compares and clones it but never generates one.
//!
//! ## Player
//!
//! Display name, color, ready flag, the last die value and exactly four
//! piece positions. Positions use the board encoding: `BASE` (-1) for a piece
//! not yet in play, `0..BOARD_SIZE` for the main track, and the color's
//! finish-lane slots above that.

use serde::{Deserialize, Serialize};

use super::color::Color;

/// Pieces per player.
pub const PIECE_COUNT: usize = 4;

/// Position of a piece that has not entered the board.
pub const BASE: i32 = -1;

/// Opaque player identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A participant and their four pieces.
///
/// ## Example
///
/// ```
/// use ludo_engine::core::{Color, Player, BASE};
///
/// let mut red = Player::new("conn-1", "Alice", Color::Red);
/// assert_eq!(red.pieces(), &[BASE; 4]);
/// assert_eq!(red.last_roll(), None);
///
/// red.set_ready(true);
/// assert!(red.is_ready());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    color: Color,
    ready: bool,
    last_roll: Option<u8>,
    pieces: [i32; PIECE_COUNT],
}

impl Player {
    /// Create a player with all pieces in base.
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, color: Color) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color,
            ready: false,
            last_roll: None,
            pieces: [BASE; PIECE_COUNT],
        }
    }

    /// Place pieces at explicit positions (scenario setup).
    #[must_use]
    pub fn with_pieces(mut self, pieces: [i32; PIECE_COUNT]) -> Self {
        self.pieces = pieces;
        self
    }

    #[must_use]
    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    /// Last die value rolled by this player, `None` before the first roll.
    #[must_use]
    pub fn last_roll(&self) -> Option<u8> {
        self.last_roll
    }

    pub fn set_last_roll(&mut self, value: u8) {
        self.last_roll = Some(value);
    }

    /// All four piece positions in index order.
    #[must_use]
    pub fn pieces(&self) -> &[i32; PIECE_COUNT] {
        &self.pieces
    }

    /// Position of one piece, `None` for an index outside 0..4.
    #[must_use]
    pub fn piece(&self, index: usize) -> Option<i32> {
        self.pieces.get(index).copied()
    }

    /// Overwrite one piece position.
    ///
    /// Out-of-range indices are ignored.
    pub fn set_piece(&mut self, index: usize, position: i32) {
        if let Some(slot) = self.pieces.get_mut(index) {
            *slot = position;
        }
    }

    /// Does one of this player's pieces sit on `position`?
    #[must_use]
    pub fn occupies(&self, position: i32) -> bool {
        self.pieces.contains(&position)
    }

    /// Send every piece back to base and forget the last roll.
    pub fn reset(&mut self) {
        self.pieces = [BASE; PIECE_COUNT];
        self.last_roll = None;
    }
}

/// Check whether every player has flagged ready.
///
/// An empty slice is not considered ready.
#[must_use]
pub fn all_ready(players: &[Player]) -> bool {
    !players.is_empty() && players.iter().all(Player::is_ready)
}
