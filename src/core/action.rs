//! Action history records.
//!
//! Every roll, move and pass taken through `LudoGame` can be recorded as an
//! `ActionRecord`, giving the session layer a replayable log for debugging
//! and for late joiners.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;

/// An opponent piece sent back to base by a move.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capture {
    /// Owner of the captured piece.
    pub player: PlayerId,
    /// Index of the captured piece within its owner's pieces.
    pub piece: usize,
}

impl Capture {
    #[must_use]
    pub fn new(player: PlayerId, piece: usize) -> Self {
        Self { player, piece }
    }
}

/// Captures produced by a single move.
///
/// A move lands on one square, so more than a couple of captures is rare.
pub type Captures = SmallVec<[Capture; 2]>;

/// Something a player did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Rolled the die.
    Roll(u8),
    /// Moved a piece.
    Move {
        piece: usize,
        from: i32,
        to: i32,
        captured: Captures,
    },
    /// Gave up the advance phase without moving.
    Pass,
}

impl Action {
    /// Check if this action moved a piece.
    #[must_use]
    pub fn is_move(&self) -> bool {
        matches!(self, Action::Move { .. })
    }
}

/// A recorded action with ordering metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Round number (increments each time the turn passes to the next player).
    pub turn: u32,

    /// Global sequence number (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_action_is_move() {
        assert!(!Action::Roll(6).is_move());
        assert!(!Action::Pass.is_move());
        assert!(Action::Move {
            piece: 0,
            from: -1,
            to: 0,
            captured: Captures::new(),
        }
        .is_move());
    }

    #[test]
    fn test_action_record() {
        let record = ActionRecord::new(PlayerId::new("a"), Action::Roll(4), 3, 5);

        assert_eq!(record.player, PlayerId::new("a"));
        assert_eq!(record.action, Action::Roll(4));
        assert_eq!(record.turn, 3);
        assert_eq!(record.sequence, 5);
    }

    #[test]
    fn test_action_record_serialization() {
        let action = Action::Move {
            piece: 1,
            from: 8,
            to: 12,
            captured: smallvec![Capture::new(PlayerId::new("b"), 3)],
        };
        let record = ActionRecord::new(PlayerId::new("a"), action, 2, 3);

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: ActionRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
