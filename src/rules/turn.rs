//! Turn state machine.
//!
//! ```text
//! None ──▶ Roll ──▶ Advance ──▶ Roll (next player) ──▶ ...
//! ```
//!
//! Only `advance` moves the machine. There is no terminal state: the caller
//! stops driving it once someone has won.

use serde::{Deserialize, Serialize};

use crate::core::{EngineError, EngineResult};

/// What the active player is expected to do next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Not started, or reset after the active player left.
    #[default]
    None,
    /// Roll the die.
    Roll,
    /// Move a piece (or pass) with the rolled value.
    Advance,
}

/// Active index into the ordered player list plus the current phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnState {
    /// Index of the active player in turn order.
    pub active: usize,
    /// Phase of the active player.
    pub phase: TurnPhase,
}

impl TurnState {
    /// Index 0, phase `None`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Step the machine for a turn order of `player_count` players.
    ///
    /// Returns the index of the (possibly new) active player.
    ///
    /// ```
    /// use ludo_engine::rules::{TurnPhase, TurnState};
    ///
    /// let mut turn = TurnState::new();
    /// assert_eq!(turn.advance(2).unwrap(), 0);
    /// assert_eq!(turn.phase, TurnPhase::Roll);
    /// assert_eq!(turn.advance(2).unwrap(), 0);
    /// assert_eq!(turn.phase, TurnPhase::Advance);
    /// assert_eq!(turn.advance(2).unwrap(), 1);
    /// assert_eq!(turn.phase, TurnPhase::Roll);
    /// ```
    pub fn advance(&mut self, player_count: usize) -> EngineResult<usize> {
        if player_count == 0 {
            return Err(EngineError::InvalidState("turn order is empty"));
        }
        if self.active >= player_count {
            return Err(EngineError::InvalidState("active index outside turn order"));
        }

        match self.phase {
            TurnPhase::None => self.phase = TurnPhase::Roll,
            TurnPhase::Roll => self.phase = TurnPhase::Advance,
            TurnPhase::Advance => {
                self.active = (self.active + 1) % player_count;
                self.phase = TurnPhase::Roll;
            }
        }

        Ok(self.active)
    }

    /// Phase seen by the player at `index`: the current phase if they are
    /// active, `None` otherwise.
    #[must_use]
    pub fn phase_for(&self, index: usize) -> TurnPhase {
        if index == self.active {
            self.phase
        } else {
            TurnPhase::None
        }
    }
}

/// Remove the entry at `index` from `order` and repair the turn state.
///
/// - Entries before the active one shift the active index down by one.
/// - An active index past the shrunk list wraps to 0.
/// - Removing the active player resets the phase to `None`, so the next
///   `advance` starts the following player fresh at `Roll`.
/// - An emptied list resets to index 0, phase `None`.
///
/// Returns the new list, the new turn state and the removed entry (`None`
/// when `index` is out of range, in which case nothing changes).
pub fn remove_from_order<T>(
    mut order: Vec<T>,
    turn: TurnState,
    index: usize,
) -> (Vec<T>, TurnState, Option<T>) {
    if index >= order.len() {
        return (order, turn, None);
    }

    let removed_was_active = index == turn.active;
    let removed = order.remove(index);

    if order.is_empty() {
        return (order, TurnState::new(), Some(removed));
    }

    let mut next = turn;
    if next.active > index {
        next.active -= 1;
    }
    if next.active >= order.len() {
        next.active = 0;
    }
    if removed_was_active {
        next.phase = TurnPhase::None;
    }

    (order, next, Some(removed))
}
