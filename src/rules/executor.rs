//! Move execution and capture resolution.
//!
//! `apply_advance` trusts that the piece was offered by `possible_moves` for
//! the player's stored roll. It does not re-check legality; `LudoGame` does
//! that when strict moves are enabled.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::board::{finish_start, home_entry, is_entering_finish, is_in_finish_lane, is_main_track, outside_finish_range, start_position, BOARD_SIZE};
use crate::core::{Capture, Captures, Color, EngineError, EngineResult, Player, BASE, PIECE_COUNT};

/// Outcome of moving one piece.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceResult {
    /// Index of the moved piece.
    pub piece_index: usize,
    /// Position before the move.
    pub from: i32,
    /// Position after the move (equal to `from` for a rejected finish-lane step).
    pub to: i32,
    /// Opponent pieces sent back to base, in iteration order.
    pub kicked: Captures,
}

/// New position of a piece at `from` after rolling `die`.
///
/// - From base: the start square (a 6 is enforced upstream).
/// - In the finish lane: `from + die` unless that leaves the lane, in which
///   case the piece stays put.
/// - Crossing the home entry: the finish-lane slot reached by the overflow.
/// - Otherwise: wraps around the main track.
#[must_use]
pub fn advance_position(color: Color, from: i32, die: u8) -> i32 {
    if from == BASE {
        return start_position(color);
    }

    let next = from + i32::from(die);

    if is_in_finish_lane(color, from) {
        if outside_finish_range(color, next) {
            warn!(%color, from, die, "finish-lane step overshoots, piece stays");
            return from;
        }
        return next;
    }

    if is_entering_finish(color, from, next) {
        let steps_past_entry = next - home_entry(color);
        let slot = finish_start(color) + steps_past_entry - 1;
        if outside_finish_range(color, slot) {
            warn!(%color, from, die, "finish-lane entry overshoots, piece stays");
            return from;
        }
        return slot;
    }

    next % BOARD_SIZE
}

/// Move piece `piece` of `players[mover]` by its stored roll and send any
/// opponent piece on the landing square back to base.
///
/// Captures only happen on the main track; base and finish-lane squares are
/// immune, and a piece that does not move captures nothing. Opponents are
/// scanned in turn order, their pieces in index order.
pub fn apply_advance(players: &mut [Player], mover: usize, piece: usize) -> EngineResult<AdvanceResult> {
    let player = players
        .get_mut(mover)
        .ok_or(EngineError::InvalidState("mover index outside turn order"))?;
    if piece >= PIECE_COUNT {
        return Err(EngineError::InvalidPieceIndex(piece));
    }
    let die = player.last_roll().ok_or_else(|| EngineError::NoRoll(player.id().clone()))?;

    let color = player.color();
    let from = player.pieces()[piece];
    let to = advance_position(color, from, die);
    player.set_piece(piece, to);

    let mut kicked = Captures::new();
    if to != from && is_main_track(to) {
        for (index, opponent) in players.iter_mut().enumerate() {
            if index == mover {
                continue;
            }
            for opponent_piece in 0..PIECE_COUNT {
                if opponent.pieces()[opponent_piece] == to {
                    opponent.set_piece(opponent_piece, BASE);
                    info!(captured = %opponent.id(), piece = opponent_piece, square = to, "piece sent back to base");
                    kicked.push(Capture::new(opponent.id().clone(), opponent_piece));
                }
            }
        }
    }

    Ok(AdvanceResult {
        piece_index: piece,
        from,
        to,
        kicked,
    })
}
