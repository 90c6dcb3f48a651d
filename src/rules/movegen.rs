//! Legal move generation.
//!
//! For each of a player's four pieces (in index order) the generator decides
//! whether the die value yields a legal move:
//!
//! 1. **Base** (`BASE`): only on a 6, and only if no own piece already stands
//!    on the start square. Lands on the start square.
//! 2. **Finish lane**: the die must fit exactly inside the four slots and the
//!    target slot must be free of own pieces.
//! 3. **Main track**: a die larger than the distance to the home entry turns
//!    into the finish lane (overflow `die - distance - 1` picks the slot, no
//!    overshoot). Otherwise the piece moves `(pos + die) mod BOARD_SIZE`.
//!    Own pieces block, opponents never do (they get captured instead).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{distance_to_home_entry, finish_lane, finish_slot, start_position, BOARD_SIZE};
use crate::core::{Color, Player, BASE, PIECE_COUNT};

/// Die value needed to bring a piece out of base.
pub const ENTRY_ROLL: u8 = 6;

/// A legal candidate move for one piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PossibleMove {
    /// Index of the piece within the player's pieces.
    pub piece_index: usize,
    /// Current position.
    pub from: i32,
    /// Target position.
    pub to: i32,
    /// True if the target is a finish-lane slot.
    pub to_finish: bool,
}

/// Candidate moves for one roll. At most one per piece.
pub type Moves = SmallVec<[PossibleMove; PIECE_COUNT]>;

/// Where a piece at `from` would end up with `die`, ignoring occupancy.
///
/// Returns the target and whether it lies in the finish lane, or `None`
/// when the die cannot be used by this piece (base without a 6, overshooting
/// the finish lane).
#[must_use]
pub fn target_square(color: Color, from: i32, die: u8) -> Option<(i32, bool)> {
    let lane = finish_lane(color);
    let die = i32::from(die);

    if from == BASE {
        return (die == i32::from(ENTRY_ROLL)).then_some((start_position(color), false));
    }

    if let Some(slot) = finish_slot(color, from) {
        let target = slot + die as usize;
        return lane.get(target).map(|&to| (to, true));
    }

    let distance = distance_to_home_entry(color, from);
    if die > distance {
        let steps_into_lane = (die - distance - 1) as usize;
        lane.get(steps_into_lane).map(|&to| (to, true))
    } else {
        Some(((from + die) % BOARD_SIZE, false))
    }
}

/// Enumerate the legal moves for `player` with die value `die`.
///
/// An empty result still ends the player's advance phase; the caller must
/// move the turn machine on regardless.
///
/// ```
/// use ludo_engine::core::{Color, Player};
/// use ludo_engine::rules::possible_moves;
///
/// let red = Player::new("a", "Alice", Color::Red).with_pieces([-1, 12, 40, 41]);
/// let moves = possible_moves(&red, 6);
/// assert_eq!(moves.len(), 2);
/// assert_eq!((moves[0].from, moves[0].to), (-1, 0));
/// assert_eq!((moves[1].from, moves[1].to), (12, 18));
/// assert!(possible_moves(&red, 3).iter().all(|m| m.from != -1));
/// ```
#[must_use]
pub fn possible_moves(player: &Player, die: u8) -> Moves {
    let color = player.color();
    let mut moves = Moves::new();

    for (piece_index, &from) in player.pieces().iter().enumerate() {
        let Some((to, to_finish)) = target_square(color, from, die) else {
            continue;
        };

        if player.occupies(to) {
            continue;
        }

        moves.push(PossibleMove {
            piece_index,
            from,
            to,
            to_finish,
        });
    }

    debug_assert!(moves.len() <= PIECE_COUNT);
    debug_assert!(moves.iter().all(|m| !m.to_finish || m.to >= BOARD_SIZE));
    moves
}
