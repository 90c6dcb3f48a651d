//! Win detection.

use rustc_hash::FxHashSet;

use crate::board::{finish_lane, FINISH_LANE_LEN};
use crate::core::Player;

/// A player has won once all four pieces occupy the four slots of their
/// color's finish lane.
#[must_use]
pub fn has_won(player: &Player) -> bool {
    let lane: FxHashSet<i32> = finish_lane(player.color()).into_iter().collect();
    let home: FxHashSet<i32> = player.pieces().iter().copied().filter(|p| lane.contains(p)).collect();
    home.len() == FINISH_LANE_LEN
}
