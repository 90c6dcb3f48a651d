//! Board coordinates per color.
//!
//! ## Encoding
//!
//! - `BASE` (-1): piece not yet in play
//! - `0..BOARD_SIZE`: absolute square on the shared main track
//! - `finish_start(color)..finish_start(color) + FINISH_LANE_LEN`: the
//!   color's private finish lane
//!
//! Finish-lane slots are offset by the color's start square, so the four
//! lanes occupy disjoint integer ranges (Red 40-43, Blue 50-53, Yellow 60-63,
//! Green 70-73). They are not a shared coordinate space.
//!
//! ```
//! use ludo_engine::board::{finish_lane, home_entry, start_position};
//! use ludo_engine::core::Color;
//!
//! assert_eq!(start_position(Color::Blue), 10);
//! assert_eq!(home_entry(Color::Blue), 9);
//! assert_eq!(finish_lane(Color::Blue), [50, 51, 52, 53]);
//! ```

use crate::core::{Color, EngineResult, COLOR_COUNT};

/// Squares on the shared main track.
pub const BOARD_SIZE: i32 = 40;

/// Slots in each color's finish lane.
pub const FINISH_LANE_LEN: usize = 4;

/// Distance between consecutive colors' start squares.
pub const SQUARES_PER_COLOR: i32 = BOARD_SIZE / COLOR_COUNT as i32;

/// Main-track square where a color's pieces enter from base.
#[must_use]
pub const fn start_position(color: Color) -> i32 {
    color.ordinal() as i32 * SQUARES_PER_COLOR
}

/// Start square for a raw color ordinal.
///
/// Fails with `InvalidColor` for ordinals outside the four known colors.
pub fn start_position_for_ordinal(ordinal: u8) -> EngineResult<i32> {
    Color::from_ordinal(ordinal).map(start_position)
}

/// First slot of a color's finish lane.
#[must_use]
pub const fn finish_start(color: Color) -> i32 {
    start_position(color) + BOARD_SIZE
}

/// The four finish-lane slots of a color, in travel order.
#[must_use]
pub fn finish_lane(color: Color) -> [i32; FINISH_LANE_LEN] {
    let first = finish_start(color);
    std::array::from_fn(|i| first + i as i32)
}

/// Last main-track square before the color turns into its finish lane.
#[must_use]
pub const fn home_entry(color: Color) -> i32 {
    (start_position(color) + BOARD_SIZE - 1) % BOARD_SIZE
}

/// Is `pos` one of the color's finish-lane slots?
#[must_use]
pub fn is_in_finish_lane(color: Color, pos: i32) -> bool {
    finish_slot(color, pos).is_some()
}

/// Index (0-3) of `pos` within the color's finish lane.
#[must_use]
pub fn finish_slot(color: Color, pos: i32) -> Option<usize> {
    let offset = pos - finish_start(color);
    (0..FINISH_LANE_LEN as i32)
        .contains(&offset)
        .then_some(offset as usize)
}

/// Does a forward move from `from` to the unwrapped target `to` cross the
/// color's home entry?
///
/// Only the non-wrapping case `from <= home_entry < to` is recognised. A move
/// that passes square 0 on the way to the home entry is reported as not
/// entering.
#[must_use]
pub fn is_entering_finish(color: Color, from: i32, to: i32) -> bool {
    if is_in_finish_lane(color, from) {
        return false;
    }
    let entry = home_entry(color);
    from <= entry && to > entry
}

/// Is `pos` beyond the last finish-lane slot of the color?
#[must_use]
pub fn outside_finish_range(color: Color, pos: i32) -> bool {
    pos > finish_start(color) + FINISH_LANE_LEN as i32 - 1
}

/// Is `pos` a square on the shared main track?
#[must_use]
pub fn is_main_track(pos: i32) -> bool {
    (0..BOARD_SIZE).contains(&pos)
}

/// Forward steps from a main-track square to the color's home entry.
///
/// Zero when the piece is already standing on its home entry.
#[must_use]
pub fn distance_to_home_entry(color: Color, pos: i32) -> i32 {
    (home_entry(color) - pos).rem_euclid(BOARD_SIZE)
}
