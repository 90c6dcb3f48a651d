//! Board geometry.
//!
//! Pure functions mapping a color to its absolute board coordinates: start
//! square, home entry and private finish lane. No state.

pub mod geometry;

pub use geometry::{
    distance_to_home_entry, finish_lane, finish_slot, finish_start, home_entry, is_entering_finish,
    is_in_finish_lane, is_main_track, outside_finish_range, start_position, start_position_for_ordinal,
    BOARD_SIZE, FINISH_LANE_LEN, SQUARES_PER_COLOR,
};
