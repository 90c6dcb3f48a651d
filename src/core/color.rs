//! Player colors.
//!
//! The board has exactly four colors. A color's ordinal (0-3) fixes where its
//! pieces enter the main track and which finish-lane slots belong to it.

use serde::{Deserialize, Serialize};

use super::error::{EngineError, EngineResult};

/// Number of colors (and therefore the maximum number of players).
pub const COLOR_COUNT: usize = 4;

/// One of the four player colors.
///
/// The discriminant is the stable ordinal used by the board geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    Red = 0,
    Blue = 1,
    Yellow = 2,
    Green = 3,
}

impl Color {
    /// All colors in ordinal order.
    pub const ALL: [Color; COLOR_COUNT] = [Color::Red, Color::Blue, Color::Yellow, Color::Green];

    /// Get the stable ordinal (0-3).
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Convert an ordinal back into a color.
    ///
    /// ```
    /// use ludo_engine::core::Color;
    ///
    /// assert_eq!(Color::from_ordinal(2).unwrap(), Color::Yellow);
    /// assert!(Color::from_ordinal(4).is_err());
    /// ```
    pub fn from_ordinal(ordinal: u8) -> EngineResult<Self> {
        Self::ALL
            .get(ordinal as usize)
            .copied()
            .ok_or(EngineError::InvalidColor(ordinal))
    }

    /// First color in ordinal order that is not in `taken`.
    ///
    /// Returns `None` once all four colors are in use.
    #[must_use]
    pub fn first_available(taken: &[Color]) -> Option<Self> {
        Self::ALL.into_iter().find(|c| !taken.contains(c))
    }
}

impl TryFrom<u8> for Color {
    type Error = EngineError;

    fn try_from(ordinal: u8) -> Result<Self, Self::Error> {
        Self::from_ordinal(ordinal)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Red => "Red",
            Color::Blue => "Blue",
            Color::Yellow => "Yellow",
            Color::Green => "Green",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals_are_stable() {
        let ordinals: Vec<_> = Color::ALL.iter().map(|c| c.ordinal()).collect();
        assert_eq!(ordinals, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_from_ordinal_roundtrip() {
        for color in Color::ALL {
            assert_eq!(Color::from_ordinal(color.ordinal()).unwrap(), color);
        }
    }

    #[test]
    fn test_from_ordinal_out_of_range() {
        assert!(matches!(Color::from_ordinal(4), Err(EngineError::InvalidColor(4))));
        assert!(matches!(Color::try_from(255u8), Err(EngineError::InvalidColor(255))));
    }

    #[test]
    fn test_first_available() {
        assert_eq!(Color::first_available(&[]), Some(Color::Red));
        assert_eq!(Color::first_available(&[Color::Red, Color::Yellow]), Some(Color::Blue));
        assert_eq!(Color::first_available(&[Color::Red, Color::Blue, Color::Yellow]), Some(Color::Green));
        assert_eq!(Color::first_available(&Color::ALL), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Color::Green), "Green");
    }
}
