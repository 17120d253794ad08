use std::fmt;

use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Color of a single block.
///
/// A block keeps its color for its whole lifetime, from spawning as part of a
/// shape until it is cleared from the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum BlockColor {
    Blue = 0,
    Orange = 1,
    Purple = 2,
    Red = 3,
    Teal = 4,
    Yellow = 5,
}

impl Distribution<BlockColor> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BlockColor {
        match rng.random_range(0..BlockColor::LEN) {
            0 => BlockColor::Blue,
            1 => BlockColor::Orange,
            2 => BlockColor::Purple,
            3 => BlockColor::Red,
            4 => BlockColor::Teal,
            _ => BlockColor::Yellow,
        }
    }
}

impl BlockColor {
    /// Number of block colors (6).
    pub const LEN: usize = 6;

    pub const ALL: [Self; Self::LEN] = [
        Self::Blue,
        Self::Orange,
        Self::Purple,
        Self::Red,
        Self::Teal,
        Self::Yellow,
    ];

    /// Returns the sprite name presentation layers use to look up the texture
    /// for this color.
    ///
    /// # Examples
    ///
    /// ```
    /// use swiftris_engine::BlockColor;
    ///
    /// assert_eq!(BlockColor::Teal.sprite_name(), "teal");
    /// ```
    #[must_use]
    pub const fn sprite_name(self) -> &'static str {
        match self {
            BlockColor::Blue => "blue",
            BlockColor::Orange => "orange",
            BlockColor::Purple => "purple",
            BlockColor::Red => "red",
            BlockColor::Teal => "teal",
            BlockColor::Yellow => "yellow",
        }
    }
}

impl fmt::Display for BlockColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sprite_name())
    }
}

/// A single colored cell with a board position.
///
/// Blocks are plain values. While a shape is falling its four blocks live in
/// the [`Shape`](super::shape::Shape); settling copies them into the grid and
/// drops the shape, so a block is never held by both at once.
///
/// Two blocks are equal when their column, row and color all match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    column: i32,
    row: i32,
    color: BlockColor,
}

impl Block {
    #[must_use]
    pub const fn new(column: i32, row: i32, color: BlockColor) -> Self {
        Self { column, row, color }
    }

    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    #[must_use]
    pub const fn color(&self) -> BlockColor {
        self.color
    }

    pub(crate) const fn set_position(&mut self, column: i32, row: i32) {
        self.column = column;
        self.row = row;
    }

    pub(crate) const fn shift_by(&mut self, columns: i32, rows: i32) {
        self.column += columns;
        self.row += rows;
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: [{}, {}]", self.color, self.column, self.row)
    }
}
