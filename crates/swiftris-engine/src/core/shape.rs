use std::fmt;

use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::{
    block::{Block, BlockColor},
    orientation::Orientation,
};

/// Number of blocks in every shape.
pub const BLOCKS_PER_SHAPE: usize = 4;

/// Offset of each block from the shape anchor, as `(column_diff, row_diff)`.
pub type ShapeOffsets = [(i32, i32); BLOCKS_PER_SHAPE];

/// A falling tetromino: four blocks of one color laid out around an anchor.
///
/// The block positions are always derived from the anchor and the offset
/// table of the shape's kind for its current orientation. Rotation and
/// [`move_to`](Self::move_to) recompute every block from that table rather
/// than transforming the previous positions, so positions cannot drift.
///
/// A `Shape` is mutated in place: [`Swiftris`](crate::Swiftris) applies a
/// change, checks legality and applies the exact inverse if the result is
/// illegal.
///
/// Two shapes compare equal when their anchors match, regardless of kind,
/// color or orientation.
///
/// # Example
///
/// ```
/// use swiftris_engine::{BlockColor, Orientation, Shape, ShapeKind};
///
/// let mut shape = Shape::new(ShapeKind::T, 4, 0, BlockColor::Red, Orientation::Zero);
/// shape.rotate_clockwise();
/// shape.lower_by_one_row();
///
/// assert_eq!(shape.orientation(), Orientation::Ninety);
/// assert_eq!((shape.column(), shape.row()), (4, 1));
/// ```
#[derive(Debug, Clone)]
pub struct Shape {
    kind: ShapeKind,
    color: BlockColor,
    orientation: Orientation,
    column: i32,
    row: i32,
    blocks: [Block; BLOCKS_PER_SHAPE],
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.column == other.column && self.row == other.row
    }
}

impl Eq for Shape {}

impl Shape {
    #[must_use]
    pub fn new(
        kind: ShapeKind,
        column: i32,
        row: i32,
        color: BlockColor,
        orientation: Orientation,
    ) -> Self {
        let blocks = kind
            .offsets(orientation)
            .map(|(dc, dr)| Block::new(column + dc, row + dr, color));
        Self {
            kind,
            color,
            orientation,
            column,
            row,
            blocks,
        }
    }

    /// Creates a shape of the given kind with a random color and orientation.
    #[must_use]
    pub fn random_colored<R>(kind: ShapeKind, column: i32, row: i32, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let color = rng.random();
        let orientation = rng.random();
        Self::new(kind, column, row, color, orientation)
    }

    /// Creates a shape of a uniformly chosen kind with a random color and
    /// orientation.
    #[must_use]
    pub fn random<R>(column: i32, row: i32, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let kind = rng.random();
        Self::random_colored(kind, column, row, rng)
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub fn color(&self) -> BlockColor {
        self.color
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[must_use]
    pub fn column(&self) -> i32 {
        self.column
    }

    #[must_use]
    pub fn row(&self) -> i32 {
        self.row
    }

    #[must_use]
    pub fn blocks(&self) -> &[Block; BLOCKS_PER_SHAPE] {
        &self.blocks
    }

    pub(crate) fn into_blocks(self) -> [Block; BLOCKS_PER_SHAPE] {
        self.blocks
    }

    /// Returns the blocks forming the underside of the shape in its current
    /// orientation.
    ///
    /// These are the blocks whose downward neighbor is not part of the shape,
    /// i.e. the cells that must be checked against the floor and the stack.
    #[must_use]
    pub fn bottom_blocks(&self) -> ArrayVec<Block, BLOCKS_PER_SHAPE> {
        self.kind
            .bottom_indices(self.orientation)
            .iter()
            .map(|&i| self.blocks[i])
            .collect()
    }

    fn rotate_blocks(&mut self, orientation: Orientation) {
        let offsets = self.kind.offsets(orientation);
        for (block, (dc, dr)) in self.blocks.iter_mut().zip(offsets) {
            block.set_position(self.column + dc, self.row + dr);
        }
    }

    pub fn rotate_clockwise(&mut self) {
        let orientation = self.orientation.rotated_clockwise();
        self.rotate_blocks(orientation);
        self.orientation = orientation;
    }

    pub fn rotate_counter_clockwise(&mut self) {
        let orientation = self.orientation.rotated_counter_clockwise();
        self.rotate_blocks(orientation);
        self.orientation = orientation;
    }

    /// Translates the anchor and all blocks by the same delta.
    pub fn shift_by(&mut self, columns: i32, rows: i32) {
        self.column += columns;
        self.row += rows;
        for block in &mut self.blocks {
            block.shift_by(columns, rows);
        }
    }

    pub fn lower_by_one_row(&mut self) {
        self.shift_by(0, 1);
    }

    pub fn raise_by_one_row(&mut self) {
        self.shift_by(0, -1);
    }

    pub fn shift_left_by_one_column(&mut self) {
        self.shift_by(-1, 0);
    }

    pub fn shift_right_by_one_column(&mut self) {
        self.shift_by(1, 0);
    }

    /// Moves the anchor to `(column, row)` and re-derives every block from the
    /// current orientation.
    pub fn move_to(&mut self, column: i32, row: i32) {
        self.column = column;
        self.row = row;
        self.rotate_blocks(self.orientation);
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [b0, b1, b2, b3] = &self.blocks;
        write!(
            f,
            "{} block facing {}: {b0}, {b1}, {b2}, {b3}",
            self.color, self.orientation
        )
    }
}

/// The seven tetromino kinds.
///
/// The kinds differ only in their offset and bottom-block tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum ShapeKind {
    /// Square.
    O = 0,
    /// Line.
    I = 1,
    T = 2,
    L = 3,
    J = 4,
    S = 5,
    Z = 6,
}

impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        ShapeKind::ALL[rng.random_range(0..ShapeKind::LEN)]
    }
}

impl ShapeKind {
    /// Number of shape kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        Self::O,
        Self::I,
        Self::T,
        Self::L,
        Self::J,
        Self::S,
        Self::Z,
    ];

    /// Returns the block offsets for the given orientation.
    #[must_use]
    pub fn offsets(self, orientation: Orientation) -> ShapeOffsets {
        SHAPE_OFFSETS[self as usize][orientation.as_usize()]
    }

    /// Returns the indices of the bottom blocks for the given orientation.
    #[must_use]
    pub fn bottom_indices(self, orientation: Orientation) -> &'static [usize] {
        BOTTOM_BLOCK_INDICES[self as usize][orientation.as_usize()]
    }
}

// Indexed by [ShapeKind][Orientation]. Rows grow downward.
static SHAPE_OFFSETS: [[ShapeOffsets; Orientation::LEN]; ShapeKind::LEN] = {
    const O: ShapeOffsets = [(0, 0), (1, 0), (0, 1), (1, 1)];
    const I_VERTICAL: ShapeOffsets = [(0, 0), (0, 1), (0, 2), (0, 3)];
    const I_HORIZONTAL: ShapeOffsets = [(-1, 0), (0, 0), (1, 0), (2, 0)];
    const S_VERTICAL: ShapeOffsets = [(0, 0), (0, 1), (1, 1), (1, 2)];
    const S_HORIZONTAL: ShapeOffsets = [(2, 0), (1, 0), (1, 1), (0, 1)];
    const Z_VERTICAL: ShapeOffsets = [(1, 0), (1, 1), (0, 1), (0, 2)];
    const Z_HORIZONTAL: ShapeOffsets = [(-1, 0), (0, 0), (0, 1), (1, 1)];
    [
        // O
        [O, O, O, O],
        // I
        [I_VERTICAL, I_HORIZONTAL, I_VERTICAL, I_HORIZONTAL],
        // T
        [
            [(1, 0), (0, 1), (1, 1), (2, 1)],
            [(2, 1), (1, 0), (1, 1), (1, 2)],
            [(1, 2), (0, 1), (1, 1), (2, 1)],
            [(0, 1), (1, 0), (1, 1), (1, 2)],
        ],
        // L
        [
            [(0, 0), (0, 1), (0, 2), (1, 2)],
            [(1, 1), (0, 1), (-1, 1), (-1, 2)],
            [(0, 2), (0, 1), (0, 0), (-1, 0)],
            [(-1, 1), (0, 1), (1, 1), (1, 0)],
        ],
        // J
        [
            [(1, 0), (1, 1), (1, 2), (0, 2)],
            [(2, 1), (1, 1), (0, 1), (0, 0)],
            [(0, 2), (0, 1), (0, 0), (1, 0)],
            [(0, 0), (1, 0), (2, 0), (2, 1)],
        ],
        // S
        [S_VERTICAL, S_HORIZONTAL, S_VERTICAL, S_HORIZONTAL],
        // Z
        [Z_VERTICAL, Z_HORIZONTAL, Z_VERTICAL, Z_HORIZONTAL],
    ]
};

// Indexed by [ShapeKind][Orientation]. Must agree with SHAPE_OFFSETS: a block
// is listed iff the cell directly below it is not part of the same shape.
static BOTTOM_BLOCK_INDICES: [[&[usize]; Orientation::LEN]; ShapeKind::LEN] = [
    // O
    [&[2, 3], &[2, 3], &[2, 3], &[2, 3]],
    // I
    [&[3], &[0, 1, 2, 3], &[3], &[0, 1, 2, 3]],
    // T
    [&[1, 2, 3], &[0, 3], &[0, 1, 3], &[0, 3]],
    // L
    [&[2, 3], &[0, 1, 3], &[0, 3], &[0, 1, 2]],
    // J
    [&[2, 3], &[0, 1, 2], &[0, 3], &[0, 1, 3]],
    // S
    [&[1, 3], &[0, 2, 3], &[1, 3], &[0, 2, 3]],
    // Z
    [&[1, 3], &[0, 2, 3], &[1, 3], &[0, 2, 3]],
];
