//! Board geometry: blocks, the cell grid, orientations and shapes.

pub use self::{array2d::*, block::*, orientation::*, shape::*};

pub(crate) mod array2d;
pub(crate) mod block;
pub(crate) mod orientation;
pub(crate) mod shape;
