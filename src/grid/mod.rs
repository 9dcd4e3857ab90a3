//! Grid topology abstraction.
//!
//! The placement engine never interprets coordinates beyond equality and
//! hashing. Every geometric question (which symmetries exist, how to move a
//! cell) is delegated to a [`Grid`], so the same engine drives square, cubic
//! or more exotic tilings.

pub mod lattice;

use std::fmt;

use crate::coord::Coord;

pub use lattice::{AxisMap, LatticeGrid};

/// One symmetry transform of a grid.
pub trait Orientation {
    /// Applies this transform to a whole coordinate list, preserving order.
    ///
    /// Returns `None` when the transform is not defined for these coordinates.
    fn apply(&self, coordinates: &[Coord]) -> Option<Vec<Coord>>;
}

/// Capability interface every concrete grid implements.
pub trait Grid {
    /// Grid-defined bounding description carried by pieces.
    type Bounds: Clone + fmt::Debug + PartialEq;
    /// Grid-defined positional shift.
    type Translation: Clone + fmt::Debug + PartialEq;
    type Orientation: Orientation;
    /// Argument to [`Grid::coordinates`] describing a region's extent.
    type Size;

    /// All supported orientations, in a stable order.
    fn orientations(&self) -> &[Self::Orientation];

    /// The translation taking `from` onto `to`, if the topology connects them.
    fn translation(&self, from: &Coord, to: &Coord) -> Option<Self::Translation>;

    /// Moves one cell; `None` means the result is off-grid.
    fn translate(&self, coord: &Coord, translation: &Self::Translation) -> Option<Coord>;

    /// Every coordinate of a region of the given size.
    fn coordinates(&self, size: &Self::Size) -> Vec<Coord>;

    fn default_piece_bounds(&self) -> Self::Bounds;
}
