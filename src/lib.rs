//! Polycube Placement Library
//!
//! Enumerates every way a puzzle piece can occupy cells of a target region,
//! across all grid orientations and anchor translations, with placements that
//! coincide after transformation collapsed to one.

pub mod catalog;
pub mod coord;
pub mod display;
pub mod error;
pub mod grid;
pub mod persistence;
pub mod pieces;
pub mod placement;
pub mod puzzle;
pub mod region;

pub use coord::Coord;
pub use error::{EntityKind, ParseCoordError, PuzzleError};
pub use grid::{Grid, LatticeGrid, Orientation};
pub use pieces::{Piece, PieceUsage, Problem};
pub use placement::{orientations, placements, translations, Placement, PlacementKey, PlacementRecord};
pub use puzzle::{PieceRef, Puzzle, Removal};
pub use region::Region;
