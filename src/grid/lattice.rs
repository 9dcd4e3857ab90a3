//! Rectangular lattice grids (square and cubic).
//!
//! Orientations are signed axis permutations: output axis `i` takes input axis
//! `axes[i].0` multiplied by `axes[i].1`. Translations are per-axis offsets.

use smallvec::SmallVec;

use super::{Grid, Orientation};
use crate::coord::Coord;

/// Default piece extent along every axis.
const DEFAULT_PIECE_EXTENT: i32 = 3;

/// The 24 proper rotations of a cube.
///
/// Organized as 6 face-up choices x 4 rotations around vertical:
/// - Rotations 0-3: +Z face up
/// - Rotations 4-7: +Y face up
/// - Rotations 8-11: -Z face up
/// - Rotations 12-15: -Y face up
/// - Rotations 16-19: +X face up
/// - Rotations 20-23: -X face up
const CUBE_ROTATIONS: [[(usize, i32); 3]; 24] = [
    // +Z face up (identity orientation), rotate around Z axis
    [(0, 1), (1, 1), (2, 1)],    // (x, y, z)
    [(1, -1), (0, 1), (2, 1)],   // (-y, x, z)
    [(0, -1), (1, -1), (2, 1)],  // (-x, -y, z)
    [(1, 1), (0, -1), (2, 1)],   // (y, -x, z)
    // +Y face up, rotate around Y axis
    [(0, 1), (2, -1), (1, 1)],   // (x, -z, y)
    [(2, 1), (0, 1), (1, 1)],    // (z, x, y)
    [(0, -1), (2, 1), (1, 1)],   // (-x, z, y)
    [(2, -1), (0, -1), (1, 1)],  // (-z, -x, y)
    // -Z face up, rotate around Z axis
    [(0, 1), (1, -1), (2, -1)],  // (x, -y, -z)
    [(1, 1), (0, 1), (2, -1)],   // (y, x, -z)
    [(0, -1), (1, 1), (2, -1)],  // (-x, y, -z)
    [(1, -1), (0, -1), (2, -1)], // (-y, -x, -z)
    // -Y face up, rotate around Y axis
    [(0, 1), (2, 1), (1, -1)],   // (x, z, -y)
    [(2, -1), (0, 1), (1, -1)],  // (-z, x, -y)
    [(0, -1), (2, -1), (1, -1)], // (-x, -z, -y)
    [(2, 1), (0, -1), (1, -1)],  // (z, -x, -y)
    // +X face up, rotate around X axis
    [(2, 1), (1, 1), (0, -1)],   // (z, y, -x)
    [(1, -1), (2, 1), (0, -1)],  // (-y, z, -x)
    [(2, -1), (1, -1), (0, -1)], // (-z, -y, -x)
    [(1, 1), (2, -1), (0, -1)],  // (y, -z, -x)
    // -X face up, rotate around X axis
    [(2, -1), (1, 1), (0, 1)],   // (-z, y, x)
    [(1, -1), (2, -1), (0, 1)],  // (-y, -z, x)
    [(2, 1), (1, -1), (0, 1)],   // (z, -y, x)
    [(1, 1), (2, 1), (0, 1)],    // (y, z, x)
];

/// The 4 rotations of a square, counter-clockwise.
const SQUARE_ROTATIONS: [[(usize, i32); 2]; 4] = [
    [(0, 1), (1, 1)],   // (x, y)
    [(1, -1), (0, 1)],  // (-y, x)
    [(0, -1), (1, -1)], // (-x, -y)
    [(1, 1), (0, -1)],  // (y, -x)
];

/// A signed axis permutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AxisMap {
    axes: SmallVec<[(usize, i32); 4]>,
}

impl AxisMap {
    fn from_row(row: &[(usize, i32)]) -> Self {
        Self {
            axes: SmallVec::from_slice(row),
        }
    }

    /// This map preceded by a reflection of the x axis.
    fn mirrored(&self) -> Self {
        let axes = self
            .axes
            .iter()
            .map(|&(source, sign)| if source == 0 { (source, -sign) } else { (source, sign) })
            .collect();
        Self { axes }
    }

    /// Number of axes this map acts on.
    pub fn dim(&self) -> usize {
        self.axes.len()
    }

    /// Determinant of the map: `1` for rotations, `-1` for reflections.
    pub fn determinant(&self) -> i32 {
        let mut sign = self.axes.iter().map(|&(_, s)| s).product::<i32>();
        for i in 0..self.axes.len() {
            for j in (i + 1)..self.axes.len() {
                if self.axes[i].0 > self.axes[j].0 {
                    sign = -sign;
                }
            }
        }
        sign
    }

    /// Maps a single coordinate; `None` on a dimension mismatch or overflow.
    pub fn apply_coord(&self, coord: &Coord) -> Option<Coord> {
        if coord.dim() != self.axes.len() {
            return None;
        }
        self.axes
            .iter()
            .map(|&(source, sign)| coord[source].checked_mul(sign))
            .collect()
    }
}

impl Orientation for AxisMap {
    fn apply(&self, coordinates: &[Coord]) -> Option<Vec<Coord>> {
        coordinates
            .iter()
            .map(|coord| self.apply_coord(coord))
            .collect()
    }
}

/// An unbounded rectangular lattice of fixed dimensionality.
///
/// Rotations come first in [`Grid::orientations`]; when mirroring is enabled
/// the mirror image of each rotation follows, in the same order.
#[derive(Clone, Debug)]
pub struct LatticeGrid {
    dim: usize,
    rotation_count: usize,
    orientations: Vec<AxisMap>,
}

impl LatticeGrid {
    /// Three-dimensional cubic lattice with the 24 cube rotations.
    pub fn cubic() -> Self {
        Self::from_rotations(3, CUBE_ROTATIONS.iter().map(|row| AxisMap::from_row(row)))
    }

    /// Two-dimensional square lattice with the 4 square rotations.
    pub fn square() -> Self {
        Self::from_rotations(2, SQUARE_ROTATIONS.iter().map(|row| AxisMap::from_row(row)))
    }

    fn from_rotations(dim: usize, rotations: impl Iterator<Item = AxisMap>) -> Self {
        let orientations: Vec<AxisMap> = rotations.collect();
        Self {
            dim,
            rotation_count: orientations.len(),
            orientations,
        }
    }

    /// Enables or disables mirror-image orientations.
    pub fn with_mirror(mut self, mirror: bool) -> Self {
        self.orientations.truncate(self.rotation_count);
        if mirror {
            let mirrored: Vec<AxisMap> = self.orientations.iter().map(AxisMap::mirrored).collect();
            self.orientations.extend(mirrored);
        }
        self
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn is_mirrored(&self) -> bool {
        self.orientations.len() > self.rotation_count
    }
}

impl Default for LatticeGrid {
    fn default() -> Self {
        Self::cubic()
    }
}

impl Grid for LatticeGrid {
    type Bounds = Coord;
    type Translation = Coord;
    type Orientation = AxisMap;
    type Size = Coord;

    fn orientations(&self) -> &[AxisMap] {
        &self.orientations
    }

    fn translation(&self, from: &Coord, to: &Coord) -> Option<Coord> {
        if from.dim() != self.dim || to.dim() != self.dim {
            return None;
        }
        from.iter()
            .zip(to.iter())
            .map(|(&start, &end)| end.checked_sub(start))
            .collect()
    }

    fn translate(&self, coord: &Coord, translation: &Coord) -> Option<Coord> {
        if coord.dim() != self.dim || translation.dim() != self.dim {
            return None;
        }
        coord
            .iter()
            .zip(translation.iter())
            .map(|(&component, &delta)| component.checked_add(delta))
            .collect()
    }

    /// Enumerates the box `[0, size_i)` with the last axis varying fastest.
    ///
    /// A size of the wrong dimensionality, with a non-positive extent, or
    /// whose cell count does not fit in `usize` describes no cells.
    fn coordinates(&self, size: &Coord) -> Vec<Coord> {
        if size.dim() != self.dim || size.iter().any(|&extent| extent <= 0) {
            return Vec::new();
        }
        let Some(cell_count) = size
            .iter()
            .try_fold(1usize, |count, &extent| count.checked_mul(extent as usize))
        else {
            return Vec::new();
        };

        (0..cell_count)
            .map(|cell_index| {
                let mut remainder = cell_index;
                let mut components: SmallVec<[i32; 4]> = SmallVec::from_elem(0, self.dim);
                for axis in (0..self.dim).rev() {
                    let extent = size[axis] as usize;
                    components[axis] = (remainder % extent) as i32;
                    remainder /= extent;
                }
                components.into_iter().collect()
            })
            .collect()
    }

    fn default_piece_bounds(&self) -> Coord {
        Coord::splat(DEFAULT_PIECE_EXTENT, self.dim)
    }
}
