//! Available-coordinate regions.

use std::slice;

use rustc_hash::FxHashSet;

use crate::coord::Coord;

/// An ordered set of target cells.
///
/// Iteration follows insertion order (the anchor order used by translation
/// enumeration); membership tests are hash lookups.
#[derive(Clone, Debug, Default)]
pub struct Region {
    cells: Vec<Coord>,
    members: FxHashSet<Coord>,
}

impl Region {
    /// Builds a region, keeping the first occurrence of repeated cells.
    pub fn new(cells: impl IntoIterator<Item = Coord>) -> Self {
        let mut region = Self::default();
        for cell in cells {
            region.insert(cell);
        }
        region
    }

    /// Appends a cell; returns `false` if it was already present.
    pub fn insert(&mut self, cell: Coord) -> bool {
        if self.members.insert(cell.clone()) {
            self.cells.push(cell);
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn contains(&self, cell: &Coord) -> bool {
        self.members.contains(cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn iter(&self) -> slice::Iter<'_, Coord> {
        self.cells.iter()
    }
}

impl FromIterator<Coord> for Region {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a Region {
    type Item = &'a Coord;
    type IntoIter = slice::Iter<'a, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_keeps_first_occurrence_order() {
        let region = Region::new([
            Coord::from([1, 0]),
            Coord::from([0, 0]),
            Coord::from([1, 0]),
        ]);
        assert_eq!(region.len(), 2);
        assert_eq!(region.cells(), &[Coord::from([1, 0]), Coord::from([0, 0])]);
        assert!(region.contains(&Coord::from([0, 0])));
        assert!(!region.contains(&Coord::from([0, 1])));
    }
}
