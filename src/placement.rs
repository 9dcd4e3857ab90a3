//! Placement enumeration.
//!
//! Three lazy generators, each built on the previous one:
//! - [`orientations`]: every grid symmetry applied to a piece's shape
//! - [`translations`]: every anchor-aligned shift that keeps the shape inside a region
//! - [`placements`]: orientation-major product of the two, deduplicated by occupied cells
//!
//! All of them borrow their inputs immutably and allocate fresh pieces for
//! every record, so a consumer can stop pulling at any point without cost.

use std::slice;

use log::trace;
use rustc_hash::FxHashSet;

use crate::coord::Coord;
use crate::grid::{Grid, Orientation};
use crate::pieces::Piece;
use crate::region::Region;

/// The outcome of transforming a piece.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementRecord<B, T> {
    /// The piece as requested by the caller.
    pub original: Piece<B>,
    /// A fresh copy holding the transformed cells.
    pub transformed: Piece<B>,
    /// `None` for orientation-only records.
    pub translation: Option<T>,
}

/// Placement record for a particular grid.
pub type Placement<G> = PlacementRecord<<G as Grid>::Bounds, <G as Grid>::Translation>;

impl<B, T> PlacementRecord<B, T> {
    /// The occupied cells, in the original piece's cell order.
    pub fn cells(&self) -> &[Coord] {
        &self.transformed.coordinates
    }

    pub fn key(&self) -> PlacementKey {
        PlacementKey::new(self.cells())
    }
}

/// Order-independent identity of an occupied-cell set.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlacementKey(Vec<Coord>);

impl PlacementKey {
    pub fn new(cells: &[Coord]) -> Self {
        let mut sorted = cells.to_vec();
        sorted.sort_unstable();
        Self(sorted)
    }

    pub fn cells(&self) -> &[Coord] {
        &self.0
    }
}

/// Enumerates every orientation of `piece` supported by `grid`.
pub fn orientations<'a, G: Grid>(grid: &'a G, piece: &'a Piece<G::Bounds>) -> Orientations<'a, G> {
    Orientations {
        piece,
        transforms: grid.orientations().iter(),
    }
}

/// Enumerates every translation of `piece` that fits entirely inside `region`.
pub fn translations<'a, G: Grid>(
    grid: &'a G,
    piece: &'a Piece<G::Bounds>,
    region: &'a Region,
) -> Translations<'a, G> {
    Translations::new(grid, piece, piece.clone(), region)
}

/// Enumerates every distinct oriented and translated placement of `piece`
/// inside `region`.
pub fn placements<'a, G: Grid>(
    grid: &'a G,
    piece: &'a Piece<G::Bounds>,
    region: &'a Region,
) -> Placements<'a, G> {
    Placements {
        grid,
        original: piece,
        region,
        orientations: orientations(grid, piece),
        current: None,
        seen: FxHashSet::default(),
    }
}

/// Iterator returned by [`orientations`].
pub struct Orientations<'a, G: Grid> {
    piece: &'a Piece<G::Bounds>,
    transforms: slice::Iter<'a, G::Orientation>,
}

impl<'a, G: Grid> Iterator for Orientations<'a, G> {
    type Item = Placement<G>;

    fn next(&mut self) -> Option<Self::Item> {
        for transform in self.transforms.by_ref() {
            let Some(coordinates) = transform.apply(&self.piece.coordinates) else {
                // not defined for this piece; skip silently
                continue;
            };
            if coordinates.len() != self.piece.len() {
                continue;
            }
            return Some(PlacementRecord {
                original: self.piece.clone(),
                transformed: self.piece.with_coordinates(coordinates),
                translation: None,
            });
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.transforms.len()))
    }
}

/// Iterator returned by [`translations`].
///
/// `shape` is the (possibly oriented) piece being moved; records report
/// `original` as the untransformed piece.
pub struct Translations<'a, G: Grid> {
    grid: &'a G,
    original: &'a Piece<G::Bounds>,
    shape: Piece<G::Bounds>,
    region: &'a Region,
    targets: slice::Iter<'a, Coord>,
}

impl<'a, G: Grid> Translations<'a, G> {
    fn new(
        grid: &'a G,
        original: &'a Piece<G::Bounds>,
        shape: Piece<G::Bounds>,
        region: &'a Region,
    ) -> Self {
        Self {
            grid,
            original,
            shape,
            region,
            targets: region.iter(),
        }
    }

    /// Moves the shape's anchor onto `target`, keeping the result only if
    /// every cell lands inside the region.
    fn place_at(&self, target: &Coord) -> Option<Placement<G>> {
        let anchor = self.shape.anchor()?;
        let translation = self.grid.translation(anchor, target)?;

        let mut cells = Vec::with_capacity(self.shape.len());
        for coord in &self.shape.coordinates {
            match self.grid.translate(coord, &translation) {
                Some(moved) if self.region.contains(&moved) => cells.push(moved),
                // off-grid or outside the region: no need to look further
                _ => break,
            }
        }

        // the cell count, not the early exit, decides validity
        if cells.len() != self.shape.len() {
            return None;
        }

        Some(PlacementRecord {
            original: self.original.clone(),
            transformed: self.shape.with_coordinates(cells),
            translation: Some(translation),
        })
    }
}

impl<'a, G: Grid> Iterator for Translations<'a, G> {
    type Item = Placement<G>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.shape.is_empty() {
            return None;
        }
        while let Some(target) = self.targets.next() {
            if let Some(placement) = self.place_at(target) {
                return Some(placement);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.targets.len()))
    }
}

/// Iterator returned by [`placements`].
///
/// The set of keys already yielded lives for one enumeration only.
pub struct Placements<'a, G: Grid> {
    grid: &'a G,
    original: &'a Piece<G::Bounds>,
    region: &'a Region,
    orientations: Orientations<'a, G>,
    current: Option<Translations<'a, G>>,
    seen: FxHashSet<PlacementKey>,
}

impl<'a, G: Grid> Placements<'a, G> {
    /// Number of distinct placements yielded so far.
    pub fn yielded(&self) -> usize {
        self.seen.len()
    }
}

impl<'a, G: Grid> Iterator for Placements<'a, G> {
    type Item = Placement<G>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(translations) = self.current.as_mut() {
                for placement in translations.by_ref() {
                    if self.seen.insert(placement.key()) {
                        return Some(placement);
                    }
                }
            }

            let oriented = self.orientations.next()?;
            trace!(
                "enumerating translations for orientation {:?}",
                oriented.transformed.coordinates
            );
            self.current = Some(Translations::new(
                self.grid,
                self.original,
                oriented.transformed,
                self.region,
            ));
        }
    }
}
