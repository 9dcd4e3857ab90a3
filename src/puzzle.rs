//! The puzzle container.
//!
//! Owns pieces and problems in insertion order, names new entries, and exposes
//! the placement generators as piece-scoped operations. Lookups are linear;
//! puzzles hold tens of entries, not thousands.

use log::debug;

use crate::error::{EntityKind, PuzzleError};
use crate::grid::Grid;
use crate::pieces::{Piece, Problem};
use crate::placement::{self, Orientations, Placements, Translations};
use crate::region::Region;

/// A piece argument: either an id or a piece value.
#[derive(Debug)]
pub enum PieceRef<'p, B> {
    Id(&'p str),
    Piece(&'p Piece<B>),
}

impl<'p, B> From<&'p str> for PieceRef<'p, B> {
    fn from(id: &'p str) -> Self {
        PieceRef::Id(id)
    }
}

impl<'p, B> From<&'p String> for PieceRef<'p, B> {
    fn from(id: &'p String) -> Self {
        PieceRef::Id(id)
    }
}

impl<'p, B> From<&'p Piece<B>> for PieceRef<'p, B> {
    fn from(piece: &'p Piece<B>) -> Self {
        PieceRef::Piece(piece)
    }
}

/// How removal treats an absent target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Removal {
    /// Missing ids and unknown entries are errors.
    #[default]
    Strict,
    /// Missing ids and unknown entries are silently ignored.
    Tolerant,
}

/// Something stored in the container under a string id.
trait Entry {
    const KIND: EntityKind;

    fn key(&self) -> Option<&str>;
}

impl<B> Entry for Piece<B> {
    const KIND: EntityKind = EntityKind::Piece;

    fn key(&self) -> Option<&str> {
        self.id()
    }
}

impl Entry for Problem {
    const KIND: EntityKind = EntityKind::Problem;

    fn key(&self) -> Option<&str> {
        self.id()
    }
}

fn position<E: Entry>(entries: &[E], id: &str) -> Option<usize> {
    entries.iter().position(|entry| entry.key() == Some(id))
}

fn insert<E: Entry>(entries: &mut Vec<E>, entry: E) -> Result<usize, PuzzleError> {
    let Some(id) = entry.key() else {
        return Err(PuzzleError::MissingId {
            kind: E::KIND,
            action: "add",
        });
    };
    if position(entries, id).is_some() {
        return Err(PuzzleError::Duplicate {
            kind: E::KIND,
            id: id.to_string(),
        });
    }
    debug!("added {} `{id}`", E::KIND);
    entries.push(entry);
    Ok(entries.len() - 1)
}

fn rename<E: Entry>(entries: &[E], from: &str, to: &str) -> Result<usize, PuzzleError> {
    let index = position(entries, from).ok_or_else(|| PuzzleError::not_found(E::KIND, from))?;
    if from != to && position(entries, to).is_some() {
        return Err(PuzzleError::Duplicate {
            kind: E::KIND,
            id: to.to_string(),
        });
    }
    debug!("renamed {} `{from}` to `{to}`", E::KIND);
    Ok(index)
}

fn take<E: Entry>(
    entries: &mut Vec<E>,
    id: Option<&str>,
    removal: Removal,
) -> Result<Option<E>, PuzzleError> {
    let strict = removal == Removal::Strict;
    let Some(id) = id else {
        if strict {
            return Err(PuzzleError::MissingId {
                kind: E::KIND,
                action: "remove",
            });
        }
        return Ok(None);
    };
    match position(entries, id) {
        Some(index) => {
            debug!("removed {} `{id}`", E::KIND);
            Ok(Some(entries.remove(index)))
        }
        None if strict => Err(PuzzleError::not_found(E::KIND, id)),
        None => Ok(None),
    }
}

/// `prefix-N` for the smallest N not already taken.
fn next_id<E: Entry>(entries: &[E], prefix: &str) -> String {
    let mut index = 0usize;
    loop {
        let candidate = format!("{prefix}-{index}");
        if position(entries, &candidate).is_none() {
            return candidate;
        }
        index += 1;
    }
}

/// A grid together with the pieces and problems defined on it.
///
/// No internal synchronisation: callers sharing a puzzle across threads must
/// serialize add/remove against concurrent enumeration.
#[derive(Clone, Debug)]
pub struct Puzzle<G: Grid> {
    grid: G,
    pieces: Vec<Piece<G::Bounds>>,
    problems: Vec<Problem>,
}

impl<G: Grid> Puzzle<G> {
    pub fn new(grid: G) -> Self {
        Self {
            grid,
            pieces: Vec::new(),
            problems: Vec::new(),
        }
    }

    pub fn grid(&self) -> &G {
        &self.grid
    }

    /// Pieces in insertion order.
    pub fn pieces(&self) -> &[Piece<G::Bounds>] {
        &self.pieces
    }

    /// Problems in insertion order.
    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn has_piece(&self, id: &str) -> bool {
        position(&self.pieces, id).is_some()
    }

    pub fn piece(&self, id: &str) -> Result<&Piece<G::Bounds>, PuzzleError> {
        position(&self.pieces, id)
            .map(|index| &self.pieces[index])
            .ok_or_else(|| PuzzleError::not_found(EntityKind::Piece, id))
    }

    pub fn piece_mut(&mut self, id: &str) -> Result<&mut Piece<G::Bounds>, PuzzleError> {
        let index = position(&self.pieces, id)
            .ok_or_else(|| PuzzleError::not_found(EntityKind::Piece, id))?;
        Ok(&mut self.pieces[index])
    }

    pub fn add_piece(&mut self, piece: Piece<G::Bounds>) -> Result<&mut Piece<G::Bounds>, PuzzleError> {
        let index = insert(&mut self.pieces, piece)?;
        Ok(&mut self.pieces[index])
    }

    /// Removes a piece, also dropping it from every problem that uses it.
    pub fn remove_piece(
        &mut self,
        id: Option<&str>,
        removal: Removal,
    ) -> Result<Option<Piece<G::Bounds>>, PuzzleError> {
        let removed = take(&mut self.pieces, id, removal)?;
        if let (Some(_), Some(id)) = (&removed, id) {
            for problem in &mut self.problems {
                if problem.forget_piece(id) {
                    debug!(
                        "dropped piece `{id}` from problem `{}`",
                        problem.id().unwrap_or_default()
                    );
                }
            }
        }
        Ok(removed)
    }

    /// Changes a piece's id, following it in every problem that refers to it.
    pub fn rename_piece(&mut self, from: &str, to: &str) -> Result<(), PuzzleError> {
        let index = rename(&self.pieces, from, to)?;
        self.pieces[index].set_id(to.to_string());
        for problem in &mut self.problems {
            problem.rename_piece(from, to);
        }
        Ok(())
    }

    pub fn next_piece_id(&self, prefix: &str) -> String {
        next_id(&self.pieces, prefix)
    }

    /// Adds an empty piece named `piece-N` with the grid's default bounds.
    pub fn create_piece(&mut self) -> &mut Piece<G::Bounds> {
        let id = self.next_piece_id("piece");
        let piece = Piece::new(self.grid.default_piece_bounds(), Vec::new()).with_id(id);
        self.pieces.push(piece);
        let index = self.pieces.len() - 1;
        &mut self.pieces[index]
    }

    pub fn has_problem(&self, id: &str) -> bool {
        position(&self.problems, id).is_some()
    }

    pub fn problem(&self, id: &str) -> Result<&Problem, PuzzleError> {
        position(&self.problems, id)
            .map(|index| &self.problems[index])
            .ok_or_else(|| PuzzleError::not_found(EntityKind::Problem, id))
    }

    pub fn problem_mut(&mut self, id: &str) -> Result<&mut Problem, PuzzleError> {
        let index = position(&self.problems, id)
            .ok_or_else(|| PuzzleError::not_found(EntityKind::Problem, id))?;
        Ok(&mut self.problems[index])
    }

    pub fn add_problem(&mut self, problem: Problem) -> Result<&mut Problem, PuzzleError> {
        let index = insert(&mut self.problems, problem)?;
        Ok(&mut self.problems[index])
    }

    pub fn remove_problem(
        &mut self,
        id: Option<&str>,
        removal: Removal,
    ) -> Result<Option<Problem>, PuzzleError> {
        take(&mut self.problems, id, removal)
    }

    pub fn rename_problem(&mut self, from: &str, to: &str) -> Result<(), PuzzleError> {
        let index = rename(&self.problems, from, to)?;
        self.problems[index].set_id(to.to_string());
        Ok(())
    }

    pub fn next_problem_id(&self, prefix: &str) -> String {
        next_id(&self.problems, prefix)
    }

    /// Adds an empty problem named `problem-N`.
    pub fn create_problem(&mut self) -> &mut Problem {
        let id = self.next_problem_id("problem");
        self.problems.push(Problem::new().with_id(id));
        let index = self.problems.len() - 1;
        &mut self.problems[index]
    }

    /// Resolves a piece argument to the piece whose cells get enumerated.
    ///
    /// An id looks up the stored piece. A piece value is used as given, so an
    /// oriented copy keeps its cells; if it carries an id, that id must still
    /// name a stored piece.
    pub fn resolve_piece<'a>(
        &'a self,
        piece: impl Into<PieceRef<'a, G::Bounds>>,
    ) -> Result<&'a Piece<G::Bounds>, PuzzleError> {
        let piece: PieceRef<'a, G::Bounds> = piece.into();
        match piece {
            PieceRef::Id(id) => self.piece(id),
            PieceRef::Piece(value) => match value.id() {
                Some(id) if !self.has_piece(id) => {
                    Err(PuzzleError::not_found(EntityKind::Piece, id))
                }
                _ => Ok(value),
            },
        }
    }

    /// Every orientation of a piece; see [`placement::orientations`].
    pub fn orientations<'a>(
        &'a self,
        piece: impl Into<PieceRef<'a, G::Bounds>>,
    ) -> Result<Orientations<'a, G>, PuzzleError> {
        let piece = self.resolve_piece(piece)?;
        Ok(placement::orientations(&self.grid, piece))
    }

    /// Every translation of a piece inside `region`; see [`placement::translations`].
    pub fn translations<'a>(
        &'a self,
        piece: impl Into<PieceRef<'a, G::Bounds>>,
        region: &'a Region,
    ) -> Result<Translations<'a, G>, PuzzleError> {
        let piece = self.resolve_piece(piece)?;
        Ok(placement::translations(&self.grid, piece, region))
    }

    /// Every distinct placement of a piece inside `region`; see [`placement::placements`].
    pub fn placements<'a>(
        &'a self,
        piece: impl Into<PieceRef<'a, G::Bounds>>,
        region: &'a Region,
    ) -> Result<Placements<'a, G>, PuzzleError> {
        let piece = self.resolve_piece(piece)?;
        Ok(placement::placements(&self.grid, piece, region))
    }

    /// The region spanned by a grid size.
    pub fn region(&self, size: &G::Size) -> Region {
        Region::new(self.grid.coordinates(size))
    }

    /// The cells of a problem's goal piece.
    pub fn problem_region(&self, id: &str) -> Result<Region, PuzzleError> {
        let problem = self.problem(id)?;
        let goal = problem
            .goal
            .as_deref()
            .ok_or_else(|| PuzzleError::NoGoal(id.to_string()))?;
        let piece = self.piece(goal)?;
        Ok(Region::new(piece.coordinates.iter().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coord;
    use crate::grid::LatticeGrid;

    fn c(x: i32, y: i32, z: i32) -> Coord {
        Coord::from([x, y, z])
    }

    fn domino(id: &str) -> Piece<Coord> {
        Piece::new(c(3, 3, 3), vec![c(0, 0, 0), c(1, 0, 0)]).with_id(id)
    }

    fn ids(puzzle: &Puzzle<LatticeGrid>) -> Vec<&str> {
        puzzle
            .pieces()
            .iter()
            .filter_map(|piece| piece.id())
            .collect()
    }

    #[test]
    fn test_add_remove_readd() {
        let mut puzzle = Puzzle::new(LatticeGrid::cubic());
        puzzle.add_piece(domino("a")).unwrap();
        assert!(puzzle.has_piece("a"));

        let removed = puzzle.remove_piece(Some("a"), Removal::Strict).unwrap();
        assert_eq!(removed.as_ref().and_then(Piece::id), Some("a"));
        assert!(!puzzle.has_piece("a"));

        puzzle.add_piece(domino("a")).unwrap();
        assert!(puzzle.has_piece("a"));
    }

    #[test]
    fn test_add_errors() {
        let mut puzzle = Puzzle::new(LatticeGrid::cubic());
        let anonymous = Piece::new(c(3, 3, 3), vec![c(0, 0, 0)]);
        assert_eq!(
            puzzle.add_piece(anonymous).err(),
            Some(PuzzleError::MissingId {
                kind: EntityKind::Piece,
                action: "add",
            })
        );

        puzzle.add_piece(domino("a")).unwrap();
        assert_eq!(
            puzzle.add_piece(domino("a")).err(),
            Some(PuzzleError::Duplicate {
                kind: EntityKind::Piece,
                id: "a".to_string(),
            })
        );
        assert_eq!(puzzle.pieces().len(), 1);
    }

    #[test]
    fn test_remove_strict_and_tolerant() {
        let mut puzzle = Puzzle::new(LatticeGrid::cubic());
        assert_eq!(
            puzzle.remove_piece(Some("ghost"), Removal::Strict),
            Err(PuzzleError::not_found(EntityKind::Piece, "ghost"))
        );
        assert_eq!(
            puzzle.remove_piece(None, Removal::Strict),
            Err(PuzzleError::MissingId {
                kind: EntityKind::Piece,
                action: "remove",
            })
        );
        assert_eq!(puzzle.remove_piece(Some("ghost"), Removal::Tolerant), Ok(None));
        assert_eq!(puzzle.remove_piece(None, Removal::Tolerant), Ok(None));

        assert_eq!(
            puzzle.remove_problem(Some("ghost"), Removal::Strict),
            Err(PuzzleError::not_found(EntityKind::Problem, "ghost"))
        );
        assert_eq!(puzzle.remove_problem(None, Removal::Tolerant), Ok(None));
    }

    #[test]
    fn test_insertion_order_survives_removal() {
        let mut puzzle = Puzzle::new(LatticeGrid::cubic());
        for id in ["c", "a", "b"] {
            puzzle.add_piece(domino(id)).unwrap();
        }
        puzzle.remove_piece(Some("a"), Removal::Strict).unwrap();
        puzzle.add_piece(domino("a")).unwrap();
        assert_eq!(ids(&puzzle), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_next_id_uses_first_gap() {
        let mut puzzle = Puzzle::new(LatticeGrid::cubic());
        assert_eq!(puzzle.next_piece_id("piece"), "piece-0");

        puzzle.add_piece(domino("piece-0")).unwrap();
        puzzle.add_piece(domino("piece-2")).unwrap();
        assert_eq!(puzzle.next_piece_id("piece"), "piece-1");
        assert_eq!(puzzle.next_piece_id("shape"), "shape-0");

        let created = puzzle.create_piece();
        assert_eq!(created.id(), Some("piece-1"));
        assert_eq!(created.bounds, c(3, 3, 3));
        assert!(created.is_empty());
        assert_eq!(puzzle.next_piece_id("piece"), "piece-3");

        assert_eq!(puzzle.create_problem().id(), Some("problem-0"));
        assert_eq!(puzzle.next_problem_id("problem"), "problem-1");
    }

    #[test]
    fn test_resolve_piece() {
        let mut puzzle = Puzzle::new(LatticeGrid::cubic());
        puzzle.add_piece(domino("a")).unwrap();

        assert_eq!(puzzle.resolve_piece("a").unwrap().id(), Some("a"));

        // a value with a known id keeps its own cells
        let moved = Piece::new(c(3, 3, 3), vec![c(5, 5, 5)]).with_id("a");
        let resolved = puzzle.resolve_piece(&moved).unwrap();
        assert!(std::ptr::eq(resolved, &moved));
        assert_eq!(resolved.coordinates, vec![c(5, 5, 5)]);

        let unknown = domino("b");
        assert_eq!(
            puzzle.resolve_piece(&unknown).err(),
            Some(PuzzleError::not_found(EntityKind::Piece, "b"))
        );

        let transient = Piece::new(c(3, 3, 3), vec![c(0, 0, 0)]);
        assert!(std::ptr::eq(puzzle.resolve_piece(&transient).unwrap(), &transient));
    }

    #[test]
    fn test_enumeration_through_container() {
        let mut puzzle = Puzzle::new(LatticeGrid::cubic());
        puzzle.add_piece(domino("domino")).unwrap();
        let region = puzzle.region(&c(3, 2, 2));

        assert_eq!(puzzle.orientations("domino").unwrap().count(), 24);
        assert_eq!(puzzle.translations("domino", &region).unwrap().count(), 8);
        assert_eq!(puzzle.placements("domino", &region).unwrap().count(), 20);

        assert_eq!(
            puzzle.placements("missing", &region).err(),
            Some(PuzzleError::not_found(EntityKind::Piece, "missing"))
        );
    }

    #[test]
    fn test_oriented_value_keeps_its_cells() {
        let mut puzzle = Puzzle::new(LatticeGrid::cubic());
        puzzle.add_piece(domino("domino")).unwrap();
        let region = puzzle.region(&c(3, 2, 2));

        let standing = puzzle
            .orientations("domino")
            .unwrap()
            .map(|record| record.transformed)
            .find(|piece| piece.coordinates == vec![c(0, 0, 0), c(0, 0, -1)])
            .unwrap();
        assert_eq!(standing.id(), Some("domino"));

        let direct = placement::translations(puzzle.grid(), &standing, &region).count();
        assert_eq!(direct, 6);
        assert_eq!(puzzle.translations(&standing, &region).unwrap().count(), direct);

        puzzle.remove_piece(Some("domino"), Removal::Strict).unwrap();
        assert_eq!(
            puzzle.translations(&standing, &region).err(),
            Some(PuzzleError::not_found(EntityKind::Piece, "domino"))
        );
    }

    #[test]
    fn test_rename_piece() {
        let mut puzzle = Puzzle::new(LatticeGrid::cubic());
        puzzle.add_piece(domino("a")).unwrap();
        puzzle.add_piece(domino("b")).unwrap();
        let problem = puzzle
            .add_problem(Problem::new().with_id("p").with_goal("a"))
            .unwrap();
        problem.set_usage("a", 2);

        assert!(matches!(
            puzzle.rename_piece("a", "b"),
            Err(PuzzleError::Duplicate { .. })
        ));
        assert_eq!(ids(&puzzle), vec!["a", "b"]);

        puzzle.rename_piece("a", "c").unwrap();
        assert!(!puzzle.has_piece("a"));
        assert_eq!(ids(&puzzle), vec!["c", "b"]);
        let problem = puzzle.problem("p").unwrap();
        assert_eq!(problem.usage("c"), 2);
        assert_eq!(problem.usage("a"), 0);
        assert_eq!(problem.goal.as_deref(), Some("c"));

        assert_eq!(
            puzzle.rename_piece("a", "d").err(),
            Some(PuzzleError::not_found(EntityKind::Piece, "a"))
        );
    }

    #[test]
    fn test_rename_problem() {
        let mut puzzle = Puzzle::new(LatticeGrid::cubic());
        puzzle.add_problem(Problem::new().with_id("p")).unwrap();
        puzzle.add_problem(Problem::new().with_id("q")).unwrap();

        assert!(matches!(
            puzzle.rename_problem("p", "q"),
            Err(PuzzleError::Duplicate { .. })
        ));
        puzzle.rename_problem("p", "r").unwrap();
        assert!(puzzle.has_problem("r"));
        assert!(!puzzle.has_problem("p"));
    }

    #[test]
    fn test_removing_piece_updates_problems() {
        let mut puzzle = Puzzle::new(LatticeGrid::cubic());
        puzzle.add_piece(domino("domino")).unwrap();
        puzzle
            .add_piece(Piece::new(c(3, 3, 3), vec![c(0, 0, 0), c(0, 1, 0)]).with_id("goal"))
            .unwrap();

        let problem = puzzle
            .add_problem(Problem::new().with_id("p").with_goal("goal"))
            .unwrap();
        problem.set_usage("domino", 1);

        let region = puzzle.problem_region("p").unwrap();
        assert_eq!(region.cells(), &[c(0, 0, 0), c(0, 1, 0)]);
        assert_eq!(puzzle.placements("domino", &region).unwrap().count(), 1);

        puzzle.remove_piece(Some("domino"), Removal::Strict).unwrap();
        puzzle.remove_piece(Some("goal"), Removal::Strict).unwrap();
        let problem = puzzle.problem("p").unwrap();
        assert_eq!(problem.usage("domino"), 0);
        assert_eq!(problem.goal, None);
        assert_eq!(
            puzzle.problem_region("p").err(),
            Some(PuzzleError::NoGoal("p".to_string()))
        );
    }

    #[test]
    fn test_problem_crud_errors() {
        let mut puzzle = Puzzle::new(LatticeGrid::cubic());
        assert_eq!(
            puzzle.add_problem(Problem::new()).err(),
            Some(PuzzleError::MissingId {
                kind: EntityKind::Problem,
                action: "add",
            })
        );
        puzzle.add_problem(Problem::new().with_id("p")).unwrap();
        assert!(puzzle.has_problem("p"));
        assert!(matches!(
            puzzle.add_problem(Problem::new().with_id("p")),
            Err(PuzzleError::Duplicate { .. })
        ));
        assert_eq!(
            puzzle.problem_region("q").err(),
            Some(PuzzleError::not_found(EntityKind::Problem, "q"))
        );
    }
}
