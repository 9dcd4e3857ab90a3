//! Built-in sample puzzles on the cubic lattice.
//!
//! Each entry lists its pieces (coordinates normalized so the minimum is at
//! the origin) and the size of the cube they fill. [`build`] turns an entry
//! into a [`Puzzle`] with one goal piece and one problem using every piece
//! once.

use crate::coord::Coord;
use crate::error::PuzzleError;
use crate::grid::{Grid, LatticeGrid};
use crate::pieces::{Piece, Problem};
use crate::puzzle::Puzzle;

/// Id of the goal piece added by [`build`].
pub const GOAL_PIECE_ID: &str = "goal";

pub struct CatalogEntry {
    pub slug: &'static str,
    pub title: &'static str,
    pub size: [i32; 3],
    pub pieces: &'static [(&'static str, &'static [[i32; 3]])],
}

/// The seven Soma cube pieces that must fit into a 3x3x3 cube.
pub const SOMA: CatalogEntry = CatalogEntry {
    slug: "soma",
    title: "Soma cube",
    size: [3, 3, 3],
    pieces: &[
        ("l", &[[0, 0, 0], [1, 0, 0], [2, 0, 0], [0, 1, 0]]),
        ("t", &[[0, 0, 0], [1, 0, 0], [2, 0, 0], [1, 1, 0]]),
        ("z", &[[0, 0, 0], [1, 0, 0], [1, 1, 0], [2, 1, 0]]),
        ("v", &[[0, 0, 0], [1, 0, 0], [0, 1, 0]]),
        ("a", &[[0, 0, 0], [1, 0, 0], [0, 1, 0], [1, 0, 1]]),
        ("b", &[[0, 0, 0], [1, 0, 0], [0, 1, 0], [0, 0, 1]]),
        ("p", &[[0, 0, 0], [1, 0, 0], [0, 1, 0], [0, 1, 1]]),
    ],
};

/// The thirteen Bedlam cube pieces that must fit into a 4x4x4 cube.
pub const BEDLAM: CatalogEntry = CatalogEntry {
    slug: "bedlam",
    title: "Bedlam cube",
    size: [4, 4, 4],
    pieces: &[
        ("little-corner", &[[0, 0, 0], [0, 1, 0], [1, 0, 0], [0, 0, 1]]),
        ("long-stick", &[[0, 0, 0], [1, 0, 0], [2, 0, 0], [3, 0, 0], [3, 1, 0]]),
        ("hat", &[[0, 0, 0], [0, 1, 0], [1, 1, 0], [1, 2, 0], [2, 2, 0]]),
        ("bucket", &[[0, 0, 0], [0, 1, 0], [1, 1, 0], [1, 2, 0], [1, 1, 1]]),
        ("screw", &[[0, 0, 0], [1, 0, 0], [1, 0, 1], [1, 1, 1], [2, 1, 1]]),
        ("twist", &[[0, 0, 0], [1, 0, 0], [1, 1, 0], [1, 1, 1], [2, 1, 1]]),
        ("signpost", &[[0, 0, 0], [1, 0, 0], [2, 0, 0], [1, 1, 0], [1, 0, 1]]),
        ("ducktail", &[[0, 0, 0], [1, 0, 0], [1, 1, 0], [2, 1, 0], [1, 0, 1]]),
        ("plane", &[[0, 0, 0], [0, 1, 0], [1, 1, 0], [2, 1, 0], [1, 2, 0]]),
        ("bridge", &[[0, 0, 0], [1, 0, 0], [2, 0, 0], [0, 1, 0], [2, 1, 0]]),
        ("staircase", &[[0, 0, 0], [1, 0, 0], [1, 1, 0], [2, 1, 0], [2, 2, 0]]),
        ("spikey-zag", &[[0, 0, 1], [0, 1, 0], [0, 1, 1], [1, 1, 0], [1, 2, 0]]),
        ("middle-zig", &[[0, 0, 0], [0, 1, 0], [0, 1, 1], [1, 1, 0], [1, 2, 0]]),
    ],
};

pub const CATALOG: &[CatalogEntry] = &[SOMA, BEDLAM];

pub fn by_slug(slug: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|entry| entry.slug == slug)
}

impl CatalogEntry {
    /// Total cell count of all pieces.
    pub fn cell_count(&self) -> usize {
        self.pieces.iter().map(|(_, cells)| cells.len()).sum()
    }
}

/// Builds the puzzle described by `entry` on the given grid.
pub fn build(entry: &CatalogEntry, grid: LatticeGrid) -> Result<Puzzle<LatticeGrid>, PuzzleError> {
    let mut puzzle = Puzzle::new(grid);
    let bounds = puzzle.grid().default_piece_bounds();

    for (id, cells) in entry.pieces {
        let coordinates = cells.iter().map(|&cell| Coord::from(cell)).collect();
        puzzle.add_piece(Piece::new(bounds.clone(), coordinates).with_id(*id))?;
    }

    let size = Coord::from(entry.size);
    let goal_cells = puzzle.grid().coordinates(&size);
    puzzle.add_piece(
        Piece::new(size, goal_cells)
            .with_id(GOAL_PIECE_ID)
            .with_label(entry.title),
    )?;

    let problem = puzzle.add_problem(
        Problem::new()
            .with_id(entry.slug)
            .with_label(entry.title)
            .with_goal(GOAL_PIECE_ID),
    )?;
    for (id, _) in entry.pieces {
        problem.set_usage(id, 1);
    }

    Ok(puzzle)
}
