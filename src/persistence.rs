//! Saving and loading puzzles as JSON.
//!
//! Document layout:
//! ```json
//! { "pieces": [ { "id": "l", "bounds": [3,3,3], "coordinates": [[0,0,0], ...] } ],
//!   "problems": [ { "id": "soma", "goal": "goal", "used_pieces": [ { "piece": "l", "count": 1 } ] } ] }
//! ```
//! The grid itself is not stored; the caller supplies it on load.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::PuzzleError;
use crate::grid::Grid;
use crate::pieces::{Piece, Problem};
use crate::puzzle::Puzzle;

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid puzzle document: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
}

#[derive(Serialize)]
struct DocumentRef<'a, B> {
    pieces: &'a [Piece<B>],
    problems: &'a [Problem],
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "B: Deserialize<'de>"))]
struct Document<B> {
    #[serde(default)]
    pieces: Vec<Piece<B>>,
    #[serde(default)]
    problems: Vec<Problem>,
}

fn document<G: Grid>(puzzle: &Puzzle<G>) -> DocumentRef<'_, G::Bounds> {
    DocumentRef {
        pieces: puzzle.pieces(),
        problems: puzzle.problems(),
    }
}

/// Serializes a puzzle's pieces and problems as pretty-printed JSON.
pub fn to_json<G>(puzzle: &Puzzle<G>) -> Result<String, PersistenceError>
where
    G: Grid,
    G::Bounds: Serialize,
{
    Ok(serde_json::to_string_pretty(&document(puzzle))?)
}

/// Rebuilds a puzzle on `grid` from JSON.
///
/// Entries go through the container's add operations, so a document with
/// duplicate or missing ids is rejected.
pub fn from_json<G>(json: &str, grid: G) -> Result<Puzzle<G>, PersistenceError>
where
    G: Grid,
    G::Bounds: DeserializeOwned,
{
    let document: Document<G::Bounds> = serde_json::from_str(json)?;
    into_puzzle(document, grid)
}

fn into_puzzle<G: Grid>(document: Document<G::Bounds>, grid: G) -> Result<Puzzle<G>, PersistenceError> {
    let mut puzzle = Puzzle::new(grid);
    for piece in document.pieces {
        puzzle.add_piece(piece)?;
    }
    for problem in document.problems {
        puzzle.add_problem(problem)?;
    }
    Ok(puzzle)
}

/// Writes a puzzle to `path`.
pub fn save<G>(puzzle: &Puzzle<G>, path: impl AsRef<Path>) -> Result<(), PersistenceError>
where
    G: Grid,
    G::Bounds: Serialize,
{
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &document(puzzle))?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    debug!(
        "saved {} pieces and {} problems to {}",
        puzzle.pieces().len(),
        puzzle.problems().len(),
        path.display()
    );
    Ok(())
}

/// Reads a puzzle from `path` onto `grid`.
pub fn load<G>(path: impl AsRef<Path>, grid: G) -> Result<Puzzle<G>, PersistenceError>
where
    G: Grid,
    G::Bounds: DeserializeOwned,
{
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let document: Document<G::Bounds> = serde_json::from_reader(reader)?;
    let puzzle = into_puzzle(document, grid)?;

    debug!(
        "loaded {} pieces and {} problems from {}",
        puzzle.pieces().len(),
        puzzle.problems().len(),
        path.display()
    );
    Ok(puzzle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, SOMA};
    use crate::coord::Coord;
    use crate::error::EntityKind;
    use crate::grid::LatticeGrid;

    #[test]
    fn test_save_and_load_file() {
        let puzzle = catalog::build(&SOMA, LatticeGrid::cubic()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("soma.json");

        save(&puzzle, &path).unwrap();
        let loaded = load(&path, LatticeGrid::cubic()).unwrap();

        assert_eq!(loaded.pieces(), puzzle.pieces());
        assert_eq!(loaded.problems(), puzzle.problems());
    }

    #[test]
    fn test_document_shape() {
        let mut puzzle = Puzzle::new(LatticeGrid::square());
        puzzle
            .add_piece(
                Piece::new(Coord::from([3, 3]), vec![Coord::from([0, 0]), Coord::from([1, 0])])
                    .with_id("domino")
                    .with_color("red"),
            )
            .unwrap();

        let json = to_json(&puzzle).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "pieces": [{
                    "id": "domino",
                    "bounds": [3, 3],
                    "coordinates": [[0, 0], [1, 0]],
                    "color": "red"
                }],
                "problems": []
            })
        );
    }

    #[test]
    fn test_load_rejects_duplicate_ids() {
        let json = r#"{
            "pieces": [
                { "id": "a", "bounds": [3, 3, 3], "coordinates": [[0, 0, 0]] },
                { "id": "a", "bounds": [3, 3, 3], "coordinates": [[1, 0, 0]] }
            ]
        }"#;
        let error = from_json(json, LatticeGrid::cubic()).unwrap_err();
        assert!(matches!(
            error,
            PersistenceError::Puzzle(PuzzleError::Duplicate {
                kind: EntityKind::Piece,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let puzzle = from_json("{}", LatticeGrid::cubic()).unwrap();
        assert!(puzzle.pieces().is_empty());
        assert!(puzzle.problems().is_empty());

        let json = r#"{ "problems": [ { "id": "p", "used_pieces": [] } ] }"#;
        let puzzle = from_json(json, LatticeGrid::cubic()).unwrap();
        assert!(puzzle.pieces().is_empty());
        assert!(puzzle.has_problem("p"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let error = load(dir.path().join("absent.json"), LatticeGrid::cubic()).unwrap_err();
        assert!(matches!(error, PersistenceError::Io(_)));
    }
}
