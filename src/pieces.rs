//! Pieces and problems.
//!
//! A piece is an ordered list of grid cells plus display metadata. The first
//! cell is the anchor used when computing translations, so cell order is part
//! of a piece's meaning and is preserved by every transform.

use serde::{Deserialize, Serialize};

use crate::coord::Coord;

/// A placeable puzzle unit.
///
/// `B` is the grid's bounds type. A piece without an `id` is transient: it can
/// be enumerated but not stored in a [`crate::puzzle::Puzzle`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Piece<B> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    pub bounds: B,
    pub coordinates: Vec<Coord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl<B> Piece<B> {
    /// Creates a transient piece.
    pub fn new(bounds: B, coordinates: Vec<Coord>) -> Self {
        Self {
            id: None,
            bounds,
            coordinates,
            label: None,
            color: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Identity within a puzzle; only the container may change it.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub(crate) fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    /// Display name: the label, falling back to the id.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref().or(self.id.as_deref())
    }

    /// The cell translations are computed from.
    pub fn anchor(&self) -> Option<&Coord> {
        self.coordinates.first()
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}

impl<B: Clone> Piece<B> {
    /// A deep copy carrying the same identity and metadata but new cells.
    pub fn with_coordinates(&self, coordinates: Vec<Coord>) -> Self {
        Self {
            id: self.id.clone(),
            bounds: self.bounds.clone(),
            coordinates,
            label: self.label.clone(),
            color: self.color.clone(),
        }
    }
}

/// How many copies of one piece a problem uses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceUsage {
    pub piece: String,
    pub count: u32,
}

/// A named sub-puzzle: fill the goal piece's cells using the listed pieces.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Id of the piece whose cells form the target region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(default)]
    pub used_pieces: Vec<PieceUsage>,
}

impl Problem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_goal(mut self, piece: impl Into<String>) -> Self {
        self.goal = Some(piece.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub(crate) fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref().or(self.id.as_deref())
    }

    /// How many copies of `piece` this problem uses (0 if none).
    pub fn usage(&self, piece: &str) -> u32 {
        self.used_pieces
            .iter()
            .find(|usage| usage.piece == piece)
            .map_or(0, |usage| usage.count)
    }

    /// Sets the usage count for `piece`; a count of zero removes the entry.
    pub fn set_usage(&mut self, piece: &str, count: u32) {
        match self.used_pieces.iter().position(|usage| usage.piece == piece) {
            Some(index) if count == 0 => {
                self.used_pieces.remove(index);
            }
            Some(index) => self.used_pieces[index].count = count,
            None if count == 0 => {}
            None => self.used_pieces.push(PieceUsage {
                piece: piece.to_string(),
                count,
            }),
        }
    }

    /// Total number of pieces placed when this problem is solved.
    pub fn total_pieces(&self) -> u32 {
        self.used_pieces.iter().map(|usage| usage.count).sum()
    }

    /// Points every reference to piece `from` at `to` instead.
    pub(crate) fn rename_piece(&mut self, from: &str, to: &str) {
        for usage in &mut self.used_pieces {
            if usage.piece == from {
                usage.piece = to.to_string();
            }
        }
        if self.goal.as_deref() == Some(from) {
            self.goal = Some(to.to_string());
        }
    }

    /// Drops every reference to `piece`, returning whether any existed.
    pub(crate) fn forget_piece(&mut self, piece: &str) -> bool {
        let before = self.used_pieces.len();
        self.used_pieces.retain(|usage| usage.piece != piece);
        let mut changed = self.used_pieces.len() != before;
        if self.goal.as_deref() == Some(piece) {
            self.goal = None;
            changed = true;
        }
        changed
    }
}
