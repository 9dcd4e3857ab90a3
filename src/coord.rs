//! Grid coordinates.
//!
//! A coordinate is an ordered tuple of integers. Its length is decided by the
//! grid that owns it, so nothing here assumes two or three axes.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::ParseCoordError;

/// Component storage; grids of up to four axes stay inline.
type Components = SmallVec<[i32; 4]>;

/// A cell position, compared and hashed by value.
///
/// Ordering is lexicographic over the components, which gives placement keys
/// a total order independent of how a piece lists its cells.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coord(Components);

impl Coord {
    pub fn new(components: &[i32]) -> Self {
        Self(SmallVec::from_slice(components))
    }

    /// A coordinate with `dim` components all equal to `value`.
    pub fn splat(value: i32, dim: usize) -> Self {
        Self(SmallVec::from_elem(value, dim))
    }

    /// Number of axes.
    #[inline]
    pub fn dim(&self) -> usize {
        self.0.len()
    }
}

impl Deref for Coord {
    type Target = [i32];

    #[inline]
    fn deref(&self) -> &[i32] {
        &self.0
    }
}

impl<const N: usize> From<[i32; N]> for Coord {
    fn from(components: [i32; N]) -> Self {
        Self::new(&components)
    }
}

impl FromIterator<i32> for Coord {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{component}")?;
        }
        Ok(())
    }
}

impl FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParseCoordError::Empty);
        }

        trimmed
            .split(',')
            .map(|component| {
                component
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| ParseCoordError::Component {
                        input: trimmed.to_string(),
                        component: component.trim().to_string(),
                    })
            })
            .collect()
    }
}

/// Parses a `;`-separated cell list such as `0,0,0; 1,0,0`.
///
/// Empty segments (a trailing `;`) are ignored.
pub fn parse_cells(input: &str) -> Result<Vec<Coord>, ParseCoordError> {
    input
        .split(';')
        .filter(|segment| !segment.trim().is_empty())
        .map(str::parse)
        .collect()
}
