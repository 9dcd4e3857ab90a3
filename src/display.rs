//! Text rendering of placements.
//!
//! Two- and three-dimensional cells are drawn as z-slices side by side, with
//! rows from top (largest y) to bottom. Occupied cells show as `#`, free
//! region cells as `.`, and cells outside the region as blanks. Other
//! dimensionalities fall back to a plain cell list.

use rustc_hash::FxHashSet;

use crate::coord::Coord;
use crate::region::Region;

/// Lifts a 2D or 3D coordinate to `(x, y, z)`.
fn xyz(coord: &Coord) -> Option<(i32, i32, i32)> {
    match **coord {
        [x, y] => Some((x, y, 0)),
        [x, y, z] => Some((x, y, z)),
        _ => None,
    }
}

/// Renders `occupied` inside `region`.
pub fn render(region: &Region, occupied: &[Coord]) -> String {
    let points: Option<Vec<(i32, i32, i32)>> = region.iter().chain(occupied).map(xyz).collect();
    let points = match points {
        Some(points) if !points.is_empty() => points,
        _ => return format_cell_list(occupied),
    };

    let (min_x, max_x) = extent(points.iter().map(|p| p.0));
    let (min_y, max_y) = extent(points.iter().map(|p| p.1));
    let (min_z, max_z) = extent(points.iter().map(|p| p.2));
    let (Some(width), Some(_), Some(_)) =
        (span(min_x, max_x), span(min_y, max_y), span(min_z, max_z))
    else {
        return format_cell_list(occupied);
    };

    let occupied: FxHashSet<(i32, i32, i32)> = occupied.iter().filter_map(xyz).collect();
    let in_region: FxHashSet<(i32, i32, i32)> = region.iter().filter_map(xyz).collect();

    // header: z=0, z=1, ...
    let header: Vec<String> = (min_z..=max_z)
        .map(|z| format!("{:<width$}", format!("z={z}"), width = width))
        .collect();
    let mut output = header.join("  ").trim_end().to_string();
    output.push('\n');

    for y in (min_y..=max_y).rev() {
        let mut row = String::new();
        for z in min_z..=max_z {
            if z > min_z {
                row.push_str("  ");
            }
            for x in min_x..=max_x {
                let cell = (x, y, z);
                let display_char = if occupied.contains(&cell) {
                    '#'
                } else if in_region.contains(&cell) {
                    '.'
                } else {
                    ' '
                };
                row.push(display_char);
            }
        }
        output.push_str(row.trim_end());
        output.push('\n');
    }

    output
}

/// Number of cells from `low` to `high` inclusive, if it fits in an `i32`.
fn span(low: i32, high: i32) -> Option<usize> {
    let cells = high.checked_sub(low)?.checked_add(1)?;
    usize::try_from(cells).ok()
}

fn extent(values: impl Iterator<Item = i32>) -> (i32, i32) {
    values.fold((i32::MAX, i32::MIN), |(low, high), value| {
        (low.min(value), high.max(value))
    })
}

/// Formats cells as `x,y,z` tuples separated by spaces.
pub fn format_cell_list(cells: &[Coord]) -> String {
    let mut output = cells
        .iter()
        .map(|cell| format!("({cell})"))
        .collect::<Vec<_>>()
        .join(" ");
    output.push('\n');
    output
}
