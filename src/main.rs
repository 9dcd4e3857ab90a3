//! Polycube Placement Explorer
//!
//! Lists the orientations, translations and distinct placements of a piece
//! inside a box-shaped region or a stored puzzle problem.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use log::info;

use polycube::coord::parse_cells;
use polycube::{catalog, display, persistence, Coord, Grid, LatticeGrid, Piece, Placement, Region};

/// Enumerates placements of polycube pieces.
#[derive(Parser)]
#[command(name = "polycube")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct GridArgs {
    /// Use the square lattice instead of the cubic one.
    #[arg(long)]
    square: bool,
    /// Include mirror-image orientations.
    #[arg(long)]
    mirror: bool,
}

impl GridArgs {
    fn grid(&self) -> LatticeGrid {
        let grid = if self.square {
            LatticeGrid::square()
        } else {
            LatticeGrid::cubic()
        };
        grid.with_mirror(self.mirror)
    }
}

#[derive(Args)]
struct OutputArgs {
    /// Stop after this many results.
    #[arg(long)]
    limit: Option<usize>,
    /// Print only the number of results.
    #[arg(long)]
    count: bool,
    /// Draw each result inside its region.
    #[arg(long)]
    render: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List every orientation of a piece.
    Orientations {
        /// Piece cells, e.g. "0,0,0;1,0,0;0,1,0".
        #[arg(long)]
        cells: String,
        #[command(flatten)]
        grid: GridArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List every translation of a piece inside a box.
    Translations {
        #[arg(long)]
        cells: String,
        /// Box size, e.g. "3,2,2".
        #[arg(long)]
        region: String,
        #[command(flatten)]
        grid: GridArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List every distinct placement of a piece inside a box.
    Placements {
        #[arg(long)]
        cells: String,
        #[arg(long)]
        region: String,
        #[command(flatten)]
        grid: GridArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List placements of a piece stored in a puzzle file.
    Puzzle {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        piece: String,
        /// Use this problem's goal piece as the region.
        #[arg(long, conflicts_with = "region", required_unless_present = "region")]
        problem: Option<String>,
        /// Box size to use as the region.
        #[arg(long)]
        region: Option<String>,
        #[command(flatten)]
        grid: GridArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Write a built-in sample puzzle to a file.
    Init {
        #[arg(long)]
        file: PathBuf,
        /// Sample to write (soma or bedlam).
        #[arg(long, default_value = "soma")]
        sample: String,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Orientations {
            cells,
            grid,
            output,
        } => {
            let grid = grid.grid();
            let piece = transient_piece(&grid, &cells)?;
            let records = polycube::orientations(&grid, &piece);
            print_records(records, None, &output);
        }
        Command::Translations {
            cells,
            region,
            grid,
            output,
        } => {
            let grid = grid.grid();
            let piece = transient_piece(&grid, &cells)?;
            let region = box_region(&grid, &region)?;
            let records = polycube::translations(&grid, &piece, &region);
            print_records(records, Some(&region), &output);
        }
        Command::Placements {
            cells,
            region,
            grid,
            output,
        } => {
            let grid = grid.grid();
            let piece = transient_piece(&grid, &cells)?;
            let region = box_region(&grid, &region)?;
            let records = polycube::placements(&grid, &piece, &region);
            print_records(records, Some(&region), &output);
        }
        Command::Puzzle {
            file,
            piece,
            problem,
            region,
            grid,
            output,
        } => {
            let puzzle = persistence::load(&file, grid.grid())?;
            let region = match (problem, region) {
                (Some(problem), _) => puzzle.problem_region(&problem)?,
                (None, Some(size)) => box_region(puzzle.grid(), &size)?,
                (None, None) => return Err("either --problem or --region is required".into()),
            };
            let records = puzzle.placements(piece.as_str(), &region)?;
            print_records(records, Some(&region), &output);
        }
        Command::Init { file, sample } => {
            let entry = catalog::by_slug(&sample)
                .ok_or_else(|| format!("unknown sample `{}`", sample))?;
            let puzzle = catalog::build(entry, LatticeGrid::cubic())?;
            persistence::save(&puzzle, &file)?;
            println!("Wrote {} to {}", entry.title, file.display());
        }
    }
    Ok(())
}

fn transient_piece(grid: &LatticeGrid, cells: &str) -> Result<Piece<Coord>, Box<dyn Error>> {
    let coordinates = parse_cells(cells)?;
    if coordinates.is_empty() {
        return Err("piece has no cells".into());
    }
    Ok(Piece::new(grid.default_piece_bounds(), coordinates))
}

fn box_region(grid: &LatticeGrid, size: &str) -> Result<Region, Box<dyn Error>> {
    let size: Coord = size.parse()?;
    let region = Region::new(grid.coordinates(&size));
    if region.is_empty() {
        return Err(format!(
            "region size `{}` describes no cells on a {}-dimensional grid",
            size,
            grid.dim()
        )
        .into());
    }
    Ok(region)
}

/// Prints records one per line, or just their count.
fn print_records(
    records: impl Iterator<Item = Placement<LatticeGrid>>,
    region: Option<&Region>,
    output: &OutputArgs,
) {
    let records = records.take(output.limit.unwrap_or(usize::MAX));

    if output.count {
        println!("{}", records.count());
        return;
    }

    let mut total = 0;
    for (index, record) in records.enumerate() {
        let translation = record
            .translation
            .as_ref()
            .map(|t| format!(" +({})", t))
            .unwrap_or_default();
        print!("{}{}: {}", index + 1, translation, display::format_cell_list(record.cells()));

        if output.render {
            let own_cells;
            let region = match region {
                Some(region) => region,
                None => {
                    own_cells = Region::new(record.cells().iter().cloned());
                    &own_cells
                }
            };
            println!("{}", display::render(region, record.cells()));
        }
        total += 1;
    }
    info!("listed {} records", total);
}
