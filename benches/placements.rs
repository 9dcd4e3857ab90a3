//! Benchmarks for placement enumeration.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use polycube::catalog::{self, BEDLAM, SOMA};
use polycube::{Coord, Grid, LatticeGrid};

/// Benchmark enumerating every orientation of one piece.
fn bench_orientations(c: &mut Criterion) {
    let puzzle = catalog::build(&SOMA, LatticeGrid::cubic().with_mirror(true)).unwrap();

    c.bench_function("orientations", |b| {
        b.iter(|| puzzle.orientations(black_box("a")).unwrap().count())
    });
}

/// Benchmark all distinct placements of the Soma pieces in their cube.
fn bench_soma_placements(c: &mut Criterion) {
    let puzzle = catalog::build(&SOMA, LatticeGrid::cubic()).unwrap();
    let region = puzzle.problem_region("soma").unwrap();

    c.bench_function("soma_placements", |b| {
        b.iter(|| {
            puzzle
                .pieces()
                .iter()
                .filter(|piece| piece.id() != Some(catalog::GOAL_PIECE_ID))
                .map(|piece| puzzle.placements(piece, black_box(&region)).unwrap().count())
                .sum::<usize>()
        })
    });
}

/// Benchmark all distinct placements of the Bedlam pieces in their cube.
fn bench_bedlam_placements(c: &mut Criterion) {
    let puzzle = catalog::build(&BEDLAM, LatticeGrid::cubic()).unwrap();
    let region = puzzle.problem_region("bedlam").unwrap();

    let mut group = c.benchmark_group("bedlam");
    group.sample_size(20);
    group.bench_function("placements", |b| {
        b.iter(|| {
            BEDLAM
                .pieces
                .iter()
                .map(|(id, _)| puzzle.placements(*id, black_box(&region)).unwrap().count())
                .sum::<usize>()
        })
    });
    group.finish();
}

/// Benchmark probing for the first placement in a large region.
fn bench_first_placement(c: &mut Criterion) {
    let puzzle = catalog::build(&BEDLAM, LatticeGrid::cubic()).unwrap();
    let region = puzzle.region(&Coord::from([16, 16, 16]));

    c.bench_function("first_placement_large_region", |b| {
        b.iter(|| puzzle.placements("screw", black_box(&region)).unwrap().next())
    });

    c.bench_function("region_coordinates", |b| {
        b.iter(|| puzzle.grid().coordinates(black_box(&Coord::from([16, 16, 16]))).len())
    });
}

criterion_group!(
    benches,
    bench_orientations,
    bench_soma_placements,
    bench_bedlam_placements,
    bench_first_placement
);
criterion_main!(benches);
