//! Performance benchmarks for the FED calculations
//!
//! B-RISK writes results every few seconds, so long runs give sheets with
//! thousands of rows. These benchmarks measure how the dose calculation scales
//! with the number of rows and with the number of rooms.
//!
//! # What We're Measuring
//!
//! 1. **Single room**: FED_CO and FED_thermal for an occupant staying put
//!    - one pass over the rows, a handful of `exp`/`powf` per step
//!
//! 2. **Egress path**: three rooms with two transitions
//!    - each transition inserts an interpolated row and slices the table
//!
//! 3. **All rooms**: `calculate_room_feds` over every room
//!    - run with `--features parallel` to compare against the rayon version
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench --bench fed_performance
//! cargo bench --bench fed_performance --features parallel rooms
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use bplot::results::columns::*;
use bplot::results::{BriskResults, ResultTable, RoomGeometry, RunLog, OUTSIDE, TIME_COLUMN};
use bplot::tenability::{CoDose, EgressPath, FedOptions};

// =================================================================================================
// Synthetic results
// =================================================================================================

/// A growing fire: the layer descends from the ceiling while it heats up and
/// fills with CO
fn room_sheet(id: u32, rows: usize, end_time: f64) -> ResultTable {
    let time: Vec<f64> = (0..rows).map(|i| i as f64 * end_time / (rows - 1) as f64).collect();
    let growth: Vec<f64> = time.iter().map(|t| t / end_time).collect();
    let scaled = |a: f64, b: f64| growth.iter().map(|g| a + (b - a) * g).collect::<Vec<_>>();

    ResultTable::from_columns(
        format!("Room {id}"),
        vec![
            (TIME_COLUMN, time.clone()),
            (LAYER_HEIGHT, scaled(2.4, 0.8)),
            (UPPER_LAYER_TEMP, scaled(20.0, 250.0)),
            (LOWER_LAYER_TEMP, scaled(20.0, 40.0)),
            (CO2_UPPER, scaled(0.0, 6.0)),
            (CO2_LOWER, scaled(0.0, 1.0)),
            (CO_UPPER, scaled(0.0, 2500.0)),
            (CO_LOWER, scaled(0.0, 300.0)),
            (O2_UPPER, scaled(20.9, 12.0)),
            (O2_LOWER, scaled(20.9, 19.0)),
        ],
    )
    .unwrap()
}

fn results(n_rooms: u32, rows: usize) -> BriskResults {
    let end_time = 1800.0;
    let geometry = (1..=n_rooms)
        .map(|id| RoomGeometry {
            id,
            name: format!("Room {id}"),
            max_height: 2.4,
            min_height: 2.4,
            length: 5.0,
            width: 4.0,
        })
        .collect();

    let mut tables: Vec<ResultTable> = (1..=n_rooms).map(|id| room_sheet(id, rows, end_time)).collect();
    tables.push(ResultTable::from_columns(OUTSIDE, vec![(TIME_COLUMN, vec![0.0, end_time])]).unwrap());

    BriskResults::from_parts(RunLog::default(), geometry, tables).unwrap()
}

// =================================================================================================
// Benchmark Functions
// =================================================================================================

fn benchmark_single_room(c: &mut Criterion) {
    let mut group = c.benchmark_group("FED single room");
    let options = FedOptions::default();
    let path = EgressPath::single("Room 1");

    for rows in [100, 1_000, 10_000] {
        let results = results(1, rows);

        group.bench_with_input(BenchmarkId::new("co", rows), &results, |b, results| {
            b.iter(|| black_box(results.calculate_fed_co_path(black_box(&path), &options).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("thermal", rows), &results, |b, results| {
            b.iter(|| black_box(results.calculate_fed_thermal_path(black_box(&path), &options).unwrap()))
        });
    }

    group.finish();
}

fn benchmark_egress_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("FED egress path");
    let options = FedOptions::default();
    let path = EgressPath::new(["Room 1", "Room 2", "Room 3"], [412.5, 933.3]).unwrap();

    for rows in [100, 1_000, 10_000] {
        let results = results(3, rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &results, |b, results| {
            b.iter(|| black_box(results.calculate_fed_co_path(black_box(&path), &options).unwrap()))
        });
    }

    group.finish();
}

fn benchmark_all_rooms(c: &mut Criterion) {
    let mut group = c.benchmark_group("FED rooms");
    let options = FedOptions::default();

    for n_rooms in [2, 8, 32] {
        let results = results(n_rooms, 2_000);
        group.bench_with_input(BenchmarkId::from_parameter(n_rooms), &results, |b, results| {
            b.iter(|| black_box(results.calculate_room_feds(&CoDose, None, &options).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_single_room, benchmark_egress_path, benchmark_all_rooms);
criterion_main!(benches);
