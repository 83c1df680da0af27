//! Performance benchmark comparing the serial and parallel steppers

use std::time::Instant;

use layered_life::domain::{Algorithm, BeatPhase, Lattice, Stepper};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Lattice with every layer seeded, so the frontier covers the whole stack
fn seeded_lattice(size: usize) -> Lattice {
    let mut rng = StdRng::seed_from_u64(7);
    let mut grid = Lattice::initialize(size, &mut rng);
    for _ in 0..size {
        grid.shift_layers(BeatPhase::default(), &mut rng);
    }
    grid
}

fn benchmark(algorithm: Algorithm, size: usize, iterations: u32) -> f64 {
    let stepper = Stepper::new(algorithm).without_repopulation();
    let mut grid = seeded_lattice(size);
    let top = grid.top_layer();

    let start = Instant::now();
    for _ in 0..iterations {
        grid = stepper.step(&grid, top, BeatPhase::default()).grid;
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn main() {
    println!("=== Layered Life Stepper Benchmark ===\n");

    let sizes = [10, 20, 30, 64, 128, 256];
    let iterations = 20;

    println!("{:>12} {:>12} {:>12} {:>10}", "Size", "Serial", "Parallel", "Speedup");
    println!("{:-<50}", "");

    for size in sizes {
        let serial_ms = benchmark(Algorithm::Serial, size, iterations);
        let parallel_ms = benchmark(Algorithm::Parallel, size, iterations);

        println!(
            "{:>12} {:>12.3} {:>12.3} {:>9.1}x",
            format!("{}^3", size),
            serial_ms,
            parallel_ms,
            serial_ms / parallel_ms.max(f64::EPSILON)
        );
    }

    println!("\n=== Throughput at 128^3 ===\n");

    let cells = 128usize.pow(3);
    for algorithm in Algorithm::all() {
        let ms = benchmark(algorithm, 128, iterations);
        println!(
            "{:<10} {:.3} ms/gen, {:.1}M cells/sec",
            algorithm.name(),
            ms,
            cells as f64 / (ms / 1000.0) / 1_000_000.0
        );
    }
}
