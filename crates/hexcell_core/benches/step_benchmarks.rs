use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hexcell_core::neighbors::count_into;
use hexcell_core::step::{next_generation, next_generation_sequential};
use hexcell_core::{random_table, HexGrid, SimulationConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn setup(radius: u32) -> (HexGrid, hexcell_core::RuleTable) {
    let config = SimulationConfig {
        width: 200,
        height: 200,
        state_count: 4,
        radius,
        random_fill_chance: 0.2,
        ..Default::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let rules = random_table(&config, &mut rng);
    let mut grid = HexGrid::new(config.width, config.height).unwrap();
    grid.fill_random_with_rng(config.random_fill_chance, config.state_count, &mut rng);
    (grid, rules)
}

fn bench_count_neighbors(c: &mut Criterion) {
    let (grid, _) = setup(4);
    let mut counts = vec![0u32; 4];

    c.bench_function("count_neighbors_radius_4", |b| {
        b.iter(|| {
            count_into(&grid, 100, 101, 4, &mut counts);
            black_box(counts[1])
        })
    });
}

fn bench_step_parallel(c: &mut Criterion) {
    let (grid, rules) = setup(4);

    c.bench_function("step_200x200_radius_4", |b| {
        b.iter(|| black_box(next_generation(&grid, &rules)))
    });
}

fn bench_step_sequential(c: &mut Criterion) {
    let (grid, rules) = setup(4);

    c.bench_function("step_sequential_200x200_radius_4", |b| {
        b.iter(|| black_box(next_generation_sequential(&grid, &rules)))
    });
}

fn bench_step_small_radius(c: &mut Criterion) {
    let (grid, rules) = setup(1);

    c.bench_function("step_200x200_radius_1", |b| {
        b.iter(|| black_box(next_generation(&grid, &rules)))
    });
}

criterion_group!(
    benches,
    bench_count_neighbors,
    bench_step_parallel,
    bench_step_sequential,
    bench_step_small_radius
);
criterion_main!(benches);
