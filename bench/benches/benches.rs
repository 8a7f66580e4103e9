use criterion::{Criterion, criterion_group, criterion_main};
use sim::utils::{flatten, normalize, to_terrain_image};
use sim::{HeightField, Simulation, build_mesh};

const SIZE: usize = 64;
const SEED: u64 = 2025;

fn bench_fill_and_mesh(c: &mut Criterion) {
    c.bench_function("procedural fill + mesh build", |b| {
        b.iter(|| {
            let field = HeightField::procedural(SIZE);
            let _verts = build_mesh(&field);
        })
    });
}

fn bench_mesh_rebuild(c: &mut Criterion) {
    let field = HeightField::procedural(SIZE);
    c.bench_function("mesh rebuild only", |b| b.iter(|| build_mesh(&field)));
}

fn bench_droplet_run(c: &mut Criterion) {
    c.bench_function("1000 droplet ticks", |b| {
        b.iter(|| {
            let mut sim = Simulation::new(SIZE, SEED);
            for _ in 0..1000 {
                let _ = sim.tick();
            }
        })
    });
}

fn bench_image_pipeline(c: &mut Criterion) {
    let field = HeightField::procedural(SIZE);
    c.bench_function("flatten + normalize + image", |b| {
        b.iter(|| {
            let mut flat = flatten(&field);
            normalize(&mut flat);
            let _img = to_terrain_image(&flat);
        })
    });
}

criterion_group!(
    erosion_benchmarks,
    bench_fill_and_mesh,
    bench_mesh_rebuild,
    bench_droplet_run,
    bench_image_pipeline
);
criterion_main!(erosion_benchmarks);
