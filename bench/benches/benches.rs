use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use sketch_core::heightmap::{MapGenerator, colour_map, default_regions};
use sketch_core::mesh::{DEFAULT_HEIGHT_SCALE, terrain_mesh};
use sketch_core::{
    CircleGrid, NoiseField, NoiseGraph, OctaveParams, Perlin, Sketch, display_y, fractal_sample,
    sketch::create_canvas,
};

const SEED: u64 = 2025;

fn bench_fractal_column(c: &mut Criterion) {
    let noise = Perlin::new(SEED);
    let params = OctaveParams::new(10, 2.0, 0.5);
    c.bench_function("fractal_sample 600 columns, 10 octaves", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for x in 0..600 {
                let y = fractal_sample(&noise, black_box(x as f64 * 0.01), &params);
                acc += display_y(y, 600.0);
            }
            acc
        })
    });
}

fn bench_graph_frame(c: &mut Criterion) {
    c.bench_function("NoiseGraph frame (4 octaves)", |b| {
        let mut graph = NoiseGraph::new(SEED);
        graph.set_params(OctaveParams::new(4, 2.0, 0.5));
        let mut canvas = create_canvas(&graph).unwrap();
        b.iter(|| graph.draw(&mut canvas))
    });
}

fn bench_field_frame(c: &mut Criterion) {
    c.bench_function("NoiseField frame 800x800", |b| {
        let mut field = NoiseField::new(SEED);
        let mut canvas = create_canvas(&field).unwrap();
        b.iter(|| field.draw(&mut canvas))
    });
}

fn bench_circle_grid_frame(c: &mut Criterion) {
    c.bench_function("CircleGrid frame (900 circles)", |b| {
        let mut grid = CircleGrid::default();
        let mut canvas = create_canvas(&grid).unwrap();
        grid.setup(&mut canvas);
        b.iter(|| grid.draw(&mut canvas))
    });
}

fn bench_island_map(c: &mut Criterion) {
    let generator = MapGenerator {
        width: 257,
        height: 257,
        noise_scale: 50.0,
        seed: SEED,
        ..Default::default()
    };
    c.bench_function("MapGenerator island 257x257 + regions", |b| {
        b.iter(|| {
            let map = generator.generate_island().unwrap();
            colour_map(&map, &default_regions())
        })
    });
}

fn bench_terrain_mesh(c: &mut Criterion) {
    let generator = MapGenerator {
        width: 257,
        height: 257,
        noise_scale: 50.0,
        seed: SEED,
        ..Default::default()
    };
    let map = generator.generate_island().unwrap();
    let regions = default_regions();
    c.bench_function("terrain_mesh 257x257", |b| {
        b.iter(|| terrain_mesh(black_box(&map), &regions, DEFAULT_HEIGHT_SCALE).unwrap())
    });
}

criterion_group!(
    sketch_benchmarks,
    bench_fractal_column,
    bench_graph_frame,
    bench_field_frame,
    bench_circle_grid_frame,
    bench_island_map,
    bench_terrain_mesh
);
criterion_main!(sketch_benchmarks);
