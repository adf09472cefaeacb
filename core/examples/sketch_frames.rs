// Renders a few frames of every sketch and saves the last one of each:
// circle_grid.png, noise_graph.png, noise_field.png

use anyhow::{Context, Result};
use log::info;
use sketch_core::{CircleGrid, FieldParams, NoiseField, NoiseGraph, OctaveParams, run_frames};

const SEED: u64 = 42;

fn main() -> Result<()> {
    env_logger::init();

    let mut grid = CircleGrid::default();
    let canvas = run_frames(&mut grid, 120)?;
    canvas
        .save_png("circle_grid.png")
        .context("saving circle grid")?;
    info!("Saved circle_grid.png");

    let mut graph = NoiseGraph::new(SEED);
    graph.set_params(OctaveParams::new(4, 2.0, 0.5));
    let canvas = run_frames(&mut graph, 30)?;
    canvas
        .save_png("noise_graph.png")
        .context("saving noise graph")?;
    info!("Saved noise_graph.png");

    let mut field = NoiseField::new(SEED);
    field.set_params(FieldParams { offset: 3.0 });
    let canvas = run_frames(&mut field, 1)?;
    canvas
        .save_png("noise_field.png")
        .context("saving noise field")?;
    info!("Saved noise_field.png");

    Ok(())
}
