mod config;
mod viewer;

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use eframe::{NativeOptions, egui, run_native};
use log::info;
use sketch_core::heightmap::default_regions;
use sketch_core::mesh::DEFAULT_HEIGHT_SCALE;
use sketch_core::sketch::create_canvas;
use sketch_core::{
    CircleGrid, FieldControls, GraphControls, NoiseField, NoiseGraph, Sketch, SketchKind,
    terrain_mesh,
};

use crate::config::{AppConfig, Args};
use crate::viewer::SketchApp;

// Build the sketch named in the config with its starting parameters
pub fn build_sketch(config: &AppConfig) -> Box<dyn Sketch> {
    match config.sketch {
        SketchKind::CircleGrid => Box::new(CircleGrid::default()),
        SketchKind::NoiseGraph => {
            let mut graph = NoiseGraph::new(config.seed);
            graph.set_params(GraphControls::default().sanitize(&config.graph));
            Box::new(graph)
        }
        SketchKind::NoiseField => {
            let mut field = NoiseField::new(config.seed);
            field.set_params(FieldControls::default().read(config.field.offset));
            Box::new(field)
        }
    }
}

// Run the frame loop without a window, writing PNG frames to `out`
fn render_headless(config: &AppConfig, frames: usize, every: usize, out: &Path) -> Result<()> {
    std::fs::create_dir_all(out)
        .with_context(|| format!("creating output directory {}", out.display()))?;

    let mut sketch = build_sketch(config);
    let mut canvas = create_canvas(sketch.as_ref())?;
    sketch.setup(&mut canvas);

    for frame in 1..=frames {
        sketch.draw(&mut canvas);
        let wanted = if every == 0 {
            frame == frames
        } else {
            frame % every == 0
        };
        if wanted {
            let path = out.join(format!("{}_{:05}.png", sketch.name(), frame));
            canvas
                .save_png(&path)
                .with_context(|| format!("writing {}", path.display()))?;
            info!("Saved {}", path.display());
        }
    }
    info!("Rendered {} frames of {}", sketch.frame_count(), sketch.name());
    Ok(())
}

// Island height map from the config, written as an OBJ mesh
fn export_mesh(config: &AppConfig, path: &Path) -> Result<()> {
    let heights = config.map.generate_island()?;
    let mesh = terrain_mesh(&heights, &default_regions(), DEFAULT_HEIGHT_SCALE)?;
    mesh.save_obj(path)
        .with_context(|| format!("writing {}", path.display()))?;
    info!(
        "Saved {} ({} vertices, {} triangles)",
        path.display(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = AppConfig::resolve(&args)?;
    info!("Starting {} (seed {})", config.sketch, config.seed);

    if let Some(path) = &args.mesh {
        return export_mesh(&config, path);
    }
    if args.headless {
        return render_headless(&config, args.frames, args.every, &args.out);
    }

    let opts = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 820.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };
    run_native(
        "Noise Sketches",
        opts,
        Box::new(move |_cc| Ok(Box::new(SketchApp::new(config)))),
    )
    .map_err(|e| anyhow!("viewer failed: {e}"))
}

#[cfg(test)]
mod tests {
    use sketch_core::SketchKind;

    use super::{build_sketch, export_mesh, render_headless};
    use crate::config::AppConfig;

    #[test]
    fn build_sketch_matches_kind() {
        for kind in SketchKind::ALL {
            let config = AppConfig {
                sketch: kind,
                ..Default::default()
            };
            assert_eq!(build_sketch(&config).name(), kind.as_str());
        }
    }

    #[test]
    fn headless_writes_requested_frames() {
        let dir = std::env::temp_dir().join(format!("sketches-headless-{}", std::process::id()));
        let config = AppConfig {
            sketch: SketchKind::CircleGrid,
            ..Default::default()
        };
        render_headless(&config, 4, 2, &dir).unwrap();
        assert!(dir.join("circle-grid_00002.png").exists());
        assert!(dir.join("circle-grid_00004.png").exists());
        assert!(!dir.join("circle-grid_00003.png").exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn mesh_export_writes_obj() {
        let path = std::env::temp_dir().join(format!("island-{}.obj", std::process::id()));
        let mut config = AppConfig::default();
        config.map.width = 12;
        config.map.height = 10;
        export_mesh(&config, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 120);
        assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 2 * 11 * 9);
        std::fs::remove_file(&path).unwrap();
    }
}
