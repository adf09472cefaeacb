// Command-line arguments and the optional JSON configuration file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use sketch_core::heightmap::MapGenerator;
use sketch_core::{FieldParams, OctaveParams, SketchError, SketchKind};

#[derive(Parser, Debug)]
#[command(name = "sketches")]
#[command(
    about = "Noise sketches: circle grid, fractal noise graph and noise field",
    long_about = None
)]
pub struct Args {
    #[arg(
        long,
        value_name = "FILE",
        help = "JSON file with the starting configuration"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        value_name = "NAME",
        help = "Sketch to run: circle-grid, noise-graph or noise-field"
    )]
    pub sketch: Option<SketchKind>,

    #[arg(long, help = "Noise seed")]
    pub seed: Option<u64>,

    #[arg(long, value_name = "FPS", help = "Target frame rate")]
    pub fps: Option<f32>,

    #[arg(long, help = "Render without a window and write PNG frames")]
    pub headless: bool,

    #[arg(
        long,
        default_value = "60",
        help = "Number of frames to render in headless mode"
    )]
    pub frames: usize,

    #[arg(
        long,
        value_name = "DIR",
        default_value = "frames",
        help = "Output directory for headless frames"
    )]
    pub out: PathBuf,

    #[arg(
        long,
        default_value = "0",
        help = "Save every Nth frame; 0 saves only the last one"
    )]
    pub every: usize,

    #[arg(long, value_name = "FILE", help = "Write the island terrain mesh as OBJ and exit")]
    pub mesh: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sketch: SketchKind,
    pub fps: f32,
    pub seed: u64,
    pub graph: OctaveParams,
    pub field: FieldParams,
    pub map: MapGenerator,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sketch: SketchKind::default(),
            fps: 60.0,
            seed: 42,
            graph: OctaveParams::default(),
            field: FieldParams::default(),
            map: MapGenerator::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn validate(&self) -> Result<(), SketchError> {
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(SketchError::Config(format!(
                "fps must be positive, got {}",
                self.fps
            )));
        }
        Ok(())
    }

    // File values first, then whatever was given on the command line
    pub fn resolve(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(sketch) = args.sketch {
            config.sketch = sketch;
        }
        if let Some(seed) = args.seed {
            config.seed = seed;
            config.map.seed = seed;
        }
        if let Some(fps) = args.fps {
            config.fps = fps;
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use sketch_core::{OctaveParams, SketchKind};

    use super::{AppConfig, Args};

    #[test]
    fn partial_json_keeps_defaults() {
        let c = AppConfig::from_json(r#"{ "sketch": "circle-grid", "graph": { "octaves": 7 } }"#)
            .unwrap();
        assert_eq!(c.sketch, SketchKind::CircleGrid);
        assert_eq!(c.graph, OctaveParams::new(7, 0.0, 0.1));
        assert_eq!(c.fps, 60.0);
    }

    #[test]
    fn bad_fps_is_rejected() {
        assert!(AppConfig::from_json(r#"{ "fps": 0 }"#).is_err());
        assert!(AppConfig::from_json(r#"{ "sketch": "spiral" }"#).is_err());
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "sketches",
            "--sketch",
            "noise-field",
            "--seed",
            "9",
            "--headless",
        ]);
        let c = AppConfig::resolve(&args).unwrap();
        assert_eq!(c.sketch, SketchKind::NoiseField);
        assert_eq!(c.seed, 9);
        assert_eq!(c.map.seed, 9);
        assert!(args.headless);
        assert_eq!(args.frames, 60);
    }
}
