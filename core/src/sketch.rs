use std::fmt;
use std::str::FromStr;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::error::SketchError;

// A draw-loop program: `setup` runs once on a fresh canvas of `size()`,
// then the frame clock calls `draw` once per frame.
pub trait Sketch {
    fn name(&self) -> &'static str;

    fn size(&self) -> (u32, u32);

    fn setup(&mut self, _canvas: &mut Canvas) {}

    fn draw(&mut self, canvas: &mut Canvas);

    // Number of completed `draw` calls
    fn frame_count(&self) -> u64;
}

pub fn create_canvas<S: Sketch + ?Sized>(sketch: &S) -> Result<Canvas, SketchError> {
    let (w, h) = sketch.size();
    Canvas::new(w, h)
}

// Set the sketch up and run `frames` draw calls, returning the final canvas
pub fn run_frames<S: Sketch + ?Sized>(
    sketch: &mut S,
    frames: usize,
) -> Result<Canvas, SketchError> {
    let mut canvas = create_canvas(sketch)?;
    sketch.setup(&mut canvas);
    for _ in 0..frames {
        sketch.draw(&mut canvas);
        trace!("{} frame {}", sketch.name(), sketch.frame_count());
    }
    Ok(canvas)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SketchKind {
    CircleGrid,
    #[default]
    NoiseGraph,
    NoiseField,
}

impl SketchKind {
    pub const ALL: [SketchKind; 3] = [
        SketchKind::CircleGrid,
        SketchKind::NoiseGraph,
        SketchKind::NoiseField,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SketchKind::CircleGrid => "circle-grid",
            SketchKind::NoiseGraph => "noise-graph",
            SketchKind::NoiseField => "noise-field",
        }
    }
}

impl fmt::Display for SketchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SketchKind {
    type Err = SketchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        SketchKind::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| SketchError::UnknownSketch(s.to_string()))
    }
}
