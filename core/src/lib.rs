// core holds the noise primitives, the fractal sampler, the canvas, the sketches
// and the terrain height maps
pub mod canvas;
pub mod circle_grid;
pub mod controls;
pub mod cursor;
pub mod error;
pub mod fbm;
pub mod heightmap;
pub mod mesh;
pub mod noise_field;
pub mod noise_graph;
pub mod perlin;
pub mod simplex2;
pub mod sketch;
pub mod utils;

pub use canvas::Canvas;
pub use circle_grid::CircleGrid;
pub use controls::{FieldControls, GraphControls, Slider};
pub use cursor::ScanCursor;
pub use error::SketchError;
pub use fbm::{OctaveParams, constrain, display_y, fractal_sample, map_linear};
pub use heightmap::{MapGenerator, NoiseMap, TerrainRegion};
pub use mesh::{TerrainMesh, terrain_mesh};
pub use noise_field::{FieldParams, NoiseField};
pub use noise_graph::NoiseGraph;
pub use perlin::Perlin;
pub use simplex2::Simplex2D;
pub use sketch::{Sketch, SketchKind, run_frames};
pub use utils::flatten2;

// Deterministic noise that can be sampled at 1, 2 or 3 coordinates.
// Only `get3` is required; the lower-dimensional samplers fix the missing
// coordinates at 0, so `get1(x)` is the same as `get3(x, 0.0, 0.0)`.
pub trait NoiseGenerator {
    // Sample 3D noise at (x, y, z).
    fn get3(&self, x: f64, y: f64, z: f64) -> f64;

    // Sample 1D noise at x.
    fn get1(&self, x: f64) -> f64 {
        self.get3(x, 0.0, 0.0)
    }

    // Sample 2D noise at (x, y).
    fn get2(&self, x: f64, y: f64) -> f64 {
        self.get3(x, y, 0.0)
    }
}

impl<N: NoiseGenerator + ?Sized> NoiseGenerator for &N {
    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        (**self).get3(x, y, z)
    }
}

impl<N: NoiseGenerator + ?Sized> NoiseGenerator for Box<N> {
    fn get3(&self, x: f64, y: f64, z: f64) -> f64 {
        (**self).get3(x, y, z)
    }
}
