use log::trace;

use crate::NoiseGenerator;
use crate::canvas::{BLACK, Canvas, WHITE};
use crate::cursor::ScanCursor;
use crate::fbm::{OctaveParams, display_y, fractal_sample};
use crate::perlin::Perlin;
use crate::sketch::Sketch;

pub const GRAPH_WIDTH: u32 = 600;
pub const GRAPH_HEIGHT: u32 = 600;
// Noise-space distance between neighbouring columns and between frames
pub const GRAPH_INCREMENT: f64 = 0.01;
pub const GRAPH_STROKE_WEIGHT: f32 = 4.0;

// A line graph of fractal noise that scrolls one increment per frame
pub struct NoiseGraph<N = Perlin> {
    noise: N,
    params: OctaveParams,
    cursor: ScanCursor,
    width: u32,
    height: u32,
    frames: u64,
}

impl NoiseGraph<Perlin> {
    pub fn new(seed: u64) -> Self {
        Self::with_noise(Perlin::new(seed))
    }
}

impl<N: NoiseGenerator> NoiseGraph<N> {
    pub fn with_noise(noise: N) -> Self {
        Self {
            noise,
            params: OctaveParams::default(),
            cursor: ScanCursor::new(0.0, GRAPH_INCREMENT),
            width: GRAPH_WIDTH,
            height: GRAPH_HEIGHT,
            frames: 0,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn params(&self) -> &OctaveParams {
        &self.params
    }

    pub fn set_params(&mut self, params: OctaveParams) {
        self.params = params;
    }

    pub fn cursor(&self) -> &ScanCursor {
        &self.cursor
    }

    pub fn noise(&self) -> &N {
        &self.noise
    }

    // Vertices of the next frame's graph; one per column
    pub fn points(&self) -> Vec<(f32, f32)> {
        let out_max = self.height as f64;
        (0..self.width)
            .map(|x| {
                let xoff = self.cursor.offset(x as u64);
                let y = fractal_sample(&self.noise, xoff, &self.params);
                (x as f32, display_y(y, out_max) as f32)
            })
            .collect()
    }
}

impl<N: NoiseGenerator> Sketch for NoiseGraph<N> {
    fn name(&self) -> &'static str {
        "noise-graph"
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn draw(&mut self, canvas: &mut Canvas) {
        canvas.background(BLACK);
        canvas.stroke(WHITE);
        canvas.stroke_weight(GRAPH_STROKE_WEIGHT);
        canvas.no_fill();

        canvas.begin_shape();
        for (x, y) in self.points() {
            canvas.vertex(x, y);
        }
        canvas.end_shape();

        self.cursor.advance();
        self.frames += 1;
        trace!(
            "graph frame {} start={:.2} params={:?}",
            self.frames,
            self.cursor.value(),
            self.params
        );
    }

    fn frame_count(&self) -> u64 {
        self.frames
    }
}
