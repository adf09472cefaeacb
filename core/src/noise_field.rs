use serde::{Deserialize, Serialize};

use crate::NoiseGenerator;
use crate::canvas::{Canvas, gray};
use crate::perlin::Perlin;
use crate::sketch::Sketch;

pub const FIELD_WIDTH: u32 = 800;
pub const FIELD_HEIGHT: u32 = 800;
// Noise-space distance between neighbouring pixels
pub const FIELD_STEP: f64 = 0.01;
const BACKGROUND: u8 = 220;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldParams {
    // Shared x/y offset into the noise plane
    pub offset: f64,
}

// Grayscale view of 2D noise, written straight into the pixel buffer
pub struct NoiseField<N = Perlin> {
    noise: N,
    params: FieldParams,
    width: u32,
    height: u32,
    frames: u64,
}

impl NoiseField<Perlin> {
    pub fn new(seed: u64) -> Self {
        Self::with_noise(Perlin::new(seed))
    }
}

impl<N: NoiseGenerator> NoiseField<N> {
    pub fn with_noise(noise: N) -> Self {
        Self {
            noise,
            params: FieldParams::default(),
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            frames: 0,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    pub fn set_params(&mut self, params: FieldParams) {
        self.params = params;
    }

    // Gray level of pixel (x, y) for the current offset
    pub fn shade(&self, x: u32, y: u32) -> u8 {
        let xoff = self.params.offset + x as f64 * FIELD_STEP;
        let yoff = self.params.offset + y as f64 * FIELD_STEP;
        let n = self.noise.get2(xoff, yoff) * 255.0;
        n.round().clamp(0.0, 255.0) as u8
    }
}

impl<N: NoiseGenerator> Sketch for NoiseField<N> {
    fn name(&self) -> &'static str {
        "noise-field"
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn draw(&mut self, canvas: &mut Canvas) {
        canvas.background(gray(BACKGROUND));

        let width = canvas.width().min(self.width) as usize;
        let stride = canvas.width() as usize * 4;
        let rows = canvas.height().min(self.height);
        for y in 0..rows {
            for x in 0..width {
                let n = self.shade(x as u32, y);
                let index = x * 4 + y as usize * stride;
                let pixels = canvas.pixels_mut();
                pixels[index..index + 4].copy_from_slice(&[n, n, n, 255]);
            }
        }
        self.frames += 1;
    }

    fn frame_count(&self) -> u64 {
        self.frames
    }
}
