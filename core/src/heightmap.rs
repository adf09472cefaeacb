// Noise height maps: a plain 2D noise map and an octave-summed terrain map
// with an optional radial island falloff, plus colouring helpers.

use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use log::debug;
use palette::{Gradient, LinSrgb};
use serde::{Deserialize, Serialize};

use crate::error::SketchError;
use crate::simplex2::Simplex2D;
use crate::utils::{HeightMap2D, normalize2};

// Scale used in place of a non-positive one, so sampling never divides by zero
const MIN_NOISE_SCALE: f64 = 0.0001;

fn effective_scale(scale: f64) -> f64 {
    if scale <= 0.0 { MIN_NOISE_SCALE } else { scale }
}

// Single-octave simplex noise sampled on a grid and shifted into [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseMap {
    pub width: usize,
    pub height: usize,
    pub noise_scale: f64,
}

impl Default for NoiseMap {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            noise_scale: 100.0,
        }
    }
}

impl NoiseMap {
    pub fn generate(&self, seed: u64) -> Result<HeightMap2D, SketchError> {
        if self.width == 0 || self.height == 0 {
            return Err(SketchError::EmptyMap);
        }
        let noise = Simplex2D::new(seed);
        let scale = effective_scale(self.noise_scale);
        let map = (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| {
                        let v = noise.get2(x as f64 / scale, y as f64 / scale);
                        ((v + 1.0) / 2.0) as f32
                    })
                    .collect()
            })
            .collect();
        Ok(map)
    }
}

// Octave-summed terrain height map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapGenerator {
    pub width: usize,
    pub height: usize,
    pub noise_scale: f64,
    pub octaves: u32,
    pub persistence: f64,
    pub lacunarity: f64,
    pub offset: [f64; 2],
    pub seed: u64,
}

impl Default for MapGenerator {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            noise_scale: 100.0,
            octaves: 5,
            persistence: 0.5,
            lacunarity: 2.0,
            offset: [0.0, 0.0],
            seed: 0,
        }
    }
}

impl MapGenerator {
    // Raw octave sum at grid cell (x, y), centred on the middle of the map
    fn octave_sum(&self, noise: &Simplex2D, x: usize, y: usize) -> f64 {
        let scale = effective_scale(self.noise_scale);
        let half_w = self.width as f64 / 2.0;
        let half_h = self.height as f64 / 2.0;

        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut total = 0.0;
        for _ in 0..self.octaves {
            let sx = (x as f64 - half_w) / scale * frequency + self.offset[0];
            let sy = (y as f64 - half_h) / scale * frequency + self.offset[1];
            total += (noise.get2(sx, sy) * 2.0 - 1.0) * amplitude;
            amplitude *= self.persistence;
            frequency *= self.lacunarity;
        }
        total
    }

    // 1 at the centre, falling linearly to 0 at the nearest edge distance
    pub fn falloff(&self, x: usize, y: usize) -> f64 {
        let half_w = self.width as f64 / 2.0;
        let half_h = self.height as f64 / 2.0;
        let dist = ((x as f64 - half_w).powi(2) + (y as f64 - half_h).powi(2)).sqrt();
        (1.0 - dist / half_w.max(half_h)).max(0.0)
    }

    // Raw per-cell values, row-major
    fn sample<F>(&self, cell: F) -> Result<Vec<Vec<f64>>, SketchError>
    where
        F: Fn(&Simplex2D, usize, usize) -> f64,
    {
        if self.width == 0 || self.height == 0 {
            return Err(SketchError::EmptyMap);
        }
        let noise = Simplex2D::new(self.seed);
        let grid = (0..self.height)
            .map(|y| (0..self.width).map(|x| cell(&noise, x, y)).collect())
            .collect();
        debug!(
            "sampled {}x{} height map (seed {}, {} octaves)",
            self.width, self.height, self.seed, self.octaves
        );
        Ok(grid)
    }

    // Height map normalised to [0, 1]
    pub fn generate(&self) -> Result<HeightMap2D, SketchError> {
        let grid = self.sample(|noise, x, y| self.octave_sum(noise, x, y))?;
        let mut map: HeightMap2D = grid
            .into_iter()
            .map(|row| row.into_iter().map(|v| v as f32).collect())
            .collect();
        normalize2(&mut map);
        Ok(map)
    }

    // Sums faded towards the edges by the radial falloff, then inverted so the
    // centre reads as low ground under the default regions. The inverted
    // values are rescaled with the bounds of the faded sums, which places the
    // edges at -lo / (hi - lo) rather than stretching the island onto [0, 1].
    pub fn generate_island(&self) -> Result<HeightMap2D, SketchError> {
        let faded =
            self.sample(|noise, x, y| self.octave_sum(noise, x, y) * self.falloff(x, y))?;
        let (lo, hi) = faded
            .iter()
            .flatten()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        debug!("island bounds: min={:.4} max={:.4}", lo, hi);

        let range = hi - lo;
        let map = faded
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|s| {
                        if range > f64::EPSILON {
                            ((-s - lo) / range) as f32
                        } else {
                            0.5
                        }
                    })
                    .collect()
            })
            .collect();
        Ok(map)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainRegion {
    pub name: String,
    // Upper bound (inclusive) of the heights painted with this colour
    pub height: f32,
    pub colour: [u8; 3],
}

impl TerrainRegion {
    pub fn new(name: &str, height: f32, colour: [u8; 3]) -> Self {
        Self {
            name: name.to_string(),
            height,
            colour,
        }
    }
}

// Low heights are high ground; water sits at the top of the range
pub fn default_regions() -> Vec<TerrainRegion> {
    vec![
        TerrainRegion::new("Mountain2", 0.1, [74, 89, 100]),
        TerrainRegion::new("Mountain", 0.2, [63, 73, 75]),
        TerrainRegion::new("Ground", 0.3, [79, 49, 1]),
        TerrainRegion::new("Grass2", 0.4, [102, 136, 59]),
        TerrainRegion::new("Grass", 0.5, [183, 183, 71]),
        TerrainRegion::new("Sand2", 0.6, [183, 183, 71]),
        TerrainRegion::new("Sand", 0.7, [242, 223, 152]),
        TerrainRegion::new("Water3", 0.8, [104, 172, 214]),
        TerrainRegion::new("Water2", 0.9, [65, 125, 201]),
        TerrainRegion::new("Water", 1.0, [56, 103, 175]),
    ]
}

// Colour of the first region whose bound is at or above `h`
pub fn region_colour(h: f32, regions: &[TerrainRegion]) -> Option<[u8; 3]> {
    regions.iter().find(|r| h <= r.height).map(|r| r.colour)
}

fn map_dims(map: &HeightMap2D) -> (u32, u32) {
    let h = map.len();
    let w = map.first().map_or(0, |row| row.len());
    (w as u32, h as u32)
}

// Heights above every region stay uncoloured (transparent black)
pub fn colour_map(map: &HeightMap2D, regions: &[TerrainRegion]) -> RgbaImage {
    let (w, h) = map_dims(map);
    RgbaImage::from_fn(w, h, |x, y| {
        match region_colour(map[y as usize][x as usize], regions) {
            Some([r, g, b]) => Rgba([r, g, b, 255]),
            None => Rgba([0, 0, 0, 0]),
        }
    })
}

// Smooth variant of the default regions
pub fn gradient_map(map: &HeightMap2D) -> RgbImage {
    let gradient = Gradient::with_domain(vec![
        (0.00, LinSrgb::new(0.29, 0.35, 0.39)), // mountain
        (0.30, LinSrgb::new(0.31, 0.19, 0.0)),  // ground
        (0.50, LinSrgb::new(0.40, 0.53, 0.23)), // grass
        (0.70, LinSrgb::new(0.95, 0.87, 0.60)), // sand
        (1.00, LinSrgb::new(0.22, 0.40, 0.69)), // water
    ]);
    let (w, h) = map_dims(map);
    RgbImage::from_fn(w, h, |x, y| {
        let v = map[y as usize][x as usize].clamp(0.0, 1.0);
        let col: LinSrgb = gradient.get(v);
        let rgb = col.into_format::<u8>();
        Rgb([rgb.red, rgb.green, rgb.blue])
    })
}

pub fn to_gray_image(map: &HeightMap2D) -> GrayImage {
    let (w, h) = map_dims(map);
    GrayImage::from_fn(w, h, |x, y| {
        let v = map[y as usize][x as usize];
        Luma([(v * 255.0).floor().clamp(0.0, 255.0) as u8])
    })
}
