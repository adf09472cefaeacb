// Fixed-size RGBA drawing surface with immediate-mode drawing state.
//
// The canvas keeps a current stroke colour, fill colour and stroke weight;
// every primitive uses whatever is set when it is called. Colours carry
// alpha and are composited source-over onto the buffer.

use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};
use log::debug;

use crate::error::SketchError;

pub type Colour = Rgba<u8>;

pub const BLACK: Colour = Rgba([0, 0, 0, 255]);
pub const WHITE: Colour = Rgba([255, 255, 255, 255]);

pub fn gray(v: u8) -> Colour {
    Rgba([v, v, v, 255])
}

pub fn gray_alpha(v: u8, a: u8) -> Colour {
    Rgba([v, v, v, a])
}

pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Colour {
    Rgba([r, g, b, a])
}

// src * a + dst * (255 - a), divided by 255 with rounding
#[inline]
fn blend_channel(src: u8, dst: u8, alpha: u16) -> u8 {
    let result = src as u16 * alpha + dst as u16 * (255 - alpha);
    ((result + 1 + (result >> 8)) >> 8) as u8
}

pub struct Canvas {
    buf: RgbaImage,
    stroke: Option<Colour>,
    fill: Option<Colour>,
    weight: f32,
    shape: Vec<(f32, f32)>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self, SketchError> {
        if width == 0 || height == 0 {
            return Err(SketchError::InvalidCanvasSize { width, height });
        }
        debug!("creating {}x{} canvas", width, height);
        Ok(Self {
            buf: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0])),
            stroke: Some(BLACK),
            fill: Some(WHITE),
            weight: 1.0,
            shape: Vec::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.buf.width()
    }

    pub fn height(&self) -> u32 {
        self.buf.height()
    }

    // Drawing state

    pub fn stroke(&mut self, colour: Colour) {
        self.stroke = Some(colour);
    }

    pub fn no_stroke(&mut self) {
        self.stroke = None;
    }

    pub fn fill(&mut self, colour: Colour) {
        self.fill = Some(colour);
    }

    pub fn no_fill(&mut self) {
        self.fill = None;
    }

    pub fn stroke_weight(&mut self, weight: f32) {
        self.weight = weight.max(0.0);
    }

    // Pixel access

    // Overwrite every pixel with an opaque colour.
    pub fn background(&mut self, colour: Colour) {
        let opaque = Rgba([colour[0], colour[1], colour[2], 255]);
        for p in self.buf.pixels_mut() {
            *p = opaque;
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Colour> {
        self.buf.get_pixel_checked(x, y).copied()
    }

    pub fn set(&mut self, x: u32, y: u32, colour: Colour) {
        if let Some(p) = self.buf.get_pixel_mut_checked(x, y) {
            *p = colour;
        }
    }

    // Row-major RGBA bytes; pixel `(x, y)` starts at `(x + y * width) * 4`.
    pub fn pixels(&self) -> &[u8] {
        self.buf.as_raw()
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    fn blend_pixel(&mut self, x: i64, y: i64, colour: Colour) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        let alpha = colour[3] as u16;
        if alpha == 0 {
            return;
        }
        let dst = self.buf.get_pixel_mut(x as u32, y as u32);
        if alpha == 255 {
            *dst = colour;
            return;
        }
        for c in 0..3 {
            dst[c] = blend_channel(colour[c], dst[c], alpha);
        }
        dst[3] = blend_channel(255, dst[3], alpha);
    }

    // Primitives

    pub fn line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32) {
        self.stroke_path(&[(x0, y0), (x1, y1)]);
    }

    // Ellipse centred on `(cx, cy)` with diameters `w` and `h`.
    pub fn ellipse(&mut self, cx: f32, cy: f32, w: f32, h: f32) {
        let (rx, ry) = (w.abs() / 2.0, h.abs() / 2.0);
        if rx == 0.0 || ry == 0.0 {
            return;
        }
        let half = match self.stroke {
            Some(_) => self.weight / 2.0,
            None => 0.0,
        };
        let min_r = rx.min(ry);
        let x_lo = (cx - rx - half).floor() as i64;
        let x_hi = (cx + rx + half).ceil() as i64;
        let y_lo = (cy - ry - half).floor() as i64;
        let y_hi = (cy + ry + half).ceil() as i64;

        for py in y_lo..=y_hi {
            for px in x_lo..=x_hi {
                let dx = (px as f32 + 0.5 - cx) / rx;
                let dy = (py as f32 + 0.5 - cy) / ry;
                let d = (dx * dx + dy * dy).sqrt();
                if d <= 1.0 {
                    if let Some(fill) = self.fill {
                        self.blend_pixel(px, py, fill);
                    }
                }
                // Distance to the outline, exact for circles
                let edge = (d - 1.0) * min_r;
                if let Some(stroke) = self.stroke {
                    if edge.abs() <= half {
                        self.blend_pixel(px, py, stroke);
                    }
                }
            }
        }
    }

    pub fn begin_shape(&mut self) {
        self.shape.clear();
    }

    pub fn vertex(&mut self, x: f32, y: f32) {
        self.shape.push((x, y));
    }

    // Stroke an open poly-line through the vertices recorded since `begin_shape`.
    pub fn end_shape(&mut self) {
        let points = std::mem::take(&mut self.shape);
        self.stroke_path(&points);
    }

    // Every covered pixel is blended once, even where segments overlap
    fn stroke_path(&mut self, points: &[(f32, f32)]) {
        let Some(colour) = self.stroke else {
            return;
        };
        if points.is_empty() || self.weight == 0.0 {
            return;
        }
        let half = (self.weight / 2.0).max(0.5);

        // Coverage is tracked over the path's bounding box, clipped to the canvas
        let (mut min_x, mut min_y) = (f32::INFINITY, f32::INFINITY);
        let (mut max_x, mut max_y) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
        for &(x, y) in points {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        let x0 = ((min_x - half).floor() as i64).max(0);
        let y0 = ((min_y - half).floor() as i64).max(0);
        let x1 = ((max_x + half).ceil() as i64).min(self.width() as i64 - 1);
        let y1 = ((max_y + half).ceil() as i64).min(self.height() as i64 - 1);
        if x0 > x1 || y0 > y1 {
            return;
        }
        let box_w = x1 - x0 + 1;
        let mut covered = vec![false; (box_w * (y1 - y0 + 1)) as usize];

        let segments: Vec<((f32, f32), (f32, f32))> = if points.len() == 1 {
            vec![(points[0], points[0])]
        } else {
            points.windows(2).map(|p| (p[0], p[1])).collect()
        };

        for (a, b) in segments {
            let x_lo = ((a.0.min(b.0) - half).floor() as i64).max(x0);
            let x_hi = ((a.0.max(b.0) + half).ceil() as i64).min(x1);
            let y_lo = ((a.1.min(b.1) - half).floor() as i64).max(y0);
            let y_hi = ((a.1.max(b.1) + half).ceil() as i64).min(y1);
            for py in y_lo..=y_hi {
                for px in x_lo..=x_hi {
                    let d = segment_distance((px as f32 + 0.5, py as f32 + 0.5), a, b);
                    if d <= half {
                        covered[((py - y0) * box_w + (px - x0)) as usize] = true;
                    }
                }
            }
        }

        for (i, _) in covered.iter().enumerate().filter(|(_, c)| **c) {
            let i = i as i64;
            self.blend_pixel(x0 + i % box_w, y0 + i / box_w, colour);
        }
    }

    // Export

    pub fn to_image(&self) -> RgbaImage {
        self.buf.clone()
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), SketchError> {
        self.buf.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

// Distance from `p` to the segment `a`–`b`
fn segment_distance(p: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let (abx, aby) = (b.0 - a.0, b.1 - a.1);
    let (apx, apy) = (p.0 - a.0, p.1 - a.1);
    let len2 = abx * abx + aby * aby;
    let t = if len2 == 0.0 {
        0.0
    } else {
        ((apx * abx + apy * aby) / len2).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.0 + t * abx, a.1 + t * aby);
    ((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}
