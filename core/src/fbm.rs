// Fractal Brownian motion over a 1D noise function.
//
// Each octave samples `noise(x * frequency) * amplitude`, starting from a
// frequency and amplitude of 1 and scaling them by `lacunarity` and
// `persistence` after every octave. The raw sum is not normalised; use
// `display_y` to place it on screen.

use serde::{Deserialize, Serialize};

use crate::NoiseGenerator;

// Parameters for one fractal sample, refreshed once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OctaveParams {
    // Number of octaves to sum; 0 yields 0.
    pub octaves: u32,
    // Frequency multiplier applied after each octave.
    pub lacunarity: f64,
    // Amplitude multiplier applied after each octave.
    pub persistence: f64,
}

impl Default for OctaveParams {
    fn default() -> Self {
        Self {
            octaves: 4,
            lacunarity: 0.0,
            persistence: 0.1,
        }
    }
}

impl OctaveParams {
    pub fn new(octaves: u32, lacunarity: f64, persistence: f64) -> Self {
        Self {
            octaves,
            lacunarity,
            persistence,
        }
    }
}

// Sum `params.octaves` scaled samples of `noise` around `x`.
//
// Degenerate parameters are not rejected: `lacunarity = 0` makes every octave
// after the first sample `noise(0)`, `persistence = 0` silences them.
pub fn fractal_sample<N>(noise: &N, x: f64, params: &OctaveParams) -> f64
where
    N: NoiseGenerator + ?Sized,
{
    let mut y = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;

    for _ in 0..params.octaves {
        y += noise.get1(x * frequency) * amplitude;
        amplitude *= params.persistence;
        frequency *= params.lacunarity;
    }
    y
}

// Re-map `value` from `[start1, stop1]` onto `[start2, stop2]` without clamping.
#[inline]
pub fn map_linear(value: f64, start1: f64, stop1: f64, start2: f64, stop2: f64) -> f64 {
    start2 + (stop2 - start2) * ((value - start1) / (stop1 - start1))
}

// Clamp `value` into `[low, high]`. Never panics; NaN ends up at `high`.
#[inline]
pub fn constrain(value: f64, low: f64, high: f64) -> f64 {
    value.min(high).max(low)
}

// Screen coordinate of a raw fractal sum.
//
// The sum is mapped as if it lived in (0, 1) and then clamped, so sums above
// 1 all land on `out_max` instead of being rescaled.
#[inline]
pub fn display_y(raw: f64, out_max: f64) -> f64 {
    constrain(map_linear(raw, 0.0, 1.0, 0.0, out_max), 0.0, out_max)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{OctaveParams, constrain, display_y, fractal_sample, map_linear};
    use crate::{NoiseGenerator, Perlin};

    struct Constant(f64);

    impl NoiseGenerator for Constant {
        fn get3(&self, _x: f64, _y: f64, _z: f64) -> f64 {
            self.0
        }
    }

    // Records every coordinate it was asked for
    struct Recorder(std::cell::RefCell<Vec<f64>>);

    impl NoiseGenerator for Recorder {
        fn get3(&self, x: f64, _y: f64, _z: f64) -> f64 {
            self.0.borrow_mut().push(x);
            0.25
        }
    }

    #[test]
    fn single_octave_is_plain_noise() {
        let noise = Perlin::new(42);
        for &lacunarity in &[0.0, 1.0, 2.5, 4.0] {
            for &persistence in &[0.0, 0.3, 1.0] {
                let params = OctaveParams::new(1, lacunarity, persistence);
                for &x in &[0.0, 0.37, 5.01, -12.6] {
                    assert_eq!(fractal_sample(&noise, x, &params), noise.get1(x));
                }
            }
        }
    }

    #[test]
    fn zero_persistence_keeps_first_octave() {
        let noise = Perlin::new(7);
        for octaves in 2..=10 {
            let params = OctaveParams::new(octaves, 2.0, 0.0);
            let x = 3.3 + octaves as f64 * 0.1;
            assert_eq!(fractal_sample(&noise, x, &params), noise.get1(x));
        }
    }

    #[test]
    fn unit_lacunarity_is_geometric_series() {
        let noise = Perlin::new(11);
        let x = 1.234;
        for octaves in 1..=10 {
            let params = OctaveParams::new(octaves, 1.0, 0.5);
            let series: f64 = (0..octaves).map(|i| 0.5f64.powi(i as i32)).sum();
            assert_relative_eq!(
                fractal_sample(&noise, x, &params),
                noise.get1(x) * series,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn zero_octaves_is_zero() {
        let params = OctaveParams::new(0, 2.0, 0.5);
        assert_eq!(fractal_sample(&Constant(0.9), 4.0, &params), 0.0);
    }

    #[test]
    fn zero_lacunarity_samples_origin() {
        let noise = Recorder(Default::default());
        let params = OctaveParams::new(4, 0.0, 0.5);
        fractal_sample(&noise, 8.5, &params);
        assert_eq!(*noise.0.borrow(), vec![8.5, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn frequencies_follow_lacunarity() {
        let noise = Recorder(Default::default());
        let params = OctaveParams::new(3, 2.0, 1.0);
        let y = fractal_sample(&noise, 1.5, &params);
        assert_eq!(*noise.0.borrow(), vec![1.5, 3.0, 6.0]);
        assert_eq!(y, 0.75);
    }

    #[test]
    fn origin_scenario() {
        let noise = Perlin::new(2025);
        let params = OctaveParams::new(1, 0.0, 0.1);
        assert_eq!(fractal_sample(&noise, 0.0, &params), noise.get1(0.0));
    }

    #[test]
    fn constant_noise_scenario() {
        let params = OctaveParams::new(3, 1.0, 0.5);
        assert_eq!(fractal_sample(&Constant(0.5), 5.0, &params), 0.875);
    }

    #[test]
    fn map_linear_endpoints() {
        assert_eq!(map_linear(0.0, 0.0, 1.0, 0.0, 600.0), 0.0);
        assert_eq!(map_linear(1.0, 0.0, 1.0, 0.0, 600.0), 600.0);
        assert_eq!(map_linear(0.5, 0.0, 1.0, 0.0, 600.0), 300.0);
        // No clamping on its own
        assert_eq!(map_linear(2.0, 0.0, 1.0, 0.0, 600.0), 1200.0);
        assert_eq!(map_linear(5.0, 0.0, 10.0, 100.0, 0.0), 50.0);
    }

    #[test]
    fn constrain_bounds() {
        assert_eq!(constrain(-3.0, 0.0, 255.0), 0.0);
        assert_eq!(constrain(300.0, 0.0, 255.0), 255.0);
        assert_eq!(constrain(12.5, 0.0, 255.0), 12.5);
    }

    #[test]
    fn display_y_always_on_screen() {
        let out_max = 600.0;
        for &raw in &[
            -1e9,
            -2.0,
            -0.0001,
            0.0,
            0.25,
            0.999,
            1.0,
            1.75,
            42.0,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NAN,
        ] {
            let y = display_y(raw, out_max);
            assert!((0.0..=out_max).contains(&y), "raw {} gave {}", raw, y);
        }
    }

    #[test]
    fn display_y_saturates_instead_of_rescaling() {
        // Two different sums above 1 collapse onto the same row
        assert_eq!(display_y(1.2, 600.0), 600.0);
        assert_eq!(display_y(1.9, 600.0), 600.0);
        assert_eq!(display_y(0.875, 600.0), 525.0);
    }

    #[test]
    fn params_default_match_slider_defaults() {
        let p = OctaveParams::default();
        assert_eq!(p, OctaveParams::new(4, 0.0, 0.1));
    }
}
