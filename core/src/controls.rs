// Slider declarations for the interactive sketches.
//
// A `Slider` is plain data: the UI layer renders it however it likes and
// hands the raw value back once per frame. `snap` applies the same rules as a
// stepped range input, so values from any source end up on the declared grid.

use serde::{Deserialize, Serialize};

use crate::fbm::OctaveParams;
use crate::noise_field::FieldParams;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slider {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl Slider {
    pub const fn new(min: f64, max: f64, default: f64, step: f64) -> Self {
        Self {
            min,
            max,
            step,
            default,
        }
    }

    // Clamp into range, then round to the nearest step above `min`.
    // Non-finite input falls back to the default.
    pub fn snap(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.default;
        }
        let clamped = value.min(self.max).max(self.min);
        if self.step <= 0.0 {
            return clamped;
        }
        let k = ((clamped - self.min) / self.step).round();
        (self.min + k * self.step).min(self.max).max(self.min)
    }

    pub fn range(&self) -> std::ops::RangeInclusive<f64> {
        self.min..=self.max
    }
}

// Octaves, lacunarity and persistence inputs of the noise graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphControls {
    pub octaves: Slider,
    pub lacunarity: Slider,
    pub persistence: Slider,
}

impl Default for GraphControls {
    fn default() -> Self {
        Self {
            octaves: Slider::new(1.0, 10.0, 4.0, 1.0),
            lacunarity: Slider::new(0.0, 4.0, 0.0, 0.1),
            persistence: Slider::new(0.0, 1.0, 0.1, 0.1),
        }
    }
}

impl GraphControls {
    pub fn defaults(&self) -> OctaveParams {
        self.read(
            self.octaves.default,
            self.lacunarity.default,
            self.persistence.default,
        )
    }

    // Turn raw widget values into sampler parameters.
    pub fn read(&self, octaves: f64, lacunarity: f64, persistence: f64) -> OctaveParams {
        OctaveParams {
            octaves: self.octaves.snap(octaves).round() as u32,
            lacunarity: self.lacunarity.snap(lacunarity),
            persistence: self.persistence.snap(persistence),
        }
    }

    // Re-snap parameters that did not come from the widgets.
    pub fn sanitize(&self, params: &OctaveParams) -> OctaveParams {
        self.read(
            params.octaves as f64,
            params.lacunarity,
            params.persistence,
        )
    }
}

// Scroll offset input of the noise field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldControls {
    pub offset: Slider,
}

impl Default for FieldControls {
    fn default() -> Self {
        Self {
            offset: Slider::new(0.0, 10.0, 0.0, 0.01),
        }
    }
}

impl FieldControls {
    pub fn read(&self, offset: f64) -> FieldParams {
        FieldParams {
            offset: self.offset.snap(offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldControls, GraphControls, Slider};
    use crate::fbm::OctaveParams;

    #[test]
    fn slider_clamps() {
        let s = Slider::new(1.0, 10.0, 4.0, 1.0);
        assert_eq!(s.snap(-5.0), 1.0);
        assert_eq!(s.snap(99.0), 10.0);
        assert_eq!(s.snap(f64::NAN), 4.0);
    }

    #[test]
    fn slider_rounds_to_step() {
        let s = Slider::new(0.0, 4.0, 0.0, 0.1);
        assert_eq!(s.snap(0.14), 0.1);
        assert_eq!(s.snap(0.16), 0.2);
        let whole = Slider::new(1.0, 10.0, 4.0, 1.0);
        assert_eq!(whole.snap(3.6), 4.0);
    }

    #[test]
    fn slider_without_step_is_continuous() {
        let s = Slider::new(0.0, 1.0, 0.5, 0.0);
        assert_eq!(s.snap(0.123), 0.123);
    }

    #[test]
    fn graph_defaults() {
        let c = GraphControls::default();
        assert_eq!(c.defaults(), OctaveParams::new(4, 0.0, 0.1));
    }

    #[test]
    fn graph_read_snaps_all_three() {
        let c = GraphControls::default();
        let p = c.read(12.0, -1.0, 0.97);
        assert_eq!(p.octaves, 10);
        assert_eq!(p.lacunarity, 0.0);
        assert_eq!(p.persistence, 1.0);
    }

    #[test]
    fn graph_sanitize_lifts_zero_octaves() {
        let c = GraphControls::default();
        let p = c.sanitize(&OctaveParams::new(0, 2.0, 0.5));
        assert_eq!(p.octaves, 1);
    }

    #[test]
    fn field_read() {
        let c = FieldControls::default();
        assert_eq!(c.read(11.0).offset, 10.0);
        assert_eq!(c.read(-1.0).offset, 0.0);
    }
}
