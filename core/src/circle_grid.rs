use crate::canvas::{Canvas, gray, gray_alpha};
use crate::sketch::Sketch;

pub const GRID_WIDTH: u32 = 600;
pub const GRID_HEIGHT: u32 = 600;
// Distance between grid lines and between circle centres
pub const CELL: u32 = 20;
pub const CIRCLE_DIAMETER: f32 = 10.0;
pub const CIRCLE_FADE_SPEED: u8 = 1;
pub const GRID_FADE_SPEED: u8 = 5;
pub const MAX_ALPHA: u8 = 255;
const BACKGROUND: u8 = 169;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub alpha: u8,
    pub visible: bool,
}

impl Circle {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            alpha: 0,
            visible: false,
        }
    }

    pub fn update(&mut self) {
        self.visible = true;
        if self.alpha < MAX_ALPHA {
            self.alpha = self.alpha.saturating_add(CIRCLE_FADE_SPEED).min(MAX_ALPHA);
        }
    }

    pub fn show(&self, canvas: &mut Canvas) {
        if self.visible {
            canvas.fill(gray_alpha(BACKGROUND, self.alpha));
            canvas.stroke(gray_alpha(0, self.alpha));
            canvas.ellipse(self.x, self.y, CIRCLE_DIAMETER, CIRCLE_DIAMETER);
        }
    }
}

// A grid of lines and circles that fade in from nothing
pub struct CircleGrid {
    width: u32,
    height: u32,
    circles: Vec<Circle>,
    grid_alpha: u8,
    frames: u64,
}

impl Default for CircleGrid {
    fn default() -> Self {
        Self::new(GRID_WIDTH, GRID_HEIGHT)
    }
}

impl CircleGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            circles: Vec::new(),
            grid_alpha: 0,
            frames: 0,
        }
    }

    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    pub fn grid_alpha(&self) -> u8 {
        self.grid_alpha
    }

    fn draw_grid(&mut self, canvas: &mut Canvas) {
        canvas.stroke(gray_alpha(0, self.grid_alpha));
        canvas.stroke_weight(1.0);

        let (w, h) = (self.width as f32, self.height as f32);
        for x in (0..=self.width).step_by(CELL as usize) {
            canvas.line(x as f32, 0.0, x as f32, h);
        }
        for y in (0..=self.height).step_by(CELL as usize) {
            canvas.line(0.0, y as f32, w, y as f32);
        }

        if self.grid_alpha < MAX_ALPHA {
            self.grid_alpha = self.grid_alpha.saturating_add(GRID_FADE_SPEED).min(MAX_ALPHA);
        }
    }
}

impl Sketch for CircleGrid {
    fn name(&self) -> &'static str {
        "circle-grid"
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn setup(&mut self, _canvas: &mut Canvas) {
        let half = CELL / 2;
        let height = self.height;
        self.circles = (half..self.width)
            .step_by(CELL as usize)
            .flat_map(|a| {
                (half..height)
                    .step_by(CELL as usize)
                    .map(move |b| Circle::new(a as f32, b as f32))
            })
            .collect();
        log::debug!("circle grid holds {} circles", self.circles.len());
    }

    fn draw(&mut self, canvas: &mut Canvas) {
        canvas.background(gray(BACKGROUND));

        self.draw_grid(canvas);

        for circle in &mut self.circles {
            circle.update();
            circle.show(canvas);
        }
        self.frames += 1;
    }

    fn frame_count(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::{Circle, CircleGrid, MAX_ALPHA};
    use crate::sketch::{Sketch, run_frames};

    #[test]
    fn circle_count() {
        let mut g = CircleGrid::default();
        run_frames(&mut g, 0).unwrap();
        assert_eq!(g.circles().len(), 900);
        assert_eq!(g.circles()[0].x, 10.0);
        assert_eq!(g.circles()[0].y, 10.0);
        assert_eq!(g.circles()[1].y, 30.0);
        assert!(g.circles().iter().all(|c| !c.visible && c.alpha == 0));
    }

    #[test]
    fn circle_fades_and_saturates() {
        let mut c = Circle::new(0.0, 0.0);
        c.update();
        assert!(c.visible);
        assert_eq!(c.alpha, 1);
        for _ in 0..400 {
            c.update();
        }
        assert_eq!(c.alpha, MAX_ALPHA);
    }

    #[test]
    fn grid_alpha_steps_by_five() {
        let mut g = CircleGrid::new(60, 60);
        run_frames(&mut g, 3).unwrap();
        assert_eq!(g.grid_alpha(), 15);
        assert_eq!(g.circles()[0].alpha, 3);
    }

    #[test]
    fn grid_alpha_caps() {
        let mut g = CircleGrid::new(40, 40);
        run_frames(&mut g, 60).unwrap();
        assert_eq!(g.grid_alpha(), MAX_ALPHA);
        assert_eq!(g.frame_count(), 60);
    }

    #[test]
    fn first_frame_grid_is_invisible() {
        // Lines are drawn with the alpha from before the increment
        let mut g = CircleGrid::new(40, 40);
        let canvas = run_frames(&mut g, 1).unwrap();
        assert_eq!(canvas.get(0, 5).unwrap().0, [169, 169, 169, 255]);
    }

    #[test]
    fn lines_darken_over_time() {
        let mut g = CircleGrid::new(40, 40);
        let canvas = run_frames(&mut g, 60).unwrap();
        // Column 0 sits on a fully opaque grid line after the fade
        assert_eq!(canvas.get(0, 5).unwrap().0, [0, 0, 0, 255]);
    }
}
