use std::time::{Duration, Instant};

use eframe::{App, Frame, egui};
use egui::{ColorImage, TextureHandle, TextureOptions};
use image::RgbaImage;
use log::{info, warn};
use sketch_core::heightmap::{MapGenerator, colour_map, default_regions, gradient_map};
use sketch_core::mesh::{DEFAULT_HEIGHT_SCALE, terrain_mesh};
use sketch_core::utils::HeightMap2D;
use sketch_core::{
    Canvas, CircleGrid, FieldControls, GraphControls, NoiseField, NoiseGraph, Sketch, SketchKind,
    Slider,
};

use crate::config::AppConfig;

pub struct SketchApp {
    config: AppConfig,
    kind: SketchKind,

    // sketches, recreated when switching
    circle_grid: CircleGrid,
    graph: NoiseGraph,
    field: NoiseField,
    canvas: Option<Canvas>,

    // raw widget values, snapped through the controls once per frame
    graph_controls: GraphControls,
    field_controls: FieldControls,
    octaves: f64,
    lacunarity: f64,
    persistence: f64,
    offset: f64,

    paused: bool,
    texture: Option<TextureHandle>,
    last_frame_ms: Option<f32>,
    status_message: String,

    // height map window
    show_map: bool,
    island: bool,
    smooth: bool,
    map: MapGenerator,
    map_heights: Option<HeightMap2D>,
    map_image: Option<RgbaImage>,
    map_texture: Option<TextureHandle>,
}

impl SketchApp {
    pub fn new(config: AppConfig) -> Self {
        let graph_controls = GraphControls::default();
        let field_controls = FieldControls::default();
        let graph_params = graph_controls.sanitize(&config.graph);
        let field_params = field_controls.read(config.field.offset);

        let mut app = Self {
            kind: config.sketch,
            circle_grid: CircleGrid::default(),
            graph: NoiseGraph::new(config.seed),
            field: NoiseField::new(config.seed),
            canvas: None,
            graph_controls,
            field_controls,
            octaves: graph_params.octaves as f64,
            lacunarity: graph_params.lacunarity,
            persistence: graph_params.persistence,
            offset: field_params.offset,
            paused: false,
            texture: None,
            last_frame_ms: None,
            status_message: String::new(),
            show_map: false,
            island: true,
            smooth: false,
            map: config.map,
            map_heights: None,
            map_image: None,
            map_texture: None,
            config,
        };
        app.restart();
        app
    }

    fn active(&self) -> &dyn Sketch {
        match self.kind {
            SketchKind::CircleGrid => &self.circle_grid,
            SketchKind::NoiseGraph => &self.graph,
            SketchKind::NoiseField => &self.field,
        }
    }

    // Fresh sketch state and canvas, then `setup`
    fn restart(&mut self) {
        let seed = self.config.seed;
        match self.kind {
            SketchKind::CircleGrid => self.circle_grid = CircleGrid::default(),
            SketchKind::NoiseGraph => self.graph = NoiseGraph::new(seed),
            SketchKind::NoiseField => self.field = NoiseField::new(seed),
        }
        self.texture = None;
        self.canvas = match sketch_core::sketch::create_canvas(self.active()) {
            Ok(canvas) => Some(canvas),
            Err(e) => {
                self.status_message = format!("Canvas error: {}", e);
                None
            }
        };
        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };
        match self.kind {
            SketchKind::CircleGrid => self.circle_grid.setup(canvas),
            SketchKind::NoiseGraph => self.graph.setup(canvas),
            SketchKind::NoiseField => self.field.setup(canvas),
        }
        info!("Started {}", self.kind);
    }

    // One tick of the frame clock
    fn step(&mut self) {
        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };
        let start = Instant::now();
        match self.kind {
            SketchKind::CircleGrid => self.circle_grid.draw(canvas),
            SketchKind::NoiseGraph => {
                let params = self
                    .graph_controls
                    .read(self.octaves, self.lacunarity, self.persistence);
                self.graph.set_params(params);
                self.graph.draw(canvas);
            }
            SketchKind::NoiseField => {
                self.field.set_params(self.field_controls.read(self.offset));
                self.field.draw(canvas);
            }
        }
        self.last_frame_ms = Some(start.elapsed().as_secs_f32() * 1000.0);
    }

    fn upload(&mut self, ctx: &egui::Context) {
        let Some(canvas) = &self.canvas else {
            return;
        };
        let size = [canvas.width() as usize, canvas.height() as usize];
        let image = ColorImage::from_rgba_unmultiplied(size, canvas.pixels());
        match &mut self.texture {
            Some(tex) => tex.set(image, TextureOptions::NEAREST),
            None => {
                self.texture = Some(ctx.load_texture("sketch", image, TextureOptions::NEAREST))
            }
        }
    }

    fn save_frame(&mut self) {
        let Some(canvas) = &self.canvas else {
            return;
        };
        let name = format!("{}_{}.png", self.kind, self.active().frame_count());
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name(name.as_str())
            .save_file()
        else {
            return;
        };
        self.status_message = match canvas.save_png(&path) {
            Ok(()) => format!("Saved {}", path.display()),
            Err(e) => {
                warn!("saving {} failed: {}", path.display(), e);
                format!("Save error: {}", e)
            }
        };
    }

    fn slider(ui: &mut egui::Ui, label: &str, value: &mut f64, decl: &Slider) {
        ui.label(label);
        ui.add(egui::Slider::new(value, decl.range()).step_by(decl.step));
    }

    fn generate_map(&mut self, ctx: &egui::Context) {
        let start = Instant::now();
        let result = if self.island {
            self.map.generate_island()
        } else {
            self.map.generate()
        };
        match result {
            Ok(heights) => {
                let img = if self.smooth {
                    image::DynamicImage::ImageRgb8(gradient_map(&heights)).into_rgba8()
                } else {
                    colour_map(&heights, &default_regions())
                };
                let size = [img.width() as usize, img.height() as usize];
                let color_image = ColorImage::from_rgba_unmultiplied(size, img.as_raw());
                self.map_texture =
                    Some(ctx.load_texture("height-map", color_image, TextureOptions::NEAREST));
                self.map_image = Some(img);
                self.map_heights = Some(heights);
                self.status_message = format!(
                    "Height map in {:.2} ms (seed {})",
                    start.elapsed().as_secs_f32() * 1000.0,
                    self.map.seed
                );
            }
            Err(e) => self.status_message = format!("Height map error: {}", e),
        }
    }

    fn save_map(&mut self) {
        let Some(img) = &self.map_image else {
            return;
        };
        let filename = format!("height_map_{}.png", self.map.seed);
        self.status_message = match img.save(&filename) {
            Ok(()) => format!("Saved {}", filename),
            Err(e) => format!("Save error: {}", e),
        };
    }

    fn save_mesh(&mut self) {
        let Some(heights) = &self.map_heights else {
            return;
        };
        let filename = format!("terrain_{}.obj", self.map.seed);
        let result = terrain_mesh(heights, &default_regions(), DEFAULT_HEIGHT_SCALE)
            .and_then(|mesh| mesh.save_obj(&filename));
        self.status_message = match result {
            Ok(()) => format!("Saved {}", filename),
            Err(e) => {
                warn!("saving {} failed: {}", filename, e);
                format!("Save error: {}", e)
            }
        };
    }

    fn map_window(&mut self, ctx: &egui::Context) {
        let mut open = self.show_map;
        egui::Window::new("Height map")
            .open(&mut open)
            .default_width(420.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Seed");
                    ui.add(egui::DragValue::new(&mut self.map.seed).speed(1.0));
                });
                ui.add(egui::Slider::new(&mut self.map.noise_scale, 1.0..=300.0).text("Scale"));
                ui.add(egui::Slider::new(&mut self.map.octaves, 1..=8).text("Octaves"));
                ui.add(egui::Slider::new(&mut self.map.persistence, 0.0..=1.0).text("Persistence"));
                ui.add(egui::Slider::new(&mut self.map.lacunarity, 1.0..=4.0).text("Lacunarity"));
                ui.checkbox(&mut self.island, "Island falloff");
                ui.checkbox(&mut self.smooth, "Smooth colours");
                ui.horizontal(|ui| {
                    if ui.button("Generate").clicked() {
                        self.generate_map(ctx);
                    }
                    if ui.button("Save PNG").clicked() {
                        self.save_map();
                    }
                    if ui.button("Save OBJ").clicked() {
                        self.save_mesh();
                    }
                });
                if let Some(tex) = &self.map_texture {
                    let side = ui.available_width().min(400.0);
                    ui.image((tex.id(), egui::vec2(side, side)));
                }
            });
        self.show_map = open;
    }
}

impl App for SketchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::SidePanel::left("controls").show(ctx, |ui| {
            ui.heading("Noise Sketches");
            ui.separator();

            let previous = self.kind;
            egui::ComboBox::from_label("Sketch")
                .selected_text(self.kind.as_str())
                .show_ui(ui, |ui| {
                    for kind in SketchKind::ALL {
                        ui.selectable_value(&mut self.kind, kind, kind.as_str());
                    }
                });
            if previous != self.kind {
                self.restart();
            }

            ui.separator();
            match self.kind {
                SketchKind::CircleGrid => {
                    ui.label("Grid and circles fade in from the background.");
                }
                SketchKind::NoiseGraph => {
                    let controls = self.graph_controls;
                    Self::slider(ui, "Octaves", &mut self.octaves, &controls.octaves);
                    Self::slider(ui, "Lacunarity", &mut self.lacunarity, &controls.lacunarity);
                    Self::slider(ui, "Persistence", &mut self.persistence, &controls.persistence);
                    ui.label(format!("Start {:.2}", self.graph.cursor().value()));
                }
                SketchKind::NoiseField => {
                    let controls = self.field_controls;
                    Self::slider(ui, "Offset", &mut self.offset, &controls.offset);
                }
            }

            ui.separator();
            ui.checkbox(&mut self.paused, "Pause");
            ui.horizontal(|ui| {
                if ui.button("Restart").clicked() {
                    self.restart();
                }
                if ui.button("Save PNG…").clicked() {
                    self.save_frame();
                }
            });
            if ui.button("Height map…").clicked() {
                self.show_map = true;
            }

            ui.separator();
            ui.label(format!("Frame {}", self.active().frame_count()));
            if let Some(ms) = self.last_frame_ms {
                ui.label(format!("Draw {:.2} ms", ms));
            }
            ui.label(&self.status_message);
        });

        if !self.paused {
            self.step();
            self.upload(ctx);
        } else if self.texture.is_none() {
            self.upload(ctx);
        }

        egui::CentralPanel::default().show(ctx, |ui| match (&self.texture, &self.canvas) {
            (Some(tex), Some(canvas)) => {
                let (w, h) = (canvas.width() as f32, canvas.height() as f32);
                let available = ui.available_size();
                let scale = (available.x / w).min(available.y / h).min(1.0);
                ui.image((tex.id(), egui::vec2(w * scale, h * scale)));
            }
            _ => {
                ui.centered_and_justified(|ui| {
                    ui.label("No canvas");
                });
            }
        });

        if self.show_map {
            self.map_window(ctx);
        }

        let fps = self.config.fps.max(1.0);
        ctx.request_repaint_after(Duration::from_secs_f32(1.0 / fps));
    }
}
