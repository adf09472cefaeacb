use sketch_core::canvas::{BLACK, WHITE};
use sketch_core::noise_graph::{GRAPH_HEIGHT, GRAPH_INCREMENT, GRAPH_WIDTH};
use sketch_core::sketch::create_canvas;
use sketch_core::{
    CircleGrid, FieldControls, GraphControls, NoiseField, NoiseGenerator, NoiseGraph,
    OctaveParams, Perlin, Sketch, SketchKind, display_y, fractal_sample, run_frames,
};

struct Half;

impl NoiseGenerator for Half {
    fn get3(&self, _x: f64, _y: f64, _z: f64) -> f64 {
        0.5
    }
}

#[test]
fn graph_follows_sliders_frame_by_frame() {
    let controls = GraphControls::default();
    let mut graph = NoiseGraph::new(7);
    let mut canvas = create_canvas(&graph).unwrap();
    graph.setup(&mut canvas);

    // A UI layer hands back raw values each frame
    let inputs = [(4.0, 0.0, 0.1), (6.2, 2.04, 0.55), (1.0, 3.3, 0.0)];
    for (k, &(o, l, p)) in inputs.iter().enumerate() {
        let params = controls.read(o, l, p);
        graph.set_params(params);
        let expected: Vec<f32> = (0..GRAPH_WIDTH)
            .map(|x| {
                let xoff = graph.cursor().offset(x as u64);
                display_y(fractal_sample(graph.noise(), xoff, &params), GRAPH_HEIGHT as f64) as f32
            })
            .collect();
        let got: Vec<f32> = graph.points().iter().map(|p| p.1).collect();
        assert_eq!(got, expected);

        graph.draw(&mut canvas);
        assert_eq!(graph.cursor().value(), 0.0 + (k as u64 + 1) as f64 * GRAPH_INCREMENT);
    }
    assert_eq!(graph.frame_count(), 3);
}

#[test]
fn graph_with_constant_noise_draws_flat_line() {
    let mut graph = NoiseGraph::with_noise(Half);
    graph.set_params(OctaveParams::new(3, 1.0, 0.5));
    let canvas = run_frames(&mut graph, 2).unwrap();
    // 0.875 of the height
    let row = (0.875 * GRAPH_HEIGHT as f64) as u32;
    for x in [0, 150, 300, 599] {
        assert_eq!(canvas.get(x, row), Some(WHITE));
        assert_eq!(canvas.get(x, 100), Some(BLACK));
    }
}

#[test]
fn graph_values_stay_on_canvas_for_any_sliders() {
    let controls = GraphControls::default();
    let noise = Perlin::new(1);
    for octaves in 1..=10 {
        for l in 0..=40 {
            let params = controls.read(octaves as f64, l as f64 * 0.1, 1.0);
            for i in 0..50 {
                let y = display_y(fractal_sample(&noise, i as f64 * 0.37, &params), 600.0);
                assert!((0.0..=600.0).contains(&y));
            }
        }
    }
}

#[test]
fn field_slider_moves_the_view() {
    let controls = FieldControls::default();
    let mut field = NoiseField::new(3).with_size(64, 64);
    field.set_params(controls.read(0.0));
    let a = run_frames(&mut field, 1).unwrap();
    field.set_params(controls.read(5.0));
    let b = run_frames(&mut field, 1).unwrap();
    assert_ne!(a.pixels(), b.pixels());
}

#[test]
fn circle_grid_fully_faded_after_255_frames() {
    let mut grid = CircleGrid::new(100, 100);
    run_frames(&mut grid, 255).unwrap();
    assert!(grid.circles().iter().all(|c| c.alpha == 255 && c.visible));
    assert_eq!(grid.grid_alpha(), 255);
}

#[test]
fn every_kind_has_a_matching_sketch() {
    let names: Vec<&str> = vec![
        CircleGrid::default().name(),
        NoiseGraph::new(0).name(),
        NoiseField::new(0).name(),
    ];
    for (kind, name) in SketchKind::ALL.iter().zip(names) {
        assert_eq!(kind.as_str(), name);
    }
}
