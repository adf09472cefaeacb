use sketch_core::{NoiseGenerator, OctaveParams, Perlin, display_y, fractal_sample};

fn main() {
    let noise = Perlin::new(2025);

    // Print raw sums and screen rows for a few octave settings
    let settings = [
        OctaveParams::new(1, 0.0, 0.1),
        OctaveParams::new(4, 0.0, 0.1),
        OctaveParams::new(4, 2.0, 0.5),
        OctaveParams::new(8, 2.0, 0.5),
    ];

    println!(
        "{:>6} {:>8} | {:>8} {:>8} {:>8} {:>8}",
        "x", "noise", "o1", "o4 l0", "o4 l2", "o8 l2"
    );
    for i in 0..16 {
        let x = i as f64 * 0.25;
        print!("{:>6.2} {:>8.4} |", x, noise.get1(x));
        for params in &settings {
            let y = fractal_sample(&noise, x, params);
            print!(" {:>8.4}", y);
        }
        println!();
    }

    println!();
    println!("rows on a 600px canvas:");
    for params in &settings {
        let rows: Vec<String> = (0..8)
            .map(|i| {
                let y = fractal_sample(&noise, i as f64 * 0.5, params);
                format!("{:>5.0}", display_y(y, 600.0))
            })
            .collect();
        println!("{:?}: {}", params, rows.join(" "));
    }
}
