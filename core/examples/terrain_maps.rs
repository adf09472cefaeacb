// Generates and saves four 256×256 maps:
// Plain noise map (grayscale)
// Octave height map (grayscale and region colours)
// Island height map (region colours, smooth gradient)
// plus the island as an OBJ terrain mesh

use anyhow::{Context, Result};
use log::info;
use sketch_core::heightmap::{
    MapGenerator, NoiseMap, colour_map, default_regions, gradient_map, to_gray_image,
};
use sketch_core::mesh::{DEFAULT_HEIGHT_SCALE, terrain_mesh};

fn main() -> Result<()> {
    env_logger::init();

    let size = 256;
    let seed = 2025;

    // 1) Plain noise map
    let plain = NoiseMap {
        width: size,
        height: size,
        noise_scale: 50.0,
    }
    .generate(seed)?;
    to_gray_image(&plain)
        .save("noise_map.png")
        .context("saving noise_map.png")?;
    info!("Saved noise_map.png");

    // 2) Octave height map
    let generator = MapGenerator {
        width: size,
        height: size,
        noise_scale: 50.0,
        seed,
        ..Default::default()
    };
    let heights = generator.generate()?;
    to_gray_image(&heights)
        .save("height_map.png")
        .context("saving height_map.png")?;
    colour_map(&heights, &default_regions())
        .save("height_map_regions.png")
        .context("saving height_map_regions.png")?;
    info!("Saved height_map.png and height_map_regions.png");

    // 3) Island
    let island = generator.generate_island()?;
    colour_map(&island, &default_regions())
        .save("island_regions.png")
        .context("saving island_regions.png")?;
    gradient_map(&island)
        .save("island_gradient.png")
        .context("saving island_gradient.png")?;
    info!("Saved island_regions.png and island_gradient.png");

    // 4) Island mesh
    let mesh = terrain_mesh(&island, &default_regions(), DEFAULT_HEIGHT_SCALE)?;
    mesh.save_obj("island.obj").context("saving island.obj")?;
    info!(
        "Saved island.obj ({} vertices, {} triangles)",
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    Ok(())
}
