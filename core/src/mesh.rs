use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use glam::Vec3;
use log::debug;

use crate::error::SketchError;
use crate::heightmap::{TerrainRegion, region_colour};
use crate::utils::HeightMap2D;

// Vertical exaggeration applied to [0, 1] heights
pub const DEFAULT_HEIGHT_SCALE: f32 = 100.0;

// Triangle mesh over a height map grid, one vertex per cell
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TerrainMesh {
    pub positions: Vec<[f32; 3]>,
    // Region colour per vertex, channels in [0, 1]
    pub colours: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    // Wavefront OBJ with per-vertex colours after the position
    pub fn write_obj<W: Write>(&self, mut out: W) -> Result<(), SketchError> {
        writeln!(out, "# terrain mesh")?;
        for (p, c) in self.positions.iter().zip(&self.colours) {
            writeln!(
                out,
                "v {} {} {} {:.4} {:.4} {:.4}",
                p[0], p[1], p[2], c[0], c[1], c[2]
            )?;
        }
        for n in &self.normals {
            writeln!(out, "vn {:.6} {:.6} {:.6}", n[0], n[1], n[2])?;
        }
        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
            writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}")?;
        }
        out.flush()?;
        Ok(())
    }

    pub fn save_obj<P: AsRef<Path>>(&self, path: P) -> Result<(), SketchError> {
        let file = File::create(path.as_ref())?;
        self.write_obj(BufWriter::new(file))?;
        debug!(
            "wrote {} ({} vertices, {} triangles)",
            path.as_ref().display(),
            self.vertex_count(),
            self.triangle_count()
        );
        Ok(())
    }
}

pub fn terrain_mesh(
    map: &HeightMap2D,
    regions: &[TerrainRegion],
    height_scale: f32,
) -> Result<TerrainMesh, SketchError> {
    let height = map.len();
    let width = map.first().map_or(0, |row| row.len());
    if width == 0 {
        return Err(SketchError::EmptyMap);
    }
    if let Some((row, r)) = map.iter().enumerate().find(|(_, r)| r.len() != width) {
        return Err(SketchError::RaggedMap {
            row,
            expected: width,
            found: r.len(),
        });
    }

    let mut positions = Vec::with_capacity(width * height);
    let mut colours = Vec::with_capacity(width * height);
    for (y, row) in map.iter().enumerate() {
        for (x, &h) in row.iter().enumerate() {
            positions.push([x as f32, h * height_scale, y as f32]);
            let colour = region_colour(h, regions).unwrap_or([0, 0, 0]);
            colours.push(colour.map(|c| c as f32 / 255.0));
        }
    }

    let mut indices = Vec::with_capacity(6 * (width - 1) * height.saturating_sub(1));
    for y in 0..height.saturating_sub(1) {
        for x in 0..width - 1 {
            let top_left = (y * width + x) as u32;
            let top_right = top_left + 1;
            let bottom_left = top_left + width as u32;
            let bottom_right = bottom_left + 1;

            indices.extend_from_slice(&[
                top_left,
                bottom_left,
                top_right,
                top_right,
                bottom_left,
                bottom_right,
            ]);
        }
    }

    let normals = vertex_normals(&positions, &indices);
    debug!(
        "built {}x{} terrain mesh, {} triangles",
        width,
        height,
        indices.len() / 3
    );
    Ok(TerrainMesh {
        positions,
        colours,
        normals,
        indices,
    })
}

// Area-weighted sum of the face normals around each vertex
fn vertex_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut acc = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| i as usize);
        let (va, vb, vc) = (
            Vec3::from(positions[a]),
            Vec3::from(positions[b]),
            Vec3::from(positions[c]),
        );
        let face = (vc - vb).cross(va - vb);
        acc[a] += face;
        acc[b] += face;
        acc[c] += face;
    }
    acc.into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y).to_array())
        .collect()
}
