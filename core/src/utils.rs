use log::debug;

// 2D height map: row‐major Vec<Vec<f32>>
// access as `map[y][x]`.
pub type HeightMap2D = Vec<Vec<f32>>;

// flatten a 2D height map (row‐major) into a single Vec<f32>
// For converting to an image buffer or a texture upload
pub fn flatten2(map: &HeightMap2D) -> Vec<f32> {
    map.iter().flat_map(|row| row.iter().cloned()).collect()
}

// Smallest and largest value, or None for an empty map
pub fn bounds2(map: &HeightMap2D) -> Option<(f32, f32)> {
    map.iter().flatten().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

// Rescale in place so the map spans exactly [0, 1].
// A flat map has no range to stretch and becomes 0.5 everywhere.
pub fn normalize2(map: &mut HeightMap2D) {
    let Some((min, max)) = bounds2(map) else {
        return;
    };
    debug!("normalising height map: min={:.4} max={:.4}", min, max);

    let range = max - min;
    for val in map.iter_mut().flatten() {
        *val = if range > f32::EPSILON {
            (*val - min) / range
        } else {
            0.5
        };
    }
}

#[cfg(test)]
mod tests {
    use super::{bounds2, flatten2, normalize2};

    #[test]
    fn flatten_row_major() {
        let map = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        assert_eq!(flatten2(&map), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn bounds_of_empty_map() {
        assert_eq!(bounds2(&Vec::new()), None);
        assert_eq!(bounds2(&vec![vec![-1.0, 3.0], vec![0.5, 2.0]]), Some((-1.0, 3.0)));
    }

    #[test]
    fn normalize_spans_unit_range() {
        let mut map = vec![vec![-2.0, 0.0], vec![1.0, 6.0]];
        normalize2(&mut map);
        assert_eq!(map, vec![vec![0.0, 0.25], vec![0.375, 1.0]]);
    }

    #[test]
    fn normalize_flat_map() {
        let mut map = vec![vec![3.0; 4]; 4];
        normalize2(&mut map);
        assert!(map.iter().flatten().all(|&v| v == 0.5));
    }
}
