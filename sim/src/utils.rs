use crate::heightfield::HeightField;

const GAMMA_CORRECTION: f32 = 1.2;
const WATER_THRESHOLD: f32 = 0.3;
const SAND_THRESHOLD: f32 = 0.4;
const GRASS_THRESHOLD: f32 = 0.6;
const ROCK_THRESHOLD: f32 = 0.8;

// Flatten a height field into a single Vec<f32>, one row per z index, for
// image buffers and the viewer's top-down texture
pub fn flatten(field: &HeightField) -> Vec<f32> {
    let n = field.size();
    let mut flat = Vec::with_capacity(n * n);
    for iz in 0..n {
        for ix in 0..n {
            flat.push(field.get(ix, iz));
        }
    }
    flat
}

// Min/max-normalize heights into [0,1] for display, with a gamma curve for
// contrast
pub fn normalize(values: &mut [f32]) {
    let mut min = f32::MAX;
    let mut max = f32::MIN;
    for &v in values.iter() {
        min = min.min(v);
        max = max.max(v);
    }

    let range = (max - min).max(0.001); // prevent zero-division
    for v in values.iter_mut() {
        *v = (*v - min) / range;
        *v = v.powf(GAMMA_CORRECTION);
    }
}

// Linearly interpolate between two RGB triples
fn lerp_color(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    [
        (a[0] as f32 + (b[0] as f32 - a[0] as f32) * t) as u8,
        (a[1] as f32 + (b[1] as f32 - a[1] as f32) * t) as u8,
        (a[2] as f32 + (b[2] as f32 - a[2] as f32) * t) as u8,
    ]
}

// Map a normalized height in [0.0, 1.0] to a terrain color
fn height_to_rgb(h: f32) -> [u8; 3] {
    match h {
        x if x < WATER_THRESHOLD => {
            let t = x / WATER_THRESHOLD;
            lerp_color([0, 0, 128], [0, 128, 255], t) // deep to shallow water
        }
        x if x < SAND_THRESHOLD => {
            let t = (x - WATER_THRESHOLD) / (SAND_THRESHOLD - WATER_THRESHOLD);
            lerp_color([194, 178, 128], [220, 200, 160], t) // sand
        }
        x if x < GRASS_THRESHOLD => {
            let t = (x - SAND_THRESHOLD) / (GRASS_THRESHOLD - SAND_THRESHOLD);
            lerp_color([34, 139, 34], [50, 205, 50], t) // grass
        }
        x if x < ROCK_THRESHOLD => {
            let t = (x - GRASS_THRESHOLD) / (ROCK_THRESHOLD - GRASS_THRESHOLD);
            lerp_color([128, 128, 128], [192, 192, 192], t) // rock
        }
        x => {
            let t = (x - ROCK_THRESHOLD) / (1.0 - ROCK_THRESHOLD);
            lerp_color([220, 220, 220], [255, 255, 255], t) // snow
        }
    }
}

// Convert normalized heights into an RGB byte buffer
pub fn to_terrain_image(flat: &[f32]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(flat.len() * 3);
    for &h in flat {
        let [r, g, b] = height_to_rgb(h);
        buf.extend_from_slice(&[r, g, b]);
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::{flatten, normalize, to_terrain_image};
    use crate::heightfield::HeightField;

    #[test]
    fn flatten_is_row_major_over_z() {
        let mut field = HeightField::new(4);
        field.set(3, 0, 0.9); // last column of the first image row
        let flat = flatten(&field);
        assert_eq!(flat.len(), 16);
        assert_eq!(flat[3], 0.9);
    }

    #[test]
    fn normalize_spans_unit_range() {
        let mut values = vec![0.5, 1.0, 1.5, 2.0];
        normalize(&mut values);
        assert_eq!(values[0], 0.0);
        assert_eq!(values[3], 1.0);
        for &v in &values {
            assert!(v >= 0.0 && v <= 1.0);
        }
    }

    #[test]
    fn normalize_handles_flat_input() {
        let mut values = vec![1.0; 8];
        normalize(&mut values);
        for &v in &values {
            assert!(v.is_finite());
        }
    }

    #[test]
    fn image_buffer_is_three_bytes_per_cell() {
        let field = HeightField::procedural(16);
        let mut flat = flatten(&field);
        normalize(&mut flat);
        assert_eq!(to_terrain_image(&flat).len(), 16 * 16 * 3);
    }
}
