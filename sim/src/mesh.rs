use crate::heightfield::HeightField;

pub const FLOATS_PER_VERTEX: usize = 3;
pub const VERTS_PER_CELL: usize = 6;

// Triangulate a height field into a flat (x, y, z) vertex stream for the
// renderer: two triangles per grid cell, 6*(N-1)^2 vertices in total.
// Horizontal coordinates are remapped from index space into [-1, 1] and the
// vertical coordinate is the stored corner height. Pure function - safe to
// call every frame against a field mutated since the last call.
pub fn build_mesh(field: &HeightField) -> Vec<f32> {
    let n = field.size();
    let scale = (n - 1) as f32;
    let mut verts =
        Vec::with_capacity((n - 1) * (n - 1) * VERTS_PER_CELL * FLOATS_PER_VERTEX);

    for i in 0..n - 1 {
        for j in 0..n - 1 {
            let x0 = i as f32 / scale * 2.0 - 1.0;
            let z0 = j as f32 / scale * 2.0 - 1.0;
            let x1 = (i + 1) as f32 / scale * 2.0 - 1.0;
            let z1 = (j + 1) as f32 / scale * 2.0 - 1.0;

            let y00 = field.get(i, j);
            let y10 = field.get(i + 1, j);
            let y01 = field.get(i, j + 1);
            let y11 = field.get(i + 1, j + 1);

            // (i,j) -> (i+1,j) -> (i,j+1)
            verts.extend_from_slice(&[x0, y00, z0, x1, y10, z0, x0, y01, z1]);
            // (i+1,j) -> (i+1,j+1) -> (i,j+1)
            verts.extend_from_slice(&[x1, y10, z0, x1, y11, z1, x0, y01, z1]);
        }
    }
    verts
}
