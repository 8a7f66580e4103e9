use std::f32::consts::PI;

// Elevation bounds enforced on every write (reads are returned as stored)
pub const MIN_HEIGHT: f32 = 0.0;
pub const MAX_HEIGHT: f32 = 2.0;

// Grid side used by the app and demos unless overridden
pub const DEFAULT_GRID_SIZE: usize = 64;

// Square grid of terrain elevations, addressed as grid[ix][iz].
// Continuous coordinates x,z in [-1,1] snap to the nearest cell; the grid
// is never resized after construction.
pub struct HeightField {
    size: usize,
    grid: Vec<Vec<f32>>,
}

impl HeightField {
    pub fn new(size: usize) -> Self {
        assert!(size >= 2, "grid side must be at least 2");
        Self {
            size,
            grid: vec![vec![0.0f32; size]; size],
        }
    }

    // Construct and fill in one go
    pub fn procedural(size: usize) -> Self {
        let mut field = Self::new(size);
        field.fill_procedural();
        field
    }

    pub fn size(&self) -> usize {
        self.size
    }

    // Undulating sine/cosine product surface with heights in [0, 1].
    // Deterministic for a given size - no randomness involved.
    pub fn fill_procedural(&mut self) {
        let scale = (self.size - 1) as f32;
        for i in 0..self.size {
            for j in 0..self.size {
                let u = i as f32 / scale;
                let v = j as f32 / scale;
                self.grid[i][j] = 0.5 * (u * 4.0 * PI).sin() * (v * 4.0 * PI).cos() + 0.5;
            }
        }
    }

    // Set every cell to the same elevation, clamped like any other write
    pub fn fill_constant(&mut self, height: f32) {
        let h = height.clamp(MIN_HEIGHT, MAX_HEIGHT);
        for row in self.grid.iter_mut() {
            row.fill(h);
        }
    }

    // Map one continuous coordinate in [-1,1] to the nearest cell index.
    // Unclamped: far-out coordinates land outside [0, size-1].
    fn cell(&self, coord: f32) -> isize {
        ((coord + 1.0) * 0.5 * (self.size - 1) as f32).round() as isize
    }

    // Nearest-cell height at (x, z). Out-of-range coordinates clamp to the
    // grid edge, so sampling never fails.
    pub fn sample(&self, x: f32, z: f32) -> f32 {
        let max = (self.size - 1) as isize;
        let ix = self.cell(x).clamp(0, max) as usize;
        let iz = self.cell(z).clamp(0, max) as usize;
        self.grid[ix][iz]
    }

    // Add amount to the cell under (x, z) and clamp the result into
    // [MIN_HEIGHT, MAX_HEIGHT]. Coordinates mapping outside the grid are
    // silently ignored.
    pub fn modify(&mut self, x: f32, z: f32, amount: f32) {
        let max = (self.size - 1) as isize;
        let ix = self.cell(x);
        let iz = self.cell(z);
        if ix < 0 || ix > max || iz < 0 || iz > max {
            return;
        }
        let cell = &mut self.grid[ix as usize][iz as usize];
        *cell = (*cell + amount).clamp(MIN_HEIGHT, MAX_HEIGHT);
    }

    // Direct indexed read for mesh assembly and image flattening
    pub(crate) fn get(&self, ix: usize, iz: usize) -> f32 {
        self.grid[ix][iz]
    }

    #[cfg(test)]
    pub(crate) fn set(&mut self, ix: usize, iz: usize, height: f32) {
        self.grid[ix][iz] = height;
    }
}

#[cfg(test)]
mod tests {
    use super::{HeightField, MAX_HEIGHT, MIN_HEIGHT};

    #[test]
    fn procedural_fill_range() {
        let field = HeightField::procedural(64);
        for i in 0..64 {
            for j in 0..64 {
                let h = field.get(i, j);
                assert!(h >= 0.0 && h <= 1.0, "height {} out of range", h);
            }
        }
    }

    #[test]
    fn procedural_fill_determinism() {
        let a = HeightField::procedural(64);
        let b = HeightField::procedural(64);
        assert_eq!(a.grid, b.grid);
    }

    #[test]
    fn sample_roundtrips_cell_centers() {
        // Coordinates derived from grid indices must land back on the same
        // cell, for every cell.
        for n in [33usize, 64, 65, 128] {
            let mut field = HeightField::new(n);
            for i in 0..n {
                for j in 0..n {
                    // distinct values so an off-by-one cell is caught
                    field.set(i, j, (i * n + j) as f32);
                }
            }
            let scale = (n - 1) as f32;
            for i in 0..n {
                for j in 0..n {
                    let x = i as f32 / scale * 2.0 - 1.0;
                    let z = j as f32 / scale * 2.0 - 1.0;
                    assert_eq!(field.sample(x, z), field.get(i, j), "cell ({}, {})", i, j);
                }
            }
        }
    }

    #[test]
    fn sample_clamps_out_of_range() {
        let field = HeightField::procedural(64);
        // -5 clamps to the first row, +5 to the last; z=0 maps to cell 32
        assert_eq!(field.sample(-5.0, 0.0), field.get(0, 32));
        assert_eq!(field.sample(5.0, 0.0), field.get(63, 32));
        assert_eq!(field.sample(0.0, -5.0), field.get(32, 0));
        assert_eq!(field.sample(0.0, 5.0), field.get(32, 63));
    }

    #[test]
    fn modify_clamps_to_bounds() {
        let mut field = HeightField::new(64);
        field.fill_constant(1.0);

        field.modify(0.0, 0.0, 100.0);
        assert_eq!(field.sample(0.0, 0.0), MAX_HEIGHT);

        field.modify(0.0, 0.0, -100.0);
        assert_eq!(field.sample(0.0, 0.0), MIN_HEIGHT);

        // a long mixed sequence still never escapes the bounds
        for k in 0..100 {
            let amount = if k % 2 == 0 { 3.7 } else { -2.9 };
            field.modify(0.5, -0.5, amount);
            let h = field.sample(0.5, -0.5);
            assert!(h >= MIN_HEIGHT && h <= MAX_HEIGHT);
        }
    }

    #[test]
    fn modify_out_of_range_is_noop() {
        let mut field = HeightField::procedural(64);
        let before = field.grid.clone();

        field.modify(1.5, 0.0, 1.0);
        field.modify(-1.5, 0.0, 1.0);
        field.modify(0.0, 1.5, -1.0);
        field.modify(-3.0, 9.0, 0.25);

        assert_eq!(field.grid, before);
    }

    #[test]
    fn fill_constant_clamps() {
        let mut field = HeightField::new(8);
        field.fill_constant(5.0);
        assert_eq!(field.sample(0.0, 0.0), MAX_HEIGHT);
    }
}
