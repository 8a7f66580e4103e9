use crate::heightfield::HeightField;

// Probe distance for the symmetric finite difference. Wide enough that the
// two probes straddle at least one cell boundary on the default grid.
pub const GRADIENT_EPS: f32 = 0.02;

// Central finite-difference probe over a height field. Returns the raw
// partial derivatives; normalizing (or zeroing a degenerate result) is the
// caller's job, which keeps the probe reusable for other sampling passes.
pub struct GradientEstimator {
    eps: f32,
}

impl Default for GradientEstimator {
    fn default() -> Self {
        Self::new(GRADIENT_EPS)
    }
}

impl GradientEstimator {
    pub fn new(eps: f32) -> Self {
        assert!(eps > 0.0, "probe distance must be positive");
        Self { eps }
    }

    // Raw (unnormalized) partials of the sampled height at (x, z)
    pub fn gradient(&self, field: &HeightField, x: f32, z: f32) -> (f32, f32) {
        let e = self.eps;
        let gx = (field.sample(x + e, z) - field.sample(x - e, z)) / (2.0 * e);
        let gz = (field.sample(x, z + e) - field.sample(x, z - e)) / (2.0 * e);
        (gx, gz)
    }
}
