use crate::gradient::GradientEstimator;
use crate::heightfield::HeightField;

// One simulation tick per rendered frame
pub const DT: f32 = 0.016;
pub const GRAVITY: f32 = 9.8;

// Above terrain + FALL_THRESHOLD the droplet is in free fall; otherwise it
// rides the surface at terrain + SURFACE_OFFSET.
pub const FALL_THRESHOLD: f32 = 0.05;
pub const SURFACE_OFFSET: f32 = 0.05;

// Horizontal drift while falling is scaled by DT; the slide step is a fixed
// per-tick distance and intentionally is not.
pub const HORIZONTAL_SPEED: f32 = 0.01;
pub const SLIDE_STEP: f32 = 0.001;

pub const TRAIL_LENGTH: usize = 32;
pub const MAX_STAGNANT_STEPS: u32 = 8;

const SPAWN_HEIGHT: f32 = 2.0;
const STAGNANT_GRADIENT: f32 = 0.01;
const CAVITY_EXTENT: f32 = 0.005;

// The simulated erosive particle. Position and the carried water/sediment/
// speed scalars are plain data; the trail and stagnation counter carry
// invariants and stay behind accessors. Water, sediment, and speed are not
// consumed by the stepping logic: a sediment transfer would go through
// HeightField::modify, which is the deliberate extension point.
#[derive(Clone, Debug)]
pub struct Droplet {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub water: f32,
    pub sediment: f32,
    pub speed: f32,
    pub active: bool,
    trail: Vec<[f32; 3]>,
    stagnant_steps: u32,
}

impl Droplet {
    // Fresh droplet above the terrain at the given horizontal position
    fn spawn(x: f32, z: f32) -> Self {
        Self {
            x,
            z,
            y: SPAWN_HEIGHT,
            water: 1.0,
            sediment: 0.0,
            speed: 0.0,
            active: true,
            trail: Vec::with_capacity(TRAIL_LENGTH),
            stagnant_steps: 0,
        }
    }

    pub fn position(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    // Recent positions, oldest first, at most TRAIL_LENGTH entries
    pub fn trail(&self) -> &[[f32; 3]] {
        &self.trail
    }

    pub fn trail_count(&self) -> usize {
        self.trail.len()
    }

    pub fn stagnant_steps(&self) -> u32 {
        self.stagnant_steps
    }
}

// Why a step ended in a respawn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetReason {
    OutOfBounds,
    Stagnation,
    Cavity,
}

// Result of advancing the droplet by one tick. Every reset is self-healing:
// the droplet has already respawned by the time the caller sees the reason.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Continued,
    Reset(ResetReason),
}

// Owns one droplet and advances it across a height field one fixed timestep
// at a time. Seeded, so identical seeds replay identical runs.
pub struct DropletSimulator {
    droplet: Droplet,
    estimator: GradientEstimator,
    rng: u64,
}

impl DropletSimulator {
    pub fn new(seed: u64) -> Self {
        let mut sim = Self {
            droplet: Droplet::spawn(0.0, 0.0),
            estimator: GradientEstimator::default(),
            rng: seed ^ 0xCAFEBABE12345678,
        };
        sim.respawn();
        sim
    }

    pub fn droplet(&self) -> &Droplet {
        &self.droplet
    }

    pub fn droplet_mut(&mut self) -> &mut Droplet {
        &mut self.droplet
    }

    // xorshift64 mapped into [-1, +1]
    fn next_signed(&mut self) -> f32 {
        let mut x = self.rng;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.rng = x;
        ((x as f64 / u64::MAX as f64) * 2.0 - 1.0) as f32
    }

    // Replace the droplet with a fresh one at a random horizontal position
    pub fn respawn(&mut self) {
        let x = self.next_signed();
        let z = self.next_signed();
        self.droplet = Droplet::spawn(x, z);
    }

    // Advance one tick. The field is taken mutably because erosion writes
    // go through HeightField::modify once a transfer model is wired in.
    pub fn step(&mut self, field: &mut HeightField) -> StepOutcome {
        // A droplet that drifted off the terrain respawns immediately.
        if self.droplet.x < -1.0
            || self.droplet.x > 1.0
            || self.droplet.z < -1.0
            || self.droplet.z > 1.0
        {
            self.respawn();
            return StepOutcome::Reset(ResetReason::OutOfBounds);
        }

        let (raw_gx, raw_gz) = self.estimator.gradient(field, self.droplet.x, self.droplet.z);
        let grad_len = (raw_gx * raw_gx + raw_gz * raw_gz).sqrt();
        let (gx, gz) = if grad_len > 1e-6 {
            (raw_gx / grad_len, raw_gz / grad_len)
        } else {
            (0.0, 0.0)
        };

        // Near-zero slope counts toward stagnation; any real slope clears it.
        if grad_len < STAGNANT_GRADIENT {
            self.droplet.stagnant_steps += 1;
        } else {
            self.droplet.stagnant_steps = 0;
        }
        if self.droplet.stagnant_steps > MAX_STAGNANT_STEPS {
            self.respawn();
            return StepOutcome::Reset(ResetReason::Stagnation);
        }

        let terrain = field.sample(self.droplet.x, self.droplet.z);
        if self.droplet.y > terrain + FALL_THRESHOLD {
            // Free fall toward the surface with a slight downhill drift
            self.droplet.y -= GRAVITY * DT;
            self.droplet.x -= gx * HORIZONTAL_SPEED * DT;
            self.droplet.z -= gz * HORIZONTAL_SPEED * DT;
        } else {
            // Ride the surface downhill with the fixed slide step
            self.droplet.y = terrain + SURFACE_OFFSET;
            self.droplet.x -= gx * SLIDE_STEP;
            self.droplet.z -= gz * SLIDE_STEP;
        }

        // Record the new position, discarding the oldest entry at capacity
        if self.droplet.trail.len() == TRAIL_LENGTH {
            self.droplet.trail.remove(0);
        }
        self.droplet
            .trail
            .push([self.droplet.x, self.droplet.y, self.droplet.z]);

        // A full trail crammed into a tiny box means the droplet is looping
        if self.droplet.trail.len() == TRAIL_LENGTH && self.trail_extent_below(CAVITY_EXTENT) {
            self.respawn();
            return StepOutcome::Reset(ResetReason::Cavity);
        }

        StepOutcome::Continued
    }

    // True when the axis-aligned bounding box of the whole trail is smaller
    // than `limit` in every dimension
    fn trail_extent_below(&self, limit: f32) -> bool {
        let mut min = self.droplet.trail[0];
        let mut max = min;
        for p in &self.droplet.trail[1..] {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }
        (0..3).all(|axis| max[axis] - min[axis] < limit)
    }
}
