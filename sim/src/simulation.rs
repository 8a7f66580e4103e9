use crate::droplet::{Droplet, DropletSimulator, StepOutcome};
use crate::heightfield::HeightField;
use crate::mesh::build_mesh;

// The owning simulation context: the height field is the single shared
// mutable resource and the droplet simulator is its only mutator. One tick
// per rendered frame, strictly sequential - step, then rebuild, then draw.
pub struct Simulation {
    field: HeightField,
    droplets: DropletSimulator,
}

impl Simulation {
    pub fn new(size: usize, seed: u64) -> Self {
        Self {
            field: HeightField::procedural(size),
            droplets: DropletSimulator::new(seed),
        }
    }

    pub fn field(&self) -> &HeightField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut HeightField {
        &mut self.field
    }

    pub fn droplet(&self) -> &Droplet {
        self.droplets.droplet()
    }

    pub fn droplet_mut(&mut self) -> &mut Droplet {
        self.droplets.droplet_mut()
    }

    pub fn trail(&self) -> &[[f32; 3]] {
        self.droplets.droplet().trail()
    }

    pub fn respawn_droplet(&mut self) {
        self.droplets.respawn();
    }

    // Advance one frame: revive a dead droplet first, then step it
    pub fn tick(&mut self) -> StepOutcome {
        if !self.droplets.droplet().active {
            self.droplets.respawn();
        }
        self.droplets.step(&mut self.field)
    }

    // Regenerate the render buffer from the current field; callable any
    // time, idempotent between mutations
    pub fn mesh(&self) -> Vec<f32> {
        build_mesh(&self.field)
    }
}
