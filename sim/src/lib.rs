// sim holds the height field, gradient probing, droplet stepping, and mesh
// generation; rendering and input live in the app crate
pub mod droplet;
pub mod gradient;
pub mod heightfield;
pub mod mesh;
pub mod simulation;
pub mod utils;

pub use droplet::{Droplet, DropletSimulator, ResetReason, StepOutcome};
pub use gradient::GradientEstimator;
pub use heightfield::HeightField;
pub use mesh::build_mesh;
pub use simulation::Simulation;
