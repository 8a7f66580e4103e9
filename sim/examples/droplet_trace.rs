use sim::{ResetReason, Simulation, StepOutcome};

fn main() {
    // 64x64 terrain, fixed seed so runs are reproducible
    let mut sim = Simulation::new(64, 2025);

    let mut out_of_bounds = 0;
    let mut stagnation = 0;
    let mut cavity = 0;
    for _ in 0..2000 {
        match sim.tick() {
            StepOutcome::Continued => {}
            StepOutcome::Reset(ResetReason::OutOfBounds) => out_of_bounds += 1,
            StepOutcome::Reset(ResetReason::Stagnation) => stagnation += 1,
            StepOutcome::Reset(ResetReason::Cavity) => cavity += 1,
        }
    }

    let d = sim.droplet();
    println!(
        "droplet at ({:.3}, {:.3}, {:.3}) with {} trail points",
        d.x,
        d.y,
        d.z,
        d.trail_count()
    );
    println!(
        "resets over 2000 ticks: {} out-of-bounds, {} stagnation, {} cavity",
        out_of_bounds, stagnation, cavity
    );

    // Print the top-left 8x8 corner of the height field
    let coord = |i: usize| i as f32 / 63.0 * 2.0 - 1.0;
    for j in 0..8 {
        for i in 0..8 {
            print!("{:>6.3} ", sim.field().sample(coord(i), coord(j)));
        }
        println!();
    }
}
