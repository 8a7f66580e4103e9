// Walks the droplet lifecycle end to end on flat terrain: free fall
// from the spawn height, the snap onto the surface, and the stagnation
// reset that follows once the slope stays at zero.

use sim::{DropletSimulator, HeightField, ResetReason, StepOutcome};

#[test]
fn flat_terrain_lifecycle() {
    let mut field = HeightField::new(64);
    field.fill_constant(1.0);

    let mut sim = DropletSimulator::new(7);
    // pin the droplet over the center so the walk is exact
    sim.droplet_mut().x = 0.0;
    sim.droplet_mut().z = 0.0;

    // step 1: free fall, y = 2.0 - 9.8 * 0.016 = 1.8432; flat ground has a
    // zero gradient, so the horizontal position holds and stagnation begins
    assert_eq!(sim.step(&mut field), StepOutcome::Continued);
    assert!((sim.droplet().y - 1.8432).abs() < 1e-5);
    assert_eq!(sim.droplet().x, 0.0);
    assert_eq!(sim.droplet().z, 0.0);
    assert_eq!(sim.droplet().stagnant_steps(), 1);
    assert_eq!(sim.droplet().trail_count(), 1);

    // steps 2..=7 keep falling until y passes terrain + threshold
    for _ in 0..6 {
        assert_eq!(sim.step(&mut field), StepOutcome::Continued);
    }
    assert!(sim.droplet().y < 1.0);

    // step 8 switches regime and snaps to exactly terrain + offset
    assert_eq!(sim.step(&mut field), StepOutcome::Continued);
    assert!((sim.droplet().y - 1.05).abs() < 1e-6);
    assert_eq!(sim.droplet().trail_count(), 8);

    // step 9 is the ninth consecutive stagnant step: forced respawn
    assert_eq!(
        sim.step(&mut field),
        StepOutcome::Reset(ResetReason::Stagnation)
    );
    let d = sim.droplet();
    assert!(d.active);
    assert_eq!(d.y, 2.0);
    assert!(d.x >= -1.0 && d.x <= 1.0);
    assert!(d.z >= -1.0 && d.z <= 1.0);
    assert_eq!(d.trail_count(), 0);
    assert_eq!(d.stagnant_steps(), 0);
}

#[test]
fn long_run_is_self_healing() {
    // no outcome is an error and the droplet never escapes its invariants,
    // however long the run
    let mut field = HeightField::procedural(64);
    let mut sim = DropletSimulator::new(2025);

    for _ in 0..5000 {
        match sim.step(&mut field) {
            StepOutcome::Continued | StepOutcome::Reset(_) => {}
        }
        let d = sim.droplet();
        assert!(d.active);
        assert!(d.trail_count() <= 32);
    }
}
