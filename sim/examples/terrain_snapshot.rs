// Renders the procedural terrain with the droplet's current trail burned in
// and saves the result as a PNG.
use image::{Rgb, RgbImage};
use palette::{Gradient, LinSrgb};
use sim::Simulation;
use std::path::Path;

fn main() {
    let size = 256;
    let mut sim = Simulation::new(size, 2025);

    // Let the droplet wander for a while so the trail has shape
    for _ in 0..600 {
        sim.tick();
    }

    // Color gradient - water to sand to grass to rock to snow
    let gradient = Gradient::with_domain(vec![
        (0.00, LinSrgb::new(0.0, 0.0, 0.5)),
        (0.30, LinSrgb::new(0.8, 0.8, 0.5)),
        (0.50, LinSrgb::new(0.1, 0.6, 0.2)),
        (0.75, LinSrgb::new(0.5, 0.4, 0.3)),
        (1.00, LinSrgb::new(1.0, 1.0, 1.0)),
    ]);

    let coord = |i: usize| i as f32 / (size - 1) as f32 * 2.0 - 1.0;

    // Normalize heights to 0.0..1.0 for coloring
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for iz in 0..size {
        for ix in 0..size {
            let v = sim.field().sample(coord(ix), coord(iz));
            min = min.min(v);
            max = max.max(v);
        }
    }

    let mut img = RgbImage::new(size as u32, size as u32);
    for iz in 0..size {
        for ix in 0..size {
            let h = sim.field().sample(coord(ix), coord(iz));
            let norm = if (max - min).abs() < f32::EPSILON {
                0.5
            } else {
                (h - min) / (max - min)
            };
            let col: LinSrgb = gradient.get(norm);
            let rgb = col.into_format::<u8>();
            img.put_pixel(ix as u32, iz as u32, Rgb([rgb.red, rgb.green, rgb.blue]));
        }
    }

    // Burn the trail in as red pixels, droplet position as white
    let to_pixel = |c: f32| {
        (((c + 1.0) * 0.5 * (size - 1) as f32).round() as i64)
            .clamp(0, (size - 1) as i64) as u32
    };
    for p in sim.trail() {
        img.put_pixel(to_pixel(p[0]), to_pixel(p[2]), Rgb([220, 30, 30]));
    }
    let d = sim.droplet();
    img.put_pixel(to_pixel(d.x), to_pixel(d.z), Rgb([255, 255, 255]));

    let path = Path::new("terrain_snapshot.png");
    img.save(path).unwrap();
    println!("Saved terrain snapshot to {:?}", path);
}
