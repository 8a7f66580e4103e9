use eframe::{App, Frame, NativeOptions, egui, run_native};
use egui::{Color32, ColorImage, Sense, TextureHandle, Vec2};
use sim::heightfield::DEFAULT_GRID_SIZE;
use sim::utils::{flatten, normalize, to_terrain_image};
use sim::{ResetReason, Simulation, StepOutcome};

struct ErosionApp {
    // parameters
    grid_size: usize,
    seed: u64,
    flat_terrain: bool,

    // pacing
    running: bool,
    steps_per_frame: u32,

    sim: Simulation,

    // reset tallies for the status line
    resets_out_of_bounds: u32,
    resets_stagnation: u32,
    resets_cavity: u32,

    terrain_texture: Option<TextureHandle>,
    status_message: String,
}

impl Default for ErosionApp {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            seed: 2025,
            flat_terrain: false,
            running: true,
            steps_per_frame: 1,
            sim: Simulation::new(DEFAULT_GRID_SIZE, 2025),
            resets_out_of_bounds: 0,
            resets_stagnation: 0,
            resets_cavity: 0,
            terrain_texture: None,
            status_message: String::new(),
        }
    }
}

impl ErosionApp {
    fn rebuild(&mut self) {
        self.sim = Simulation::new(self.grid_size, self.seed);
        if self.flat_terrain {
            self.sim.field_mut().fill_constant(1.0);
        }
        self.resets_out_of_bounds = 0;
        self.resets_stagnation = 0;
        self.resets_cavity = 0;
        self.status_message = format!(
            "Rebuilt {}x{} terrain (seed {})",
            self.grid_size, self.grid_size, self.seed
        );
    }

    // Colorized top-down view of the current field
    fn terrain_rgb(&self) -> (usize, Vec<u8>) {
        let size = self.sim.field().size();
        let mut flat = flatten(self.sim.field());
        normalize(&mut flat);
        (size, to_terrain_image(&flat))
    }
}

impl App for ErosionApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        if self.running {
            for _ in 0..self.steps_per_frame {
                match self.sim.tick() {
                    StepOutcome::Continued => {}
                    StepOutcome::Reset(ResetReason::OutOfBounds) => {
                        self.resets_out_of_bounds += 1
                    }
                    StepOutcome::Reset(ResetReason::Stagnation) => self.resets_stagnation += 1,
                    StepOutcome::Reset(ResetReason::Cavity) => self.resets_cavity += 1,
                }
            }
            ctx.request_repaint();
        }

        egui::SidePanel::left("controls").show(ctx, |ui| {
            ui.heading("Droplet Erosion");
            ui.separator();

            ui.label("Grid Size");
            ui.add(egui::Slider::new(&mut self.grid_size, 16..=256));

            ui.label("Seed");
            ui.add(egui::DragValue::new(&mut self.seed).speed(1.0));

            ui.checkbox(&mut self.flat_terrain, "Flat terrain");

            if ui.button("Rebuild Terrain").clicked() {
                self.rebuild();
            }

            ui.separator();

            ui.checkbox(&mut self.running, "Run simulation");
            ui.label("Steps per Frame");
            ui.add(egui::Slider::new(&mut self.steps_per_frame, 1..=64));

            if ui.button("Respawn Droplet").clicked() {
                self.sim.respawn_droplet();
                self.status_message = "Droplet respawned".into();
            }

            if ui.button("Save PNG…").clicked() {
                let (size, rgb) = self.terrain_rgb();
                if let Some(path) = rfd::FileDialog::new()
                    .set_file_name(format!("terrain_{}.png", self.seed))
                    .save_file()
                {
                    match image::save_buffer(
                        &path,
                        &rgb,
                        size as u32,
                        size as u32,
                        image::ColorType::Rgb8,
                    ) {
                        Ok(()) => self.status_message = format!("Saved {}", path.display()),
                        Err(e) => self.status_message = format!("Save error: {}", e),
                    }
                }
            }

            ui.separator();

            let d = self.sim.droplet();
            ui.label(format!("Droplet: ({:.3}, {:.3}, {:.3})", d.x, d.y, d.z));
            ui.label(format!("Trail: {} points", d.trail_count()));
            ui.label(format!(
                "Resets: {} oob / {} stagnant / {} cavity",
                self.resets_out_of_bounds, self.resets_stagnation, self.resets_cavity
            ));

            ui.separator();
            ui.label(&self.status_message);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            // Top-down terrain with the droplet and trail overlaid
            let (size, rgb) = self.terrain_rgb();
            let color_image = ColorImage::from_rgb([size, size], &rgb);
            match &mut self.terrain_texture {
                Some(tex) => tex.set(color_image, egui::TextureOptions::NEAREST),
                None => {
                    self.terrain_texture = Some(ctx.load_texture(
                        "terrain",
                        color_image,
                        egui::TextureOptions::NEAREST,
                    ))
                }
            }

            let side = ui.available_width().min(ui.available_height() * 0.55);
            let (rect, _) = ui.allocate_exact_size(Vec2::splat(side), Sense::hover());
            let painter = ui.painter_at(rect);
            if let Some(tex) = &self.terrain_texture {
                painter.image(
                    tex.id(),
                    rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    Color32::WHITE,
                );
            }

            // map simulation x/z in [-1,1] onto the texture rect
            let to_screen = |x: f32, z: f32| {
                egui::pos2(
                    rect.left() + (x + 1.0) * 0.5 * rect.width(),
                    rect.top() + (z + 1.0) * 0.5 * rect.height(),
                )
            };
            let trail: Vec<egui::Pos2> = self
                .sim
                .trail()
                .iter()
                .map(|p| to_screen(p[0], p[2]))
                .collect();
            if trail.len() >= 2 {
                painter.add(egui::Shape::line(
                    trail,
                    egui::Stroke::new(1.5, Color32::LIGHT_BLUE),
                ));
            }
            let d = self.sim.droplet();
            painter.circle_filled(to_screen(d.x, d.z), 4.0, Color32::RED);

            ui.separator();
            ui.label("Mesh preview:");

            // Oblique projection of the triangulated vertex stream
            let verts = self.sim.mesh();
            let project = |v: &[f32]| (v[0] + 0.4 * v[2], -v[1] + 0.3 * v[2]);

            let mut min = (f32::INFINITY, f32::INFINITY);
            let mut max = (f32::NEG_INFINITY, f32::NEG_INFINITY);
            for v in verts.chunks_exact(3) {
                let (px, py) = project(v);
                min = (min.0.min(px), min.1.min(py));
                max = (max.0.max(px), max.1.max(py));
            }
            let span = ((max.0 - min.0).max(0.001), (max.1 - min.1).max(0.001));

            let preview = Vec2::new(side, ui.available_height().max(100.0));
            let (rect2, _) = ui.allocate_exact_size(preview, Sense::hover());
            let painter2 = ui.painter_at(rect2);

            let mut mesh_shape = egui::epaint::Mesh::default();
            for v in verts.chunks_exact(3) {
                let (px, py) = project(v);
                let pos = egui::pos2(
                    rect2.left() + (px - min.0) / span.0 * rect2.width(),
                    rect2.top() + (py - min.1) / span.1 * rect2.height(),
                );
                let shade = (60.0 + v[1] * 90.0).clamp(0.0, 255.0) as u8;
                mesh_shape.vertices.push(egui::epaint::Vertex {
                    pos,
                    uv: egui::pos2(0.0, 0.0),
                    color: Color32::from_gray(shade),
                });
            }
            mesh_shape.indices = (0..mesh_shape.vertices.len() as u32).collect();
            painter2.add(egui::epaint::Shape::mesh(mesh_shape));
        });
    }
}

fn main() {
    let opts = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };
    run_native(
        "Droplet Erosion Sandbox",
        opts,
        Box::new(|_cc| Ok(Box::new(ErosionApp::default()))),
    )
    .unwrap();
}
