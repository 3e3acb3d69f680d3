//! Interactive 2D gravity sandbox built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the [`Simulation`] and
//! implements [`eframe::App`] to drive it once per repaint, forward
//! pointer input to it and draw the bodies.

use eframe::App;
use glam::Vec2;
use sim_core::{
    body::BodyColor,
    config::{Config, DragMode, IntegrationMode},
    simulation::Simulation,
};

/// Pointer activity for one frame, already filtered by the viewer.
///
/// ### Fields
/// - `pressed` - Screen position of a primary press that landed on the arena.
/// - `moved_to` - Latest screen position if the pointer moved this frame.
/// - `released` - Whether the primary button was released anywhere.
#[derive(Clone, Copy, Debug, Default)]
struct PointerInput {
    pressed: Option<egui::Pos2>,
    moved_to: Option<egui::Pos2>,
    released: bool,
}

/// Main application state for the interactive viewer.
///
/// [`Viewer`] glues together:
/// - The simulation core: [`Simulation`] with its world and drag state.
/// - The initialization surface: a text field holding the body count.
/// - eframe/egui callbacks for drawing and user interaction.
///
/// The typical per-frame update is:
/// 1. Translate pointer events into arena coordinates and forward them.
/// 2. If `running` is `true`, call [`Simulation::step`] once.
/// 3. Render the arena and the bodies.
///
/// ### Fields
/// - `sim` - The simulation being shown.
/// - `count_input` - Raw contents of the body count field.
/// - `started` - Whether a world has been started at least once.
/// - `running` - Whether a step is taken on every repaint.
pub struct Viewer {
    sim: Simulation,
    count_input: String,
    started: bool,
    running: bool,
}

/// Maps a body hue to the display color HSL(hue, 100%, 50%).
///
/// The channels are sRGB values, not linear ones, so this does not go
/// through [`egui::ecolor::Hsva`].
fn body_color(color: BodyColor) -> egui::Color32 {
    let h = color.hue.rem_euclid(360.0) / 60.0;
    // Chroma is 1 and the darkest channel 0 at S = 100%, L = 50%.
    let x = 1.0 - (h % 2.0 - 1.0).abs();
    let (r, g, b) = match h as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    let to_u8 = |c: f32| (c * 255.0).round() as u8;
    egui::Color32::from_rgb(to_u8(r), to_u8(g), to_u8(b))
}

impl Viewer {
    /// Creates a viewer with the default config and an empty arena.
    pub fn new() -> Self {
        Self::with_config(Config::default(), None)
    }

    /// Creates a viewer around `cfg`.
    ///
    /// ### Parameters
    /// - `cfg` - Simulation config, usually loaded from the command line.
    /// - `initial_count` - If set, a world with this many bodies is started
    ///   right away, as if the user had pressed **Start**.
    pub fn with_config(cfg: Config, initial_count: Option<usize>) -> Self {
        let mut viewer = Self {
            sim: Simulation::new(cfg),
            count_input: initial_count.unwrap_or(20).to_string(),
            started: false,
            running: false,
        };
        if initial_count.is_some() {
            viewer.start();
        }
        viewer
    }

    /// Replaces the world using the count typed into the text field.
    fn start(&mut self) {
        self.sim.start_from_input(&self.count_input);
        self.started = true;
        self.running = true;
    }

    /// Advances the simulation by one frame tick.
    fn tick(&mut self) {
        self.sim.step();
    }

    /// Largest rectangle with the arena's aspect ratio centered in `avail`.
    fn fit_arena(&self, avail: egui::Rect) -> egui::Rect {
        let bounds = self.sim.world().bounds;
        let s = (avail.width() / bounds.width)
            .min(avail.height() / bounds.height)
            .max(f32::EPSILON);
        egui::Rect::from_center_size(avail.center(), egui::vec2(bounds.width * s, bounds.height * s))
    }

    /// Screen pixels per arena unit for a fitted arena rectangle.
    fn scale(&self, arena: egui::Rect) -> f32 {
        arena.width() / self.sim.world().bounds.width
    }

    /// Converts an arena position to screen-space.
    ///
    /// The arena origin is the top-left corner of `arena` and y grows
    /// downwards, as on a canvas.
    fn canvas_to_screen(&self, p: Vec2, arena: egui::Rect) -> egui::Pos2 {
        let s = self.scale(arena);
        egui::pos2(arena.min.x + p.x * s, arena.min.y + p.y * s)
    }

    /// Converts a screen-space position to arena coordinates.
    ///
    /// This is the inverse of [`Viewer::canvas_to_screen`]. The result is
    /// not clamped; the core clamps drag targets itself.
    fn screen_to_canvas(&self, p: egui::Pos2, arena: egui::Rect) -> Vec2 {
        let s = self.scale(arena);
        Vec2::new((p.x - arena.min.x) / s, (p.y - arena.min.y) / s)
    }

    /// Forwards one frame of pointer activity to the simulation.
    ///
    /// Press, then move, then release, so a click-and-release inside one
    /// frame still grabs and lets go.
    fn handle_pointer(&mut self, input: PointerInput, arena: egui::Rect) {
        if let Some(p) = input.pressed {
            let p = self.screen_to_canvas(p, arena);
            self.sim.pointer_down(p);
        }
        if self.sim.drag().is_active()
            && let Some(p) = input.moved_to
        {
            let p = self.screen_to_canvas(p, arena);
            self.sim.pointer_move(p);
        }
        if input.released {
            self.sim.pointer_up();
        }
    }

    /// Helper to draw a labeled `usize` [`egui::DragValue`].
    fn labeled_drag_usize(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut usize,
        range: std::ops::RangeInclusive<usize>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`].
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the top panel UI (body count, start, run controls).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Bodies:");
                let field = ui.add(egui::TextEdit::singleline(&mut self.count_input).desired_width(60.0));
                let submitted = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                if ui.button("Start").clicked() || submitted {
                    self.start();
                }

                ui.separator();

                ui.add_enabled_ui(self.started, |ui| {
                    if ui
                        .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                        .clicked()
                    {
                        self.running = !self.running;
                    }

                    if ui.button("Step").clicked() {
                        self.tick();
                    }
                });
            });
        });
    }

    /// Builds the bottom status bar (bodies, frame, drag, energy).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("kinetic energy = {:.3}", self.sim.world().total_kinetic_energy()));
                ui.separator();
                match self.sim.drag().target() {
                    Some(id) => ui.label(format!("dragging body {id}")),
                    None => ui.label("not dragging"),
                };
                ui.separator();
                ui.label(format!("frame = {}", self.sim.frame()));
                ui.label(format!("bodies = {}", self.sim.world().len()));
            });
        });
    }

    /// Builds the right-hand configuration panel for simulation parameters.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Config");

                let bounds = self.sim.world().bounds;
                let cfg = self.sim.config_mut();

                ui.separator();
                ui.label("Physics");
                Self::labeled_drag_f32(ui, "G:", &mut cfg.g, 0.0..=100.0, 0.05);
                Self::labeled_drag_f32(ui, "dt:", &mut cfg.dt, 0.01..=5.0, 0.01);
                Self::labeled_drag_usize(
                    ui,
                    "boundary passes:",
                    &mut cfg.max_boundary_passes,
                    1..=1024,
                    1.0,
                );

                ui.separator();
                egui::ComboBox::from_label("Integration")
                    .selected_text(format!("{:?}", cfg.integration))
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut cfg.integration, IntegrationMode::DoublePass, "Double pass");
                        ui.selectable_value(&mut cfg.integration, IntegrationMode::SinglePass, "Single pass");
                    });
                egui::ComboBox::from_label("Drag")
                    .selected_text(format!("{:?}", cfg.drag_mode))
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut cfg.drag_mode, DragMode::Contested, "Contested");
                        ui.selectable_value(&mut cfg.drag_mode, DragMode::Frozen, "Frozen");
                    });

                ui.separator();
                ui.label("Spawning (applies on Start)");
                Self::labeled_drag_f32(ui, "radius min:", &mut cfg.radius_range.x, 1.0..=100.0, 0.5);
                Self::labeled_drag_f32(ui, "radius max:", &mut cfg.radius_range.y, 1.0..=100.0, 0.5);
                Self::labeled_drag_f32(ui, "mass min:", &mut cfg.mass_range.x, 0.1..=1000.0, 0.5);
                Self::labeled_drag_f32(ui, "mass max:", &mut cfg.mass_range.y, 0.1..=1000.0, 0.5);
                Self::labeled_drag_f32(ui, "max speed:", &mut cfg.max_speed, 0.0..=20.0, 0.05);
                cfg.radius_range.y = cfg.radius_range.y.max(cfg.radius_range.x);
                cfg.mass_range.y = cfg.mass_range.y.max(cfg.mass_range.x);

                ui.separator();
                ui.label(format!("arena: {} x {}", bounds.width, bounds.height));

                ui.separator();
                if ui.button("Reset cfg to default").clicked() {
                    *cfg = Config {
                        width: cfg.width,
                        height: cfg.height,
                        seed: cfg.seed,
                        ..Config::default()
                    };
                }
            });
    }

    /// Builds the central panel where the arena is drawn and dragged in.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::drag());
            let arena = self.fit_arena(response.rect);
            let painter = ui.painter_at(response.rect);

            // Presses only count on the arena; releases count anywhere.
            let input = ctx.input(|i| PointerInput {
                pressed: i
                    .pointer
                    .interact_pos()
                    .filter(|p| i.pointer.primary_pressed() && arena.contains(*p)),
                moved_to: i.pointer.latest_pos().filter(|_| i.pointer.is_moving()),
                released: i.pointer.primary_released(),
            });
            self.handle_pointer(input, arena);

            if self.running {
                self.tick();
                ctx.request_repaint();
            }

            // Arena background and border.
            painter.rect_filled(arena, egui::CornerRadius::ZERO, egui::Color32::from_gray(12));
            painter.rect_stroke(
                arena,
                egui::CornerRadius::ZERO,
                egui::Stroke::new(1.0, egui::Color32::DARK_GRAY),
                egui::StrokeKind::Inside,
            );

            let s = self.scale(arena);

            // Draw bodies in world order.
            for body in self.sim.bodies() {
                if !body.pos.is_finite() {
                    continue;
                }
                let p = self.canvas_to_screen(body.pos, arena);
                painter.circle_filled(p, body.radius * s, body_color(body.color));
            }

            // Outline bodies that collided in the last step.
            let outline = egui::Stroke::new(1.5, egui::Color32::WHITE);
            for &(i, j) in self.sim.last_collisions() {
                for id in [i, j] {
                    if let Some(body) = self.sim.bodies().get(id)
                        && body.pos.is_finite()
                    {
                        let p = self.canvas_to_screen(body.pos, arena);
                        painter.circle_stroke(p, body.radius * s, outline);
                    }
                }
            }

            // Ring around the held body.
            if let Some(body) = self.sim.drag().target().and_then(|id| self.sim.bodies().get(id)) {
                let p = self.canvas_to_screen(body.pos, arena);
                painter.circle_stroke(
                    p,
                    body.radius * s + 3.0,
                    egui::Stroke::new(2.0, egui::Color32::YELLOW),
                );
            }

            if !self.started {
                painter.text(
                    arena.center(),
                    egui::Align2::CENTER_CENTER,
                    "Enter a body count and press Start",
                    egui::FontId::proportional(18.0),
                    egui::Color32::GRAY,
                );
            }
        });
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    ///
    /// This method:
    /// - Renders the top control bar and status bar.
    /// - Renders the config side panel.
    /// - Handles pointer input, steps the simulation and draws the arena.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}
