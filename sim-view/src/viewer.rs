//! Interactive 2D gravity simulation viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the [`SimulationState`]
//! plus everything that only matters on screen (camera, trails, display
//! toggles, status messages) and implements [`eframe::App`] to render and
//! control the simulation through an egui UI.

use eframe::App;
use glam::DVec2;
use rand::{SeedableRng, rngs::StdRng};
use sim_core::{
    body::Body,
    config::Config,
    preset::{self, Preset},
    state::SimulationState,
    types::BodyId,
};
use std::{
    collections::{HashMap, VecDeque},
    path::PathBuf,
};

const DARK_RED: egui::Color32 = egui::Color32::from_rgb(156, 43, 43);
const TRAIL_LEN: usize = 240;

/// Something the user can trigger from the keyboard or a button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Restart,
    ToggleTrails,
    ToggleBorder,
    ToggleColor,
    SpeedUp,
    SlowDown,
    MoreMass,
    LessMass,
    MoreObjects,
    FewerObjects,
    TogglePause,
    Save,
    Antigravity,
}

/// Keyboard shortcuts. Each fires once per key press.
const SHORTCUTS: [(egui::Key, Action); 13] = [
    (egui::Key::Space, Action::Restart),
    (egui::Key::Z, Action::ToggleTrails),
    (egui::Key::X, Action::ToggleBorder),
    (egui::Key::C, Action::ToggleColor),
    (egui::Key::Q, Action::SpeedUp),
    (egui::Key::A, Action::SlowDown),
    (egui::Key::W, Action::MoreMass),
    (egui::Key::S, Action::LessMass),
    (egui::Key::E, Action::MoreObjects),
    (egui::Key::D, Action::FewerObjects),
    (egui::Key::P, Action::TogglePause),
    (egui::Key::O, Action::Save),
    (egui::Key::M, Action::Antigravity),
];

/// A one-line message shown in the status bar.
#[derive(Clone, Debug, PartialEq)]
struct Status {
    text: String,
    is_error: bool,
}

/// Main application state for the interactive viewer.
///
/// The per-frame update is simulate-then-render:
/// 1. Handle keyboard shortcuts.
/// 2. Unless paused, advance the simulation by one external tick
///    ([`SimulationState::step`], i.e. `speed_multiplier` sub-steps).
/// 3. Draw panels and bodies and handle pointer interaction.
///
/// ### Fields
/// - `state` - The simulation being shown.
/// - `rng` - Source of random placement and colours on restart.
/// - `zoom`, `pan` - World-to-screen mapping.
/// - `show_trails`, `show_color` - Display toggles.
/// - `trails` - Recent positions per body, used when `show_trails` is on.
/// - `merges` - Merges seen since the last restart.
/// - `status` - Last preset message or error.
/// - `preset_dir` - Directory presets are saved into.
pub struct Viewer {
    state: SimulationState,
    rng: StdRng,

    zoom: f32,
    pan: egui::Vec2,

    show_trails: bool,
    show_color: bool,
    trails: HashMap<BodyId, VecDeque<DVec2>>,

    merges: usize,
    status: Option<Status>,
    preset_dir: PathBuf,
}

impl Viewer {
    /// Creates a viewer and its first set of bodies.
    ///
    /// Bodies come from `preset` when one is given. A preset whose
    /// position list does not match its object count is reported in the
    /// status bar and random placement is used instead.
    pub fn new(cfg: Config, seed: Option<u64>, preset: Option<&Preset>) -> Self {
        let rng = StdRng::seed_from_u64(seed.unwrap_or_else(rand::random));

        let mut viewer = Self {
            state: SimulationState::new(&cfg),
            rng,
            zoom: 1.0,
            pan: egui::vec2(0.0, 0.0),
            show_trails: false,
            show_color: true,
            trails: HashMap::new(),
            merges: 0,
            status: None,
            preset_dir: PathBuf::from("."),
        };

        match preset {
            Some(p) => match viewer.state.load_preset(p, &mut viewer.rng) {
                Ok(()) => log::info!("loaded preset with {} bodies", p.object_count),
                Err(e) => {
                    log::error!("preset rejected: {e}");
                    viewer.status = Some(Status {
                        text: format!("Error: {e}"),
                        is_error: true,
                    });
                    viewer.state.restart(&mut viewer.rng);
                }
            },
            None => viewer.state.restart(&mut viewer.rng),
        }

        viewer
    }

    /// Discards all bodies and creates a fresh random set from the
    /// current object count and base mass.
    fn restart(&mut self) {
        self.state.restart(&mut self.rng);
        self.trails.clear();
        self.merges = 0;
    }

    /// Advances the simulation by one external tick and records trails.
    fn step_once(&mut self) {
        let report = self.state.step();
        self.merges += report.merges.len();

        if self.state.is_paused() {
            return;
        }

        let live: HashMap<BodyId, DVec2> = self
            .state
            .live_bodies()
            .map(|b| (b.id(), b.position))
            .collect();
        self.trails.retain(|id, _| live.contains_key(id));
        for (id, pos) in live {
            let trail = self.trails.entry(id).or_default();
            if trail.len() == TRAIL_LEN {
                trail.pop_front();
            }
            trail.push_back(pos);
        }
    }

    fn save_preset(&mut self) {
        self.status = Some(match preset::save_next(&self.preset_dir, &self.state.to_preset()) {
            Ok(path) => Status {
                text: format!("Saved {}", path.display()),
                is_error: false,
            },
            Err(e) => {
                log::error!("saving preset failed: {e}");
                Status {
                    text: format!("Error: {e}"),
                    is_error: true,
                }
            }
        });
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Restart => self.restart(),
            Action::ToggleTrails => {
                self.show_trails = !self.show_trails;
                self.trails.clear();
            }
            Action::ToggleBorder => self.state.toggle_border(),
            Action::ToggleColor => self.show_color = !self.show_color,
            Action::SpeedUp => self.state.adjust_speed(1),
            Action::SlowDown => self.state.adjust_speed(-1),
            Action::MoreMass => self.state.adjust_base_mass(1),
            Action::LessMass => self.state.adjust_base_mass(-1),
            Action::MoreObjects => self.state.adjust_object_count(1),
            Action::FewerObjects => self.state.adjust_object_count(-1),
            Action::TogglePause => self.state.toggle_pause(),
            Action::Save => self.save_preset(),
            Action::Antigravity => self.state.toggle_gravity_sign(),
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        for (key, action) in SHORTCUTS {
            if ctx.input(|i| i.key_pressed(key)) {
                self.apply(action);
            }
        }
    }

    /// Converts a world-space position to screen-space.
    ///
    /// World coordinates grow right and down from the top-left corner of
    /// `rect`, scaled by `zoom` and offset by `pan`.
    fn world_to_screen(&self, p: DVec2, rect: egui::Rect) -> egui::Pos2 {
        egui::pos2(
            rect.min.x + p.x as f32 * self.zoom + self.pan.x,
            rect.min.y + p.y as f32 * self.zoom + self.pan.y,
        )
    }

    /// Inverse of [`Viewer::world_to_screen`].
    fn screen_to_world(&self, p: egui::Pos2, rect: egui::Rect) -> DVec2 {
        let x = (p.x - rect.min.x - self.pan.x) / self.zoom;
        let y = (p.y - rect.min.y - self.pan.y) / self.zoom;
        DVec2::new(x as f64, y as f64)
    }

    fn body_color(&self, body: &Body) -> egui::Color32 {
        if self.show_color {
            let [r, g, b] = body.color;
            egui::Color32::from_rgb(r, g, b)
        } else {
            egui::Color32::WHITE
        }
    }

    /// Builds the top panel (run controls and display toggles).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let run_label = if self.state.is_paused() { "▶ Run (P)" } else { "⏸ Pause (P)" };
                if ui.button(run_label).clicked() {
                    self.apply(Action::TogglePause);
                }
                if ui.button("Step").clicked() {
                    self.state.tick();
                }
                if ui.button("Restart (Space)").clicked() {
                    self.apply(Action::Restart);
                }

                ui.separator();
                if ui
                    .selectable_label(self.state.border_enabled(), "Border (X)")
                    .clicked()
                {
                    self.apply(Action::ToggleBorder);
                }
                if ui.selectable_label(self.show_trails, "Path (Z)").clicked() {
                    self.apply(Action::ToggleTrails);
                }
                if ui.selectable_label(self.show_color, "Color (C)").clicked() {
                    self.apply(Action::ToggleColor);
                }

                ui.separator();
                if ui.button("Save (O)").clicked() {
                    self.apply(Action::Save);
                }

                ui.separator();
                let antigravity = self.state.gravitational_constant < 0.0;
                let text = egui::RichText::new("Antigravity (M, for fun)").color(if antigravity {
                    DARK_RED
                } else {
                    egui::Color32::GRAY
                });
                if ui.selectable_label(antigravity, text).clicked() {
                    self.apply(Action::Antigravity);
                }
            });
        });
    }

    /// Builds the bottom status bar.
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(status) = &self.status {
                    let color = if status.is_error { DARK_RED } else { egui::Color32::LIGHT_GREEN };
                    ui.colored_label(color, status.text.as_str());
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("ticks = {}", self.state.tick_count()));
                    ui.label(format!("merges = {}", self.merges));
                    ui.label(format!("bodies = {}", self.state.live_bodies().count()));
                    ui.label(format!("G = {:.5e}", self.state.gravitational_constant));
                });
            });
        });
    }

    /// Builds the right-hand panel: parameters and selected body info.
    fn ui_side_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("side_panel")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.heading("Parameters");

                ui.separator();
                self.ui_stepper(
                    ui,
                    format!("Speed: {}x", self.state.speed_multiplier()),
                    Action::SlowDown,
                    Action::SpeedUp,
                    "A / Q",
                );
                self.ui_stepper(
                    ui,
                    format!("Init mass: {} *10^11 kg", self.state.base_mass()),
                    Action::LessMass,
                    Action::MoreMass,
                    "S / W",
                );
                self.ui_stepper(
                    ui,
                    format!("Init number: {}", self.state.object_count()),
                    Action::FewerObjects,
                    Action::MoreObjects,
                    "D / E",
                );

                ui.separator();
                ui.heading("Selected body");
                match self.state.selected_body() {
                    Some(b) => Self::ui_body_info(ui, b, self.state.bounds.height),
                    None => {
                        ui.label("Click a body to inspect it.");
                    }
                }
            });
    }

    /// A label with `-` and `+` buttons bound to two actions.
    fn ui_stepper(&mut self, ui: &mut egui::Ui, label: String, less: Action, more: Action, keys: &str) {
        ui.horizontal(|ui| {
            if ui.small_button("-").clicked() {
                self.apply(less);
            }
            if ui.small_button("+").clicked() {
                self.apply(more);
            }
            ui.label(label);
            ui.weak(keys);
        });
    }

    /// Diagnostics for one body, with y pointing up as on a chart.
    fn ui_body_info(ui: &mut egui::Ui, b: &Body, height: f64) {
        let mono = |s: String| egui::RichText::new(s).monospace();
        ui.label(mono(format!("mass     {:.3e} kg", b.mass())));
        ui.label(mono(format!("radius   {:.2}", b.radius())));
        ui.label(mono(format!("x pos    {:.2}", b.position.x)));
        ui.label(mono(format!("y pos    {:.2}", height - b.position.y)));
        ui.label(mono(format!("x vel    {:.3} m/s", b.velocity.x)));
        ui.label(mono(format!("y vel    {:.3} m/s", -b.velocity.y)));
        ui.label(mono(format!("x acc    {:.5} m/s^2", b.acceleration.x)));
        ui.label(mono(format!("y acc    {:.5} m/s^2", -b.acceleration.y)));
        ui.label(mono(format!("x force  {:.3e} N", b.accumulated_force.x)));
        ui.label(mono(format!("y force  {:.3e} N", -b.accumulated_force.y)));
    }

    /// Builds the central canvas where bodies are drawn and picked.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let response =
                    ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
                let rect = response.rect;
                let painter = ui.painter_at(rect);

                // Pan with drag.
                if response.dragged() {
                    self.pan += response.drag_delta();
                }

                // Select with click.
                if response.clicked()
                    && let Some(p) = response.interact_pointer_pos()
                {
                    let world = self.screen_to_world(p, rect);
                    if let Some(id) = self.state.select_at(world) {
                        log::debug!("selected body {id}");
                    }
                }

                // Zoom around the mouse cursor.
                let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
                if scroll != 0.0 {
                    let pointer_screen = response.hover_pos().unwrap_or(rect.center());
                    let world_before = self.screen_to_world(pointer_screen, rect);

                    let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                    self.zoom = (self.zoom * factor).clamp(0.1, 10.0);

                    let screen_after = self.world_to_screen(world_before, rect);
                    self.pan += pointer_screen - screen_after;
                }

                if self.state.border_enabled() {
                    let bounds = self.state.bounds;
                    let corners = [
                        DVec2::new(0.0, 0.0),
                        DVec2::new(bounds.width, 0.0),
                        DVec2::new(bounds.width, bounds.height),
                        DVec2::new(0.0, bounds.height),
                    ];
                    let points = corners
                        .iter()
                        .map(|&c| self.world_to_screen(c, rect))
                        .collect();
                    painter.add(egui::Shape::closed_line(
                        points,
                        egui::Stroke::new(5.0, DARK_RED),
                    ));
                }

                if self.show_trails {
                    for b in self.state.live_bodies() {
                        let Some(trail) = self.trails.get(&b.id()) else {
                            continue;
                        };
                        let points: Vec<egui::Pos2> =
                            trail.iter().map(|&p| self.world_to_screen(p, rect)).collect();
                        let color = self.body_color(b).gamma_multiply(0.5);
                        painter.add(egui::Shape::line(points, egui::Stroke::new(1.0, color)));
                    }
                }

                for b in self.state.live_bodies() {
                    let p = self.world_to_screen(b.position, rect);
                    let r = (b.radius() as f32 * self.zoom).max(1.0);
                    if b.selected {
                        painter.circle_filled(p, r + 4.0, DARK_RED);
                    }
                    painter.circle_filled(p, r, self.body_color(b));
                }
            });
    }
}

impl App for Viewer {
    /// eframe callback: simulate one external tick, then build all panels.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);
        self.step_once();

        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_side_panel(ctx);
        self.ui_central_panel(ctx);

        if !self.state.is_paused() {
            ctx.request_repaint();
        }
    }
}
