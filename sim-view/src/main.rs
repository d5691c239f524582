//! Application entry point for the 2D gravity simulation viewer.
//!
//! This binary parses the command line, sets up logging and eframe/egui,
//! and delegates all interactive logic and rendering to [`Viewer`] from
//! the `viewer` module.

mod viewer;

use anyhow::Context;
use clap::Parser;
use sim_core::{config::Config, preset, types::Bounds};
use std::path::PathBuf;
use viewer::Viewer;

/// Interactive 2D N-body gravity simulation.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// World (and initial window) width.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// World (and initial window) height.
    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// Number of bodies created on restart.
    #[arg(long, default_value_t = 15)]
    objects: u32,

    /// Starting mass of each body, in units of 1e11 kg.
    #[arg(long, default_value_t = 50)]
    mass: u32,

    /// Start with reflecting borders enabled.
    #[arg(long)]
    border: bool,

    /// Seed for random placement and colours.
    #[arg(long)]
    seed: Option<u64>,

    /// Preset file with the initial layout.
    preset: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            bounds: Bounds::new(self.width, self.height),
            object_count: self.objects,
            base_mass: self.mass,
            border_enabled: self.border,
            ..Config::default()
        }
    }
}

/// Starts the native eframe application.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if the preset cannot be read or eframe fails to create the
///   native window or event loop.
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let cfg = args.config();

    let loaded = args
        .preset
        .as_deref()
        .map(|path| {
            preset::load(path).with_context(|| format!("failed to load preset {}", path.display()))
        })
        .transpose()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Gravity Simulation")
            .with_inner_size([args.width as f32, args.height as f32 + 120.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Gravity Simulation",
        options,
        Box::new(move |_cc| Ok(Box::new(Viewer::new(cfg, args.seed, loaded.as_ref())))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))
}
