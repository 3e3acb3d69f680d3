//! Application entry point for the 2D gravity sandbox.
//!
//! This binary parses the command line, loads the simulation config and
//! delegates all interactive logic and rendering to [`Viewer`] from the
//! `viewer` module.

mod viewer;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use sim_core::config::Config;
use viewer::Viewer;

#[derive(Parser, Debug)]
#[command(version, about = "Mutually gravitating, colliding bodies in a bounded 2D arena")]
struct Args {
    /// YAML config file; keys it leaves out keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start right away with this many bodies
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Seed for the spawn generator, overrides the config file
    #[arg(short, long)]
    seed: Option<u64>,
}

/// Starts the native eframe application.
///
/// The window is sized so the arena fits at scale 1 next to the config
/// panel. All UI state and rendering are handled by [`Viewer`].
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if the config cannot be loaded or eframe fails to create the
///   native window or event loop.
fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("gravity_2d_sim=info,sim_core=info"),
    )
    .init();

    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(seed) = args.seed {
        cfg.seed = Some(seed);
    }
    log::info!(
        "arena {}x{}, G = {}, dt = {}, {:?}, {:?} drag",
        cfg.width,
        cfg.height,
        cfg.g,
        cfg.dt,
        cfg.integration,
        cfg.drag_mode
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("2D Gravity Sandbox")
            .with_inner_size([cfg.width + 260.0, cfg.height + 80.0]),
        ..Default::default()
    };

    let viewer = Viewer::with_config(cfg, args.count);

    eframe::run_native(
        "2D Gravity Sandbox",
        options,
        Box::new(move |_cc| Ok(Box::new(viewer))),
    )
    .map_err(|e| anyhow::anyhow!("viewer exited with an error: {e}"))
}
