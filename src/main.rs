use std::path::PathBuf;

use clap::Parser;
use template_tracker::app::TrackerApp;
use template_tracker::config::TrackerConfig;

#[derive(Parser)]
#[command(version, about, author)]
struct TrackerCli {
    /// camera device index
    #[arg(long)]
    cam_id: Option<u32>,

    /// capture rate used to derive the tick interval
    #[arg(long)]
    fps: Option<f32>,

    /// optional JSON config overriding the built-in defaults
    #[arg(long)]
    config: Option<String>,

    /// template image to load at startup
    #[arg(long)]
    template: Option<PathBuf>,
}

fn main() -> eframe::Result {
    env_logger::init();
    let cli = TrackerCli::parse();
    let mut config = match &cli.config {
        Some(path) => TrackerConfig::from_json(path).unwrap_or_else(|e| {
            log::warn!("{e:#}, using defaults");
            TrackerConfig::default()
        }),
        None => TrackerConfig::default(),
    };
    if let Some(cam_id) = cli.cam_id {
        config.cam_id = cam_id;
    }
    if let Some(fps) = cli.fps {
        config.cam_fps = fps;
    }

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([960.0, 540.0]),
        ..Default::default()
    };
    eframe::run_native(
        "template-tracker",
        options,
        Box::new(move |cc| Ok(Box::new(TrackerApp::new(cc, config, cli.template)))),
    )
}
