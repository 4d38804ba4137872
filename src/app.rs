use std::path::PathBuf;
use std::time::{Duration, Instant};

use eframe::egui;
use log::warn;

use crate::config::TrackerConfig;
use crate::pipeline::TemplateTracker;
use crate::render;
use crate::source::{CameraSource, FrameSource};
use crate::template::TemplateHolder;
use crate::types::CameraState;

/// Application shell: two buttons, a template preview, the live view, and the
/// repeating tick that drives the matching pipeline. Everything runs on the
/// UI thread; a tick always finishes before the next one is considered.
pub struct TrackerApp {
    tracker: TemplateTracker,
    template: TemplateHolder,
    camera: Option<Box<dyn FrameSource>>,
    cam_state: CameraState,
    tick_interval: Duration,
    last_tick: Instant,
    template_texture: Option<egui::TextureHandle>,
    live_texture: Option<egui::TextureHandle>,
}

impl TrackerApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: TrackerConfig,
        template_path: Option<PathBuf>,
    ) -> TrackerApp {
        let camera =
            match CameraSource::new(config.cam_id, config.request_width, config.request_height) {
                Ok(c) => Some(Box::new(c) as Box<dyn FrameSource>),
                Err(e) => {
                    warn!("{e}");
                    None
                }
            };
        let mut app = TrackerApp {
            tracker: TemplateTracker::from_config(&config),
            template: TemplateHolder::new(),
            camera,
            cam_state: CameraState::new(config.cam_id, config.cam_fps),
            tick_interval: config.tick_interval(),
            last_tick: Instant::now(),
            template_texture: None,
            live_texture: None,
        };
        if let Some(path) = template_path {
            app.template.set_path(path);
            app.refresh_template_preview(&cc.egui_ctx);
        }
        app
    }

    fn browse(&mut self, ctx: &egui::Context) {
        // modal dialog; cancellation keeps the previous path
        let Some(path) = rfd::FileDialog::new()
            .add_filter("image", &["png", "jpg", "jpeg", "bmp"])
            .pick_file()
        else {
            return;
        };
        self.template.set_path(path);
        self.refresh_template_preview(ctx);
    }

    fn refresh_template_preview(&mut self, ctx: &egui::Context) {
        let Some(path) = self.template.path() else {
            return;
        };
        match image::open(path) {
            Ok(img) => {
                let rgb = img.to_rgb8();
                let size = [rgb.width() as usize, rgb.height() as usize];
                let preview = egui::ColorImage::from_rgb(size, rgb.as_raw());
                self.template_texture =
                    Some(ctx.load_texture("template", preview, egui::TextureOptions::LINEAR));
                println!("Loaded template image file: {}", path.display());
            }
            Err(e) => {
                warn!("failed to decode template {}: {e}", path.display());
                self.template_texture = None;
            }
        }
    }

    /// One timer tick. Any per-tick failure is logged and the previous live
    /// image stays on screen.
    fn run_tick(&mut self, ctx: &egui::Context) {
        let Some(camera) = self.camera.as_mut() else {
            return;
        };
        let frame = match camera.read_frame() {
            Ok(f) => f,
            Err(e) => {
                warn!("dropping tick: {e}");
                return;
            }
        };
        if !self.template.loaded() {
            // no template yet, just show the live feed
            let rgb = render::bgr_to_rgb(&frame);
            self.set_live(ctx, &rgb);
            return;
        }
        let template_gray = match self.template.grayscale() {
            Ok(t) => t,
            Err(e) => {
                warn!("dropping tick: {e}");
                return;
            }
        };
        match self.tracker.process(&template_gray, frame) {
            Ok(outcome) => {
                let rgb = render::bgr_to_rgb(outcome.image());
                self.set_live(ctx, &rgb);
            }
            Err(e) => warn!("dropping tick: {e}"),
        }
    }

    fn set_live(&mut self, ctx: &egui::Context, rgb: &image::RgbImage) {
        let size = [rgb.width() as usize, rgb.height() as usize];
        let img = egui::ColorImage::from_rgb(size, rgb.as_raw());
        match &mut self.live_texture {
            Some(t) => t.set(img, egui::TextureOptions::LINEAR),
            None => {
                self.live_texture = Some(ctx.load_texture("live", img, egui::TextureOptions::LINEAR))
            }
        }
    }
}

impl eframe::App for TrackerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.cam_state.enabled && self.last_tick.elapsed() >= self.tick_interval {
            self.last_tick = Instant::now();
            self.run_tick(ctx);
        }

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Browse").clicked() {
                    self.browse(ctx);
                }
                if ui.button(self.cam_state.button_label()).clicked() {
                    self.cam_state.toggle();
                }
            });
        });
        egui::SidePanel::left("template_panel").show(ctx, |ui| {
            ui.heading("Template");
            match &self.template_texture {
                Some(t) => {
                    ui.image(t);
                }
                None => {
                    ui.label("No template loaded");
                }
            }
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            match &self.live_texture {
                Some(t) => {
                    ui.image(t);
                }
                None => {
                    ui.label("Camera disabled");
                }
            }
        });

        if self.cam_state.enabled {
            ctx.request_repaint_after(self.tick_interval);
        }
    }
}
