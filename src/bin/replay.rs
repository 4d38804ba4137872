use std::time::Instant;

use clap::Parser;
use image::DynamicImage;
use indicatif::ProgressBar;
use template_tracker::config::TrackerConfig;
use template_tracker::detection::{BriefDetector, FeatureDetector};
use template_tracker::error::SourceError;
use template_tracker::pipeline::{TemplateTracker, TickOutcome};
use template_tracker::render;
use template_tracker::source::{FolderSource, FrameSource};
use template_tracker::template::TemplateHolder;
use template_tracker::visualization::{log_image_as_compressed, log_keypoints, log_quad};

/// Headless run of the matching pipeline over a folder of frames, with the
/// per-frame results logged to a rerun recording.
#[derive(Parser)]
#[command(version, about, author)]
struct ReplayCli {
    /// path to the template image
    template: String,

    /// path to a folder of frame images
    frames: String,

    /// output rerun recording
    #[arg(long, default_value = "replay.rrd")]
    output: String,

    /// optional JSON config overriding the built-in defaults
    #[arg(long)]
    config: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = ReplayCli::parse();
    let config = match &cli.config {
        Some(path) => TrackerConfig::from_json(path)?,
        None => TrackerConfig::default(),
    };
    let tracker = TemplateTracker::from_config(&config);

    let mut template = TemplateHolder::new();
    template.set_path(&cli.template);
    let template_gray = template.grayscale()?;
    println!("Loaded template image file: {}", cli.template);

    let recording = rerun::RecordingStreamBuilder::new("template-tracker").save(&cli.output)?;
    log_image_as_compressed(
        &recording,
        "template",
        &DynamicImage::ImageLuma8(template_gray.clone()),
    );
    let detector = BriefDetector::new(config.fast_threshold, config.descriptor_length);
    let template_features = detector.detect(&template_gray)?;
    log_keypoints(&recording, "template", &template_features);

    let mut source = FolderSource::new(&cli.frames)?;
    let bar = ProgressBar::new(source.len() as u64);
    let now = Instant::now();
    let mut frame_idx = 0i64;
    let mut detections = 0usize;
    loop {
        let frame = match source.read_frame() {
            Ok(f) => f,
            Err(SourceError::Exhausted) => break,
            Err(e) => {
                log::warn!("skipping frame: {e}");
                bar.inc(1);
                continue;
            }
        };
        recording.set_time_sequence("frame", frame_idx);
        match tracker.process(&template_gray, frame) {
            Ok(TickOutcome::Overlay { image, quad, .. }) => {
                detections += 1;
                log_image_as_compressed(
                    &recording,
                    "live",
                    &DynamicImage::ImageRgb8(render::bgr_to_rgb(&image)),
                );
                log_quad(&recording, "live", &quad);
            }
            Ok(TickOutcome::MatchDebug { image, .. }) => {
                log_image_as_compressed(
                    &recording,
                    "live",
                    &DynamicImage::ImageRgb8(render::bgr_to_rgb(&image)),
                );
            }
            Err(e) => log::warn!("skipping frame: {e}"),
        }
        frame_idx += 1;
        bar.inc(1);
    }
    bar.finish();

    let duration_sec = now.elapsed().as_secs_f64();
    println!("processed {} frames in {:.6} sec", frame_idx, duration_sec);
    if frame_idx > 0 {
        println!("avg: {} sec", duration_sec / frame_idx as f64);
    }
    println!("template detected in {} frames", detections);
    Ok(())
}
