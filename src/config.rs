use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Tunable parameters for the capture and matching pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Camera device index.
    pub cam_id: u32,
    /// Capture rate the tick interval is derived from.
    pub cam_fps: f32,
    /// Requested capture width. Advisory; the device may deliver another size.
    pub request_width: u32,
    pub request_height: u32,
    /// FAST-9 corner threshold.
    pub fast_threshold: u8,
    /// BRIEF descriptor length in bits.
    pub descriptor_length: usize,
    /// Lowe ratio-test constant. Lower keeps fewer, higher-confidence matches.
    pub ratio: f32,
    /// Filtered correspondence count must exceed this before homography
    /// estimation runs.
    pub min_matches: usize,
    pub ransac_iterations: usize,
    /// RANSAC reprojection tolerance in pixels.
    pub reproj_threshold: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            cam_id: 0,
            cam_fps: 2.0,
            request_width: 320,
            request_height: 240,
            fast_threshold: 35,
            descriptor_length: 256,
            ratio: 0.65,
            min_matches: 4,
            ransac_iterations: 1000,
            reproj_threshold: 5.0,
        }
    }
}

impl TrackerConfig {
    /// Tick period of the camera timer, `100 / fps` milliseconds. The divisor
    /// is deliberate; the UI cadence is tuned around it, not around true
    /// frame-interval pacing.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis((100.0 / self.cam_fps) as u64)
    }

    pub fn from_json(path: &str) -> anyhow::Result<TrackerConfig> {
        let contents =
            std::fs::read_to_string(path).with_context(|| format!("reading config {path}"))?;
        let config =
            serde_json::from_str(&contents).with_context(|| format!("parsing config {path}"))?;
        Ok(config)
    }

    pub fn to_json(&self, output_path: &str) -> anyhow::Result<()> {
        let j = serde_json::to_string_pretty(self)?;
        std::fs::write(output_path, j).with_context(|| format!("writing config {output_path}"))?;
        Ok(())
    }
}
