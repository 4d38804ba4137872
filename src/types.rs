use glam::Vec2;

/// Color frame in BGR byte order, as delivered by the capture path.
///
/// The `Rgb<u8>` pixel type is storage only; channel 0 holds blue. Use
/// [`crate::render::bgr_to_rgb`] before handing a frame to the display.
pub type BgrFrame = image::RgbImage;

/// Candidate correspondence between a template descriptor and a frame
/// descriptor, with the Hamming distance between the two.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correspondence {
    pub query: usize,
    pub train: usize,
    pub distance: f32,
}

/// Best and second-best train candidates for one query descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchPair {
    pub best: Correspondence,
    pub second: Correspondence,
}

/// Projected template outline in frame coordinates, corner order
/// (0,0), (0,h), (w,h), (w,0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad(pub [Vec2; 4]);

/// Camera toggle state owned by the application shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub enabled: bool,
    pub device_id: u32,
    pub target_fps: f32,
}

impl CameraState {
    pub fn new(device_id: u32, target_fps: f32) -> CameraState {
        CameraState {
            enabled: false,
            device_id,
            target_fps,
        }
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    /// Label for the toggle button, naming the next action.
    pub fn button_label(&self) -> &'static str {
        if self.enabled {
            "Disable camera"
        } else {
            "Enable camera"
        }
    }
}
