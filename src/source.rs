use std::path::PathBuf;

use image::ImageReader;
use log::trace;
use nokhwa::Camera;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{
    CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
};

use crate::error::SourceError;
use crate::types::BgrFrame;

/// Produces the sequence of live color frames.
pub trait FrameSource {
    /// Next frame in BGR byte order. The delivered resolution may differ from
    /// anything requested at construction; callers must use the frame's own
    /// dimensions.
    fn read_frame(&mut self) -> Result<BgrFrame, SourceError>;
}

/// Live webcam source. The device handle is held for the process lifetime and
/// released implicitly on drop.
pub struct CameraSource {
    camera: Camera,
}

impl CameraSource {
    /// Opens the device. The capture resolution is advisory only.
    pub fn new(device_id: u32, width: u32, height: u32) -> Result<CameraSource, SourceError> {
        let format = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(
            CameraFormat::new(Resolution::new(width, height), FrameFormat::MJPEG, 30),
        ));
        let mut camera = Camera::new(CameraIndex::Index(device_id), format)
            .map_err(|e| SourceError::Open(device_id, e.to_string()))?;
        camera
            .open_stream()
            .map_err(|e| SourceError::Open(device_id, e.to_string()))?;
        Ok(CameraSource { camera })
    }
}

impl FrameSource for CameraSource {
    fn read_frame(&mut self) -> Result<BgrFrame, SourceError> {
        let buffer = self
            .camera
            .frame()
            .map_err(|e| SourceError::Read(e.to_string()))?;
        let rgb = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| SourceError::Read(e.to_string()))?;
        // the rest of the pipeline keeps the capture-device BGR convention
        let mut frame = BgrFrame::new(rgb.width(), rgb.height());
        for (dst, src) in frame.pixels_mut().zip(rgb.pixels()) {
            let [r, g, b] = src.0;
            dst.0 = [b, g, r];
        }
        Ok(frame)
    }
}

fn img_filter(rp: glob::GlobResult) -> Option<PathBuf> {
    if let Ok(p) = rp {
        for ext in &[".png", ".jpg"] {
            if p.as_os_str().to_string_lossy().ends_with(ext) {
                return Some(p);
            }
        }
    }
    None
}

/// Replays a directory of images in sorted order. Used by the headless replay
/// binary and by tests.
pub struct FolderSource {
    paths: Vec<PathBuf>,
    next: usize,
}

impl FolderSource {
    pub fn new(root: &str) -> Result<FolderSource, SourceError> {
        let img_paths =
            glob::glob(format!("{}/*", root).as_str()).map_err(|e| SourceError::Read(e.to_string()))?;
        let mut paths: Vec<PathBuf> = img_paths.into_iter().filter_map(img_filter).collect();
        paths.sort();
        Ok(FolderSource { paths, next: 0 })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl FrameSource for FolderSource {
    fn read_frame(&mut self) -> Result<BgrFrame, SourceError> {
        let path = self
            .paths
            .get(self.next)
            .ok_or(SourceError::Exhausted)?
            .clone();
        self.next += 1;
        trace!("replaying {}", path.display());
        let img = ImageReader::open(&path)
            .map_err(|e| SourceError::Read(e.to_string()))?
            .decode()
            .map_err(|e| SourceError::Read(e.to_string()))?;
        let rgb = img.to_rgb8();
        let mut frame = BgrFrame::new(rgb.width(), rgb.height());
        for (dst, src) in frame.pixels_mut().zip(rgb.pixels()) {
            let [r, g, b] = src.0;
            dst.0 = [b, g, r];
        }
        Ok(frame)
    }
}
