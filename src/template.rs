use std::path::{Path, PathBuf};

use image::{GrayImage, ImageReader};

use crate::error::TrackError;

/// Holds the user-selected reference image path.
///
/// The grayscale image is decoded from disk on every call, so replacing the
/// file on disk takes effect on the next tick.
#[derive(Debug, Default)]
pub struct TemplateHolder {
    path: Option<PathBuf>,
}

impl TemplateHolder {
    pub fn new() -> TemplateHolder {
        TemplateHolder::default()
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn loaded(&self) -> bool {
        self.path.is_some()
    }

    pub fn grayscale(&self) -> Result<GrayImage, TrackError> {
        let path = self.path.as_ref().ok_or(TrackError::TemplateMissing)?;
        let img = ImageReader::open(path)
            .map_err(|e| TrackError::TemplateDecode {
                path: path.clone(),
                source: image::ImageError::IoError(e),
            })?
            .decode()
            .map_err(|e| TrackError::TemplateDecode {
                path: path.clone(),
                source: e,
            })?;
        Ok(img.to_luma8())
    }
}
