use std::path::PathBuf;

use thiserror::Error;

/// Frame acquisition errors.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("camera device {0} could not be opened: {1}")]
    Open(u32, String),

    #[error("frame read failed: {0}")]
    Read(String),

    #[error("frame source exhausted")]
    Exhausted,
}

/// Homography estimation errors.
#[derive(Error, Debug)]
pub enum EstimateError {
    #[error("need at least {needed} correspondences, got {got}")]
    NotEnoughPoints { needed: usize, got: usize },

    #[error("no model with {min_inliers} inliers found")]
    Degenerate { min_inliers: usize },
}

/// Per-tick pipeline errors. All of these are fatal to the tick only; the
/// caller logs and skips rendering rather than aborting the process.
#[derive(Error, Debug)]
pub enum TrackError {
    #[error("no template image loaded")]
    TemplateMissing,

    #[error("failed to decode template {path}: {source}")]
    TemplateDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("feature detection failed: {0}")]
    Detection(String),

    #[error("frame source error: {0}")]
    Source(#[from] SourceError),

    #[error("homography estimation failed: {0}")]
    Estimation(#[from] EstimateError),
}
