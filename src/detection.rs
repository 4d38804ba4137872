use std::cell::RefCell;

use glam::Vec2;
use image::GrayImage;
use imageproc::binary_descriptors::BinaryDescriptor;
use imageproc::binary_descriptors::brief::{BriefDescriptor, TestPair, brief};
use imageproc::corners::{Corner, corners_fast9};
use imageproc::point::Point;

use crate::error::TrackError;

/// Keypoints with their binary descriptors for one image. Descriptors carry
/// their own pixel position, so keypoint `i` is read back from descriptor `i`.
pub struct FeatureSet {
    pub descriptors: Vec<BriefDescriptor>,
}

impl FeatureSet {
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Pixel position of keypoint `i`.
    pub fn keypoint(&self, i: usize) -> Vec2 {
        let p = self.descriptors[i].position();
        Vec2::new(p.x as f32, p.y as f32)
    }
}

/// Narrow seam over the keypoint/descriptor primitive so another detector can
/// be substituted without touching the pipeline.
pub trait FeatureDetector {
    fn detect(&self, image: &GrayImage) -> Result<FeatureSet, TrackError>;
}

/// FAST-9 corners described with BRIEF.
///
/// The BRIEF sampling pattern is generated on the first call and reused for
/// every later image so descriptors from different images stay comparable.
pub struct BriefDetector {
    fast_threshold: u8,
    descriptor_length: usize,
    patch_radius: u32,
    test_pairs: RefCell<Option<Vec<TestPair>>>,
}

impl BriefDetector {
    pub fn new(fast_threshold: u8, descriptor_length: usize) -> BriefDetector {
        BriefDetector {
            fast_threshold,
            descriptor_length,
            patch_radius: 16,
            test_pairs: RefCell::new(None),
        }
    }
}

/// BRIEF rejects keypoints whose sampling patch leaves the image.
fn keypoint_fits(corner: &Corner, width: u32, height: u32, radius: u32) -> bool {
    corner.x >= radius
        && corner.x + radius <= width
        && corner.y >= radius
        && corner.y + radius <= height
}

impl FeatureDetector for BriefDetector {
    fn detect(&self, image: &GrayImage) -> Result<FeatureSet, TrackError> {
        let (width, height) = image.dimensions();
        let keypoints: Vec<Point<u32>> = corners_fast9(image, self.fast_threshold)
            .into_iter()
            .filter(|c| keypoint_fits(c, width, height, self.patch_radius))
            .map(|c| c.into())
            .collect();
        if keypoints.is_empty() {
            return Ok(FeatureSet {
                descriptors: Vec::new(),
            });
        }
        let existing = self.test_pairs.borrow().clone();
        let (descriptors, pairs) = brief(
            image,
            &keypoints,
            self.descriptor_length,
            existing.as_ref(),
        )
        .map_err(|e| TrackError::Detection(e.to_string()))?;
        *self.test_pairs.borrow_mut() = Some(pairs);
        Ok(FeatureSet { descriptors })
    }
}
