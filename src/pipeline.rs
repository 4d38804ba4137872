use image::GrayImage;
use log::{debug, trace};

use crate::config::TrackerConfig;
use crate::detection::{BriefDetector, FeatureDetector};
use crate::error::TrackError;
use crate::homography::{HomographyEstimator, RansacHomography};
use crate::matching::{DescriptorMatcher, HammingMatcher, ratio_filter};
use crate::render;
use crate::types::{BgrFrame, Quad};

/// Result of one tick of the match-and-render loop.
pub enum TickOutcome {
    /// Confident match: the frame with the projected template outline drawn
    /// in, plus the outline itself.
    Overlay {
        image: BgrFrame,
        quad: Quad,
        matches: usize,
    },
    /// Not enough confident correspondences: template and frame side by side
    /// with the surviving matches drawn as lines.
    MatchDebug { image: BgrFrame, matches: usize },
}

impl TickOutcome {
    pub fn image(&self) -> &BgrFrame {
        match self {
            TickOutcome::Overlay { image, .. } => image,
            TickOutcome::MatchDebug { image, .. } => image,
        }
    }
}

/// Per-frame matching pipeline: detect, match, ratio-filter, and either
/// project the template outline or fall back to the match visualization.
pub struct TemplateTracker {
    detector: Box<dyn FeatureDetector>,
    matcher: Box<dyn DescriptorMatcher>,
    estimator: Box<dyn HomographyEstimator>,
    ratio: f32,
    min_matches: usize,
}

impl TemplateTracker {
    pub fn from_config(config: &TrackerConfig) -> TemplateTracker {
        TemplateTracker::new(
            Box::new(BriefDetector::new(
                config.fast_threshold,
                config.descriptor_length,
            )),
            Box::new(HammingMatcher),
            Box::new(RansacHomography::new(
                config.ransac_iterations,
                config.reproj_threshold,
                config.min_matches,
            )),
            config.ratio,
            config.min_matches,
        )
    }

    pub fn new(
        detector: Box<dyn FeatureDetector>,
        matcher: Box<dyn DescriptorMatcher>,
        estimator: Box<dyn HomographyEstimator>,
        ratio: f32,
        min_matches: usize,
    ) -> TemplateTracker {
        TemplateTracker {
            detector,
            matcher,
            estimator,
            ratio,
            min_matches,
        }
    }

    /// Runs one tick on `frame`. Homography estimation is attempted only when
    /// strictly more than `min_matches` correspondences survive the ratio
    /// filter; an estimation failure is fatal to the tick and surfaces as an
    /// error so the caller can skip rendering.
    pub fn process(
        &self,
        template: &GrayImage,
        mut frame: BgrFrame,
    ) -> Result<TickOutcome, TrackError> {
        let gray = render::gray_from_bgr(&frame);
        let template_features = self.detector.detect(template)?;
        let frame_features = self.detector.detect(&gray)?;
        let pairs = self.matcher.knn2(
            &template_features.descriptors,
            &frame_features.descriptors,
        );
        let good = ratio_filter(&pairs, self.ratio);
        trace!(
            "{} candidate pairs, {} after ratio filter",
            pairs.len(),
            good.len()
        );

        if good.len() > self.min_matches {
            let src: Vec<_> = good
                .iter()
                .map(|m| template_features.keypoint(m.best.query))
                .collect();
            let dst: Vec<_> = good
                .iter()
                .map(|m| frame_features.keypoint(m.best.train))
                .collect();
            let homography = self.estimator.estimate(&src, &dst)?;
            let quad = homography.project_corners(template.width(), template.height());
            render::draw_quad_mut(&mut frame, &quad);
            Ok(TickOutcome::Overlay {
                image: frame,
                quad,
                matches: good.len(),
            })
        } else {
            debug!(
                "only {} confident matches, falling back to match view",
                good.len()
            );
            let image = render::side_by_side_matches(
                template,
                &template_features,
                &frame,
                &frame_features,
                &good,
            );
            Ok(TickOutcome::MatchDebug {
                image,
                matches: good.len(),
            })
        }
    }
}
