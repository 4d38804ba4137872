use image::{GrayImage, Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_circle_mut, draw_line_segment_mut};

use crate::detection::FeatureSet;
use crate::types::{BgrFrame, MatchPair, Quad};
use crate::visualization::id_to_color;

/// Reorders B,G,R bytes into R,G,B for display. Pure; the output dimensions
/// always match the input.
pub fn bgr_to_rgb(frame: &BgrFrame) -> RgbImage {
    let mut out = RgbImage::new(frame.width(), frame.height());
    for (dst, src) in out.pixels_mut().zip(frame.pixels()) {
        let [b, g, r] = src.0;
        dst.0 = [r, g, b];
    }
    out
}

/// BT.601 luma over BGR byte order.
pub fn gray_from_bgr(frame: &BgrFrame) -> GrayImage {
    let mut out = GrayImage::new(frame.width(), frame.height());
    for (dst, src) in out.pixels_mut().zip(frame.pixels()) {
        let [b, g, r] = src.0;
        let y = 0.114 * b as f32 + 0.587 * g as f32 + 0.299 * r as f32;
        dst.0 = [y.round().clamp(0.0, 255.0) as u8];
    }
    out
}

/// Draws the projected template outline as a closed polyline.
/// (255, 0, 0) in BGR byte order is blue.
pub fn draw_quad_mut(frame: &mut BgrFrame, quad: &Quad) {
    for i in 0..4 {
        let a = quad.0[i];
        let b = quad.0[(i + 1) % 4];
        draw_line_segment_mut(frame, (a.x, a.y), (b.x, b.y), Rgb([255, 0, 0]));
    }
}

fn draw_keypoints_mut(image: &mut BgrFrame, features: &FeatureSet, x_offset: f32) {
    for i in 0..features.len() {
        let p = features.keypoint(i);
        draw_hollow_circle_mut(
            image,
            ((p.x + x_offset) as i32, p.y as i32),
            3,
            Rgb([0, 255, 0]),
        );
    }
}

/// Template and frame side by side, keypoints circled, one colored line per
/// surviving correspondence. Shown when too few matches pass the ratio test.
pub fn side_by_side_matches(
    template: &GrayImage,
    template_features: &FeatureSet,
    frame: &BgrFrame,
    frame_features: &FeatureSet,
    matches: &[MatchPair],
) -> BgrFrame {
    let split = template.width();
    let width = split + frame.width();
    let height = template.height().max(frame.height());
    let mut out = BgrFrame::new(width, height);
    for (x, y, p) in template.enumerate_pixels() {
        let v = p.0[0];
        out.put_pixel(x, y, Rgb([v, v, v]));
    }
    for (x, y, p) in frame.enumerate_pixels() {
        out.put_pixel(x + split, y, *p);
    }
    draw_keypoints_mut(&mut out, template_features, 0.0);
    draw_keypoints_mut(&mut out, frame_features, split as f32);
    for (i, m) in matches.iter().enumerate() {
        let a = template_features.keypoint(m.best.query);
        let b = frame_features.keypoint(m.best.train);
        let (r, g, bl, _) = id_to_color(i);
        draw_line_segment_mut(
            &mut out,
            (a.x, a.y),
            (b.x + split as f32, b.y),
            Rgb([r, g, bl]),
        );
    }
    out
}
