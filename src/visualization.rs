use std::io::Cursor;

use image::DynamicImage;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rerun::RecordingStream;

use crate::detection::FeatureSet;
use crate::types::Quad;

pub fn log_image_as_compressed(recording: &RecordingStream, topic: &str, img: &DynamicImage) {
    let mut bytes: Vec<u8> = Vec::new();

    img.to_rgb8()
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();

    recording
        .log(
            format!("{}/image", topic),
            &rerun::EncodedImage::from_file_contents(bytes),
        )
        .unwrap();
}

pub fn id_to_color(id: usize) -> (u8, u8, u8, u8) {
    let mut rng = ChaCha8Rng::seed_from_u64(id as u64);
    let color_num = rng.random_range(0..2u32.pow(24));
    (
        ((color_num >> 16) % 256) as u8,
        ((color_num >> 8) % 256) as u8,
        (color_num % 256) as u8,
        255,
    )
}

/// rerun use top left corner as (0, 0)
pub fn rerun_shift(p2ds: &[(f32, f32)]) -> Vec<(f32, f32)> {
    p2ds.iter().map(|(x, y)| (*x + 0.5, *y + 0.5)).collect()
}

pub fn log_keypoints(recording: &RecordingStream, topic: &str, features: &FeatureSet) {
    let (pts, colors): (Vec<_>, Vec<_>) = (0..features.len())
        .map(|i| {
            let p = features.keypoint(i);
            ((p.x, p.y), id_to_color(i))
        })
        .unzip();
    let pts = rerun_shift(&pts);
    recording
        .log(
            format!("{}/pts", topic),
            &rerun::Points2D::new(pts)
                .with_colors(colors)
                .with_radii([rerun::Radius::new_ui_points(5.0)]),
        )
        .unwrap();
}

pub fn log_quad(recording: &RecordingStream, topic: &str, quad: &Quad) {
    let mut strip: Vec<(f32, f32)> = quad.0.iter().map(|p| (p.x, p.y)).collect();
    strip.push(strip[0]);
    let strip = rerun_shift(&strip);
    recording
        .log(
            format!("{}/quad", topic),
            &rerun::LineStrips2D::new([strip]).with_colors([(0, 0, 255, 255)]),
        )
        .unwrap();
}
