use glam::Vec2;
use image::{GrayImage, Rgb};
use template_tracker::detection::FeatureSet;
use template_tracker::render::{bgr_to_rgb, draw_quad_mut, gray_from_bgr, side_by_side_matches};
use template_tracker::types::{BgrFrame, Quad};

#[test]
fn bgr_to_rgb_swaps_channels() {
    let mut frame = BgrFrame::new(2, 1);
    frame.put_pixel(0, 0, Rgb([1, 2, 3]));
    frame.put_pixel(1, 0, Rgb([200, 100, 50]));

    let rgb = bgr_to_rgb(&frame);
    assert_eq!(rgb.dimensions(), frame.dimensions());
    assert_eq!(rgb.get_pixel(0, 0).0, [3, 2, 1]);
    assert_eq!(rgb.get_pixel(1, 0).0, [50, 100, 200]);

    // pure: a second call is byte-for-byte identical
    assert_eq!(bgr_to_rgb(&frame).as_raw(), rgb.as_raw());
}

#[test]
fn gray_from_bgr_uses_bt601_weights() {
    let blue = BgrFrame::from_pixel(1, 1, Rgb([255, 0, 0]));
    let green = BgrFrame::from_pixel(1, 1, Rgb([0, 255, 0]));
    let red = BgrFrame::from_pixel(1, 1, Rgb([0, 0, 255]));
    let gray = BgrFrame::from_pixel(1, 1, Rgb([90, 90, 90]));

    assert_eq!(gray_from_bgr(&blue).get_pixel(0, 0).0, [29]);
    assert_eq!(gray_from_bgr(&green).get_pixel(0, 0).0, [150]);
    assert_eq!(gray_from_bgr(&red).get_pixel(0, 0).0, [76]);
    assert_eq!(gray_from_bgr(&gray).get_pixel(0, 0).0, [90]);
}

#[test]
fn quad_outline_is_blue_in_bgr() {
    let mut frame = BgrFrame::new(100, 100);
    let quad = Quad([
        Vec2::new(10.0, 10.0),
        Vec2::new(10.0, 50.0),
        Vec2::new(50.0, 50.0),
        Vec2::new(50.0, 10.0),
    ]);
    draw_quad_mut(&mut frame, &quad);

    // edge midpoints carry (255, 0, 0), blue in BGR byte order
    assert_eq!(frame.get_pixel(30, 10).0, [255, 0, 0]);
    assert_eq!(frame.get_pixel(10, 30).0, [255, 0, 0]);
    assert_eq!(frame.get_pixel(30, 50).0, [255, 0, 0]);
    assert_eq!(frame.get_pixel(50, 30).0, [255, 0, 0]);
    // interior untouched
    assert_eq!(frame.get_pixel(30, 30).0, [0, 0, 0]);
}

#[test]
fn match_view_places_images_side_by_side() {
    let template = GrayImage::from_pixel(40, 30, image::Luma([120]));
    let frame = BgrFrame::from_pixel(80, 60, Rgb([10, 20, 30]));
    let no_features = FeatureSet {
        descriptors: Vec::new(),
    };

    let view = side_by_side_matches(&template, &no_features, &frame, &no_features, &[]);
    assert_eq!(view.dimensions(), (120, 60));
    // grayscale template expanded to three channels on the left
    assert_eq!(view.get_pixel(5, 5).0, [120, 120, 120]);
    // frame copied to the right of the split
    assert_eq!(view.get_pixel(45, 5).0, [10, 20, 30]);
    // area below the shorter template stays blank
    assert_eq!(view.get_pixel(5, 45).0, [0, 0, 0]);
}
