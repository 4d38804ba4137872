use image::{GrayImage, Luma};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use template_tracker::detection::{BriefDetector, FeatureDetector};
use template_tracker::matching::{DescriptorMatcher, HammingMatcher, ratio_filter};
use template_tracker::types::{Correspondence, MatchPair};

fn pair(best: f32, second: f32) -> MatchPair {
    MatchPair {
        best: Correspondence {
            query: 0,
            train: 0,
            distance: best,
        },
        second: Correspondence {
            query: 0,
            train: 1,
            distance: second,
        },
    }
}

/// Blocks of random intensity give FAST plenty of corners.
fn textured_image(size: u32, seed: u64) -> GrayImage {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut img = GrayImage::new(size, size);
    for by in 0..size / 8 {
        for bx in 0..size / 8 {
            let v: u8 = rng.random_range(0..=255);
            for y in 0..8 {
                for x in 0..8 {
                    img.put_pixel(bx * 8 + x, by * 8 + y, Luma([v]));
                }
            }
        }
    }
    img
}

#[test]
fn ratio_filter_is_strict() {
    // threshold is best < ratio * second, strictly
    assert_eq!(ratio_filter(&[pair(64.0, 100.0)], 0.65).len(), 1);
    assert_eq!(ratio_filter(&[pair(65.0, 100.0)], 0.65).len(), 0);
    assert_eq!(ratio_filter(&[pair(90.0, 100.0)], 0.65).len(), 0);
}

#[test]
fn ratio_filter_is_idempotent() {
    let pairs = vec![
        pair(10.0, 100.0),
        pair(70.0, 100.0),
        pair(30.0, 50.0),
        pair(64.9, 100.0),
        pair(0.0, 1.0),
    ];
    let once = ratio_filter(&pairs, 0.65);
    let twice = ratio_filter(&once, 0.65);
    assert_eq!(once, twice);
    assert!(once.len() < pairs.len());
}

#[test]
fn knn2_self_match_has_zero_best_distance() {
    let img = textured_image(96, 11);
    let detector = BriefDetector::new(20, 256);
    let features = detector.detect(&img).unwrap();
    assert!(features.len() > 10, "expected a textured test image");

    let pairs = HammingMatcher.knn2(&features.descriptors, &features.descriptors);
    assert_eq!(pairs.len(), features.len());
    for p in &pairs {
        assert_eq!(p.best.distance, 0.0);
        assert!(p.second.distance >= p.best.distance);
    }
}

#[test]
fn knn2_needs_two_train_descriptors() {
    let img = textured_image(96, 11);
    let detector = BriefDetector::new(20, 256);
    let features = detector.detect(&img).unwrap();

    let flat = GrayImage::from_pixel(96, 96, Luma([90]));
    let empty = detector.detect(&flat).unwrap();
    assert!(empty.is_empty());

    let pairs = HammingMatcher.knn2(&features.descriptors, &empty.descriptors);
    assert!(pairs.is_empty());
}
