use imageproc::binary_descriptors::BinaryDescriptor;
use imageproc::binary_descriptors::brief::BriefDescriptor;

use crate::types::{Correspondence, MatchPair};

/// Narrow seam over the nearest-neighbor primitive.
pub trait DescriptorMatcher {
    /// For each query descriptor, the best and second-best train candidates
    /// by Hamming distance. Empty when fewer than two train descriptors
    /// exist, since the ratio test needs both.
    fn knn2(&self, query: &[BriefDescriptor], train: &[BriefDescriptor]) -> Vec<MatchPair>;
}

/// Brute-force Hamming-distance matcher.
pub struct HammingMatcher;

impl DescriptorMatcher for HammingMatcher {
    fn knn2(&self, query: &[BriefDescriptor], train: &[BriefDescriptor]) -> Vec<MatchPair> {
        if train.len() < 2 {
            return Vec::new();
        }
        query
            .iter()
            .enumerate()
            .map(|(qi, qd)| {
                let mut best = Correspondence {
                    query: qi,
                    train: 0,
                    distance: f32::MAX,
                };
                let mut second = best;
                for (ti, td) in train.iter().enumerate() {
                    let d = qd.hamming_distance(td) as f32;
                    if d < best.distance {
                        second = best;
                        best = Correspondence {
                            query: qi,
                            train: ti,
                            distance: d,
                        };
                    } else if d < second.distance {
                        second = Correspondence {
                            query: qi,
                            train: ti,
                            distance: d,
                        };
                    }
                }
                MatchPair { best, second }
            })
            .collect()
    }
}

/// Lowe ratio test: keep a pair iff the best distance is clearly below the
/// second-best. Re-filtering a filtered list with the same ratio is the
/// identity.
pub fn ratio_filter(pairs: &[MatchPair], ratio: f32) -> Vec<MatchPair> {
    pairs
        .iter()
        .filter(|p| p.best.distance < ratio * p.second.distance)
        .copied()
        .collect()
}
