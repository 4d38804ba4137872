use glam::Vec2;
use log::debug;
use nalgebra as na;
use rand::seq::SliceRandom;

use crate::error::EstimateError;
use crate::types::Quad;

/// 3x3 perspective transform mapping template coordinates into frame
/// coordinates. Valid only for the frame that produced it.
#[derive(Debug, Clone)]
pub struct Homography(pub na::Matrix3<f64>);

impl Homography {
    pub fn project(&self, p: Vec2) -> Vec2 {
        let v = self.0 * na::Vector3::new(p.x as f64, p.y as f64, 1.0);
        Vec2::new((v[0] / v[2]) as f32, (v[1] / v[2]) as f32)
    }

    /// Projects the template rectangle corners, in the order
    /// (0,0), (0,h), (w,h), (w,0).
    pub fn project_corners(&self, width: u32, height: u32) -> Quad {
        let (w, h) = (width as f32, height as f32);
        Quad([
            self.project(Vec2::new(0.0, 0.0)),
            self.project(Vec2::new(0.0, h)),
            self.project(Vec2::new(w, h)),
            self.project(Vec2::new(w, 0.0)),
        ])
    }
}

/// Narrow seam over the robust-estimation primitive.
pub trait HomographyEstimator {
    fn estimate(&self, src: &[Vec2], dst: &[Vec2]) -> Result<Homography, EstimateError>;
}

/// RANSAC over a normalized 4-point DLT solver, refit on the inlier set.
pub struct RansacHomography {
    pub iterations: usize,
    /// Reprojection tolerance in pixels.
    pub reproj_threshold: f64,
    pub min_inliers: usize,
}

impl RansacHomography {
    pub fn new(iterations: usize, reproj_threshold: f64, min_inliers: usize) -> RansacHomography {
        RansacHomography {
            iterations,
            reproj_threshold,
            min_inliers,
        }
    }
}

struct Normalized {
    transform: na::Matrix3<f64>,
    inverse: na::Matrix3<f64>,
    points: Vec<na::Vector2<f64>>,
}

/// Hartley normalization: centroid to the origin, mean distance sqrt(2).
fn normalize(points: &[Vec2]) -> Normalized {
    let n = points.len() as f64;
    let (mut cx, mut cy) = (0.0, 0.0);
    for p in points {
        cx += p.x as f64;
        cy += p.y as f64;
    }
    cx /= n;
    cy /= n;
    let mut mean_dist = 0.0;
    for p in points {
        mean_dist += ((p.x as f64 - cx).powi(2) + (p.y as f64 - cy).powi(2)).sqrt();
    }
    mean_dist /= n;
    let scale = if mean_dist > f64::EPSILON {
        std::f64::consts::SQRT_2 / mean_dist
    } else {
        1.0
    };
    let transform =
        na::Matrix3::new(scale, 0.0, -scale * cx, 0.0, scale, -scale * cy, 0.0, 0.0, 1.0);
    let inverse = na::Matrix3::new(
        1.0 / scale,
        0.0,
        cx,
        0.0,
        1.0 / scale,
        cy,
        0.0,
        0.0,
        1.0,
    );
    let points = points
        .iter()
        .map(|p| na::Vector2::new(scale * (p.x as f64 - cx), scale * (p.y as f64 - cy)))
        .collect();
    Normalized {
        transform,
        inverse,
        points,
    }
}

/// Direct linear transform. The null space of the 2n x 9 design matrix is
/// taken from the smallest eigenpair of A^T A.
fn dlt(src: &[na::Vector2<f64>], dst: &[na::Vector2<f64>]) -> Option<na::Matrix3<f64>> {
    let n = src.len();
    let mut a = na::DMatrix::<f64>::zeros(2 * n, 9);
    for (i, (s, d)) in src.iter().zip(dst).enumerate() {
        let (x, y) = (s.x, s.y);
        let (u, v) = (d.x, d.y);
        a.set_row(
            2 * i,
            &na::RowDVector::from_row_slice(&[-x, -y, -1.0, 0.0, 0.0, 0.0, u * x, u * y, u]),
        );
        a.set_row(
            2 * i + 1,
            &na::RowDVector::from_row_slice(&[0.0, 0.0, 0.0, -x, -y, -1.0, v * x, v * y, v]),
        );
    }
    let ata = a.transpose() * &a;
    let eigen = na::SymmetricEigen::new(ata);
    let mut min_idx = 0;
    for i in 1..eigen.eigenvalues.len() {
        if eigen.eigenvalues[i] < eigen.eigenvalues[min_idx] {
            min_idx = i;
        }
    }
    let h = eigen.eigenvectors.column(min_idx);
    let mat = na::Matrix3::new(h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], h[8]);
    if mat.norm() < f64::EPSILON {
        return None;
    }
    Some(mat)
}

fn reprojection_error(h: &na::Matrix3<f64>, src: Vec2, dst: Vec2) -> f64 {
    let v = h * na::Vector3::new(src.x as f64, src.y as f64, 1.0);
    if v[2].abs() < f64::EPSILON {
        return f64::MAX;
    }
    let dx = v[0] / v[2] - dst.x as f64;
    let dy = v[1] / v[2] - dst.y as f64;
    (dx * dx + dy * dy).sqrt()
}

impl HomographyEstimator for RansacHomography {
    fn estimate(&self, src: &[Vec2], dst: &[Vec2]) -> Result<Homography, EstimateError> {
        let count = src.len().min(dst.len());
        if count < 4 {
            return Err(EstimateError::NotEnoughPoints {
                needed: 4,
                got: count,
            });
        }
        let src_norm = normalize(src);
        let dst_norm = normalize(dst);

        let mut rng = rand::rng();
        let mut nums: Vec<usize> = (0..count).collect();
        let mut best_h: Option<na::Matrix3<f64>> = None;
        let mut best_inliers: Vec<usize> = Vec::new();
        for _ in 0..self.iterations {
            nums.shuffle(&mut rng);
            let s: Vec<_> = nums[..4].iter().map(|&i| src_norm.points[i]).collect();
            let d: Vec<_> = nums[..4].iter().map(|&i| dst_norm.points[i]).collect();
            let Some(h_norm) = dlt(&s, &d) else {
                continue;
            };
            let h = dst_norm.inverse * h_norm * src_norm.transform;
            let inliers: Vec<usize> = (0..count)
                .filter(|&i| reprojection_error(&h, src[i], dst[i]) < self.reproj_threshold)
                .collect();
            if inliers.len() > best_inliers.len() {
                best_inliers = inliers;
                best_h = Some(h);
                if best_inliers.len() == count {
                    break;
                }
            }
        }

        let Some(rough) = best_h else {
            debug!("no homography candidate survived {} iterations", self.iterations);
            return Err(EstimateError::Degenerate {
                min_inliers: self.min_inliers,
            });
        };
        if best_inliers.len() < self.min_inliers {
            debug!(
                "best candidate has {} inliers, need {}",
                best_inliers.len(),
                self.min_inliers
            );
            return Err(EstimateError::Degenerate {
                min_inliers: self.min_inliers,
            });
        }

        // refit on all inliers in normalized space
        let s: Vec<_> = best_inliers.iter().map(|&i| src_norm.points[i]).collect();
        let d: Vec<_> = best_inliers.iter().map(|&i| dst_norm.points[i]).collect();
        let refit = dlt(&s, &d)
            .map(|h_norm| dst_norm.inverse * h_norm * src_norm.transform)
            .unwrap_or(rough);
        Ok(Homography(refit))
    }
}
