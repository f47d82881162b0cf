use ndarray::{Array, Ix1};

use crate::error::FedvrError;

pub mod lobatto_points;

/// Gauss–Lobatto–Legendre rule on the reference interval `[-1, 1]`.
#[derive(Clone, Debug)]
pub struct GaussPoints1d {
    pub points: Array<f64, Ix1>,
    pub weights: Array<f64, Ix1>,
}
impl GaussPoints1d {
    pub fn new(points_num: usize) -> Result<Self, FedvrError> {
        let (points, weights) = lobatto_points::get_lobatto_points_interval(points_num)?;
        Ok(Self { points, weights })
    }
    /// Affine map of the rule onto `[a, b]`.
    ///
    /// The first and last points are set to `a` and `b` directly, so two
    /// elements sharing a breakpoint get bit-identical boundary nodes.
    pub fn map_to_interval(&self, a: f64, b: f64) -> (Array<f64, Ix1>, Array<f64, Ix1>) {
        let half = 0.5 * (b - a);
        let last = self.points.len() - 1;
        let points = Array::from_iter(self.points.iter().enumerate().map(|(k, &xi)| {
            if k == 0 {
                a
            } else if k == last {
                b
            } else {
                a + half * (xi + 1.0)
            }
        }));
        let weights = self.weights.mapv(|w| w * half);
        (points, weights)
    }
}
