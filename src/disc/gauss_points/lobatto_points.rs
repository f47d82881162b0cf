use nalgebra::DMatrix;
use ndarray::{Array, Array1, Ix1, array};
use statrs::function::gamma::gamma;

use crate::error::FedvrError;

const NEWTON_MAX_ITER: usize = 8;

/// Gauss–Lobatto–Legendre points and weights on `[-1, 1]`.
///
/// Interior points are the Gauss–Jacobi(1, 1) nodes, polished by Newton
/// iterations on `P'_{N}` with `N = points_num - 1`.
pub fn get_lobatto_points_interval(
    points_num: usize,
) -> Result<(Array<f64, Ix1>, Array<f64, Ix1>), FedvrError> {
    let (points, weights) = match points_num {
        0 | 1 => {
            return Err(FedvrError::Configuration(format!(
                "a Lobatto rule needs at least 2 points, got {points_num}"
            )));
        }
        2 => (array![-1.0, 1.0], array![1.0, 1.0]),
        _ => {
            let n = points_num - 1;
            let (interior, _) = jacobi_gauss_quadrature(1.0, 1.0, points_num - 2);
            let mut points = Array1::<f64>::zeros(points_num);
            points[0] = -1.0;
            points[n] = 1.0;
            for (k, &x0) in interior.iter().enumerate() {
                points[k + 1] = polish_lobatto_point(n, x0);
            }
            let nf = n as f64;
            let weights = points.mapv(|x| {
                let (pn, _) = legendre(n, x);
                2.0 / (nf * (nf + 1.0) * pn * pn)
            });
            (points, weights)
        }
    };
    Ok((points, weights))
}

/// Gauss–Jacobi nodes and weights by the Golub–Welsch method.
pub fn jacobi_gauss_quadrature(
    alpha: f64,
    beta: f64,
    points_num: usize,
) -> (Array<f64, Ix1>, Array<f64, Ix1>) {
    if points_num == 0 {
        return (Array1::zeros(0), Array1::zeros(0));
    }
    let mu_0 = 2.0_f64.powf(alpha + beta + 1.0) * gamma(alpha + 1.0) * gamma(beta + 1.0)
        / gamma(alpha + beta + 2.0);
    if points_num == 1 {
        let x0 = (beta - alpha) / (alpha + beta + 2.0);
        return (array![x0], array![mu_0]);
    }
    let dim = points_num;
    let mut j = DMatrix::<f64>::zeros(dim, dim);
    for k in 0..dim {
        let h1 = 2.0 * k as f64 + alpha + beta;
        j[(k, k)] = if k == 0 && (alpha + beta).abs() < 10.0 * f64::EPSILON {
            0.0
        } else {
            (beta * beta - alpha * alpha) / (h1 * (h1 + 2.0))
        };
        if k + 1 < dim {
            let l = k as f64 + 1.0;
            let numerator = l * (l + alpha + beta) * (l + alpha) * (l + beta);
            let denominator = (h1 + 1.0) * (h1 + 3.0);
            let off_diag = 2.0 / (h1 + 2.0) * (numerator / denominator).sqrt();
            j[(k, k + 1)] = off_diag;
            j[(k + 1, k)] = off_diag;
        }
    }
    let eigen = j.symmetric_eigen();
    let mut order: Vec<usize> = (0..dim).collect();
    order.sort_by(|&a, &b| eigen.eigenvalues[a].total_cmp(&eigen.eigenvalues[b]));
    let points = Array1::from_iter(order.iter().map(|&k| eigen.eigenvalues[k]));
    let weights = Array1::from_iter(
        order
            .iter()
            .map(|&k| eigen.eigenvectors[(0, k)].powi(2) * mu_0),
    );
    (points, weights)
}

/// Legendre polynomial `P_n(x)` together with `P_{n-1}(x)`.
pub fn legendre(n: usize, x: f64) -> (f64, f64) {
    let mut p_prev = 1.0;
    if n == 0 {
        return (p_prev, 0.0);
    }
    let mut p = x;
    for k in 1..n {
        let kf = k as f64;
        let p_next = ((2.0 * kf + 1.0) * x * p - kf * p_prev) / (kf + 1.0);
        p_prev = p;
        p = p_next;
    }
    (p, p_prev)
}

fn polish_lobatto_point(n: usize, mut x: f64) -> f64 {
    let nf = n as f64;
    for _ in 0..NEWTON_MAX_ITER {
        let (pn, pn_1) = legendre(n, x);
        let one_minus_x2 = 1.0 - x * x;
        let dp = nf * (pn_1 - x * pn) / one_minus_x2;
        let d2p = (2.0 * x * dp - nf * (nf + 1.0) * pn) / one_minus_x2;
        let step = dp / d2p;
        x -= step;
        if step.abs() <= f64::EPSILON * x.abs().max(1.0) {
            break;
        }
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_matches_tabulated_rules() {
        let (x, w) = get_lobatto_points_interval(3).unwrap();
        assert_relative_eq!(x[1], 0.0, epsilon = 1e-15);
        assert_relative_eq!(w[0], 1.0 / 3.0, epsilon = 1e-14);
        assert_relative_eq!(w[1], 4.0 / 3.0, epsilon = 1e-14);

        let (x, w) = get_lobatto_points_interval(4).unwrap();
        assert_relative_eq!(x[1], -1.0 / 5.0_f64.sqrt(), epsilon = 1e-14);
        assert_relative_eq!(x[2], 1.0 / 5.0_f64.sqrt(), epsilon = 1e-14);
        assert_relative_eq!(w[0], 1.0 / 6.0, epsilon = 1e-14);
        assert_relative_eq!(w[1], 5.0 / 6.0, epsilon = 1e-14);

        let (x, w) = get_lobatto_points_interval(5).unwrap();
        assert_relative_eq!(x[1], -(3.0 / 7.0_f64).sqrt(), epsilon = 1e-14);
        assert_relative_eq!(x[3], (3.0 / 7.0_f64).sqrt(), epsilon = 1e-14);
        assert_relative_eq!(w[0], 1.0 / 10.0, epsilon = 1e-14);
        assert_relative_eq!(w[1], 49.0 / 90.0, epsilon = 1e-14);
        assert_relative_eq!(w[2], 32.0 / 45.0, epsilon = 1e-14);
    }

    #[test]
    fn test_weights_sum_to_interval_length() {
        for n in 2..20 {
            let (x, w) = get_lobatto_points_interval(n).unwrap();
            assert_eq!(x[0], -1.0);
            assert_eq!(x[n - 1], 1.0);
            assert_relative_eq!(w.sum(), 2.0, epsilon = 1e-13);
            for k in 1..n {
                assert!(x[k] > x[k - 1]);
            }
        }
    }

    #[test]
    fn test_gauss_jacobi_weights_sum_to_moment() {
        let (_, w) = jacobi_gauss_quadrature(1.0, 1.0, 6);
        assert_relative_eq!(w.sum(), 4.0 / 3.0, epsilon = 1e-13);
    }
}
