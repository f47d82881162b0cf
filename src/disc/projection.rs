use ndarray::{Array1, ArrayView1};

use crate::disc::basis::Basis;
use crate::error::FedvrError;

/// Expansion coefficients of `f` by collocation: `phi_j = f(x_j) / N_j`.
pub fn project<F>(f: F, basis: &Basis) -> Array1<f64>
where
    F: Fn(f64) -> f64,
{
    let locs = basis.grid().locs();
    Array1::from_iter(
        locs.iter()
            .zip(basis.normalization().iter())
            .map(|(&x, &n)| f(x) / n),
    )
}

/// Evaluates the expansion `chi(x) . coeffs`.
pub fn reconstruct(
    basis: &Basis,
    coeffs: ArrayView1<f64>,
    x: ArrayView1<f64>,
) -> Result<Array1<f64>, FedvrError> {
    if coeffs.len() != basis.basecount() {
        return Err(FedvrError::InvalidInput(format!(
            "expected {} coefficients, got {}",
            basis.basecount(),
            coeffs.len()
        )));
    }
    Ok(basis.evaluate(x)?.dot(&coeffs))
}
