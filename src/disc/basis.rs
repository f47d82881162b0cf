use std::fmt;

use ndarray::{Array1, Array2, ArrayView1, s};
use once_cell::sync::OnceCell;

use crate::disc::grid::selection::check_sorted;
use crate::disc::grid::{BoundaryCondition, Grid, Merge, find_interval};
use crate::disc::lagrange::{self, Slot, kronecker};
use crate::error::FedvrError;

pub const DEFAULT_CURVE_SAMPLES: usize = 501;

/// Normalized FEDVR basis over a [`Grid`].
///
/// Function `j` equals `N_j L_m(x)` on every element containing its node,
/// zero elsewhere, so that it is orthonormal under the grid quadrature.
#[derive(Debug)]
pub struct Basis {
    grid: Grid,
    normalization: Array1<f64>,
    derivatives: OnceCell<Vec<Array2<f64>>>,
}

impl Basis {
    pub fn new(
        breaks: &[f64],
        order: usize,
        left: BoundaryCondition,
        right: BoundaryCondition,
    ) -> Result<Self, FedvrError> {
        Ok(Self::from_grid(Grid::new(breaks, order, left, right)?))
    }
    pub fn from_grid(grid: Grid) -> Self {
        let normalization = grid.select(grid.n(), Merge::Select);
        Self {
            grid,
            normalization,
            derivatives: OnceCell::new(),
        }
    }
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    pub fn basecount(&self) -> usize {
        self.grid.basecount()
    }
    /// Normalization constant of every basis function.
    pub fn normalization(&self) -> ArrayView1<'_, f64> {
        self.normalization.view()
    }
    /// Values `chi[(p, j)]` of basis function `j` at `x[p]`.
    ///
    /// `x` must be sorted ascending; samples outside the domain give zero
    /// rows.
    pub fn evaluate(&self, x: ArrayView1<f64>) -> Result<Array2<f64>, FedvrError> {
        check_sorted(x)?;
        Ok(self.sweep(x, lagrange::lagrange))
    }
    /// Derivatives `chi'[(p, j)]` of the basis functions at `x[p]`, taken
    /// from the element that owns each sample.
    pub fn evaluate_derivative(&self, x: ArrayView1<f64>) -> Result<Array2<f64>, FedvrError> {
        check_sorted(x)?;
        Ok(self.sweep(x, lagrange::lagrange_derivative))
    }
    fn sweep<F>(&self, x: ArrayView1<f64>, local: F) -> Array2<f64>
    where
        F: Fn(ArrayView1<f64>, usize, f64) -> f64,
    {
        let grid = &self.grid;
        let norms = grid.n();
        let mut chi = Array2::<f64>::zeros((x.len(), grid.basecount()));
        let mut sel = 0..0;
        let mut covered = 0;
        for ielem in grid.elems() {
            sel = find_interval(grid.x(), x, ielem, sel);
            covered += sel.len();
            let nodes = grid.element_nodes(ielem);
            for p in sel.clone() {
                for m in 0..grid.order() {
                    if let Slot::At(j) = grid.node_dof(ielem, m) {
                        chi[[p, j]] = local(nodes, m, x[p]) * norms[[ielem, m]];
                    }
                }
            }
        }
        if covered < x.len() {
            log::debug!(
                "{} of {} samples lie outside the domain",
                x.len() - covered,
                x.len()
            );
        }
        chi
    }
    /// Per-element differentiation matrices, built on first use.
    pub fn lagrangeder(&self) -> &[Array2<f64>] {
        self.derivatives
            .get_or_init(|| lagrange::lagrangeder(&self.grid))
    }
    /// First-derivative operator `D[(j, k)] = <chi_j | chi_k'>` evaluated
    /// with the element quadrature, which is exact for these products.
    pub fn derivative_matrix(&self) -> Array2<f64> {
        let grid = &self.grid;
        let order = grid.order();
        let (w, n) = (grid.w(), grid.n());
        let count = grid.basecount();
        let mut d = Array2::<f64>::zeros((count, count));
        for (ielem, lp) in self.lagrangeder().iter().enumerate() {
            let slots: Vec<Slot> = (0..order).map(|m| grid.node_dof(ielem, m)).collect();
            let support: Vec<usize> = slots.iter().filter_map(|slot| slot.index()).collect();
            for &jj in &support {
                for &kk in &support {
                    let mut value = 0.0;
                    for a in 0..order {
                        let chi_j = n[[ielem, a]] * kronecker(slots[a], Slot::At(jj));
                        if chi_j == 0.0 {
                            continue;
                        }
                        for b in 0..order {
                            let chi_k = n[[ielem, b]] * kronecker(slots[b], Slot::At(kk));
                            value += w[[ielem, a]] * chi_j * chi_k * lp[(b, a)];
                        }
                    }
                    d[[jj, kk]] += value;
                }
            }
        }
        d
    }
    /// Display curves, one `(x, chi_j(x))` pair per basis function.
    pub fn curves(
        &self,
        samples: ArrayView1<f64>,
    ) -> Result<Vec<(Array1<f64>, Array1<f64>)>, FedvrError> {
        let chi = self.evaluate(samples)?;
        Ok((0..self.basecount())
            .map(|j| (samples.to_owned(), chi.slice(s![.., j]).to_owned()))
            .collect())
    }
    /// [`Basis::curves`] over evenly spaced samples covering the domain.
    pub fn default_curves(&self) -> Vec<(Array1<f64>, Array1<f64>)> {
        let samples = self.default_samples(DEFAULT_CURVE_SAMPLES);
        let chi = self.sweep(samples.view(), lagrange::lagrange);
        (0..self.basecount())
            .map(|j| (samples.clone(), chi.slice(s![.., j]).to_owned()))
            .collect()
    }
    /// `count` evenly spaced points from the first to the last breakpoint.
    pub fn default_samples(&self, count: usize) -> Array1<f64> {
        let (a, b) = self.grid.domain();
        match count {
            0 => Array1::zeros(0),
            1 => Array1::from_elem(1, a),
            _ => {
                let h = (b - a) / (count - 1) as f64;
                let mut samples = Array1::from_iter((0..count).map(|i| a + h * i as f64));
                samples[count - 1] = b;
                samples
            }
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FEDVR basis of {} functions; {}", self.basecount(), self.grid)
    }
}
