use ndarray::{Array1, Array2, ArrayView1};

use crate::disc::grid::Grid;

/// Index that may point at nothing: a missing neighbour element or a
/// removed boundary degree of freedom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    Absent,
    At(usize),
}
impl Slot {
    pub fn index(self) -> Option<usize> {
        match self {
            Slot::Absent => None,
            Slot::At(i) => Some(i),
        }
    }
}

/// Kronecker delta over slots. Two absent slots compare equal, an absent
/// slot never matches a real index.
pub fn kronecker(i: Slot, j: Slot) -> f64 {
    if i == j { 1.0 } else { 0.0 }
}

/// Value of the `m`-th Lagrange polynomial on `nodes` at `x`.
pub fn lagrange(nodes: ArrayView1<f64>, m: usize, x: f64) -> f64 {
    let x_m = nodes[m];
    let mut product = 1.0;
    for (k, &x_k) in nodes.iter().enumerate() {
        if k != m {
            product *= (x - x_k) / (x_m - x_k);
        }
    }
    product
}

/// [`lagrange`] applied to every entry of `xs`.
pub fn lagrange_at(nodes: ArrayView1<f64>, m: usize, xs: ArrayView1<f64>) -> Array1<f64> {
    xs.mapv(|x| lagrange(nodes, m, x))
}

/// Derivative of the `m`-th Lagrange polynomial at an arbitrary `x`.
pub fn lagrange_derivative(nodes: ArrayView1<f64>, m: usize, x: f64) -> f64 {
    let n = nodes.len();
    let x_m = nodes[m];
    let mut sum = 0.0;
    for k in 0..n {
        if k == m {
            continue;
        }
        let mut product = 1.0;
        for l in 0..n {
            if l != m && l != k {
                product *= (x - nodes[l]) / (x_m - nodes[l]);
            }
        }
        sum += product / (x_m - nodes[k]);
    }
    sum
}

/// Differentiation matrix of one element: `d[(m, j)] = L_m'(x_j)`, so
/// `d.t().dot(&c)` differentiates the interpolant of the nodal values `c`.
pub fn lagrangeder_nodes(nodes: ArrayView1<f64>) -> Array2<f64> {
    let n = nodes.len();
    let mut d = Array2::<f64>::zeros((n, n));
    for m in 0..n {
        let x_m = nodes[m];
        for j in 0..n {
            d[(m, j)] = if j == m {
                // 0/0 in the product form; closed-form limit instead
                (0..n)
                    .filter(|&k| k != m)
                    .map(|k| 1.0 / (x_m - nodes[k]))
                    .sum()
            } else {
                let x_j = nodes[j];
                let mut product = 1.0 / (x_m - x_j);
                for k in 0..n {
                    if k != m && k != j {
                        product *= (x_j - nodes[k]) / (x_m - nodes[k]);
                    }
                }
                product
            };
        }
    }
    d
}

/// Per-element differentiation matrices of the grid.
pub fn lagrangeder(grid: &Grid) -> Vec<Array2<f64>> {
    grid.elems()
        .map(|ielem| lagrangeder_nodes(grid.element_nodes(ielem)))
        .collect()
}
