use approx::assert_relative_eq;
use fedvr::disc::grid::BoundaryCondition::{KeepEndpoint, RemoveEndpoint};
use fedvr::{Basis, BoundaryCondition, Grid, Merge, lagrange, lagrangeder, project, reconstruct};
use ndarray::{Array1, s};

fn evenly_spaced(a: f64, b: f64, count: usize) -> Array1<f64> {
    let mut x = Array1::from_iter((0..count).map(|i| a + (b - a) * i as f64 / (count - 1) as f64));
    x[count - 1] = b;
    x
}

const TAGS: [(BoundaryCondition, BoundaryCondition, usize); 4] = [
    (KeepEndpoint, KeepEndpoint, 0),
    (KeepEndpoint, RemoveEndpoint, 1),
    (RemoveEndpoint, KeepEndpoint, 1),
    (RemoveEndpoint, RemoveEndpoint, 2),
];

#[test]
fn test_counts() {
    let breaks = [-2.0, -1.5, 0.0, 0.1, 3.0, 3.5];
    for order in [2, 3, 5, 8] {
        for (left, right, removed) in TAGS {
            let basis = Basis::new(&breaks, order, left, right).unwrap();
            let grid = basis.grid();
            assert_eq!(grid.elcount(), breaks.len() - 1);
            assert_eq!(grid.order(), order);
            assert_eq!(
                basis.basecount(),
                (breaks.len() - 1) * order - (breaks.len() - 2) - removed
            );
        }
    }
}

#[test]
fn test_shared_boundaries_and_locs() {
    let grid = Grid::uniform(-1.0, 1.0, 6, 7, KeepEndpoint, KeepEndpoint).unwrap();
    for ielem in 0..grid.elcount() - 1 {
        assert_eq!(grid.x()[[ielem, 6]], grid.x()[[ielem + 1, 0]]);
    }
    let locs = grid.locs();
    assert_eq!(locs[0], -1.0);
    assert_eq!(locs[locs.len() - 1], 1.0);

    let grid = Grid::uniform(-1.0, 1.0, 6, 7, RemoveEndpoint, RemoveEndpoint).unwrap();
    let locs = grid.locs();
    assert!(locs[0] > -1.0);
    assert!(locs[locs.len() - 1] < 1.0);
}

#[test]
fn test_lagrange_cardinality() {
    let grid = Grid::new(&[0.0, 0.3, 1.1, 1.2], 6, KeepEndpoint, KeepEndpoint).unwrap();
    for ielem in grid.elems() {
        let nodes = grid.element_nodes(ielem);
        for m in 0..grid.order() {
            assert_eq!(lagrange(nodes, m, nodes[m]), 1.0);
            for j in (0..grid.order()).filter(|&j| j != m) {
                assert_eq!(lagrange(nodes, m, nodes[j]), 0.0);
            }
        }
    }
}

#[test]
fn test_derivative_of_quartic() {
    let grid = Grid::new(&[1.0, 1.4, 2.0, 2.5, 3.0], 5, RemoveEndpoint, RemoveEndpoint).unwrap();
    for (ielem, lp) in lagrangeder(&grid).iter().enumerate() {
        let nodes = grid.element_nodes(ielem);
        let derivative = lp.t().dot(&nodes.mapv(|x| x.powi(4)));
        for j in 0..nodes.len() {
            assert_relative_eq!(derivative[j], 4.0 * nodes[j].powi(3), max_relative = 1e-13);
        }
    }
}

#[test]
fn test_restriction_and_outside_points() {
    let basis = Basis::new(&[0.0, 0.1, 0.45, 0.5, 1.0], 6, RemoveEndpoint, KeepEndpoint).unwrap();
    let x1 = evenly_spaced(-0.2, 1.2, 157);
    let chi1 = basis.evaluate(x1.view()).unwrap();
    for (a, b) in [(0, 157), (10, 40), (22, 23), (60, 150), (140, 157)] {
        let chi2 = basis.evaluate(x1.slice(s![a..b])).unwrap();
        assert_eq!(chi2, chi1.slice(s![a..b, ..]));
    }
    let outside = ndarray::array![-3.0, -0.5, 1.5, 7.0];
    let chi = basis.evaluate(outside.view()).unwrap();
    assert!(chi.iter().all(|&v| v == 0.0));
}

#[test]
fn test_collocation_diagonal() {
    let basis = Basis::new(&[0.0, 0.25, 1.0], 5, KeepEndpoint, RemoveEndpoint).unwrap();
    let grid = basis.grid();
    let chi = basis.evaluate(grid.locs().view()).unwrap();
    let norms = grid.boundary_sel(grid.n(), Merge::Select).unwrap();
    assert_eq!(chi.diag(), norms);
}

#[test]
fn test_projection_reconstructs_polynomial() {
    let breaks = evenly_spaced(0.0, 1.0, 11);
    let basis = Basis::new(breaks.as_slice().unwrap(), 5, KeepEndpoint, KeepEndpoint).unwrap();
    let f = |x: f64| x.powi(4) - 7.0 * x.powi(2) + x.powi(3) + 2.0;
    let coeffs = project(f, &basis);
    assert_eq!(coeffs.len(), basis.basecount());

    let x = evenly_spaced(0.0, 1.0, 301);
    let values = reconstruct(&basis, coeffs.view(), x.view()).unwrap();
    let expected = x.mapv(f);
    let error = (&values - &expected).mapv(|v| v * v).sum().sqrt();
    let norm = expected.mapv(|v| v * v).sum().sqrt();
    assert!(error <= 10.0 * f64::EPSILON * norm, "relative error {}", error / norm);

    let scale = expected.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    for p in 0..x.len() {
        assert!(
            (values[p] - expected[p]).abs() <= 10.0 * f64::EPSILON * scale,
            "x = {}: {} vs {}",
            x[p],
            values[p],
            expected[p]
        );
    }
}
