use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, s};
use serde::{Deserialize, Serialize};

use crate::disc::gauss_points::GaussPoints1d;
use crate::disc::lagrange::Slot;
use crate::error::FedvrError;

pub mod selection;

pub use selection::{Merge, find_interval};

/// Treatment of the basis function sitting on a global domain endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", rename_all = "snake_case")]
pub enum BoundaryCondition {
    /// The endpoint function is kept, allowing a nonzero boundary value.
    KeepEndpoint,
    /// The endpoint function is dropped; expansions vanish at the edge.
    #[default]
    RemoveEndpoint,
}
impl BoundaryCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryCondition::KeepEndpoint => "keep_endpoint",
            BoundaryCondition::RemoveEndpoint => "remove_endpoint",
        }
    }
}
impl FromStr for BoundaryCondition {
    type Err = FedvrError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keep" | "keep_endpoint" | "dirichlet1" => Ok(BoundaryCondition::KeepEndpoint),
            "remove" | "remove_endpoint" | "dirichlet0" => Ok(BoundaryCondition::RemoveEndpoint),
            other => Err(FedvrError::Configuration(format!(
                "unknown boundary condition `{other}`"
            ))),
        }
    }
}
impl TryFrom<String> for BoundaryCondition {
    type Error = FedvrError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grid nodes backing one global basis function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dof {
    /// A node owned by a single element.
    Single { element: usize, node: usize },
    /// The last node of `left_element` merged with the first node of the
    /// element to its right.
    Shared { left_element: usize },
}

/// Finite-element partition of an interval with Gauss–Lobatto nodes in
/// every element.
#[derive(Clone, Debug)]
pub struct Grid {
    breaks: Array1<f64>,
    order: usize,
    x: Array2<f64>,
    w: Array2<f64>,
    n: Array2<f64>,
    left: BoundaryCondition,
    right: BoundaryCondition,
    dofs: Vec<Dof>,
    node_dof: Array2<Slot>,
}

impl Grid {
    pub fn new(
        breaks: &[f64],
        order: usize,
        left: BoundaryCondition,
        right: BoundaryCondition,
    ) -> Result<Self, FedvrError> {
        validate_breaks(breaks)?;
        if order < 2 {
            return Err(FedvrError::Configuration(format!(
                "order must be at least 2, got {order}"
            )));
        }
        let elem_num = breaks.len() - 1;
        let rule = GaussPoints1d::new(order)?;
        let mut x = Array2::<f64>::zeros((elem_num, order));
        let mut w = Array2::<f64>::zeros((elem_num, order));
        for ielem in 0..elem_num {
            let (a, b) = (breaks[ielem], breaks[ielem + 1]);
            let (xe, we) = rule.map_to_interval(a, b);
            let resolved = (b - a).is_finite()
                && xe.iter().all(|v| v.is_finite())
                && xe.windows(2).into_iter().all(|pair| pair[1] > pair[0]);
            if !resolved {
                return Err(FedvrError::Configuration(format!(
                    "element {ielem} too narrow to resolve {order} distinct nodes"
                )));
            }
            x.row_mut(ielem).assign(&xe);
            w.row_mut(ielem).assign(&we);
        }
        let n = normalization_table(w.view());
        let mut grid = Self {
            breaks: Array1::from(breaks.to_vec()),
            order,
            x,
            w,
            n,
            left,
            right,
            dofs: Vec::with_capacity(elem_num * (order - 1) + 1),
            node_dof: Array2::from_elem((elem_num, order), Slot::Absent),
        };
        grid.assign_dofs();
        log::debug!(
            "assembled FEDVR grid: {} elements, order {}, {} basis functions",
            elem_num,
            order,
            grid.basecount()
        );
        Ok(grid)
    }
    /// Grid over `elem_num` equally sized elements spanning `[a, b]`.
    pub fn uniform(
        a: f64,
        b: f64,
        elem_num: usize,
        order: usize,
        left: BoundaryCondition,
        right: BoundaryCondition,
    ) -> Result<Self, FedvrError> {
        Self::new(&uniform_breaks(a, b, elem_num)?, order, left, right)
    }
    pub fn elcount(&self) -> usize {
        self.breaks.len() - 1
    }
    pub fn elems(&self) -> Range<usize> {
        0..self.elcount()
    }
    pub fn order(&self) -> usize {
        self.order
    }
    pub fn basecount(&self) -> usize {
        self.dofs.len()
    }
    pub fn breaks(&self) -> ArrayView1<'_, f64> {
        self.breaks.view()
    }
    pub fn domain(&self) -> (f64, f64) {
        (self.breaks[0], self.breaks[self.breaks.len() - 1])
    }
    pub fn boundary_conditions(&self) -> (BoundaryCondition, BoundaryCondition) {
        (self.left, self.right)
    }
    /// Node coordinates, elements × order.
    pub fn x(&self) -> ArrayView2<'_, f64> {
        self.x.view()
    }
    /// Element-local quadrature weights, elements × order.
    pub fn w(&self) -> ArrayView2<'_, f64> {
        self.w.view()
    }
    /// Normalization constants, elements × order. Both copies of a shared
    /// node carry the merged value.
    pub fn n(&self) -> ArrayView2<'_, f64> {
        self.n.view()
    }
    pub fn element_nodes(&self, ielem: usize) -> ArrayView1<'_, f64> {
        self.x.slice(s![ielem, ..])
    }
    pub fn dofs(&self) -> &[Dof] {
        &self.dofs
    }
    /// Global basis function attached to a local node, `Slot::Absent` for
    /// a removed boundary node.
    pub fn node_dof(&self, ielem: usize, inode: usize) -> Slot {
        self.node_dof[[ielem, inode]]
    }
    /// Left and right neighbouring elements, `Slot::Absent` at the edges.
    pub fn neighbours(&self, ielem: usize) -> (Slot, Slot) {
        let left = if ielem == 0 {
            Slot::Absent
        } else {
            Slot::At(ielem - 1)
        };
        let right = if ielem + 1 == self.elcount() {
            Slot::Absent
        } else {
            Slot::At(ielem + 1)
        };
        (left, right)
    }
    /// Fills the DOF map: interior shared nodes merge into one function,
    /// removed endpoints stay `Slot::Absent`.
    fn assign_dofs(&mut self) {
        let order = self.order;
        for ielem in self.elems() {
            let (left_nb, right_nb) = self.neighbours(ielem);
            for inode in 0..order {
                let first = inode == 0;
                let last = inode == order - 1;
                if first && left_nb != Slot::Absent {
                    self.node_dof[[ielem, 0]] = self.node_dof[[ielem - 1, order - 1]];
                    continue;
                }
                let removed = (first && self.left == BoundaryCondition::RemoveEndpoint)
                    || (last
                        && right_nb == Slot::Absent
                        && self.right == BoundaryCondition::RemoveEndpoint);
                if removed {
                    continue;
                }
                let dof = if last && right_nb != Slot::Absent {
                    Dof::Shared {
                        left_element: ielem,
                    }
                } else {
                    Dof::Single {
                        element: ielem,
                        node: inode,
                    }
                };
                self.node_dof[[ielem, inode]] = Slot::At(self.dofs.len());
                self.dofs.push(dof);
            }
        }
    }
    /// Coordinates of the basis functions in ascending order.
    pub fn locs(&self) -> Array1<f64> {
        self.select(self.x.view(), Merge::Select)
    }
    /// Effective quadrature weight of every basis function.
    pub fn weights(&self) -> Array1<f64> {
        self.select(self.w.view(), Merge::Sum)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b) = self.domain();
        write!(
            f,
            "FEDVR grid on [{a}, {b}]: {} elements of order {}, {} basis functions (left: {}, right: {})",
            self.elcount(),
            self.order,
            self.basecount(),
            self.left,
            self.right
        )
    }
}

pub(crate) fn uniform_breaks(a: f64, b: f64, elem_num: usize) -> Result<Vec<f64>, FedvrError> {
    if elem_num == 0 {
        return Err(FedvrError::Configuration(
            "at least one element is required".to_string(),
        ));
    }
    let h = (b - a) / elem_num as f64;
    let mut breaks: Vec<f64> = (0..=elem_num).map(|i| a + h * i as f64).collect();
    breaks[elem_num] = b;
    Ok(breaks)
}

fn validate_breaks(breaks: &[f64]) -> Result<(), FedvrError> {
    if breaks.len() < 2 {
        return Err(FedvrError::Configuration(format!(
            "at least 2 breakpoints are required, got {}",
            breaks.len()
        )));
    }
    if let Some(bad) = breaks.iter().find(|v| !v.is_finite()) {
        return Err(FedvrError::Configuration(format!(
            "breakpoints must be finite, found {bad}"
        )));
    }
    for (i, pair) in breaks.windows(2).enumerate() {
        if pair[1] == pair[0] {
            return Err(FedvrError::Configuration(format!(
                "element {i} has zero length (duplicate breakpoint {})",
                pair[0]
            )));
        }
        if pair[1] < pair[0] {
            return Err(FedvrError::Configuration(format!(
                "breakpoints must be strictly increasing: {} follows {}",
                pair[1], pair[0]
            )));
        }
    }
    Ok(())
}

fn normalization_table(w: ArrayView2<f64>) -> Array2<f64> {
    let (elem_num, order) = w.dim();
    let mut n = Array2::<f64>::zeros((elem_num, order));
    for ielem in 0..elem_num {
        for inode in 0..order {
            let mut weight = w[[ielem, inode]];
            if inode == order - 1 && ielem + 1 < elem_num {
                weight += w[[ielem + 1, 0]];
            }
            if inode == 0 && ielem > 0 {
                weight = w[[ielem - 1, order - 1]] + weight;
            }
            n[[ielem, inode]] = 1.0 / weight.sqrt();
        }
    }
    n
}
