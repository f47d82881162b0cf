use std::ops::Range;

use ndarray::{Array1, ArrayView1, ArrayView2};

use super::{Dof, Grid};
use crate::error::FedvrError;

/// How the two copies of a shared boundary node are combined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Merge {
    /// Add both contributions (quadrature weights).
    Sum,
    /// Take the left element's copy (values that already agree).
    Select,
}

impl Grid {
    /// Reduces an elements × order table to one value per basis function,
    /// in the same order as [`Grid::locs`].
    pub fn boundary_sel(
        &self,
        values: ArrayView2<f64>,
        merge: Merge,
    ) -> Result<Array1<f64>, FedvrError> {
        if values.dim() != (self.elcount(), self.order) {
            return Err(FedvrError::InvalidInput(format!(
                "expected a {}x{} table, got {:?}",
                self.elcount(),
                self.order,
                values.dim()
            )));
        }
        Ok(self.select(values, merge))
    }
    pub(crate) fn select(&self, values: ArrayView2<f64>, merge: Merge) -> Array1<f64> {
        let last = self.order - 1;
        Array1::from_iter(self.dofs.iter().map(|dof| match *dof {
            Dof::Single { element, node } => values[[element, node]],
            Dof::Shared { left_element } => match merge {
                Merge::Sum => values[[left_element, last]] + values[[left_element + 1, 0]],
                Merge::Select => values[[left_element, last]],
            },
        }))
    }
}

/// Index range of `samples` inside element `ielem` of the node table `x`.
///
/// Elements cover `[x[i, 0], x[i, n-1])`, the last one is closed on the
/// right. The search resumes where `prior` ended, so sweeping all elements
/// left to right touches every sample once. `samples` must be sorted.
pub fn find_interval(
    x: ArrayView2<f64>,
    samples: ArrayView1<f64>,
    ielem: usize,
    prior: Range<usize>,
) -> Range<usize> {
    let (elem_num, order) = x.dim();
    let left = x[[ielem, 0]];
    let right = x[[ielem, order - 1]];
    let closed = ielem + 1 == elem_num;
    let len = samples.len();
    let mut lo = prior.end.min(len);
    while lo < len && samples[lo] < left {
        lo += 1;
    }
    let mut hi = lo;
    while hi < len && (samples[hi] < right || (closed && samples[hi] == right)) {
        hi += 1;
    }
    lo..hi
}

/// Checks the sweep precondition of [`find_interval`].
pub fn check_sorted(samples: ArrayView1<f64>) -> Result<(), FedvrError> {
    if let Some(p) = samples.iter().position(|v| v.is_nan()) {
        return Err(FedvrError::InvalidInput(format!("sample {p} is NaN")));
    }
    for (p, pair) in samples.windows(2).into_iter().enumerate() {
        if pair[1] < pair[0] {
            return Err(FedvrError::InvalidInput(format!(
                "samples must be sorted ascending: x[{}] = {} < x[{}] = {}",
                p + 1,
                pair[1],
                p,
                pair[0]
            )));
        }
    }
    Ok(())
}
