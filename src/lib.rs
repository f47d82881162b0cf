pub mod disc;
pub mod error;
pub mod initialization;
pub mod io;

pub use disc::basis::Basis;
pub use disc::grid::{BoundaryCondition, Dof, Grid, Merge};
pub use disc::lagrange::{Slot, kronecker, lagrange, lagrangeder};
pub use disc::projection::{project, reconstruct};
pub use error::FedvrError;
