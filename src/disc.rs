pub mod basis;
pub mod gauss_points;
pub mod grid;
pub mod lagrange;
pub mod projection;
