use std::path::Path;

use crate::disc::basis::Basis;
use crate::disc::grid::Grid;
use crate::error::FedvrError;
use crate::io::param_parser::BasisParamParser;

pub fn initialize_params_by_file<P: AsRef<Path>>(
    file_path: P,
) -> Result<BasisParamParser, FedvrError> {
    BasisParamParser::parse(file_path)
}
pub fn initialize_grid(params: &BasisParamParser) -> Result<Grid, FedvrError> {
    Grid::new(
        &params.breaks()?,
        params.order,
        params.left_boundary()?,
        params.right_boundary()?,
    )
}
pub fn initialize_basis(params: &BasisParamParser) -> Result<Basis, FedvrError> {
    Ok(Basis::from_grid(initialize_grid(params)?))
}
