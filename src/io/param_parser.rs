use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::disc::grid::{BoundaryCondition, uniform_breaks};
use crate::error::FedvrError;

/// Basis parameters read from a JSON file.
///
/// Breakpoints come either from `breaks` or from `domain` split into
/// `element_num` equal elements.
#[derive(Deserialize, Debug, Clone)]
pub struct BasisParamParser {
    #[serde(default)]
    pub breaks: Option<Vec<f64>>,
    #[serde(default)]
    pub domain: Option<[f64; 2]>,
    #[serde(default)]
    pub element_num: Option<usize>,
    pub order: usize,
    #[serde(default)]
    pub left_boundary: Option<String>,
    #[serde(default)]
    pub right_boundary: Option<String>,
    #[serde(default = "default_samples")]
    pub samples: usize,
}

fn parse_boundary(tag: Option<&str>) -> Result<BoundaryCondition, FedvrError> {
    tag.map_or(Ok(BoundaryCondition::default()), str::parse)
}

fn default_samples() -> usize {
    crate::disc::basis::DEFAULT_CURVE_SAMPLES
}

impl BasisParamParser {
    pub fn parse<P: AsRef<Path>>(file_path: P) -> Result<Self, FedvrError> {
        let file_content = fs::read_to_string(file_path)?;
        Self::parse_str(&file_content)
    }
    pub fn parse_str(content: &str) -> Result<Self, FedvrError> {
        let param: BasisParamParser = serde_json::from_str(content)?;
        Ok(param)
    }
    /// Left boundary tag, `RemoveEndpoint` when absent.
    pub fn left_boundary(&self) -> Result<BoundaryCondition, FedvrError> {
        parse_boundary(self.left_boundary.as_deref())
    }
    pub fn right_boundary(&self) -> Result<BoundaryCondition, FedvrError> {
        parse_boundary(self.right_boundary.as_deref())
    }
    /// Resolved breakpoint sequence.
    pub fn breaks(&self) -> Result<Vec<f64>, FedvrError> {
        match (&self.breaks, self.domain, self.element_num) {
            (Some(breaks), None, None) => Ok(breaks.clone()),
            (None, Some([a, b]), Some(element_num)) => uniform_breaks(a, b, element_num),
            _ => Err(FedvrError::Configuration(
                "give either `breaks` or both `domain` and `element_num`".to_string(),
            )),
        }
    }
}
