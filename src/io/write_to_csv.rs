use std::path::Path;

use csv::Writer;
use ndarray::ArrayView1;
use serde::Serialize;

use crate::disc::basis::Basis;
use crate::error::FedvrError;

#[derive(Serialize)]
struct NodeData {
    x: f64,
    weight: f64,
    normalization: f64,
}

/// Writes `x, chi_0, ..., chi_{n-1}` for every sample.
pub fn write_curves_to_csv<P: AsRef<Path>>(
    basis: &Basis,
    samples: ArrayView1<f64>,
    filename: P,
) -> Result<(), FedvrError> {
    let chi = basis.evaluate(samples)?;
    let mut writer = Writer::from_path(filename)?;
    let mut header = vec!["x".to_string()];
    header.extend((0..basis.basecount()).map(|j| format!("chi_{j}")));
    writer.write_record(&header)?;
    for (p, row) in chi.outer_iter().enumerate() {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(samples[p].to_string());
        record.extend(row.iter().map(|v| v.to_string()));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes location, quadrature weight and normalization of every basis
/// function.
pub fn write_nodes_to_csv<P: AsRef<Path>>(basis: &Basis, filename: P) -> Result<(), FedvrError> {
    let mut writer = Writer::from_path(filename)?;
    let locs = basis.grid().locs();
    let weights = basis.grid().weights();
    for ((&x, &weight), &normalization) in locs
        .iter()
        .zip(weights.iter())
        .zip(basis.normalization().iter())
    {
        writer.serialize(NodeData {
            x,
            weight,
            normalization,
        })?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disc::grid::BoundaryCondition::{KeepEndpoint, RemoveEndpoint};

    #[test]
    fn test_write_curves_and_nodes() {
        let basis = Basis::new(&[0.0, 0.5, 1.0], 3, RemoveEndpoint, KeepEndpoint).unwrap();
        let dir = std::env::temp_dir().join(format!("fedvr-csv-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let curves = dir.join("curves.csv");
        let samples = basis.default_samples(5);
        write_curves_to_csv(&basis, samples.view(), &curves).unwrap();
        let content = std::fs::read_to_string(&curves).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "x,chi_0,chi_1,chi_2,chi_3");

        let nodes = dir.join("nodes.csv");
        write_nodes_to_csv(&basis, &nodes).unwrap();
        let content = std::fs::read_to_string(&nodes).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "x,weight,normalization");
        assert_eq!(lines.len(), basis.basecount() + 1);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
