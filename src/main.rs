use std::fs;

use fedvr::initialization;
use fedvr::io::write_to_csv::{write_curves_to_csv, write_nodes_to_csv};
use fedvr::{FedvrError, project, reconstruct};

fn main() {
    env_logger::init();
    let param_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "inputs/basisparam.json".to_string());
    if let Err(e) = run(&param_path) {
        log::error!("{e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(param_path: &str) -> Result<(), FedvrError> {
    let params = initialization::initialize_params_by_file(param_path)?;
    let basis = initialization::initialize_basis(&params)?;
    println!("{basis}");
    log::info!("locs: {}", basis.grid().locs());

    let samples = basis.default_samples(params.samples);
    fs::create_dir_all("outputs")?;
    write_curves_to_csv(&basis, samples.view(), "outputs/basis_curves.csv")?;
    write_nodes_to_csv(&basis, "outputs/basis_nodes.csv")?;

    let (a, b) = basis.grid().domain();
    let f = |x: f64| ((x - a) * (b - x)).powi(2);
    let coeffs = project(f, &basis);
    let values = reconstruct(&basis, coeffs.view(), samples.view())?;
    let max_error = samples
        .iter()
        .zip(values.iter())
        .map(|(&x, &v)| (v - f(x)).abs())
        .fold(0.0, f64::max);
    log::info!("projection of ((x - a)(b - x))^2: max error {max_error:e}");
    Ok(())
}
