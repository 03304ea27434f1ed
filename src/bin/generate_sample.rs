use std::path::PathBuf;

use aire_monitor::config::DashboardConfig;
use aire_monitor::data::export::{export_file, preview};
use aire_monitor::data::generator::simulate;
use anyhow::{Context, Result};

/// Write the simulated readings to a file so they can be inspected
/// outside the dashboard. The output format follows the extension.
fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::discover()?;
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("air_quality_sample.parquet"));

    let dataset = simulate(config.rows, config.seed).context("simulating readings")?;
    export_file(&output_path, &dataset)?;

    println!("{}", preview(&dataset, 5)?);
    println!(
        "Wrote {} readings (seed {}) to {}",
        dataset.len(),
        config.seed,
        output_path.display()
    );
    Ok(())
}
