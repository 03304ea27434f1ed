use std::ops::Range;

use rand::distributions::{Distribution, Uniform};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use thiserror::Error;

use super::model::{Dataset, Pollutant, Reading};

/// Seed used when nothing else is configured.
pub const DEFAULT_SEED: u64 = 42;
/// Row count used when nothing else is configured.
pub const DEFAULT_ROWS: usize = 100;

/// Latitudes covering the Mexico City metropolitan area.
pub const LATITUDE_RANGE: Range<f64> = 19.2..19.6;
/// Longitudes covering the Mexico City metropolitan area.
pub const LONGITUDE_RANGE: Range<f64> = -99.3..-99.0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("row count must be positive, got 0")]
    EmptyDataset,
}

/// Draw `n` readings from `rng`.
///
/// Each field is drawn independently and uniformly from its range. Columns
/// are drawn one after another (every latitude, then every longitude, then
/// PM2.5, PM10 and CO), so the same RNG state always yields the same table.
pub fn generate<R: Rng>(n: usize, rng: &mut R) -> Result<Dataset, GenerateError> {
    if n == 0 {
        return Err(GenerateError::EmptyDataset);
    }

    let latitudes = draw_column(rng, n, LATITUDE_RANGE);
    let longitudes = draw_column(rng, n, LONGITUDE_RANGE);
    let [pm25, pm10, co] = Pollutant::ALL.map(|p| {
        let range = p.range();
        draw_column(rng, n, *range.start()..*range.end())
    });

    let readings = (0..n)
        .map(|i| Reading::new(latitudes[i], longitudes[i], pm25[i], pm10[i], co[i]))
        .collect();
    Ok(Dataset::from_readings(readings))
}

/// Generate `n` readings from a freshly seeded [`ChaCha12Rng`].
///
/// ChaCha's output stream is fixed by its algorithm, so a given seed yields
/// the same table on every platform.
pub fn simulate(n: usize, seed: u64) -> Result<Dataset, GenerateError> {
    let mut rng = ChaCha12Rng::seed_from_u64(seed);
    let dataset = generate(n, &mut rng)?;
    log::info!("Simulated {} readings (seed {seed})", dataset.len());
    Ok(dataset)
}

fn draw_column<R: Rng>(rng: &mut R, n: usize, range: Range<f64>) -> Vec<f64> {
    let dist = Uniform::new(range.start, range.end);
    (0..n).map(|_| dist.sample(rng)).collect()
}
