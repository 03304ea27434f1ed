use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::model::{Dataset, Pollutant, Reading};

// ---------------------------------------------------------------------------
// Filter bounds: one inclusive upper threshold per pollutant
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum BoundsError {
    #[error("{pollutant} bound {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange {
        pollutant: Pollutant,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{pollutant} bound is not a finite number")]
    NotFinite { pollutant: Pollutant },
}

/// Upper bounds selected in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterBounds {
    pm25_max: f64,
    pm10_max: f64,
    co_max: f64,
}

impl Default for FilterBounds {
    fn default() -> Self {
        FilterBounds {
            pm25_max: Pollutant::Pm25.default_max(),
            pm10_max: Pollutant::Pm10.default_max(),
            co_max: Pollutant::Co.default_max(),
        }
    }
}

impl FilterBounds {
    /// Build bounds, rejecting any threshold outside its allowed range.
    pub fn new(pm25_max: f64, pm10_max: f64, co_max: f64) -> Result<Self, BoundsError> {
        FilterBounds {
            pm25_max,
            pm10_max,
            co_max,
        }
        .validated()
    }

    /// Check every threshold. Bounds that came through serde are not checked
    /// until this is called.
    pub fn validated(self) -> Result<Self, BoundsError> {
        for pollutant in Pollutant::ALL {
            let value = self.max(pollutant);
            if !value.is_finite() {
                return Err(BoundsError::NotFinite { pollutant });
            }
            let range = pollutant.range();
            if !range.contains(&value) {
                return Err(BoundsError::OutOfRange {
                    pollutant,
                    value,
                    min: *range.start(),
                    max: *range.end(),
                });
            }
        }
        Ok(self)
    }

    pub fn max(&self, pollutant: Pollutant) -> f64 {
        match pollutant {
            Pollutant::Pm25 => self.pm25_max,
            Pollutant::Pm10 => self.pm10_max,
            Pollutant::Co => self.co_max,
        }
    }

    /// Copy of `self` with one threshold replaced.
    pub fn with_max(self, pollutant: Pollutant, value: f64) -> Result<Self, BoundsError> {
        let mut next = self;
        match pollutant {
            Pollutant::Pm25 => next.pm25_max = value,
            Pollutant::Pm10 => next.pm10_max = value,
            Pollutant::Co => next.co_max = value,
        }
        next.validated()
    }

    /// A reading passes when every pollutant is at or below its bound.
    pub fn admits(&self, reading: &Reading) -> bool {
        reading.pm25 <= self.pm25_max && reading.pm10 <= self.pm10_max && reading.co <= self.co_max
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return indices of readings that pass `bounds`, in ascending order.
pub fn filtered_indices(dataset: &Dataset, bounds: &FilterBounds) -> Vec<usize> {
    dataset
        .iter()
        .enumerate()
        .filter(|(_, r)| bounds.admits(r))
        .map(|(i, _)| i)
        .collect()
}

/// Readings that pass `bounds`, as a new dataset. May be empty.
pub fn filter(dataset: &Dataset, bounds: &FilterBounds) -> Dataset {
    dataset.iter().filter(|r| bounds.admits(r)).copied().collect()
}
