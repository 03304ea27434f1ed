use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Pollutant – the three measured quantities
// ---------------------------------------------------------------------------

/// One of the pollutants carried by every [`Reading`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pollutant {
    Pm25,
    Pm10,
    Co,
}

impl Pollutant {
    pub const ALL: [Pollutant; 3] = [Pollutant::Pm25, Pollutant::Pm10, Pollutant::Co];

    /// Column name used in tables and exported files.
    pub fn label(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "PM2.5",
            Pollutant::Pm10 => "PM10",
            Pollutant::Co => "CO",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Pollutant::Pm25 | Pollutant::Pm10 => "µg/m³",
            Pollutant::Co => "ppm",
        }
    }

    /// Range the simulated readings are drawn from. Also the range a
    /// user-supplied upper bound must fall into.
    pub fn range(self) -> RangeInclusive<f64> {
        match self {
            Pollutant::Pm25 => 10.0..=150.0,
            Pollutant::Pm10 => 20.0..=200.0,
            Pollutant::Co => 0.5..=5.0,
        }
    }

    /// Upper bound applied before the user touches a slider.
    pub fn default_max(self) -> f64 {
        match self {
            Pollutant::Pm25 => 100.0,
            Pollutant::Pm10 => 120.0,
            Pollutant::Co => 3.0,
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Reading – one row of the table
// ---------------------------------------------------------------------------

/// Column names of the tabular view, in display order.
pub const COLUMN_NAMES: [&str; 5] = ["latitude", "longitude", "PM2.5", "PM10", "CO"];

/// A single simulated sensor record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "PM2.5")]
    pub pm25: f64,
    #[serde(rename = "PM10")]
    pub pm10: f64,
    #[serde(rename = "CO")]
    pub co: f64,
}

impl Reading {
    pub fn new(latitude: f64, longitude: f64, pm25: f64, pm10: f64, co: f64) -> Self {
        Reading {
            latitude,
            longitude,
            pm25,
            pm10,
            co,
        }
    }

    pub fn value(&self, pollutant: Pollutant) -> f64 {
        match pollutant {
            Pollutant::Pm25 => self.pm25,
            Pollutant::Pm10 => self.pm10,
            Pollutant::Co => self.co,
        }
    }

    /// `[longitude, latitude]`, the order map layers expect.
    pub fn position(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

// ---------------------------------------------------------------------------
// Dataset – the ordered collection of readings
// ---------------------------------------------------------------------------

/// Ordered readings. Generated once and never mutated afterwards; filtering
/// produces new datasets or index lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    readings: Vec<Reading>,
}

/// Min / mean / max of one pollutant column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSummary {
    pub pollutant: Pollutant,
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

impl Dataset {
    pub fn from_readings(readings: Vec<Reading>) -> Self {
        Dataset { readings }
    }

    /// Number of readings.
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Reading> {
        self.readings.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Reading> {
        self.readings.iter()
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    /// Copy the rows at `indices` into a new dataset, in the order given.
    /// Out-of-range indices are skipped.
    pub fn select(&self, indices: &[usize]) -> Dataset {
        Dataset {
            readings: indices
                .iter()
                .filter_map(|&i| self.readings.get(i).copied())
                .collect(),
        }
    }

    /// Per-pollutant statistics; `None` for an empty dataset.
    pub fn summary(&self) -> Option<[ColumnSummary; 3]> {
        if self.is_empty() {
            return None;
        }
        let n = self.len() as f64;
        Some(Pollutant::ALL.map(|pollutant| {
            let (min, max, sum) = self.readings.iter().map(|r| r.value(pollutant)).fold(
                (f64::INFINITY, f64::NEG_INFINITY, 0.0),
                |(min, max, sum), v| (min.min(v), max.max(v), sum + v),
            );
            ColumnSummary {
                pollutant,
                min,
                mean: sum / n,
                max,
            }
        }))
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Reading;
    type IntoIter = std::slice::Iter<'a, Reading>;

    fn into_iter(self) -> Self::IntoIter {
        self.readings.iter()
    }
}

impl FromIterator<Reading> for Dataset {
    fn from_iter<I: IntoIterator<Item = Reading>>(iter: I) -> Self {
        Dataset {
            readings: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample() -> Dataset {
        Dataset::from_readings(vec![
            Reading::new(19.3, -99.1, 90.0, 100.0, 2.0),
            Reading::new(19.4, -99.2, 110.0, 130.0, 4.0),
            Reading::new(19.5, -99.0, 20.0, 40.0, 1.0),
        ])
    }

    #[test]
    fn select_keeps_requested_order_and_skips_missing() {
        let ds = sample();
        let picked = ds.select(&[2, 0, 7]);
        assert_eq!(picked.len(), 2);
        assert_eq!(picked.get(0), ds.get(2));
        assert_eq!(picked.get(1), ds.get(0));
    }

    #[test]
    fn summary_of_columns() {
        let [pm25, pm10, co] = sample().summary().unwrap();
        assert_eq!(pm25.pollutant, Pollutant::Pm25);
        assert_abs_diff_eq!(pm25.min, 20.0);
        assert_abs_diff_eq!(pm25.max, 110.0);
        assert_abs_diff_eq!(pm25.mean, 220.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pm10.max, 130.0);
        assert_abs_diff_eq!(co.mean, 7.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_dataset_has_no_summary() {
        assert!(Dataset::default().summary().is_none());
    }

    #[test]
    fn serialises_with_table_column_names() {
        let json = serde_json::to_value(Reading::new(19.3, -99.1, 90.0, 100.0, 2.0)).unwrap();
        let obj = json.as_object().unwrap();
        for col in COLUMN_NAMES {
            assert!(obj.contains_key(col), "missing column {col}");
        }
    }

    #[test]
    fn default_max_lies_within_range() {
        for p in Pollutant::ALL {
            assert!(p.range().contains(&p.default_max()), "{p}");
        }
    }
}
