use std::path::Path;

use anyhow::Result;

use aire_monitor::config::DashboardConfig;
use aire_monitor::data::export::export_file;
use aire_monitor::data::filter::{FilterBounds, filtered_indices};
use aire_monitor::data::generator::simulate;
use aire_monitor::data::model::{ColumnSummary, Dataset, Pollutant};
use aire_monitor::map::MapDeck;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Simulated readings, fixed for the lifetime of the process.
    pub dataset: Dataset,

    /// Current slider thresholds.
    pub bounds: FilterBounds,

    /// Indices of readings passing the current bounds (cached).
    pub visible_indices: Vec<usize>,

    /// Map layer for the visible readings (cached).
    pub deck: MapDeck,

    /// Per-pollutant statistics of the visible readings (cached).
    pub summary: Option<[ColumnSummary; 3]>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Generate the dataset and apply the configured initial bounds.
    pub fn new(config: DashboardConfig) -> Result<Self> {
        config.validate()?;
        let dataset = simulate(config.rows, config.seed)?;
        let bounds = config.initial_bounds;
        let deck = MapDeck::from_dataset(&Dataset::default(), config.view, config.point_radius_m);

        let mut state = Self {
            config,
            dataset,
            bounds,
            visible_indices: Vec::new(),
            deck,
            summary: None,
            status_message: None,
        };
        state.refilter();
        Ok(state)
    }

    /// Recompute `visible_indices` and the map layer after a bounds change.
    pub fn refilter(&mut self) {
        self.visible_indices = filtered_indices(&self.dataset, &self.bounds);
        let visible = self.visible();
        self.deck = MapDeck::from_dataset(&visible, self.config.view, self.config.point_radius_m);
        self.summary = visible.summary();
        log::debug!(
            "{} of {} readings within {:?}",
            self.visible_indices.len(),
            self.dataset.len(),
            self.bounds
        );
    }

    /// The readings passing the current bounds, in original order.
    pub fn visible(&self) -> Dataset {
        self.dataset.select(&self.visible_indices)
    }

    /// Move one slider. Invalid values leave the bounds unchanged.
    pub fn set_max(&mut self, pollutant: Pollutant, value: f64) {
        match self.bounds.with_max(pollutant, value) {
            Ok(bounds) => self.set_bounds(bounds),
            Err(e) => {
                log::warn!("Rejected bound: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    pub fn set_bounds(&mut self, bounds: FilterBounds) {
        if bounds == self.bounds {
            return;
        }
        self.bounds = bounds;
        self.status_message = None;
        self.refilter();
    }

    /// Back to the configured initial bounds.
    pub fn reset_bounds(&mut self) {
        self.set_bounds(self.config.initial_bounds);
    }

    pub fn export_visible(&mut self, path: &Path) {
        let result = export_file(path, &self.visible());
        self.report(result);
    }

    pub fn export_map(&mut self, path: &Path) {
        let result = self.deck.export(path);
        self.report(result);
    }

    fn report(&mut self, result: Result<()>) {
        self.status_message = match result {
            Ok(()) => None,
            Err(e) => {
                log::error!("Export failed: {e:#}");
                Some(format!("Error: {e:#}"))
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new(DashboardConfig::default()).unwrap()
    }

    #[test]
    fn starts_filtered_with_initial_bounds() {
        let s = state();
        assert_eq!(s.dataset.len(), 100);
        assert_eq!(s.bounds, FilterBounds::default());
        assert_eq!(s.deck.point_count(), s.visible_indices.len());
        assert!(s.visible().iter().all(|r| s.bounds.admits(r)));
    }

    #[test]
    fn summary_tracks_visible_readings() {
        let mut s = state();
        assert_eq!(s.summary, s.visible().summary());
        let [pm25, ..] = s.summary.unwrap();
        assert!(pm25.max <= 100.0);

        s.set_max(Pollutant::Pm25, 150.0);
        assert_eq!(s.summary, s.visible().summary());

        s.set_bounds(FilterBounds::new(10.0, 20.0, 0.5).unwrap());
        assert!(s.visible_indices.is_empty());
        assert_eq!(s.summary, None);
    }

    #[test]
    fn widening_bounds_shows_everything() {
        let mut s = state();
        s.set_bounds(FilterBounds::new(150.0, 200.0, 5.0).unwrap());
        assert_eq!(s.visible_indices, (0..100).collect::<Vec<_>>());
        assert_eq!(s.deck.point_count(), 100);
    }

    #[test]
    fn invalid_slider_value_is_reported_not_applied() {
        let mut s = state();
        let before = s.visible_indices.clone();
        s.set_max(Pollutant::Pm25, 500.0);
        assert_eq!(s.bounds, FilterBounds::default());
        assert_eq!(s.visible_indices, before);
        assert!(s.status_message.as_deref().unwrap().contains("PM2.5"));
    }

    #[test]
    fn reset_restores_initial_bounds() {
        let mut s = state();
        let initial = s.visible_indices.clone();
        s.set_max(Pollutant::Co, 0.5);
        assert!(s.visible_indices.len() <= initial.len());
        s.reset_bounds();
        assert_eq!(s.visible_indices, initial);
    }

    #[test]
    fn zero_rows_config_fails() {
        let config = DashboardConfig {
            rows: 0,
            ..DashboardConfig::default()
        };
        assert!(AppState::new(config).is_err());
    }

    #[test]
    fn export_reports_bad_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut s = state();
        s.export_visible(&dir.path().join("out.txt"));
        assert!(s.status_message.is_some());
        s.export_visible(&dir.path().join("out.csv"));
        assert!(s.status_message.is_none());
    }
}
