use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::color::{fill_color, to_rgb_array};
use crate::data::model::{Dataset, Reading};

/// Earth's equatorial circumference in metres.
const EARTH_CIRCUMFERENCE_M: f64 = 40_075_016.686;
/// Width in pixels of the whole world at zoom 0 (deck.gl convention).
const WORLD_SIZE_PX: f64 = 512.0;

// ---------------------------------------------------------------------------
// ViewState – initial camera
// ---------------------------------------------------------------------------

/// Initial camera over the map. The default is centred on the Zócalo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub pitch: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            latitude: 19.432608,
            longitude: -99.133209,
            zoom: 10.0,
            pitch: 45.0,
        }
    }
}

/// Longitude / latitude box covered by a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapExtent {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl ViewState {
    fn degrees_per_pixel(&self) -> f64 {
        360.0 / (WORLD_SIZE_PX * self.zoom.exp2())
    }

    /// Ground distance covered by one screen pixel at the view centre.
    pub fn meters_per_pixel(&self) -> f64 {
        EARTH_CIRCUMFERENCE_M * self.latitude.to_radians().cos() / (WORLD_SIZE_PX * self.zoom.exp2())
    }

    /// Area seen by a top-down viewport of `width` × `height` pixels.
    /// Pitch is ignored; the dashboard draws a flat projection.
    pub fn extent(&self, width: f64, height: f64) -> MapExtent {
        let dpp = self.degrees_per_pixel();
        let half_lon = width * dpp / 2.0;
        let half_lat = height * dpp * self.latitude.to_radians().cos() / 2.0;
        MapExtent {
            min_lon: self.longitude - half_lon,
            max_lon: self.longitude + half_lon,
            min_lat: self.latitude - half_lat,
            max_lat: self.latitude + half_lat,
        }
    }

    /// On-screen radius of a circle `radius_m` metres wide at this zoom.
    pub fn radius_pixels(&self, radius_m: f64) -> f64 {
        radius_m / self.meters_per_pixel()
    }
}

// ---------------------------------------------------------------------------
// Scatter layer
// ---------------------------------------------------------------------------

/// Point radius in metres.
pub const DEFAULT_RADIUS_M: f64 = 200.0;

/// Hover text template; placeholders name table columns.
pub const TOOLTIP_TEMPLATE: &str = "PM2.5: {PM2.5}\nPM10: {PM10}\nCO: {CO}";

pub fn tooltip_text(reading: &Reading) -> String {
    format!(
        "PM2.5: {:.2}\nPM10: {:.2}\nCO: {:.2}",
        reading.pm25, reading.pm10, reading.co
    )
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterPoint {
    /// `[longitude, latitude]`
    pub position: [f64; 2],
    pub fill_color: [u8; 3],
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterLayer {
    pub id: String,
    #[serde(rename = "@@type")]
    pub kind: &'static str,
    pub data: Vec<ScatterPoint>,
    pub get_radius: f64,
    pub pickable: bool,
}

impl ScatterLayer {
    pub fn from_dataset(id: &str, dataset: &Dataset, radius_m: f64) -> Self {
        let data = dataset
            .iter()
            .map(|r| ScatterPoint {
                position: r.position(),
                fill_color: to_rgb_array(fill_color(r)),
                tooltip: tooltip_text(r),
            })
            .collect();
        ScatterLayer {
            id: id.to_string(),
            kind: "ScatterplotLayer",
            data,
            get_radius: radius_m,
            pickable: true,
        }
    }
}

// ---------------------------------------------------------------------------
// MapDeck – everything the map view needs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapDeck {
    pub layers: Vec<ScatterLayer>,
    pub initial_view_state: ViewState,
    pub tooltip: &'static str,
}

impl MapDeck {
    /// Describe `dataset` (normally the filtered readings) as one scatter layer.
    pub fn from_dataset(dataset: &Dataset, view: ViewState, radius_m: f64) -> Self {
        MapDeck {
            layers: vec![ScatterLayer::from_dataset("readings", dataset, radius_m)],
            initial_view_state: view,
            tooltip: TOOLTIP_TEMPLATE,
        }
    }

    pub fn point_count(&self) -> usize {
        self.layers.iter().map(|l| l.data.len()).sum()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn export(&self, path: &Path) -> Result<()> {
        let json = self.to_json().context("serialising map layer")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Exported map layer ({} points) to {}", self.point_count(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn two_rows() -> Dataset {
        Dataset::from_readings(vec![
            Reading::new(19.3, -99.1, 90.0, 100.0, 2.0),
            Reading::new(19.4, -99.2, 110.0, 130.0, 4.0),
        ])
    }

    #[test]
    fn default_view_over_mexico_city() {
        let v = ViewState::default();
        assert_eq!((v.latitude, v.longitude), (19.432608, -99.133209));
        assert_eq!((v.zoom, v.pitch), (10.0, 45.0));
    }

    #[test]
    fn extent_is_centred() {
        let v = ViewState::default();
        let e = v.extent(1000.0, 600.0);
        assert_relative_eq!((e.min_lon + e.max_lon) / 2.0, v.longitude, epsilon = 1e-9);
        assert_relative_eq!((e.min_lat + e.max_lat) / 2.0, v.latitude, epsilon = 1e-9);
        // 1000 px at zoom 10 spans 360 * 1000 / (512 * 1024) degrees.
        assert_relative_eq!(e.max_lon - e.min_lon, 0.686645, epsilon = 1e-6);
        assert!(e.max_lat - e.min_lat < e.max_lon - e.min_lon);
    }

    #[test]
    fn zooming_in_shrinks_metres_per_pixel() {
        let v = ViewState::default();
        let closer = ViewState { zoom: 11.0, ..v };
        assert_relative_eq!(closer.meters_per_pixel() * 2.0, v.meters_per_pixel(), epsilon = 1e-9);
        assert!(v.radius_pixels(DEFAULT_RADIUS_M) > 0.0);
    }

    #[test]
    fn layer_points_follow_dataset_order() {
        let deck = MapDeck::from_dataset(&two_rows(), ViewState::default(), DEFAULT_RADIUS_M);
        assert_eq!(deck.point_count(), 2);
        let layer = &deck.layers[0];
        assert_eq!(layer.data[0].position, [-99.1, 19.3]);
        assert_eq!(layer.data[0].fill_color, [180, 100, 100]);
        assert_eq!(layer.data[1].position, [-99.2, 19.4]);
        assert_eq!(layer.data[0].tooltip, "PM2.5: 90.00\nPM10: 100.00\nCO: 2.00");
    }

    #[test]
    fn json_descriptor() {
        let deck = MapDeck::from_dataset(&two_rows(), ViewState::default(), DEFAULT_RADIUS_M);
        let value: serde_json::Value = serde_json::from_str(&deck.to_json().unwrap()).unwrap();
        assert_eq!(value["initialViewState"]["zoom"], 10.0);
        assert_eq!(value["initialViewState"]["pitch"], 45.0);
        assert_eq!(value["layers"][0]["@@type"], "ScatterplotLayer");
        assert_eq!(value["layers"][0]["getRadius"], 200.0);
        assert_eq!(value["layers"][0]["pickable"], true);
        assert_eq!(value["layers"][0]["data"][1]["fillColor"][0], 220);
    }

    #[test]
    fn empty_dataset_gives_empty_layer() {
        let deck = MapDeck::from_dataset(&Dataset::default(), ViewState::default(), DEFAULT_RADIUS_M);
        assert_eq!(deck.point_count(), 0);
        assert_eq!(deck.layers.len(), 1);
    }
}
