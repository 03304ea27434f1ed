use eframe::egui::Color32;
use palette::Srgb;

use crate::data::model::{Pollutant, Reading};

// ---------------------------------------------------------------------------
// Fill colour: pollutant levels → RGB
// ---------------------------------------------------------------------------

/// Per-pollutant gain applied before a level becomes a colour channel.
/// PM2.5 drives red, PM10 green and CO blue.
pub fn channel_gain(pollutant: Pollutant) -> f64 {
    match pollutant {
        Pollutant::Pm25 => 2.0,
        Pollutant::Pm10 => 1.0,
        Pollutant::Co => 50.0,
    }
}

/// Linear map of a reading's pollutant levels into an 8-bit RGB colour.
///
/// Channels saturate at 255, the way an 8-bit colour buffer clamps them.
pub fn fill_color(reading: &Reading) -> Srgb<u8> {
    let [r, g, b] = Pollutant::ALL.map(|p| to_channel(reading.value(p) * channel_gain(p)));
    Srgb::new(r, g, b)
}

fn to_channel(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

pub fn to_color32(c: Srgb<u8>) -> Color32 {
    Color32::from_rgb(c.red, c.green, c.blue)
}

/// Fill colour as an `[r, g, b]` triple for serialised layer descriptions.
pub fn to_rgb_array(c: Srgb<u8>) -> [u8; 3] {
    [c.red, c.green, c.blue]
}

// ---------------------------------------------------------------------------
// Legend
// ---------------------------------------------------------------------------

/// Legend entries (channel description → pure channel colour) for the UI.
pub fn legend_entries() -> Vec<(String, Color32)> {
    Pollutant::ALL
        .iter()
        .map(|&p| {
            let (name, color) = match p {
                Pollutant::Pm25 => ("Red", Color32::from_rgb(255, 0, 0)),
                Pollutant::Pm10 => ("Green", Color32::from_rgb(0, 255, 0)),
                Pollutant::Co => ("Blue", Color32::from_rgb(0, 0, 255)),
            };
            (format!("{name}: {p} × {}", channel_gain(p)), color)
        })
        .collect()
}
