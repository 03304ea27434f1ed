//! Simulated air-quality readings for Mexico City: generation, threshold
//! filtering and the map-layer description the dashboard draws.

pub mod color;
pub mod config;
pub mod data;
pub mod map;
