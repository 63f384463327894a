//! Read views handed to display surfaces.
//!
//! A snapshot is an owned copy of the full mission state at one instant.
//! Consumers may keep it as long as they like; it never changes underneath them.

use crate::{
    debris::DebrisObject,
    fleet::ShepherdUnit,
    ops_log::OperationLogEntry,
    stats::MissionStats,
    types::Tick,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpaceWeatherReading {
    /// km/s.
    pub solar_wind: f64,
    /// Geomagnetic K-index, [0, 9].
    pub k_index:    f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionSnapshot {
    pub elapsed_seconds: Tick,
    /// `"{d}d {HH}h {MM}m {SS}s"`.
    pub elapsed:         String,
    pub stats:           MissionStats,
    pub shepherds:       Vec<ShepherdUnit>,
    /// Always empty until an ingestion pipeline fills the catalog.
    pub debris:          Vec<DebrisObject>,
    /// Newest first.
    pub logs:            Vec<OperationLogEntry>,
    pub space_weather:   Option<SpaceWeatherReading>,
}
