//! Mission state engine for the orbital shepherds dashboard.
//!
//! `MissionEngine` owns the canonical mission state (clock, stats, fleet,
//! debris catalog, operation log) and drives the periodic subsystems that
//! simulate activity. Display surfaces read `MissionSnapshot`s.

pub mod assistant;
pub mod clock;
pub mod config;
pub mod debris;
pub mod designation;
pub mod engine;
pub mod entrance;
pub mod error;
pub mod event;
pub mod fleet;
pub mod ops_feed_subsystem;
pub mod ops_log;
pub mod rng;
pub mod snapshot;
pub mod space_weather_subsystem;
pub mod state;
pub mod stats;
pub mod store;
pub mod subsystem;
pub mod timeline;
pub mod types;

pub use engine::MissionEngine;
pub use error::{MissionError, MissionResult};
