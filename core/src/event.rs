//! Events emitted by the engine and its subsystems.
//!
//! RULE: Subsystems never mutate mission state directly. They read the
//! current state and return events; the engine applies them in order.

use crate::{
    assistant::Intent,
    ops_log::Severity,
    types::{SessionId, Tick},
};
use serde::{Deserialize, Serialize};

/// Every event emitted during a mission.
/// Variants are only ever appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MissionEvent {
    // ── Engine events ──────────────────────────────
    TickStarted {
        tick: Tick,
    },
    TickCompleted {
        tick: Tick,
    },
    RunInitialized {
        session_id: SessionId,
        seed: u64,
    },

    // ── State mutations ────────────────────────────
    LogAppended {
        tick: Tick,
        message: String,
        severity: Severity,
    },
    StatsUpdated {
        tick: Tick,
        fields: Vec<String>,
    },

    // ── Space weather ──────────────────────────────
    SpaceWeatherUpdated {
        tick: Tick,
        solar_wind: f64,
        k_index: f64,
    },

    // ── Assistant ──────────────────────────────────
    AssistantReplied {
        tick: Tick,
        intent: Intent,
    },
}

impl MissionEvent {
    /// Stable string name of the variant, for logs and tooling.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::TickStarted { .. }         => "tick_started",
            Self::TickCompleted { .. }       => "tick_completed",
            Self::RunInitialized { .. }      => "run_initialized",
            Self::LogAppended { .. }         => "log_appended",
            Self::StatsUpdated { .. }        => "stats_updated",
            Self::SpaceWeatherUpdated { .. } => "space_weather_updated",
            Self::AssistantReplied { .. }    => "assistant_replied",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_name_matches_serialized_tag() {
        let events = [
            MissionEvent::TickStarted { tick: 1 },
            MissionEvent::LogAppended { tick: 4, message: "m".into(), severity: Severity::Warning },
            MissionEvent::SpaceWeatherUpdated { tick: 2, solar_wind: 430.0, k_index: 3.1 },
            MissionEvent::AssistantReplied { tick: 3, intent: Intent::General },
        ];
        for event in events {
            let json = serde_json::to_value(&event).unwrap();
            assert_eq!(json["type"], event.type_name());
        }
    }
}
