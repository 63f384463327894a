//! The canonical mutable mission state.
//!
//! RULE: Only the engine holds a `MissionState` mutably. Display surfaces get
//! owned `MissionSnapshot`s, never references into live state. Every mutator
//! runs to completion under `&mut self`, so no reader can observe a
//! half-applied update.

use crate::{
    clock::{MissionClock, WallClock},
    config::{InputPolicy, MissionConfig},
    debris::DebrisCatalog,
    error::{MissionError, MissionResult},
    fleet::Fleet,
    ops_log::{OperationLog, OperationLogEntry, Severity},
    rng::RandomSource,
    snapshot::{MissionSnapshot, SpaceWeatherReading},
    stats::{MissionStats, StatsPatch},
    types::Tick,
};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct MissionState {
    pub clock:  MissionClock,
    pub stats:  MissionStats,
    pub fleet:  Fleet,
    pub debris: DebrisCatalog,
    pub logs:   OperationLog,
}

impl MissionState {
    /// Fresh mission state: clock at zero, configured stats, a newly rolled
    /// fleet, an empty debris catalog and the boot log entries.
    pub fn new(config: &MissionConfig, fleet_rng: &mut dyn RandomSource) -> Self {
        let mut logs = OperationLog::with_capacity(config.log_capacity);
        for boot in config.boot_log.iter().rev() {
            if boot.message.trim().is_empty() {
                log::warn!("skipping blank boot log entry at {}", boot.time);
                continue;
            }
            logs.push(OperationLogEntry {
                time:     boot.time.clone(),
                message:  boot.message.clone(),
                severity: boot.severity,
            });
        }
        Self {
            clock:  MissionClock::new(),
            stats:  config.initial_stats.normalized(),
            fleet:  Fleet::generate(config.fleet_size, fleet_rng),
            debris: DebrisCatalog::default(),
            logs,
        }
    }

    /// Advance the mission clock by exactly one second.
    pub fn tick(&mut self) -> Tick {
        self.clock.advance()
    }

    pub fn elapsed_seconds(&self) -> Tick {
        self.clock.elapsed_seconds
    }

    /// Merge a partial update into the stats. Returns the touched field names.
    pub fn update_stats(&mut self, patch: &StatsPatch) -> Vec<&'static str> {
        self.stats.apply(patch)
    }

    /// Merge a loosely-typed field map into the stats under `policy`.
    /// Under `Strict` a bad field rejects the whole update; nothing changes.
    pub fn update_stats_fields(
        &mut self,
        fields: &Map<String, Value>,
        policy: InputPolicy,
    ) -> MissionResult<Vec<&'static str>> {
        let patch = StatsPatch::from_fields(fields, policy)?;
        Ok(self.update_stats(&patch))
    }

    /// Stamp `message` with the wall-clock time of day and prepend it to the
    /// operation log, evicting the oldest entry past capacity.
    pub fn append_operation_log(
        &mut self,
        message: &str,
        severity: Severity,
        wall_clock: &dyn WallClock,
    ) -> MissionResult<OperationLogEntry> {
        if message.trim().is_empty() {
            return Err(MissionError::EmptyLogMessage);
        }
        let entry = OperationLogEntry {
            time:     wall_clock.time_of_day(),
            message:  message.to_string(),
            severity,
        };
        if let Some(evicted) = self.logs.push(entry.clone()) {
            log::trace!("operation log full, evicted '{}'", evicted.message);
        }
        Ok(entry)
    }

    /// An owned read view of the whole state.
    pub fn snapshot(&self, space_weather: Option<SpaceWeatherReading>) -> MissionSnapshot {
        MissionSnapshot {
            elapsed_seconds: self.clock.elapsed_seconds,
            elapsed:         self.clock.formatted(),
            stats:           self.stats.clone(),
            shepherds:       self.fleet.units().to_vec(),
            debris:          self.debris.to_vec(),
            logs:            self.logs.to_vec(),
            space_weather,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedWallClock;
    use crate::rng::SequenceRng;

    fn state(config: &MissionConfig) -> MissionState {
        MissionState::new(config, &mut SequenceRng::new(vec![0.25]))
    }

    #[test]
    fn boot_log_is_newest_first() {
        let s = state(&MissionConfig::default());
        let messages: Vec<_> = s.logs.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Debris field scan in progress",
                "All shepherd units operational",
                "System initialization complete",
            ]
        );
    }

    #[test]
    fn append_stamps_wall_clock_time() {
        let mut s = state(&MissionConfig::default_test());
        let wall = FixedWallClock::at(14, 30, 5);
        let entry = s.append_operation_log("Radiation levels elevated", Severity::Warning, &wall).unwrap();
        assert_eq!(entry.time, "14:30:05");
        assert_eq!(entry.severity, Severity::Warning);
    }

    #[test]
    fn blank_messages_are_rejected() {
        let mut s = state(&MissionConfig::default_test());
        let wall = FixedWallClock::at(0, 0, 0);
        assert!(matches!(
            s.append_operation_log("   ", Severity::Normal, &wall),
            Err(MissionError::EmptyLogMessage)
        ));
        assert!(s.logs.is_empty());
    }

    #[test]
    fn initial_stats_are_normalized() {
        let mut config = MissionConfig::default_test();
        config.initial_stats.kessler_probability = 150.0;
        config.initial_stats.material_recycled_kg = -20.0;
        let s = state(&config);
        assert_eq!(s.stats.kessler_probability, 100.0);
        assert_eq!(s.stats.material_recycled_kg, 0.0);
    }

    #[test]
    fn blank_boot_entries_are_skipped() {
        let mut config = MissionConfig::default();
        config.boot_log[1].message = "   ".into();
        let s = state(&config);
        let messages: Vec<_> = s.logs.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["Debris field scan in progress", "System initialization complete"]);
    }

    #[test]
    fn strict_field_update_is_all_or_nothing() {
        let mut s = state(&MissionConfig::default_test());
        let before = s.stats.clone();
        let fields = serde_json::json!({ "debris_consumed_today": 5, "bogus": 1 });
        let result = s.update_stats_fields(fields.as_object().unwrap(), InputPolicy::Strict);
        assert!(result.is_err());
        assert_eq!(s.stats, before);
    }
}
