use crate::{
    fleet::DEFAULT_FLEET_SIZE,
    ops_feed_subsystem::DEFAULT_FEED_INTERVAL,
    ops_log::{Severity, DEFAULT_LOG_CAPACITY},
    stats::MissionStats,
    types::Tick,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How loosely-typed input (IPC payloads, config files) is validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputPolicy {
    /// Unknown stats fields are ignored; unknown severities become `normal`.
    #[default]
    Permissive,
    /// Unknown stats fields and severities are rejected with an error.
    Strict,
}

/// One canned message in the operations feed catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedMessage {
    pub text:     String,
    pub severity: Severity,
}

impl FeedMessage {
    fn new(text: &str, severity: Severity) -> Self {
        Self { text: text.to_string(), severity }
    }
}

/// A log entry present before the first tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootLogEntry {
    pub time:     String,
    pub message:  String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpaceWeatherConfig {
    pub initial_solar_wind: f64,
    /// Per-tick step is uniform in [-step, step).
    pub solar_wind_step:    f64,
    pub initial_k_index:    f64,
    pub k_index_step:       f64,
    pub k_index_min:        f64,
    pub k_index_max:        f64,
}

impl Default for SpaceWeatherConfig {
    fn default() -> Self {
        Self {
            initial_solar_wind: 432.0,
            solar_wind_step:    5.0,
            initial_k_index:    3.2,
            k_index_step:       0.1,
            k_index_min:        0.0,
            k_index_max:        9.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionConfig {
    pub fleet_size:            usize,
    pub log_capacity:          usize,
    pub feed_interval_ticks:   Tick,
    pub assistant_delay_ticks: Tick,
    pub input_policy:          InputPolicy,
    pub initial_stats:         MissionStats,
    pub space_weather:         SpaceWeatherConfig,
    pub feed_catalog:          Vec<FeedMessage>,
    /// Newest first, as the feed displays them.
    pub boot_log:              Vec<BootLogEntry>,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            fleet_size:            DEFAULT_FLEET_SIZE,
            log_capacity:          DEFAULT_LOG_CAPACITY,
            feed_interval_ticks:   DEFAULT_FEED_INTERVAL,
            assistant_delay_ticks: 1,
            input_policy:          InputPolicy::Permissive,
            initial_stats:         MissionStats::default(),
            space_weather:         SpaceWeatherConfig::default(),
            feed_catalog:          default_feed_catalog(),
            boot_log:              default_boot_log(),
        }
    }
}

impl MissionConfig {
    /// Load mission parameters from a JSON file. Absent fields keep their
    /// defaults, so a file may override just the values it cares about.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid mission config at {}: {e}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.log_capacity > 0, "log_capacity must be > 0");
        anyhow::ensure!(self.feed_interval_ticks > 0, "feed_interval_ticks must be > 0");
        anyhow::ensure!(!self.feed_catalog.is_empty(), "feed_catalog must not be empty");
        if let Some(i) = self.feed_catalog.iter().position(|m| m.text.trim().is_empty()) {
            anyhow::bail!("feed_catalog[{i}] has a blank message");
        }
        if let Some(i) = self.boot_log.iter().position(|e| e.message.trim().is_empty()) {
            anyhow::bail!("boot_log[{i}] has a blank message");
        }

        let stats = &self.initial_stats;
        anyhow::ensure!(
            stats.material_recycled_kg >= 0.0 && stats.bio_fuel_liters >= 0.0,
            "initial_stats quantities must be non-negative"
        );
        anyhow::ensure!(
            (0.0..=100.0).contains(&stats.kessler_probability),
            "initial_stats.kessler_probability ({}) must be within [0, 100]",
            stats.kessler_probability
        );

        let sw = &self.space_weather;
        anyhow::ensure!(
            sw.k_index_min <= sw.k_index_max,
            "k_index_min ({}) exceeds k_index_max ({})",
            sw.k_index_min,
            sw.k_index_max
        );
        anyhow::ensure!(
            sw.solar_wind_step >= 0.0 && sw.k_index_step >= 0.0,
            "random-walk steps must be non-negative"
        );
        Ok(())
    }

    /// Defaults without the boot log, so the feed starts empty.
    pub fn default_test() -> Self {
        Self { boot_log: Vec::new(), ..Self::default() }
    }
}

fn default_feed_catalog() -> Vec<FeedMessage> {
    vec![
        FeedMessage::new("Shepherd Unit SHEP-003 engaged debris at 401km altitude", Severity::Normal),
        FeedMessage::new("Bio-fuel production rate nominal, 97.3% efficiency", Severity::Normal),
        FeedMessage::new("Warning: Debris cluster detected in sector 7-Alpha", Severity::Warning),
        FeedMessage::new("Material conversion complete: 125kg aluminum processed", Severity::Normal),
        FeedMessage::new("Neural network strength at 94% - colony health optimal", Severity::Normal),
        FeedMessage::new("Collision avoidance maneuver executed successfully", Severity::Normal),
        FeedMessage::new("Radiation levels elevated in LEO zone 3", Severity::Warning),
    ]
}

fn default_boot_log() -> Vec<BootLogEntry> {
    [
        ("12:35:45", "Debris field scan in progress"),
        ("12:35:12", "All shepherd units operational"),
        ("12:34:56", "System initialization complete"),
    ]
    .into_iter()
    .map(|(time, message)| BootLogEntry {
        time:     time.to_string(),
        message:  message.to_string(),
        severity: Severity::Normal,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: MissionConfig =
            serde_json::from_str(r#"{ "fleet_size": 4, "space_weather": { "k_index_step": 0.5 } }"#)
                .unwrap();
        assert_eq!(config.fleet_size, 4);
        assert_eq!(config.log_capacity, 50);
        assert_eq!(config.space_weather.k_index_step, 0.5);
        assert_eq!(config.space_weather.initial_k_index, 3.2);
        assert_eq!(config.feed_catalog.len(), 7);
    }

    #[test]
    fn validate_rejects_empty_catalog() {
        let config = MissionConfig { feed_catalog: Vec::new(), ..MissionConfig::default() };
        assert!(config.validate().is_err());
    }

    fn load_json(json: &str) -> anyhow::Result<MissionConfig> {
        let path = std::env::temp_dir().join(format!("mission-config-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, json).unwrap();
        let result = MissionConfig::load(&path);
        std::fs::remove_file(&path).ok();
        result
    }

    #[test]
    fn load_round_trips_through_a_file() {
        let config = load_json(r#"{ "input_policy": "strict", "feed_interval_ticks": 2 }"#).unwrap();
        assert_eq!(config.input_policy, InputPolicy::Strict);
        assert_eq!(config.feed_interval_ticks, 2);
    }

    #[test]
    fn load_rejects_blank_feed_message() {
        let err = load_json(r#"{ "feed_catalog": [{ "text": "  ", "severity": "normal" }] }"#)
            .unwrap_err();
        assert!(err.to_string().contains("feed_catalog[0]"), "{err}");
    }

    #[test]
    fn load_rejects_blank_boot_message() {
        let err = load_json(
            r#"{ "boot_log": [{ "time": "12:00:00", "message": "", "severity": "normal" }] }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("boot_log[0]"), "{err}");
    }

    #[test]
    fn load_rejects_out_of_range_initial_stats() {
        let err = load_json(r#"{ "initial_stats": { "kessler_probability": 150.0 } }"#).unwrap_err();
        assert!(err.to_string().contains("kessler_probability"), "{err}");
        assert!(load_json(r#"{ "initial_stats": { "material_recycled_kg": -20.0 } }"#).is_err());
        assert!(load_json(r#"{ "initial_stats": { "kessler_probability": 100.0 } }"#).is_ok());
    }

    #[test]
    fn shipped_mission_file_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../data/mission.json");
        let config = MissionConfig::load(path).unwrap();
        assert_eq!(config, MissionConfig::default());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = MissionConfig::load("/nonexistent/mission.json").unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
