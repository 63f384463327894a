//! Aggregate mission counters and partial updates.
//!
//! A `StatsPatch` carries any subset of fields. Applying it changes exactly
//! the supplied fields; every other field keeps its prior value. Values are
//! normalised on the way in: counters and quantities are non-negative and the
//! Kessler probability is clamped to [0, 100].

use crate::{
    config::InputPolicy,
    error::{MissionError, MissionResult},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionStats {
    pub total_debris_tracked:  u64,
    pub debris_consumed_today: u64,
    pub material_recycled_kg:  f64,
    pub bio_fuel_liters:       f64,
    /// Percentage, always within [0, 100].
    pub kessler_probability:   f64,
    pub active_shepherds:      u32,
}

impl Default for MissionStats {
    fn default() -> Self {
        Self {
            total_debris_tracked:  36_542,
            debris_consumed_today: 847,
            material_recycled_kg:  12_456.0,
            bio_fuel_liters:       3_421.0,
            kessler_probability:   23.7,
            active_shepherds:      16,
        }
    }
}

impl MissionStats {
    /// Merge `patch` into self. Returns the names of the fields it touched.
    pub fn apply(&mut self, patch: &StatsPatch) -> Vec<&'static str> {
        let mut touched = Vec::new();
        if let Some(v) = patch.total_debris_tracked {
            self.total_debris_tracked = v;
            touched.push(StatField::TotalDebrisTracked.name());
        }
        if let Some(v) = patch.debris_consumed_today {
            self.debris_consumed_today = v;
            touched.push(StatField::DebrisConsumedToday.name());
        }
        if let Some(v) = patch.material_recycled_kg {
            self.material_recycled_kg = non_negative(v);
            touched.push(StatField::MaterialRecycledKg.name());
        }
        if let Some(v) = patch.bio_fuel_liters {
            self.bio_fuel_liters = non_negative(v);
            touched.push(StatField::BioFuelLiters.name());
        }
        if let Some(v) = patch.kessler_probability {
            self.kessler_probability = percentage(v);
            touched.push(StatField::KesslerProbability.name());
        }
        if let Some(v) = patch.active_shepherds {
            self.active_shepherds = v;
            touched.push(StatField::ActiveShepherds.name());
        }
        touched
    }

    /// A copy with every field passed through the same normalisation as `apply`.
    pub fn normalized(&self) -> Self {
        let mut stats = self.clone();
        stats.apply(&StatsPatch::from(self));
        stats
    }
}

/// Any subset of `MissionStats` fields. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsPatch {
    pub total_debris_tracked:  Option<u64>,
    pub debris_consumed_today: Option<u64>,
    pub material_recycled_kg:  Option<f64>,
    pub bio_fuel_liters:       Option<f64>,
    pub kessler_probability:   Option<f64>,
    pub active_shepherds:      Option<u32>,
}

impl StatsPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn debris_consumed_today(mut self, v: u64) -> Self {
        self.debris_consumed_today = Some(v);
        self
    }

    pub fn total_debris_tracked(mut self, v: u64) -> Self {
        self.total_debris_tracked = Some(v);
        self
    }

    pub fn kessler_probability(mut self, v: f64) -> Self {
        self.kessler_probability = Some(v);
        self
    }

    pub fn active_shepherds(mut self, v: u32) -> Self {
        self.active_shepherds = Some(v);
        self
    }

    /// Build a patch from a loosely-typed field map, e.g. an IPC payload.
    ///
    /// Under `Permissive`, unknown fields and non-numeric values are logged
    /// and skipped. Under `Strict` they are rejected.
    pub fn from_fields(fields: &Map<String, Value>, policy: InputPolicy) -> MissionResult<Self> {
        let mut patch = Self::default();
        for (key, value) in fields {
            let Some(field) = StatField::parse(key) else {
                match policy {
                    InputPolicy::Strict => {
                        return Err(MissionError::UnknownStatField { field: key.clone() });
                    }
                    InputPolicy::Permissive => {
                        log::warn!("ignoring unknown stats field '{key}'");
                        continue;
                    }
                }
            };
            let Some(raw) = value.as_f64() else {
                match policy {
                    InputPolicy::Strict => {
                        return Err(MissionError::InvalidStatValue { field: key.clone() });
                    }
                    InputPolicy::Permissive => {
                        log::warn!("ignoring non-numeric value for stats field '{key}': {value}");
                        continue;
                    }
                }
            };
            patch.set(field, raw);
        }
        Ok(patch)
    }

    fn set(&mut self, field: StatField, raw: f64) {
        match field {
            StatField::TotalDebrisTracked  => self.total_debris_tracked = Some(as_count(raw)),
            StatField::DebrisConsumedToday => self.debris_consumed_today = Some(as_count(raw)),
            StatField::MaterialRecycledKg  => self.material_recycled_kg = Some(raw),
            StatField::BioFuelLiters       => self.bio_fuel_liters = Some(raw),
            StatField::KesslerProbability  => self.kessler_probability = Some(raw),
            StatField::ActiveShepherds     => {
                self.active_shepherds = Some(as_count(raw).min(u32::MAX as u64) as u32)
            }
        }
    }
}

impl From<&MissionStats> for StatsPatch {
    /// A patch that sets every field.
    fn from(stats: &MissionStats) -> Self {
        Self {
            total_debris_tracked:  Some(stats.total_debris_tracked),
            debris_consumed_today: Some(stats.debris_consumed_today),
            material_recycled_kg:  Some(stats.material_recycled_kg),
            bio_fuel_liters:       Some(stats.bio_fuel_liters),
            kessler_probability:   Some(stats.kessler_probability),
            active_shepherds:      Some(stats.active_shepherds),
        }
    }
}

/// The closed vocabulary of stats fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatField {
    TotalDebrisTracked,
    DebrisConsumedToday,
    MaterialRecycledKg,
    BioFuelLiters,
    KesslerProbability,
    ActiveShepherds,
}

impl StatField {
    pub const ALL: [StatField; 6] = [
        Self::TotalDebrisTracked,
        Self::DebrisConsumedToday,
        Self::MaterialRecycledKg,
        Self::BioFuelLiters,
        Self::KesslerProbability,
        Self::ActiveShepherds,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::TotalDebrisTracked  => "total_debris_tracked",
            Self::DebrisConsumedToday => "debris_consumed_today",
            Self::MaterialRecycledKg  => "material_recycled_kg",
            Self::BioFuelLiters       => "bio_fuel_liters",
            Self::KesslerProbability  => "kessler_probability",
            Self::ActiveShepherds     => "active_shepherds",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.max(0.0) }
}

fn percentage(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 100.0) }
}

fn as_count(raw: f64) -> u64 {
    non_negative(raw).round() as u64
}
