//! Debris catalog and marker inspection.
//!
//! The catalog is the schema an ingestion pipeline would fill; nothing in
//! the simulation populates it, so it stays empty unless a caller inserts
//! objects. Inspecting a debris marker produces a detached `DebrisDetail`
//! that is never written back into the catalog.

use crate::{
    designation::Designation,
    rng::RandomSource,
    types::{EntityId, Vec3},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low    => "LOW",
            Self::Medium => "MEDIUM",
            Self::High   => "HIGH",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebrisObject {
    pub id:          EntityId,
    pub position:    Vec3,
    pub velocity:    Vec3,
    /// Kilograms.
    pub mass:        f64,
    pub object_type: String,
    pub risk:        RiskLevel,
}

/// Debris objects keyed by id, iterated in id order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebrisCatalog {
    objects: BTreeMap<EntityId, DebrisObject>,
}

impl DebrisCatalog {
    /// Insert or replace by id. Returns the replaced object, if any.
    pub fn insert(&mut self, object: DebrisObject) -> Option<DebrisObject> {
        self.objects.insert(object.id.clone(), object)
    }

    pub fn get(&self, id: &str) -> Option<&DebrisObject> {
        self.objects.get(id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn to_vec(&self) -> Vec<DebrisObject> {
        self.objects.values().cloned().collect()
    }

    pub fn count_by_risk(&self, risk: RiskLevel) -> usize {
        self.objects.values().filter(|o| o.risk == risk).count()
    }
}

pub const DEBRIS_TYPES: [&str; 3] = ["Satellite Fragment", "Rocket Stage", "Solar Panel"];

/// What the inspection popup shows for a clicked marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebrisDetail {
    pub id:                     EntityId,
    pub position:               Vec3,
    /// km/s.
    pub velocity:               f64,
    /// Kilograms.
    pub mass:                   f64,
    pub object_type:            String,
    pub risk:                   RiskLevel,
    /// Kilometres.
    pub altitude:               u32,
    /// Percentage.
    pub collision_probability:  u8,
}

/// Roll a mock detail for a clicked marker.
pub fn inspect_debris(rng: &mut dyn RandomSource) -> DebrisDetail {
    let id = Designation::debris_id(rng);
    let position = [
        rng.range_f64(-5.0, 5.0),
        rng.range_f64(-5.0, 5.0),
        rng.range_f64(-5.0, 5.0),
    ];
    let velocity = rng.range_f64(7.5, 9.0);
    let mass = rng.range_f64(10.0, 60.0);
    let object_type = DEBRIS_TYPES[rng.pick_index(DEBRIS_TYPES.len())].to_string();
    let risk = RiskLevel::ALL[rng.pick_index(RiskLevel::ALL.len())];
    let altitude = 400 + rng.next_u64_below(200) as u32;
    let collision_probability = 10 + rng.next_u64_below(50) as u8;
    DebrisDetail {
        id,
        position,
        velocity,
        mass,
        object_type,
        risk,
        altitude,
        collision_probability,
    }
}
