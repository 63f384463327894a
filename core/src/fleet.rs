//! Shepherd fleet records.
//!
//! The fleet is created once at mission start with a fixed size. Membership
//! never changes afterwards; only unit attributes do.

use crate::{
    designation::Designation,
    rng::RandomSource,
    types::{EntityId, Vec3},
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FLEET_SIZE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShepherdTask {
    DebrisCollection,
    MaterialProcessing,
    OrbitalPatrol,
    BioFuelGeneration,
}

impl ShepherdTask {
    pub const ALL: [ShepherdTask; 4] = [
        Self::DebrisCollection,
        Self::MaterialProcessing,
        Self::OrbitalPatrol,
        Self::BioFuelGeneration,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::DebrisCollection   => "Debris Collection",
            Self::MaterialProcessing => "Material Processing",
            Self::OrbitalPatrol      => "Orbital Patrol",
            Self::BioFuelGeneration  => "Bio-Fuel Generation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShepherdStatus {
    Active,
    Idle,
    Maintenance,
}

/// Initial status draw: three in four units start active.
const INITIAL_STATUS_POOL: [ShepherdStatus; 4] = [
    ShepherdStatus::Active,
    ShepherdStatus::Active,
    ShepherdStatus::Active,
    ShepherdStatus::Idle,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShepherdUnit {
    pub id:       EntityId,
    pub name:     String,
    /// Percentage, [0, 100].
    pub health:   u8,
    /// Percentage, [0, 100].
    pub energy:   u8,
    pub task:     ShepherdTask,
    pub status:   ShepherdStatus,
    pub position: Vec3,
}

impl ShepherdUnit {
    /// Roll a fresh unit. Health starts in [70, 99], energy in [60, 99],
    /// each position axis in [-5, 5).
    pub fn generate(number: usize, rng: &mut dyn RandomSource) -> Self {
        let health = 70 + rng.next_u64_below(30) as u8;
        let energy = 60 + rng.next_u64_below(40) as u8;
        let task = ShepherdTask::ALL[rng.pick_index(ShepherdTask::ALL.len())];
        let status = INITIAL_STATUS_POOL[rng.pick_index(INITIAL_STATUS_POOL.len())];
        let position = [
            rng.range_f64(-5.0, 5.0),
            rng.range_f64(-5.0, 5.0),
            rng.range_f64(-5.0, 5.0),
        ];
        Self {
            id: Designation::shepherd_id(number),
            name: Designation::shepherd_name(number),
            health,
            energy,
            task,
            status,
            position,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ShepherdStatus::Active
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Fleet {
    units: Vec<ShepherdUnit>,
}

impl Fleet {
    /// Build `size` units numbered from 1.
    pub fn generate(size: usize, rng: &mut dyn RandomSource) -> Self {
        let units = (1..=size).map(|n| ShepherdUnit::generate(n, rng)).collect();
        Self { units }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn units(&self) -> &[ShepherdUnit] {
        &self.units
    }

    pub fn get(&self, id: &str) -> Option<&ShepherdUnit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn active_count(&self) -> usize {
        self.units.iter().filter(|u| u.is_active()).count()
    }

    pub fn count_by_status(&self, status: ShepherdStatus) -> usize {
        self.units.iter().filter(|u| u.status == status).count()
    }

    /// Mean health in percent; 0 for an empty fleet.
    pub fn average_health(&self) -> f64 {
        self.mean(|u| u.health)
    }

    /// Mean energy in percent; 0 for an empty fleet.
    pub fn average_energy(&self) -> f64 {
        self.mean(|u| u.energy)
    }

    fn mean(&self, field: impl Fn(&ShepherdUnit) -> u8) -> f64 {
        if self.units.is_empty() {
            return 0.0;
        }
        let total: u64 = self.units.iter().map(|u| field(u) as u64).sum();
        total as f64 / self.units.len() as f64
    }
}
