//! Subsystem trait.
//!
//! RULE: Every periodic behaviour implements MissionSubsystem.
//! The engine calls update() on each registered subsystem
//! in registration order, every tick.
//! Execution order is fixed and documented in engine.rs.

use crate::{
    error::MissionResult,
    event::MissionEvent,
    rng::RandomSource,
    state::MissionState,
    types::Tick,
};
use std::any::Any;

/// The contract every subsystem must fulfill.
pub trait MissionSubsystem: Send {
    /// Unique stable name for this subsystem.
    fn name(&self) -> &'static str;

    /// Called once per tick by the engine, after the clock has advanced.
    ///
    /// - `tick`:  the elapsed mission seconds after this tick's advance
    /// - `state`: mission state including every event applied so far this tick
    /// - `rng`:   this subsystem's random stream
    ///
    /// Returns new events for the engine to apply.
    fn update(
        &mut self,
        tick: Tick,
        state: &MissionState,
        rng: &mut dyn RandomSource,
    ) -> MissionResult<Vec<MissionEvent>>;

    /// For downcasting in tests and tooling only.
    fn as_any(&self) -> &dyn Any;
}
