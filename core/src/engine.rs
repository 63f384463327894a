//! The mission engine, sole owner of all mission state.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Mission clock advances by one second
//!   2. Operations feed subsystem
//!   3. Space weather subsystem
//!   4. Assistant replies that have come due
//!
//! RULES:
//!   - Subsystems execute in registration order, every tick.
//!   - Subsystems only return events; the engine applies them.
//!   - All randomness flows through the RngBank.
//!   - Every call runs to completion before the next may start; the engine
//!     is single-owner and needs no locking.

use crate::{
    assistant::{AssistantSession, SubmitReceipt},
    clock::{FixedWallClock, SystemWallClock, WallClock},
    config::MissionConfig,
    debris::{inspect_debris, DebrisDetail, DebrisObject},
    error::MissionResult,
    event::MissionEvent,
    fleet::ShepherdUnit,
    ops_feed_subsystem::OpsFeedSubsystem,
    ops_log::{OperationLogEntry, Severity},
    rng::{RngBank, SubsystemRng, SubsystemSlot},
    snapshot::{MissionSnapshot, SpaceWeatherReading},
    space_weather_subsystem::SpaceWeatherSubsystem,
    state::MissionState,
    stats::{MissionStats, StatsPatch},
    subsystem::MissionSubsystem,
    types::{SessionId, Tick},
};
use serde_json::{Map, Value};

pub struct MissionEngine {
    pub session_id: SessionId,
    pub rng_bank:   RngBank,
    seed:           u64,
    config:         MissionConfig,
    subsystems:     Vec<(SubsystemSlot, Box<dyn MissionSubsystem>)>,
    state:          MissionState,
    assistant:      AssistantSession,
    wall_clock:     Box<dyn WallClock>,
    inspect_rng:    SubsystemRng,
    initialized:    bool,
}

impl MissionEngine {
    /// A bare engine: state is initialised, no subsystems are registered.
    pub fn new(
        session_id: SessionId,
        seed: u64,
        config: MissionConfig,
        wall_clock: Box<dyn WallClock>,
    ) -> Self {
        let rng_bank = RngBank::new(seed);
        let state = MissionState::new(&config, &mut rng_bank.for_subsystem(SubsystemSlot::Fleet));
        let inspect_rng = rng_bank.for_subsystem(SubsystemSlot::DebrisInspection);
        Self {
            assistant: AssistantSession::new(config.assistant_delay_ticks),
            session_id,
            rng_bank,
            seed,
            config,
            subsystems: Vec::new(),
            state,
            wall_clock,
            inspect_rng,
            initialized: false,
        }
    }

    /// Build a fully wired engine stamping logs with local time.
    pub fn build(session_id: SessionId, seed: u64, config: MissionConfig) -> Self {
        Self::build_with_clock(session_id, seed, config, Box::new(SystemWallClock))
    }

    /// Build a fully wired engine with all subsystems registered.
    /// Call this instead of new() + manual register() calls.
    pub fn build_with_clock(
        session_id: SessionId,
        seed: u64,
        config: MissionConfig,
        wall_clock: Box<dyn WallClock>,
    ) -> Self {
        let feed = OpsFeedSubsystem::new(config.feed_catalog.clone(), config.feed_interval_ticks);
        let weather = SpaceWeatherSubsystem::new(config.space_weather.clone());

        let mut engine = Self::new(session_id, seed, config, wall_clock);
        // Execution order: feed, then space weather.
        engine.register(SubsystemSlot::OpsFeed, Box::new(feed));
        engine.register(SubsystemSlot::SpaceWeather, Box::new(weather));
        engine
    }

    /// Fully wired, empty boot log, wall clock pinned to 12:00:00.
    pub fn build_test(session_id: impl Into<SessionId>, seed: u64) -> Self {
        Self::build_with_clock(
            session_id.into(),
            seed,
            MissionConfig::default_test(),
            Box::new(FixedWallClock::at(12, 0, 0)),
        )
    }

    /// Register a subsystem. Call in the documented execution order.
    pub fn register(&mut self, slot: SubsystemSlot, subsystem: Box<dyn MissionSubsystem>) {
        self.subsystems.push((slot, subsystem));
    }

    /// Advance one tick. This is the core simulation step.
    ///
    /// Every registered subsystem runs and every due assistant reply lands,
    /// even when an earlier subsystem's output could not be applied.
    pub fn tick(&mut self) -> MissionResult<Vec<MissionEvent>> {
        let current_tick = self.state.tick();
        let mut tick_events = vec![MissionEvent::TickStarted { tick: current_tick }];

        // Once the clock has moved the tick must finish: a failing subsystem
        // or event is logged and skipped, never propagated.
        for (slot, subsystem) in &mut self.subsystems {
            let mut rng = self.rng_bank.for_subsystem_at_tick(*slot, current_tick);
            let new_events = match subsystem.update(current_tick, &self.state, &mut rng) {
                Ok(events) => events,
                Err(e) => {
                    log::warn!("tick={current_tick} {}: update failed: {e}", subsystem.name());
                    continue;
                }
            };
            for event in new_events {
                match apply_event(&mut self.state, self.wall_clock.as_ref(), &event) {
                    Ok(()) => tick_events.push(event),
                    Err(e) => log::warn!(
                        "tick={current_tick} {}: dropped {}: {e}",
                        subsystem.name(),
                        event.type_name()
                    ),
                }
            }
        }

        tick_events.extend(self.assistant.advance(current_tick));
        tick_events.push(MissionEvent::TickCompleted { tick: current_tick });

        log::debug!(
            "tick={current_tick} elapsed={} events={}",
            self.state.clock.formatted(),
            tick_events.len()
        );
        Ok(tick_events)
    }

    /// Run n ticks in a loop. Returns every event emitted, in order.
    pub fn run_ticks(&mut self, n: u64) -> MissionResult<Vec<MissionEvent>> {
        let mut events = Vec::new();
        if !self.initialized {
            self.initialized = true;
            events.push(MissionEvent::RunInitialized {
                session_id: self.session_id.clone(),
                seed:       self.seed,
            });
        }
        for _ in 0..n {
            events.extend(self.tick()?);
        }
        Ok(events)
    }

    // ── Write interface ────────────────────────────────────────

    /// Merge a typed partial update into the stats.
    pub fn update_stats(&mut self, patch: &StatsPatch) -> MissionEvent {
        let fields = self.state.update_stats(patch);
        self.stats_event(fields)
    }

    /// Merge a loosely-typed field map, validated under the configured policy.
    pub fn update_stats_fields(&mut self, fields: &Map<String, Value>) -> MissionResult<MissionEvent> {
        let touched = self.state.update_stats_fields(fields, self.config.input_policy)?;
        Ok(self.stats_event(touched))
    }

    pub fn append_operation_log(
        &mut self,
        message: &str,
        severity: Severity,
    ) -> MissionResult<OperationLogEntry> {
        self.state.append_operation_log(message, severity, self.wall_clock.as_ref())
    }

    /// As `append_operation_log`, with the severity parsed under the
    /// configured input policy.
    pub fn append_operation_log_raw(
        &mut self,
        message: &str,
        severity: &str,
    ) -> MissionResult<OperationLogEntry> {
        let severity = Severity::parse_with(severity, self.config.input_policy)?;
        self.append_operation_log(message, severity)
    }

    /// Hand a query to the assistant. The reply lands on a later tick.
    pub fn submit_query(&mut self, query: &str) -> MissionResult<SubmitReceipt> {
        self.assistant.submit(query, self.state.elapsed_seconds())
    }

    /// Detail for a clicked debris marker. Does not touch the catalog.
    pub fn inspect_debris(&mut self) -> DebrisDetail {
        inspect_debris(&mut self.inspect_rng)
    }

    // ── Read interface ─────────────────────────────────────────

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &MissionConfig {
        &self.config
    }

    pub fn state(&self) -> &MissionState {
        &self.state
    }

    pub fn elapsed_seconds(&self) -> Tick {
        self.state.elapsed_seconds()
    }

    pub fn stats(&self) -> &MissionStats {
        &self.state.stats
    }

    pub fn shepherds(&self) -> &[ShepherdUnit] {
        self.state.fleet.units()
    }

    pub fn debris(&self) -> Vec<DebrisObject> {
        self.state.debris.to_vec()
    }

    /// Newest first.
    pub fn operation_logs(&self) -> Vec<OperationLogEntry> {
        self.state.logs.to_vec()
    }

    pub fn assistant(&self) -> &AssistantSession {
        &self.assistant
    }

    /// Current space-weather figures, if that subsystem is registered.
    pub fn space_weather(&self) -> Option<SpaceWeatherReading> {
        self.subsystems.iter().find_map(|(_, sub)| {
            sub.as_any()
                .downcast_ref::<SpaceWeatherSubsystem>()
                .map(|w| w.reading)
        })
    }

    pub fn snapshot(&self) -> MissionSnapshot {
        self.state.snapshot(self.space_weather())
    }

    fn stats_event(&self, fields: Vec<&'static str>) -> MissionEvent {
        MissionEvent::StatsUpdated {
            tick:   self.state.elapsed_seconds(),
            fields: fields.into_iter().map(str::to_string).collect(),
        }
    }
}

/// Apply one subsystem event to the state. Events that only report
/// (tick markers, space weather, assistant) need no state change.
fn apply_event(
    state: &mut MissionState,
    wall_clock: &dyn WallClock,
    event: &MissionEvent,
) -> MissionResult<()> {
    match event {
        MissionEvent::LogAppended { message, severity, .. } => {
            state.append_operation_log(message, *severity, wall_clock)?;
        }
        MissionEvent::TickStarted { .. }
        | MissionEvent::TickCompleted { .. }
        | MissionEvent::RunInitialized { .. }
        | MissionEvent::StatsUpdated { .. }
        | MissionEvent::SpaceWeatherUpdated { .. }
        | MissionEvent::AssistantReplied { .. } => {}
    }
    Ok(())
}
