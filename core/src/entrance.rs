//! The one-time entrance sequence and the startup gate in front of it.
//!
//! The sequence plays a meteor phase, then an explosion phase, then
//! completes. The dashboard is revealed shortly after completion. Whether to
//! play it at all is decided by the session flag in `SessionStore`.

use crate::{error::MissionResult, store::SessionStore};
use std::time::Duration;

pub const METEOR_PHASE: Duration = Duration::from_millis(2_000);
pub const EXPLOSION_END: Duration = Duration::from_millis(3_500);
pub const REVEAL_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntranceStage {
    Meteor,
    Explosion,
    Complete,
}

/// Which stage is showing `elapsed` after the sequence started.
pub fn stage_at(elapsed: Duration) -> EntranceStage {
    if elapsed < METEOR_PHASE {
        EntranceStage::Meteor
    } else if elapsed < EXPLOSION_END {
        EntranceStage::Explosion
    } else {
        EntranceStage::Complete
    }
}

#[derive(Debug, Clone, Default)]
pub struct EntranceSequence {
    elapsed: Duration,
}

impl EntranceSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward. Returns the stage now showing.
    pub fn advance(&mut self, dt: Duration) -> EntranceStage {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.stage()
    }

    pub fn stage(&self) -> EntranceStage {
        stage_at(self.elapsed)
    }

    pub fn is_complete(&self) -> bool {
        self.stage() == EntranceStage::Complete
    }

    pub fn dashboard_ready(&self) -> bool {
        self.elapsed >= EXPLOSION_END + REVEAL_DELAY
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupPlan {
    PlayEntrance,
    ShowDashboard,
}

/// Reads the session flag once at startup and writes it once on completion.
pub struct StartupGate<'a> {
    store:      &'a SessionStore,
    session_id: String,
}

impl<'a> StartupGate<'a> {
    pub fn new(store: &'a SessionStore, session_id: impl Into<String>) -> Self {
        Self { store, session_id: session_id.into() }
    }

    pub fn plan(&self) -> MissionResult<StartupPlan> {
        if self.store.has_seen_entrance(&self.session_id)? {
            Ok(StartupPlan::ShowDashboard)
        } else {
            Ok(StartupPlan::PlayEntrance)
        }
    }

    /// Record that the sequence finished for this session.
    pub fn complete(&self) -> MissionResult<()> {
        self.store.mark_entrance_seen(&self.session_id)?;
        log::info!("session {}: entrance sequence complete", self.session_id);
        Ok(())
    }
}
