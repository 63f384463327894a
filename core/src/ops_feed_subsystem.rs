//! Operations feed generator.
//!
//! Every `interval` ticks, picks one message uniformly at random from a fixed
//! catalog and emits it as a log append. Draws are independent: repeats are
//! allowed and there is no de-duplication or backoff.

use crate::{
    config::FeedMessage,
    error::MissionResult,
    event::MissionEvent,
    rng::RandomSource,
    state::MissionState,
    subsystem::MissionSubsystem,
    types::Tick,
};

pub const DEFAULT_FEED_INTERVAL: Tick = 4;

pub struct OpsFeedSubsystem {
    catalog:  Vec<FeedMessage>,
    interval: Tick,
}

impl OpsFeedSubsystem {
    /// A zero interval is treated as 1 (emit every tick).
    pub fn new(catalog: Vec<FeedMessage>, interval: Tick) -> Self {
        Self { catalog, interval: interval.max(1) }
    }

    /// One uniform draw from the catalog.
    pub fn draw(&self, rng: &mut dyn RandomSource) -> Option<&FeedMessage> {
        if self.catalog.is_empty() {
            return None;
        }
        self.catalog.get(rng.pick_index(self.catalog.len()))
    }
}

impl MissionSubsystem for OpsFeedSubsystem {
    fn name(&self) -> &'static str { "ops_feed" }

    fn update(
        &mut self,
        tick: Tick,
        _state: &MissionState,
        rng: &mut dyn RandomSource,
    ) -> MissionResult<Vec<MissionEvent>> {
        if tick == 0 || !tick.is_multiple_of(self.interval) {
            return Ok(vec![]);
        }
        let Some(message) = self.draw(rng) else {
            return Ok(vec![]);
        };
        log::debug!("tick={tick} ops_feed: [{}] {}", message.severity.as_str(), message.text);
        Ok(vec![MissionEvent::LogAppended {
            tick,
            message:  message.text.clone(),
            severity: message.severity,
        }])
    }

    fn as_any(&self) -> &dyn std::any::Any { self }
}
