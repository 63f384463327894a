//! Mission timeline playback.
//!
//! A 24-hour track with milestone markers and a playhead that can be
//! scrubbed, skipped by the hour, or played back at a chosen speed.
//! The playhead is always kept within [0, duration].

use crate::error::{MissionError, MissionResult};
use serde::{Deserialize, Serialize};

pub const TIMELINE_DURATION: u64 = 86_400;
pub const TIMELINE_START: u64 = 3_600;
pub const SKIP_SECONDS: u64 = 3_600;
pub const PLAYBACK_SPEEDS: [f64; 4] = [0.5, 1.0, 2.0, 5.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneKind {
    Normal,
    Important,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub time:  u64,
    pub label: String,
    pub kind:  MilestoneKind,
}

fn default_milestones() -> Vec<Milestone> {
    [
        (3_600, "Mission Start", MilestoneKind::Important),
        (7_200, "First Debris Collection", MilestoneKind::Normal),
        (14_400, "Bio-Fuel Milestone", MilestoneKind::Important),
        (21_600, "Collision Avoidance", MilestoneKind::Normal),
        (43_200, "Mid-Mission Checkpoint", MilestoneKind::Important),
    ]
    .into_iter()
    .map(|(time, label, kind)| Milestone { time, label: label.to_string(), kind })
    .collect()
}

/// `"HH:MM"`; hours are not wrapped at 24.
pub fn format_hhmm(seconds: u64) -> String {
    let hours = seconds / 3_600;
    let mins = (seconds % 3_600) / 60;
    format!("{hours:02}:{mins:02}")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionTimeline {
    /// Playhead position in seconds. Fractional while playing at 0.5x.
    position:   f64,
    duration:   u64,
    speed:      f64,
    playing:    bool,
    milestones: Vec<Milestone>,
}

impl Default for MissionTimeline {
    fn default() -> Self {
        Self {
            position:   TIMELINE_START as f64,
            duration:   TIMELINE_DURATION,
            speed:      1.0,
            playing:    false,
            milestones: default_milestones(),
        }
    }
}

impl MissionTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whole seconds at the playhead.
    pub fn position(&self) -> u64 {
        self.position as u64
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    /// Fraction of the track behind the playhead, [0, 1].
    pub fn progress(&self) -> f64 {
        self.position / self.duration as f64
    }

    /// `"HH:MM / HH:MM"`.
    pub fn label(&self) -> String {
        format!("{} / {}", format_hhmm(self.position()), format_hhmm(self.duration))
    }

    pub fn toggle_play(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    pub fn seek(&mut self, seconds: u64) {
        self.position = seconds.min(self.duration) as f64;
    }

    pub fn skip_back(&mut self) {
        self.position = (self.position - SKIP_SECONDS as f64).max(0.0);
    }

    pub fn skip_forward(&mut self) {
        self.position = (self.position + SKIP_SECONDS as f64).min(self.duration as f64);
    }

    pub fn set_speed(&mut self, speed: f64) -> MissionResult<()> {
        if !PLAYBACK_SPEEDS.contains(&speed) {
            return Err(MissionError::InvalidTimelineSpeed { speed });
        }
        self.speed = speed;
        Ok(())
    }

    /// Move the playhead by `seconds × speed` while playing.
    /// Playback stops on reaching the end of the track.
    pub fn advance(&mut self, seconds: f64) {
        if !self.playing {
            return;
        }
        let end = self.duration as f64;
        self.position = (self.position + seconds * self.speed).clamp(0.0, end);
        if self.position >= end {
            self.playing = false;
        }
    }

    /// Milestones at or behind the playhead.
    pub fn reached(&self) -> impl Iterator<Item = &Milestone> {
        let at = self.position();
        self.milestones.iter().filter(move |m| m.time <= at)
    }
}
