//! Mock mission assistant.
//!
//! Replies are canned. A query is matched against an ordered rule list,
//! first match wins, with a general summary as the explicit fallback.
//!
//! Replies are not instant: a submitted query is answered `delay` ticks
//! later. While any query is pending the session reports `is_typing()`.
//! Submissions made while typing are queued and answered in FIFO order,
//! one delay apart, so every user message gets exactly one reply.

use crate::{
    error::{MissionError, MissionResult},
    event::MissionEvent,
    types::Tick,
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    HighRiskDebris,
    CollisionForecast,
    FleetStatus,
    RouteOptimization,
    General,
}

pub struct ResponseRule {
    pub intent:   Intent,
    /// Lowercase substrings; any one matching selects the rule.
    pub keywords: &'static [&'static str],
    pub response: &'static str,
}

pub const GREETING: &str = "Hello! I'm your AI mission assistant. I can help you analyze debris patterns, predict collisions, and optimize shepherd operations. Try asking me something!";

pub const HIGH_RISK_DEBRIS_RESPONSE: &str = "Analysis complete: Currently tracking 847 debris objects in LEO. High-risk objects:\n\n• DEBRIS-A2847: 401km altitude, 7.8 km/s velocity, collision probability 34%\n• DEBRIS-C1923: 395km altitude, 8.1 km/s velocity, collision probability 28%\n• DEBRIS-F4521: 412km altitude, 7.5 km/s velocity, collision probability 19%\n\nRecommendation: Deploy Shepherds SHEP-003 and SHEP-007 for immediate intercept.";

pub const COLLISION_FORECAST_RESPONSE: &str = "Collision forecast for next 24 hours:\n\n🟡 3 medium-risk events detected\n🔴 1 high-risk event at 14:30 UTC\n\nPredicted impact zones:\n• Sector 7-Alpha (LEO, 405km)\n• Sector 12-Beta (MEO, 1,200km)\n\nML Model confidence: 94%\nRecommended actions queued for shepherd units.";

pub const FLEET_STATUS_RESPONSE: &str = "Shepherd Fleet Status Report:\n\n✅ Active: 16 units (100%)\n⚡ Average energy: 78%\n💚 Average health: 91%\n\nTop performers:\n• SHEP-003: 247 debris collected\n• SHEP-007: 198 debris collected\n• SHEP-012: 176 debris collected\n\nAll units operating within nominal parameters.";

pub const ROUTE_OPTIMIZATION_RESPONSE: &str = "Route optimization analysis:\n\nCurrent efficiency: 87.3%\nOptimized efficiency: 94.8% (+7.5%)\n\nSuggested route adjustments:\n• SHEP-001: Shift to Sector 9-Delta\n• SHEP-005: Extend patrol range by 50km\n• SHEP-011: Return to base for refuel\n\nEstimated fuel savings: 12.4 liters/day\nApply optimizations?";

pub const GENERAL_RESPONSE: &str = "I understand your query. Based on current mission parameters:\n\n• Total debris tracked: 36,542 objects\n• Active collection rate: 847 objects/day\n• Bio-fuel generation: 3,421 liters\n• System efficiency: 97.3%\n\nAll systems nominal. What specific data would you like to analyze?";

/// Evaluated in order; the first rule with a matching keyword wins.
pub static RULES: [ResponseRule; 4] = [
    ResponseRule {
        intent:   Intent::HighRiskDebris,
        keywords: &["high-risk", "leo"],
        response: HIGH_RISK_DEBRIS_RESPONSE,
    },
    ResponseRule {
        intent:   Intent::CollisionForecast,
        keywords: &["predict", "collision"],
        response: COLLISION_FORECAST_RESPONSE,
    },
    ResponseRule {
        intent:   Intent::FleetStatus,
        keywords: &["shepherd", "fleet"],
        response: FLEET_STATUS_RESPONSE,
    },
    ResponseRule {
        intent:   Intent::RouteOptimization,
        keywords: &["optimize", "route"],
        response: ROUTE_OPTIMIZATION_RESPONSE,
    },
];

/// Suggested starter queries, one per rule.
pub static QUICK_QUERIES: [&str; 4] = [
    "Show high-risk debris in LEO",
    "Predict collisions for next 24h",
    "Shepherd fleet status report",
    "Optimize debris collection routes",
];

/// Which intent `query` selects.
pub fn classify(query: &str) -> Intent {
    let lowered = query.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lowered.contains(k)))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::General)
}

/// Canned reply text for `intent`.
pub fn response_for(intent: Intent) -> &'static str {
    RULES
        .iter()
        .find(|rule| rule.intent == intent)
        .map(|rule| rule.response)
        .unwrap_or(GENERAL_RESPONSE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role:    ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingQuery {
    query: String,
    due:   Tick,
}

/// Returned from `submit`: when the reply will land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub due:        Tick,
    /// Number of queries ahead of this one.
    pub queue_position: usize,
}

#[derive(Debug, Clone)]
pub struct AssistantSession {
    transcript: Vec<ChatMessage>,
    pending:    VecDeque<PendingQuery>,
    delay:      Tick,
}

impl AssistantSession {
    /// A new session holding only the greeting.
    pub fn new(delay: Tick) -> Self {
        Self {
            transcript: vec![ChatMessage { role: ChatRole::Assistant, content: GREETING.to_string() }],
            pending:    VecDeque::new(),
            delay,
        }
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn is_typing(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Quick queries are offered only before the first exchange.
    pub fn quick_queries(&self) -> &'static [&'static str] {
        if self.transcript.len() == 1 { &QUICK_QUERIES[..] } else { &[] }
    }

    /// Record the user's message now and schedule its reply.
    /// Blank queries are rejected without touching the session.
    pub fn submit(&mut self, query: &str, now: Tick) -> MissionResult<SubmitReceipt> {
        if query.trim().is_empty() {
            return Err(MissionError::EmptyQuery);
        }
        let queue_position = self.pending.len();
        let start = self.pending.back().map_or(now, |last| last.due.max(now));
        let due = start.saturating_add(self.delay);
        self.transcript.push(ChatMessage { role: ChatRole::User, content: query.to_string() });
        self.pending.push_back(PendingQuery { query: query.to_string(), due });
        log::debug!("assistant: queued '{query}' due at tick {due} (position {queue_position})");
        Ok(SubmitReceipt { due, queue_position })
    }

    /// Deliver every reply due at or before `now`, oldest first.
    pub fn advance(&mut self, now: Tick) -> Vec<MissionEvent> {
        let mut events = Vec::new();
        while self.pending.front().is_some_and(|p| p.due <= now) {
            let Some(pending) = self.pending.pop_front() else { break };
            let intent = classify(&pending.query);
            self.transcript.push(ChatMessage {
                role:    ChatRole::Assistant,
                content: response_for(intent).to_string(),
            });
            log::debug!("assistant: replied to '{}' with {intent:?}", pending.query);
            events.push(MissionEvent::AssistantReplied { tick: now, intent });
        }
        events
    }
}
