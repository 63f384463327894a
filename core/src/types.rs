//! Shared primitive types used across the mission engine.

/// An engine tick. One tick = one second of mission time.
pub type Tick = u64;

/// A stable, unique identifier for any entity in the mission.
pub type EntityId = String;

/// Identifier of one browsing session (scopes the entrance flag).
pub type SessionId = String;

/// A position or velocity in scene coordinates.
pub type Vec3 = [f64; 3];
