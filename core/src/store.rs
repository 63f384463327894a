//! SQLite persistence layer for session-scoped flags.
//!
//! RULE: Only store.rs talks to the database.
//! The only persisted fact is whether the entrance sequence has been shown
//! in a session; mission state itself is never persisted.

use crate::error::MissionResult;
use rusqlite::{params, Connection, OptionalExtension};

pub struct SessionStore {
    conn: Connection,
}

impl SessionStore {
    /// Open (or create) the session database at `path`.
    pub fn open(path: &str) -> MissionResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database. Lives exactly as long as the process.
    pub fn in_memory() -> MissionResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> MissionResult<()> {
        self.conn.execute_batch(include_str!("../migrations/001_session.sql"))?;
        Ok(())
    }

    // ── Entrance flag ──────────────────────────────────────────

    pub fn has_seen_entrance(&self, session_id: &str) -> MissionResult<bool> {
        let seen = self
            .conn
            .query_row(
                "SELECT entrance_seen FROM session_flag WHERE session_id = ?1",
                params![session_id],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(seen.is_some_and(|v| v != 0))
    }

    /// Idempotent.
    pub fn mark_entrance_seen(&self, session_id: &str) -> MissionResult<()> {
        self.conn.execute(
            "INSERT INTO session_flag (session_id, entrance_seen, updated_at)
             VALUES (?1, 1, ?2)
             ON CONFLICT(session_id) DO UPDATE SET entrance_seen = 1, updated_at = ?2",
            params![session_id, chrono::Utc::now().to_rfc3339()],
        )?;
        log::debug!("session {session_id}: entrance marked seen");
        Ok(())
    }

    /// Forget everything recorded for `session_id`.
    pub fn end_session(&self, session_id: &str) -> MissionResult<()> {
        let removed = self
            .conn
            .execute("DELETE FROM session_flag WHERE session_id = ?1", params![session_id])?;
        log::debug!("session {session_id}: ended ({removed} flag rows cleared)");
        Ok(())
    }
}
