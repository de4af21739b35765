//! Session store and entry point for the transport layer.
//!
//! Owns the per-conversation Session records and serializes all engine
//! advancement behind one lock, which guarantees at most one in-flight
//! `advance` per session id. The engine itself never creates, finds, or
//! destroys sessions.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Local;
use tracing::debug;
use uuid::Uuid;

use lexintake_core::config::DialogConfig;
use lexintake_core::types::Session;

use crate::engine::{DialogEngine, Reply};
use crate::error::DialogError;

/// Central coordinator wiring the session store and the dialogue engine.
pub struct IntakeOrchestrator {
    engine: DialogEngine,
    sessions: Mutex<HashMap<Uuid, Session>>,
    session_timeout_minutes: u32,
    max_message_chars: usize,
}

impl IntakeOrchestrator {
    /// Create a new orchestrator with the given dialogue configuration.
    pub fn new(config: DialogConfig) -> Self {
        Self {
            session_timeout_minutes: config.session_timeout_minutes,
            max_message_chars: config.max_message_chars,
            engine: DialogEngine::new(config),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Handle one caller message.
    ///
    /// Validates the message, resolves or creates the session, advances the
    /// engine, and returns the reply together with the session id (new or
    /// existing). A session whose reply ends the call is removed from the
    /// store.
    pub fn handle_message(
        &self,
        message: &str,
        session_id: Option<Uuid>,
    ) -> Result<(Reply, Uuid), DialogError> {
        if message.trim().is_empty() {
            return Err(DialogError::EmptyMessage);
        }
        if message.chars().count() > self.max_message_chars {
            return Err(DialogError::MessageTooLong(self.max_message_chars));
        }

        let mut sessions = self
            .sessions
            .lock()
            .map_err(|e| DialogError::StorageError(format!("session lock poisoned: {}", e)))?;

        let sid = self.resolve_session(&mut sessions, session_id);
        let session = sessions
            .get_mut(&sid)
            .ok_or(DialogError::SessionNotFound(sid))?;

        let reply = self.engine.advance(session, message);
        debug!(
            session_id = %sid,
            stage = ?session.stage,
            end_call = reply.end_call,
            "message handled"
        );

        if reply.end_call {
            sessions.remove(&sid);
        }

        Ok((reply, sid))
    }

    /// Snapshot of a session, if it exists.
    pub fn session(&self, session_id: Uuid) -> Option<Session> {
        self.sessions
            .lock()
            .ok()
            .and_then(|s| s.get(&session_id).cloned())
    }

    /// Number of live sessions.
    pub fn active_sessions(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }

    /// Drop a session explicitly.
    pub fn delete_session(&self, session_id: Uuid) -> Result<(), DialogError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|e| DialogError::StorageError(format!("session lock poisoned: {}", e)))?;
        if sessions.remove(&session_id).is_some() {
            Ok(())
        } else {
            Err(DialogError::SessionNotFound(session_id))
        }
    }

    // -- Private helpers --

    /// Resolve an existing session or create a fresh one. Expired sessions
    /// are dropped and replaced.
    fn resolve_session(
        &self,
        sessions: &mut HashMap<Uuid, Session>,
        requested: Option<Uuid>,
    ) -> Uuid {
        if let Some(sid) = requested {
            if let Some(session) = sessions.get(&sid) {
                if !self.is_expired(session) {
                    return sid;
                }
                sessions.remove(&sid);
            }
        }

        let session = Session::new(Uuid::new_v4());
        let sid = session.id;
        sessions.insert(sid, session);
        sid
    }

    fn is_expired(&self, session: &Session) -> bool {
        let timeout_secs = i64::from(self.session_timeout_minutes) * 60;
        Local::now().timestamp() - session.last_message_at > timeout_secs
    }
}
