//! Per-conversation state and the bounded store that owns it.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::content::{Field, Language};
use crate::config::SessionConfig;

/// Opaque identifier for one conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Serializable view of the collected fields; every entry is null until
/// the applicant has supplied (a tentative or confirmed) value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSnapshot {
    pub name: Option<String>,
    pub age: Option<String>,
    pub number: Option<String>,
    pub address: Option<String>,
    pub pay: Option<String>,
}

impl FieldSnapshot {
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => self.name.as_deref(),
            Field::Age => self.age.as_deref(),
            Field::Number => self.number.as_deref(),
            Field::Address => self.address.as_deref(),
            Field::Pay => self.pay.as_deref(),
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Age => &mut self.age,
            Field::Number => &mut self.number,
            Field::Address => &mut self.address,
            Field::Pay => &mut self.pay,
        };
        *slot = Some(value);
    }
}

/// Mutable state for one in-progress conversation.
///
/// Invariants: exactly one field is current until the dialogue finishes,
/// and `awaiting_confirmation` implies the current field already holds a
/// tentative value. The collection order is fixed across languages.
#[derive(Debug, Clone)]
pub struct Session {
    pub language: Language,
    pub current_field: Field,
    pub awaiting_confirmation: bool,
    pub values: FieldSnapshot,
    last_activity: Instant,
}

impl Session {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            current_field: Field::first(),
            awaiting_confirmation: false,
            values: FieldSnapshot::default(),
            last_activity: Instant::now(),
        }
    }

    fn touch(&mut self) {
        self.last_activity = Instant::now();
    }
}

/// Process-wide store of active sessions, keyed by [`SessionId`].
///
/// Turns for one session are assumed to arrive serially; the mutex only
/// guards map access, not turn processing. Checkout removes the session
/// from the map so a finished turn can simply not check it back in.
///
/// The store is bounded: idle-expired sessions are pruned on every
/// access, and at capacity the least-recently-active session is evicted.
#[derive(Debug)]
pub struct SessionStore {
    sessions: Mutex<HashMap<SessionId, Session>>,
    config: SessionConfig,
}

impl SessionStore {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// Create or overwrite a session. Idempotent: restarting an existing
    /// session discards all prior field values.
    pub fn start(&self, id: &SessionId, language: Language) {
        let mut sessions = self.sessions.lock().expect("session mutex poisoned");
        Self::prune(&mut sessions, self.config.idle_timeout);
        if !sessions.contains_key(id) {
            Self::make_room(&mut sessions, self.config.max_sessions);
        }
        sessions.insert(id.clone(), Session::new(language));
    }

    /// Remove a session; no-op when absent.
    pub fn remove(&self, id: &SessionId) {
        let mut sessions = self.sessions.lock().expect("session mutex poisoned");
        sessions.remove(id);
    }

    /// Take the session out of the map for one turn, creating a fresh
    /// default-language session when none exists (documented get-or-create,
    /// not a lookup failure).
    pub fn checkout(&self, id: &SessionId) -> Session {
        let mut sessions = self.sessions.lock().expect("session mutex poisoned");
        Self::prune(&mut sessions, self.config.idle_timeout);
        sessions
            .remove(id)
            .unwrap_or_else(|| Session::new(Language::default()))
    }

    /// Return a checked-out session after a turn that did not finish it.
    pub fn checkin(&self, id: &SessionId, mut session: Session) {
        session.touch();
        let mut sessions = self.sessions.lock().expect("session mutex poisoned");
        Self::make_room(&mut sessions, self.config.max_sessions);
        sessions.insert(id.clone(), session);
    }

    /// Language of an active session, if any; used by the transport to
    /// pick the transcription locale before the turn runs.
    pub fn language_of(&self, id: &SessionId) -> Option<Language> {
        let sessions = self.sessions.lock().expect("session mutex poisoned");
        sessions.get(id).map(|session| session.language)
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        let sessions = self.sessions.lock().expect("session mutex poisoned");
        sessions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        let sessions = self.sessions.lock().expect("session mutex poisoned");
        sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn prune(sessions: &mut HashMap<SessionId, Session>, idle_timeout: std::time::Duration) {
        let now = Instant::now();
        sessions.retain(|_, session| now.duration_since(session.last_activity) < idle_timeout);
    }

    fn make_room(sessions: &mut HashMap<SessionId, Session>, max_sessions: usize) {
        while sessions.len() >= max_sessions.max(1) {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, session)| session.last_activity)
                .map(|(id, _)| id.clone());
            match oldest {
                Some(id) => {
                    sessions.remove(&id);
                }
                None => break,
            }
        }
    }
}
