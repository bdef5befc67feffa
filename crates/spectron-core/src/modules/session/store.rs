use super::Session;
use crate::domain::{LteParameters, SpectronError};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Opaque key of a session held by a [`SessionStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(u64);

impl SessionId {
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionStoreError {
    #[error("{id} does not exist or has expired")]
    UnknownSession { id: SessionId },
}

impl From<SessionStoreError> for SpectronError {
    fn from(error: SessionStoreError) -> Self {
        Self::input_validation("INPUT.UNKNOWN_SESSION", error.to_string())
    }
}

/// Sessions keyed by id. Each session is owned by its entry; identifiers
/// are never reused within one store.
#[derive(Debug, Default)]
pub struct SessionStore {
    defaults: LteParameters,
    sessions: BTreeMap<SessionId, Session>,
    next_id: u64,
}

impl SessionStore {
    pub fn new(defaults: LteParameters) -> Self {
        Self {
            defaults,
            sessions: BTreeMap::new(),
            next_id: 0,
        }
    }

    pub fn create(&mut self) -> SessionId {
        let id = SessionId(self.next_id);
        self.next_id += 1;
        self.sessions.insert(id, Session::new(self.defaults));
        tracing::debug!(%id, "session created");
        id
    }

    pub fn get(&self, id: SessionId) -> Result<&Session, SessionStoreError> {
        self.sessions
            .get(&id)
            .ok_or(SessionStoreError::UnknownSession { id })
    }

    pub fn get_mut(&mut self, id: SessionId) -> Result<&mut Session, SessionStoreError> {
        self.sessions
            .get_mut(&id)
            .ok_or(SessionStoreError::UnknownSession { id })
    }

    /// Removes a session and hands it back to the caller.
    pub fn expire(&mut self, id: SessionId) -> Result<Session, SessionStoreError> {
        let session = self
            .sessions
            .remove(&id)
            .ok_or(SessionStoreError::UnknownSession { id })?;
        tracing::debug!(%id, "session expired");
        Ok(session)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
