// Snapshot store for per-shopper planning sessions

use crate::error::{PlannerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// Opaque session identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Maps session ids to immutable snapshots of planning state
///
/// Updates swap in a new snapshot; readers holding an older `Arc` keep
/// seeing the state they fetched.
#[derive(Debug)]
pub struct SessionStore<S> {
    sessions: RwLock<HashMap<SessionId, Arc<S>>>,
    next_id: AtomicU64,
}

impl<S> Default for SessionStore<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> SessionStore<S> {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Stores a snapshot under a fresh id
    pub fn insert(&self, snapshot: S) -> SessionId {
        let id = SessionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.write_guard().insert(id, Arc::new(snapshot));
        id
    }

    /// Current snapshot of a session
    pub fn get(&self, id: SessionId) -> Option<Arc<S>> {
        self.read_guard().get(&id).cloned()
    }

    /// Replaces a session's snapshot with one derived from the current one
    ///
    /// The write lock is held while `f` runs, so concurrent updates to the
    /// store are serialized. On error the stored snapshot is left as is.
    pub fn update<F>(&self, id: SessionId, f: F) -> Result<Arc<S>>
    where
        F: FnOnce(&S) -> Result<S>,
    {
        let mut sessions = self.write_guard();
        let current = sessions
            .get(&id)
            .ok_or(PlannerError::UnknownSession(id))?;
        let next = Arc::new(f(current)?);
        sessions.insert(id, Arc::clone(&next));
        Ok(next)
    }

    pub fn remove(&self, id: SessionId) -> Option<Arc<S>> {
        self.write_guard().remove(&id)
    }

    pub fn len(&self) -> usize {
        self.read_guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A poisoned lock still holds a consistent map: snapshots are only ever
    // swapped whole, never mutated in place.
    fn read_guard(&self) -> std::sync::RwLockReadGuard<'_, HashMap<SessionId, Arc<S>>> {
        self.sessions.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_guard(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<SessionId, Arc<S>>> {
        self.sessions.write().unwrap_or_else(|e| e.into_inner())
    }
}
