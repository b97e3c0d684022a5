//! Shared application state.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use leasebid_core::clock::Clock;
use leasebid_core::error::DomainError;
use leasebid_walkthrough::application::walkthrough::{Walkthrough, WalkthroughSettings};
use tracing::warn;
use uuid::Uuid;

/// Sessions kept when `MAX_SESSIONS` is unset.
pub const DEFAULT_MAX_SESSIONS: usize = 256;

#[derive(Debug, Default)]
struct Sessions {
    by_id: HashMap<Uuid, Walkthrough>,
    /// Session IDs, oldest first.
    order: VecDeque<Uuid>,
}

/// Live walkthrough sessions keyed by session ID.
///
/// Holds at most `max_sessions`; inserting past the limit shuts down and
/// drops the oldest session.
#[derive(Debug)]
pub struct WalkthroughRegistry {
    max_sessions: usize,
    sessions: Mutex<Sessions>,
}

impl WalkthroughRegistry {
    /// Creates an empty registry holding at most `max_sessions` (at least one).
    #[must_use]
    pub fn new(max_sessions: usize) -> Self {
        Self {
            max_sessions: max_sessions.max(1),
            sessions: Mutex::new(Sessions::default()),
        }
    }

    fn sessions(&self) -> MutexGuard<'_, Sessions> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a session. Returns the session evicted to make room, already
    /// shut down.
    pub fn insert(&self, walkthrough: Walkthrough) -> Option<Walkthrough> {
        let session_id = walkthrough.session_id();
        let evicted = {
            let mut sessions = self.sessions();
            if sessions.by_id.insert(session_id, walkthrough).is_none() {
                sessions.order.push_back(session_id);
            }
            if sessions.order.len() > self.max_sessions {
                sessions
                    .order
                    .pop_front()
                    .and_then(|oldest| sessions.by_id.remove(&oldest))
            } else {
                None
            }
        };

        if let Some(evicted) = &evicted {
            evicted.shutdown();
            warn!(
                session_id = %evicted.session_id(),
                max_sessions = self.max_sessions,
                "evicted oldest walkthrough"
            );
        }
        evicted
    }

    /// Returns a handle to a session.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionNotFound` if no such session is live.
    pub fn get(&self, session_id: Uuid) -> Result<Walkthrough, DomainError> {
        self.sessions()
            .by_id
            .get(&session_id)
            .cloned()
            .ok_or(DomainError::SessionNotFound(session_id))
    }

    /// Removes a session and stops its timers.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::SessionNotFound` if no such session is live.
    pub fn remove(&self, session_id: Uuid) -> Result<Walkthrough, DomainError> {
        let walkthrough = {
            let mut sessions = self.sessions();
            let walkthrough = sessions
                .by_id
                .remove(&session_id)
                .ok_or(DomainError::SessionNotFound(session_id))?;
            sessions.order.retain(|id| *id != session_id);
            walkthrough
        };
        walkthrough.shutdown();
        Ok(walkthrough)
    }

    #[must_use]
    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions().by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions().by_id.is_empty()
    }
}

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock stamping journal entries.
    pub clock: Arc<dyn Clock>,
    /// Live walkthrough sessions.
    pub walkthroughs: Arc<WalkthroughRegistry>,
    /// Defaults for sessions created without explicit settings.
    pub settings: WalkthroughSettings,
}

impl AppState {
    /// Create new application state holding at most `max_sessions` live
    /// walkthroughs.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, settings: WalkthroughSettings, max_sessions: usize) -> Self {
        Self {
            clock,
            walkthroughs: Arc::new(WalkthroughRegistry::new(max_sessions)),
            settings,
        }
    }
}
