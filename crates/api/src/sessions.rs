//! Registry of active annotation sessions.
//!
//! One [`AnnotationSession`] per browser session, keyed by an opaque UUID
//! handed to the client at session start. State is process-local: sessions
//! are never shared across annotators, and there is no expiry — an
//! abandoned session is simply never looked up again.

use std::collections::HashMap;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use facepair_core::AnnotationSession;

/// All active sessions.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application. Submission handlers hold the write guard
/// across the spreadsheet append, so two submits racing on the same session
/// cannot both advance it.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, AnnotationSession>>,
}

impl SessionStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session and return its generated id.
    pub async fn create(&self, session: AnnotationSession) -> String {
        let id = Uuid::new_v4().to_string();
        self.sessions.write().await.insert(id.clone(), session);
        id
    }

    /// Shared access to the session map (snapshot reads).
    pub async fn read(&self) -> RwLockReadGuard<'_, HashMap<String, AnnotationSession>> {
        self.sessions.read().await
    }

    /// Exclusive access to the session map (submissions, restart).
    pub async fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, AnnotationSession>> {
        self.sessions.write().await
    }

    /// Number of registered sessions.
    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
