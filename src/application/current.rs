//! Shared handle to the live telemetry session.

use std::sync::Arc;

use parking_lot::RwLock;

/// The session the supervisor most recently started, if any.
///
/// The supervisor swaps in a new session before every attempt; readers
/// resolve it fresh each time and must treat `None` as not connected.
pub struct CurrentSession<S> {
    inner: RwLock<Option<Arc<S>>>,
}

impl<S> CurrentSession<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    /// Install `session`, returning the one it replaces.
    pub fn replace(&self, session: Arc<S>) -> Option<Arc<S>> {
        self.inner.write().replace(session)
    }

    #[must_use]
    pub fn current(&self) -> Option<Arc<S>> {
        self.inner.read().clone()
    }

    /// Drop the installed session, returning it.
    pub fn clear(&self) -> Option<Arc<S>> {
        self.inner.write().take()
    }
}

impl<S> Default for CurrentSession<S> {
    fn default() -> Self {
        Self::new()
    }
}
