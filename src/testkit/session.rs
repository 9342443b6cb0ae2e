//! Scripted telemetry sessions for supervisor and forwarder tests.
//!
//! - [`ScriptedSession`] - connect succeeds or fails as scripted; the test
//!   decides when the stream "drops" via [`ScriptedSession::end`].
//! - [`ScriptedFactory`] - hands out pre-loaded sessions in order and
//!   records when each attempt was made.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use tokio::sync::watch;
use tokio::time::Instant;

use crate::domain::AircraftState;
use crate::error::{Error, Result};
use crate::port::{SessionFactory, TelemetrySession};

/// A session whose connect result and state are set by the test.
pub struct ScriptedSession {
    connect_result: Mutex<Option<Result<()>>>,
    state: RwLock<AircraftState>,
    connected: AtomicBool,
    ended_tx: watch::Sender<bool>,
    connect_count: AtomicU32,
    disconnect_count: AtomicU32,
}

impl ScriptedSession {
    /// A session that connects successfully and stays up until ended.
    pub fn new() -> Self {
        let (ended_tx, _) = watch::channel(false);
        Self {
            connect_result: Mutex::new(None),
            state: RwLock::new(AircraftState::default()),
            connected: AtomicBool::new(false),
            ended_tx,
            connect_count: AtomicU32::new(0),
            disconnect_count: AtomicU32::new(0),
        }
    }

    /// A session whose connect fails with a connection error.
    pub fn failing(reason: &str) -> Self {
        let session = Self::new();
        *session.connect_result.lock() = Some(Err(Error::Connection(reason.to_string())));
        session
    }

    pub fn with_state(self, state: AircraftState) -> Self {
        *self.state.write() = state;
        self
    }

    pub fn set_state(&self, state: AircraftState) {
        *self.state.write() = state;
    }

    /// Simulate the stream dropping.
    pub fn end(&self) {
        self.connected.store(false, Ordering::SeqCst);
        self.ended_tx.send_replace(true);
    }

    pub fn connect_count(&self) -> u32 {
        self.connect_count.load(Ordering::SeqCst)
    }

    pub fn disconnect_count(&self) -> u32 {
        self.disconnect_count.load(Ordering::SeqCst)
    }
}

impl Default for ScriptedSession {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TelemetrySession for ScriptedSession {
    async fn connect(&self) -> Result<()> {
        self.connect_count.fetch_add(1, Ordering::SeqCst);
        let result = self.connect_result.lock().take().unwrap_or(Ok(()));
        match result {
            Ok(()) => {
                self.connected.store(true, Ordering::SeqCst);
                Ok(())
            }
            Err(e) => {
                self.ended_tx.send_replace(true);
                Err(e)
            }
        }
    }

    async fn disconnect(&self) {
        self.disconnect_count.fetch_add(1, Ordering::SeqCst);
        self.end();
    }

    async fn ended(&self) {
        let mut rx = self.ended_tx.subscribe();
        let _ = rx.wait_for(|ended| *ended).await;
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn snapshot(&self) -> AircraftState {
        self.state.read().clone()
    }
}

/// Hands out scripted sessions in order, then default ones.
pub struct ScriptedFactory {
    queued: Mutex<VecDeque<ScriptedSession>>,
    created: Mutex<Vec<Arc<ScriptedSession>>>,
    attempts: Mutex<Vec<Instant>>,
}

impl ScriptedFactory {
    pub fn new() -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            created: Mutex::new(Vec::new()),
            attempts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_sessions(self, sessions: Vec<ScriptedSession>) -> Self {
        *self.queued.lock() = sessions.into();
        self
    }

    /// Every session created so far, oldest first.
    pub fn created(&self) -> Vec<Arc<ScriptedSession>> {
        self.created.lock().clone()
    }

    /// When each session was created, on the tokio clock.
    pub fn attempts(&self) -> Vec<Instant> {
        self.attempts.lock().clone()
    }
}

impl Default for ScriptedFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionFactory for ScriptedFactory {
    type Session = ScriptedSession;

    fn create(&self) -> Arc<ScriptedSession> {
        let session = Arc::new(self.queued.lock().pop_front().unwrap_or_default());
        self.created.lock().push(Arc::clone(&session));
        self.attempts.lock().push(Instant::now());
        session
    }
}
