//! X-Plane WebSocket telemetry session.
//!
//! # Connection Lifecycle
//!
//! 1. **Resolving**: look up session ids for every required dataref
//! 2. **Dialing**: open `ws://<host>:<port>/api/v3`
//! 3. **Subscribing**: send one `dataref_subscribe_values` request
//! 4. **Active**: a spawned read task applies update frames to the shared
//!    [`AircraftState`] until the stream fails, the server closes, or
//!    [`disconnect`](TelemetrySession::disconnect) is called
//! 5. **Ended**: connected flag cleared, ended signal raised once
//!
//! A session is single-use. Reconnection is the supervisor's job.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use parking_lot::{Mutex, RwLock};
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, trace, warn};

use super::decode::apply_update;
use super::dto::{SubscribeMessage, UpdateMessage};
use super::resolver::DatarefResolver;
use crate::domain::{AircraftState, DatarefId, Instrument};
use crate::error::{Error, Result};
use crate::port::{Event, NotifierRegistry, SessionFactory, TelemetrySession};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Resolving,
    Dialing,
    Subscribing,
    Active,
    Ended,
}

/// Endpoints and timeouts for one simulator.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// REST base for dataref lookup, e.g. `http://localhost:8086`.
    pub api_base: String,
    /// Streaming endpoint, e.g. `ws://localhost:8086/api/v3`.
    pub ws_url: String,
    /// Per-request timeout for dataref lookup.
    pub resolve_timeout: Duration,
}

impl SessionConfig {
    /// Endpoints for an X-Plane web API listening on `host:port`.
    #[must_use]
    pub fn for_simulator(host: &str, port: u16, resolve_timeout: Duration) -> Self {
        Self {
            api_base: format!("http://{host}:{port}"),
            ws_url: format!("ws://{host}:{port}/api/v3"),
            resolve_timeout,
        }
    }
}

/// State shared between the session handle and its read task.
struct Shared {
    state: RwLock<AircraftState>,
    phase: Mutex<SessionPhase>,
    connected: AtomicBool,
    finished: AtomicBool,
    ended_tx: watch::Sender<bool>,
    stop_tx: watch::Sender<bool>,
    notifiers: Arc<NotifierRegistry>,
}

impl Shared {
    fn new(notifiers: Arc<NotifierRegistry>) -> Self {
        let (ended_tx, _) = watch::channel(false);
        let (stop_tx, _) = watch::channel(false);
        Self {
            state: RwLock::new(AircraftState::default()),
            phase: Mutex::new(SessionPhase::Idle),
            connected: AtomicBool::new(false),
            finished: AtomicBool::new(false),
            ended_tx,
            stop_tx,
            notifiers,
        }
    }

    fn set_phase(&self, phase: SessionPhase) {
        *self.phase.lock() = phase;
    }

    fn stop_requested(&self) -> bool {
        *self.stop_tx.borrow()
    }

    /// Parse one text frame and apply it under a single write lock.
    ///
    /// Malformed frames are logged and dropped.
    fn handle_text(&self, text: &str, reverse: &HashMap<DatarefId, Instrument>) {
        trace!(bytes = text.len(), "Received WebSocket text frame");

        let msg = match serde_json::from_str::<UpdateMessage>(text) {
            Ok(msg) => msg,
            Err(e) => {
                warn!(error = %e, bytes = text.len(), "Failed to parse message");
                return;
            }
        };

        if !msg.success {
            warn!(req_id = ?msg.req_id, msg_type = %msg.msg_type, "X-Plane reported request failure");
        }

        if let Some(data) = msg.data {
            let mut state = self.state.write();
            let applied = apply_update(&mut state, reverse, &data, Utc::now());
            trace!(applied, "Applied update frame");
        }
    }

    /// Enter `Ended`. Only the first call has any effect.
    fn finish(&self) {
        if self.finished.swap(true, Ordering::SeqCst) {
            return;
        }
        let was_connected = self.connected.swap(false, Ordering::SeqCst);
        self.set_phase(SessionPhase::Ended);
        self.ended_tx.send_replace(true);
        if was_connected {
            self.notifiers.notify_all(Event::Disconnected);
        }
    }
}

/// One X-Plane WebSocket session.
pub struct XPlaneSession {
    config: SessionConfig,
    shared: Arc<Shared>,
    reader: Mutex<Option<JoinHandle<()>>>,
}

impl XPlaneSession {
    #[must_use]
    pub fn new(config: SessionConfig, notifiers: Arc<NotifierRegistry>) -> Self {
        Self {
            config,
            shared: Arc::new(Shared::new(notifiers)),
            reader: Mutex::new(None),
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        *self.shared.phase.lock()
    }

    async fn dial(&self) -> Result<WsStream> {
        info!(url = %self.config.ws_url, "Connecting to WebSocket");
        let (ws, response) = connect_async(self.config.ws_url.as_str()).await?;
        info!(status = %response.status(), "WebSocket connected");
        Ok(ws)
    }

    async fn subscribe(ws: &mut WsStream, ids: Vec<DatarefId>) -> Result<()> {
        let msg = SubscribeMessage::new(ids.iter().copied());
        let json = serde_json::to_string(&msg)?;
        info!(datarefs = ?ids, "Subscribing to datarefs");
        ws.send(Message::Text(json)).await?;
        Ok(())
    }

    /// Send the subscription. On failure the socket is closed before the
    /// error is returned.
    async fn subscribe_or_close(ws: &mut WsStream, ids: Vec<DatarefId>) -> Result<()> {
        if let Err(e) = Self::subscribe(ws, ids).await {
            warn!(error = %e, "Subscription failed, closing WebSocket");
            let _ = ws.close(None).await;
            return Err(e);
        }
        Ok(())
    }

    /// Fail the attempt from a pre-active phase.
    fn abort<T>(&self, err: Error) -> Result<T> {
        self.shared.finish();
        Err(err)
    }
}

#[async_trait]
impl TelemetrySession for XPlaneSession {
    async fn connect(&self) -> Result<()> {
        if self.phase() != SessionPhase::Idle {
            return Err(Error::Connection("session already used".into()));
        }

        self.shared.set_phase(SessionPhase::Resolving);
        let resolver = DatarefResolver::new(&self.config.api_base, self.config.resolve_timeout);
        let map = match resolver.resolve_all(&Instrument::ALL).await {
            Ok(map) => map,
            Err(e) => return self.abort(e.into()),
        };
        let reverse = map.reverse();

        self.shared.set_phase(SessionPhase::Dialing);
        let mut ws = match self.dial().await {
            Ok(ws) => ws,
            Err(e) => return self.abort(e),
        };

        self.shared.set_phase(SessionPhase::Subscribing);
        if let Err(e) = Self::subscribe_or_close(&mut ws, map.ids()).await {
            return self.abort(e);
        }

        if self.shared.stop_requested() {
            let _ = ws.close(None).await;
            return self.abort(Error::Connection("disconnected while connecting".into()));
        }

        self.shared.connected.store(true, Ordering::SeqCst);
        self.shared.set_phase(SessionPhase::Active);
        self.shared.notifiers.notify_all(Event::Connected);

        let shared = Arc::clone(&self.shared);
        let stop = self.shared.stop_tx.subscribe();
        let handle = tokio::spawn(read_loop(shared, ws, reverse, stop));
        *self.reader.lock() = Some(handle);

        Ok(())
    }

    async fn disconnect(&self) {
        self.shared.stop_tx.send_replace(true);

        let reader = self.reader.lock().take();
        match reader {
            Some(handle) => {
                if let Err(e) = handle.await {
                    warn!(error = %e, "Read task did not exit cleanly");
                }
                // The read task finishes the session on exit; this covers a panic.
                self.shared.finish();
            }
            None => self.shared.finish(),
        }
    }

    async fn ended(&self) {
        let mut rx = self.shared.ended_tx.subscribe();
        let _ = rx.wait_for(|ended| *ended).await;
    }

    fn is_connected(&self) -> bool {
        self.shared.connected.load(Ordering::SeqCst)
    }

    fn snapshot(&self) -> AircraftState {
        self.shared.state.read().clone()
    }
}

/// Read frames until the stream fails, the server closes, or stop is requested.
async fn read_loop(
    shared: Arc<Shared>,
    mut ws: WsStream,
    reverse: HashMap<DatarefId, Instrument>,
    mut stop: watch::Receiver<bool>,
) {
    debug!("Entering WebSocket read loop");

    loop {
        tokio::select! {
            () = async { let _ = stop.wait_for(|stop| *stop).await; } => {
                debug!("Disconnect requested");
                let _ = ws.close(None).await;
                break;
            }
            msg = ws.next() => match msg {
                Some(Ok(Message::Text(text))) => shared.handle_text(&text, &reverse),
                Some(Ok(Message::Ping(data))) => {
                    trace!("Received WebSocket ping");
                    if let Err(e) = ws.send(Message::Pong(data)).await {
                        error!(error = %e, "Failed to send pong");
                        break;
                    }
                }
                Some(Ok(Message::Close(frame))) => {
                    info!(frame = ?frame, "WebSocket closed by server");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    error!(error = %e, "WebSocket read error");
                    break;
                }
                None => {
                    info!("WebSocket stream ended");
                    break;
                }
            }
        }
    }

    shared.finish();
}

/// Builds a fresh [`XPlaneSession`] per connection attempt.
pub struct XPlaneSessionFactory {
    config: SessionConfig,
    notifiers: Arc<NotifierRegistry>,
}

impl XPlaneSessionFactory {
    #[must_use]
    pub fn new(config: SessionConfig, notifiers: Arc<NotifierRegistry>) -> Self {
        Self { config, notifiers }
    }
}

impl SessionFactory for XPlaneSessionFactory {
    type Session = XPlaneSession;

    fn create(&self) -> Arc<XPlaneSession> {
        Arc::new(XPlaneSession::new(self.config.clone(), Arc::clone(&self.notifiers)))
    }
}
