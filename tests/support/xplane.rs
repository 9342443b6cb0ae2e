//! Fake X-Plane web API: a REST dataref index and a WebSocket endpoint.
//!
//! The two listen on separate ports; `SessionConfig` carries both URLs.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bushtalk_bridge::adapter::outbound::xplane::SessionConfig;
use bushtalk_bridge::domain::Instrument;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

use super::http::{HttpStub, StubResponse};

/// Ids handed out for each instrument, in `Instrument::ALL` order.
pub const IDS: [i64; 6] = [10, 11, 12, 13, 14, 15];

pub fn id_of(instrument: Instrument) -> i64 {
    let index = Instrument::ALL
        .iter()
        .position(|i| *i == instrument)
        .unwrap();
    IDS[index]
}

/// REST stub that knows every dataref in `known`.
pub async fn dataref_index(known: HashMap<&'static str, i64>) -> HttpStub {
    HttpStub::start(move |req| {
        let name = req
            .target
            .split_once("filter[name]=")
            .map(|(_, name)| name.to_string())
            .unwrap_or_default();
        match known.get(name.as_str()) {
            Some(id) => StubResponse::json(
                200,
                format!(r#"{{"data":[{{"id":{id},"name":"{name}","value_type":"double"}}]}}"#),
            ),
            None => StubResponse::json(200, r#"{"data":[]}"#),
        }
    })
    .await
}

/// Every instrument resolvable with [`IDS`].
pub fn all_datarefs() -> HashMap<&'static str, i64> {
    Instrument::ALL
        .iter()
        .map(|i| i.dataref())
        .zip(IDS)
        .collect()
}

pub enum WsCommand {
    Text(String),
    Close,
}

/// WebSocket stub. Connections are served one at a time; commands go to the
/// connection currently open.
pub struct WsStub {
    pub addr: SocketAddr,
    connections: Arc<AtomicU32>,
    received: Mutex<mpsc::UnboundedReceiver<String>>,
    commands: mpsc::UnboundedSender<WsCommand>,
    handle: JoinHandle<()>,
}

impl WsStub {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let connections = Arc::new(AtomicU32::new(0));
        let (received_tx, received_rx) = mpsc::unbounded_channel();
        let (commands_tx, mut commands_rx) = mpsc::unbounded_channel::<WsCommand>();

        let counter = Arc::clone(&connections);
        let handle = tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let Ok(mut ws) = accept_async(stream).await else {
                    continue;
                };
                counter.fetch_add(1, Ordering::SeqCst);

                loop {
                    tokio::select! {
                        msg = ws.next() => match msg {
                            Some(Ok(Message::Text(text))) => {
                                let _ = received_tx.send(text);
                            }
                            Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                            Some(Ok(_)) => {}
                        },
                        cmd = commands_rx.recv() => match cmd {
                            Some(WsCommand::Text(text)) => {
                                if ws.send(Message::Text(text)).await.is_err() {
                                    break;
                                }
                            }
                            Some(WsCommand::Close) => {
                                let _ = ws.close(None).await;
                                break;
                            }
                            None => return,
                        },
                    }
                }
            }
        });

        Self {
            addr,
            connections,
            received: Mutex::new(received_rx),
            commands: commands_tx,
            handle,
        }
    }

    pub fn url(&self) -> String {
        format!("ws://{}/api/v3", self.addr)
    }

    pub fn connections(&self) -> u32 {
        self.connections.load(Ordering::SeqCst)
    }

    /// Next text frame sent by the client.
    pub async fn next_received(&self) -> String {
        let mut rx = self.received.lock().await;
        tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("client sent a frame in time")
            .expect("stub still running")
    }

    pub fn send_text(&self, text: impl Into<String>) {
        let _ = self.commands.send(WsCommand::Text(text.into()));
    }

    pub fn close(&self) {
        let _ = self.commands.send(WsCommand::Close);
    }
}

impl Drop for WsStub {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Session endpoints pointing at a REST stub and a WebSocket stub.
pub fn session_config(rest: &HttpStub, ws: &WsStub) -> SessionConfig {
    SessionConfig {
        api_base: rest.base_url(),
        ws_url: ws.url(),
        resolve_timeout: Duration::from_secs(2),
    }
}
