//! End-to-end tracking: simulator stubs, supervisor, forwarder and the
//! Bushtalk client wired together the way the runtime wires them.

mod support;

use std::sync::Arc;
use std::time::Duration;

use bushtalk_bridge::adapter::outbound::bushtalk::BushtalkClient;
use bushtalk_bridge::adapter::outbound::xplane::XPlaneSessionFactory;
use bushtalk_bridge::application::{
    CurrentSession, ReconnectSupervisor, StateForwarder, TickOutcome,
};
use bushtalk_bridge::domain::AircraftState;
use bushtalk_bridge::port::{Event, NotifierRegistry, TelemetrySession, TrackPublisher};
use bushtalk_bridge::testkit::notifier::RecordingNotifier;
use bushtalk_bridge::testkit::session::ScriptedSession;
use serde_json::json;
use support::eventually;
use support::http::{HttpStub, StubResponse};
use support::xplane::{all_datarefs, dataref_index, session_config, WsStub};

fn tracker_client(stub: &HttpStub) -> Arc<BushtalkClient> {
    let client = BushtalkClient::new(stub.base_url());
    client.set_token("tok-123");
    Arc::new(client)
}

#[tokio::test]
async fn forwarder_posts_converted_snapshot() {
    let tracker = HttpStub::start(|_| StubResponse::json(201, "{}")).await;
    let current = Arc::new(CurrentSession::new());
    let session = Arc::new(ScriptedSession::new().with_state(AircraftState {
        latitude: 61.17,
        longitude: -149.99,
        altitude_agl: 100.0,
        groundspeed: 10.0,
        magnetic_heading: 270.0,
        tail_number: "N4567Q".into(),
        updated_at: None,
    }));
    session.connect().await.unwrap();
    current.replace(session);

    let forwarder = StateForwarder::new(
        Arc::clone(&current),
        tracker_client(&tracker) as Arc<dyn TrackPublisher>,
        Arc::new(NotifierRegistry::new()),
        Duration::from_secs(5),
    );

    let outcome = forwarder.tick().await;
    assert!(matches!(outcome, TickOutcome::Sent(_)));

    let requests = tracker.requests();
    assert_eq!(requests.len(), 1);
    let body = requests[0].json();
    assert_eq!(body["PLANE_LATITUDE"], json!(61.17));
    assert_eq!(body["PLANE_LONGITUDE"], json!(-149.99));
    assert!((body["ALTITUDE_ABOVE_GROUND"].as_f64().unwrap() - 328.084).abs() < 1e-9);
    assert!((body["GROUND_VELOCITY"].as_f64().unwrap() - 19.4384).abs() < 1e-9);
    assert_eq!(body["MAGNETIC_COMPASS"], json!(270.0));
    assert_eq!(body["ATC_ID"], json!("N4567Q"));
    assert_eq!(body["SIM_ON_GROUND"], json!(false));
}

#[tokio::test]
async fn rejected_track_is_reported_and_retried_next_tick() {
    let tracker = HttpStub::start(|_| StubResponse::json(500, "{}")).await;
    let current = Arc::new(CurrentSession::new());
    let session = Arc::new(ScriptedSession::new().with_state(AircraftState {
        latitude: 1.0,
        ..Default::default()
    }));
    session.connect().await.unwrap();
    current.replace(session);

    let recorder = RecordingNotifier::new();
    let mut registry = NotifierRegistry::new();
    registry.register(Box::new(recorder.clone()));
    let forwarder = StateForwarder::new(
        current,
        tracker_client(&tracker) as Arc<dyn TrackPublisher>,
        Arc::new(registry),
        Duration::from_secs(5),
    );

    assert!(matches!(forwarder.tick().await, TickOutcome::Failed(_)));
    assert!(matches!(forwarder.tick().await, TickOutcome::Failed(_)));

    assert_eq!(tracker.requests().len(), 2);
    let failures: Vec<Event> = recorder
        .events()
        .into_iter()
        .filter(|e| matches!(e, Event::PublishFailed { .. }))
        .collect();
    assert_eq!(
        failures,
        vec![
            Event::PublishFailed {
                reason: "track request failed: status 500".into()
            };
            2
        ]
    );
}

#[tokio::test]
async fn pipeline_streams_and_survives_a_simulator_restart() {
    let rest = dataref_index(all_datarefs()).await;
    let ws = WsStub::start().await;
    let tracker = HttpStub::start(|_| StubResponse::json(200, "{}")).await;

    let recorder = RecordingNotifier::new();
    let mut registry = NotifierRegistry::new();
    registry.register(Box::new(recorder.clone()));
    let notifiers = Arc::new(registry);

    let current = Arc::new(CurrentSession::new());
    let supervisor = ReconnectSupervisor::new(
        XPlaneSessionFactory::new(session_config(&rest, &ws), Arc::clone(&notifiers)),
        Arc::clone(&current),
        Duration::from_millis(50),
    );
    let forwarder = StateForwarder::new(
        Arc::clone(&current),
        tracker_client(&tracker) as Arc<dyn TrackPublisher>,
        Arc::clone(&notifiers),
        Duration::from_millis(50),
    );

    let (stop_tx, stop_rx) = tokio::sync::watch::channel(false);
    let forwarder_stop = stop_rx.clone();
    let handle = tokio::spawn(async move {
        tokio::join!(supervisor.run(stop_rx), forwarder.run(forwarder_stop));
    });

    ws.next_received().await;
    ws.send_text(r#"{"type":"dataref_update_values","data":{"10":61.17,"11":-149.99,"15":"TjQ1NjdR"}}"#);

    assert!(eventually(|| !tracker.requests().is_empty()).await);
    let body = tracker.requests()[0].json();
    assert_eq!(body["PLANE_LATITUDE"], json!(61.17));
    assert_eq!(body["ATC_ID"], json!("N4567Q"));

    ws.close();
    assert!(eventually(|| ws.connections() == 2).await);
    ws.next_received().await;
    assert!(eventually(|| current.current().is_some_and(|s| s.is_connected())).await);
    let live = current.current().unwrap();

    stop_tx.send(true).unwrap();
    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("pipeline stopped")
        .unwrap();

    let events = recorder.events();
    let connects = events.iter().filter(|e| **e == Event::Connected).count();
    let disconnects = events.iter().filter(|e| **e == Event::Disconnected).count();
    assert_eq!(connects, 2);
    assert_eq!(disconnects, 2);
    assert!(events.iter().any(|e| matches!(e, Event::PositionSent { .. })));
    assert!(!live.is_connected());
    assert!(current.current().is_none());
}
