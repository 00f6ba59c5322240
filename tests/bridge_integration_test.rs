//! The HTTP bridge adapter against a local mock server.

use rtc_debug_panel::adapters::{HttpMediaAdapter, ReqwestHttpClient};
use rtc_debug_panel::error::AdapterError;
use rtc_debug_panel::poller::StatsPoller;
use rtc_debug_panel::store::SnapshotStore;
use rtc_debug_panel::traits::MediaAdapter;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn bridge_server() -> MockServer {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/rtc/state",
        json!({
            "device": { "loaded": true, "codecs": [{ "mimeType": "audio/opus", "clockRate": 48000 }] },
            "signaling": { "connected": true },
            "sendTransport": {
                "id": "send-1",
                "connectionState": "connected",
                "producers": [{ "id": "mic", "kind": "audio", "paused": false }]
            },
            "recvTransport": {
                "id": "recv-1",
                "connectionState": "connected",
                "consumers": [{ "id": "c1", "peerId": "p1" }]
            },
            "micProducer": "mic",
            "consumers": ["c1"],
            "presences": { "p1": "Alice" }
        }),
    )
    .await;
    mount_json(
        &server,
        "/rtc/server-stats",
        json!({
            "send-1": {
                "name": "Send",
                "stats": [{ "type": "webrtc-transport", "bytesReceived": 4096 }],
                "producers": { "mic": [{ "type": "inbound-rtp", "kind": "audio" }] }
            }
        }),
    )
    .await;
    mount_json(
        &server,
        "/rtc/stats/transport/send",
        json!([
            { "id": "L1", "type": "local-candidate", "address": "10.0.0.2", "port": 5000 },
            { "id": "R1", "type": "remote-candidate", "address": "1.2.3.4", "port": 40000 },
            { "id": "CP1", "type": "candidate-pair", "nominated": true,
              "localCandidateId": "L1", "remoteCandidateId": "R1" }
        ]),
    )
    .await;
    mount_json(&server, "/rtc/stats/transport/recv", json!([])).await;
    mount_json(
        &server,
        "/rtc/stats/producer/mic",
        json!([{ "id": "o1", "type": "outbound-rtp", "bytesSent": 1000, "packetsSent": 10, "timestamp": 1000.0 }]),
    )
    .await;
    mount_json(
        &server,
        "/rtc/stats/consumer/c1",
        json!([{ "id": "i1", "type": "inbound-rtp", "bytesReceived": 500, "timestamp": 1000.0 }]),
    )
    .await;
    server
}

fn bridge(server: &MockServer) -> HttpMediaAdapter<ReqwestHttpClient> {
    HttpMediaAdapter::new(ReqwestHttpClient::new(), format!("{}/rtc/", server.uri()))
}

#[tokio::test]
async fn test_poll_cycle_over_http() {
    let server = bridge_server().await;
    let adapter = bridge(&server);
    let roster = adapter.roster();
    let poller = StatsPoller::new(Arc::new(adapter), Arc::new(roster), SnapshotStore::new());

    let sequence = poller.poll_once().await.unwrap();
    assert_eq!(sequence, 1);

    let snapshot = poller.store().current();
    assert!(snapshot.signaling.connected);

    let send = snapshot.send_transport.as_ref().unwrap();
    assert!(send.restart_ice_enabled());
    let candidates = send.candidates.as_ref().unwrap();
    assert_eq!(candidates.local.as_ref().unwrap().id, "L1");
    assert_eq!(candidates.remote.as_ref().unwrap().id, "R1");

    let recv = snapshot.recv_transport.as_ref().unwrap();
    assert_eq!(recv.consumers[0].name, "Alice");

    assert_eq!(snapshot.stream("mic").unwrap().speed, "0.00");
    assert!(snapshot.stream("c1").is_some());
    assert_eq!(snapshot.server.transports["send-1"].name, "Send");
}

#[tokio::test]
async fn test_actions_are_posted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rtc/actions/restart-send-ice"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rtc/actions/connect"))
        .respond_with(ResponseTemplate::new(500).set_body_string("signaling down"))
        .mount(&server)
        .await;
    let adapter = bridge(&server);

    adapter.restart_send_ice().await.unwrap();
    let err = adapter.connect().await.unwrap_err();
    assert_eq!(
        err,
        AdapterError::Status {
            status: 500,
            message: "signaling down".into()
        }
    );
}

#[tokio::test]
async fn test_missing_endpoint_fails_the_cycle() {
    let server = MockServer::start().await;
    mount_json(&server, "/rtc/state", json!({})).await;
    let adapter = bridge(&server);
    let roster = adapter.roster();
    let poller = StatsPoller::new(Arc::new(adapter), Arc::new(roster), SnapshotStore::new());

    let err = poller.poll_once().await.unwrap_err();
    assert_eq!(err.stage, "server stats");
    assert_eq!(poller.store().sequence(), 0);
}

#[tokio::test]
async fn test_unreachable_bridge_is_transport_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let adapter = HttpMediaAdapter::new(ReqwestHttpClient::new(), uri);
    let err = adapter.state().await.unwrap_err();
    assert!(matches!(err, AdapterError::Transport(_)));
}
