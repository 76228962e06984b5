#![allow(clippy::unwrap_used)]
// End-to-end collector tests against a wiremock controller.

use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use unipoll_api::{ControllerConfig, LogHooks};
use unipoll_core::{Collector, DpiTotals, Filter, PollOptions, Target, UnifiCollector};

// ── Helpers ─────────────────────────────────────────────────────────

fn envelope(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"meta": {"rc": "ok"}, "data": data}))
}

fn target(server: &MockServer, options: PollOptions) -> Target {
    let controller = ControllerConfig {
        timeout: Duration::from_secs(5),
        hooks: LogHooks::silent(),
        ..ControllerConfig::new(server.uri(), "admin", SecretString::from("pw"))
    };
    Target::new(controller, options)
}

/// Classic controller handshake: `GET /` is unmatched (404), login and
/// status succeed.
async fn mount_handshake(server: &MockServer, logins: u64) {
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(logins)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meta": {"rc": "ok", "up": true, "server_version": "7.5.176"}
        })))
        .mount(server)
        .await;
}

async fn mount_get(server: &MockServer, at: &str, data: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(at.to_owned()))
        .respond_with(envelope(data))
        .mount(server)
        .await;
}

async fn mount_post(server: &MockServer, at: &str, data: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(at.to_owned()))
        .respond_with(envelope(data))
        .mount(server)
        .await;
}

fn sites() -> serde_json::Value {
    json!([
        {"name": "default", "desc": "Home"},
        {"name": "lab", "desc": ""}
    ])
}

// ── Metrics ─────────────────────────────────────────────────────────

#[tokio::test]
async fn metrics_snapshot_is_augmented_and_filtered() {
    let server = MockServer::start().await;
    mount_handshake(&server, 1).await;
    mount_get(&server, "/api/self/sites", sites()).await;
    mount_get(
        &server,
        "/api/s/default/stat/device",
        json!([
            {"type": "uap", "mac": "AA:00:00:00:00:01", "name": "Lobby AP",
             "vap_table": [{"bssid": "aa:00:00:00:00:f1", "radio": "ng", "radio_name": "wifi0"}]},
            {"type": "usw", "mac": "aa:00:00:00:00:02", "name": "Core"}
        ]),
    )
    .await;
    mount_get(
        &server,
        "/api/s/default/stat/sta",
        json!([
            {"mac": "cc:00:00:00:00:01", "hostname": "phone", "ap_mac": "aa:00:00:00:00:01",
             "bssid": "aa:00:00:00:00:f1", "radio_proto": "ng"},
            {"mac": "cc:00:00:00:00:02", "is_wired": true, "sw_mac": "aa:00:00:00:00:02"}
        ]),
    )
    .await;
    mount_post(
        &server,
        "/api/s/default/stat/sitedpi",
        json!([{"by_app": [{"cat": 4, "app": 5, "rx_bytes": 900, "tx_bytes": 100}],
                "by_cat": [{"cat": 4, "rx_bytes": 900, "tx_bytes": 100}]}]),
    )
    .await;
    mount_post(
        &server,
        "/api/s/default/stat/stadpi",
        json!([{"mac": "cc:00:00:00:00:01", "by_app": [], "by_cat": []}]),
    )
    .await;

    let options = PollOptions {
        sites: vec!["default".into()],
        save_dpi: true,
        ..PollOptions::default()
    };
    let collector = UnifiCollector::new(vec![target(&server, options)]);
    let metrics = collector.metrics(&Filter::default()).await.unwrap();

    assert_eq!(metrics.sites.len(), 1);
    assert_eq!(metrics.sites[0].site_name, "Home (default)");
    assert_eq!(metrics.devices.len(), 2);
    assert_eq!(metrics.devices.uaps[0].header.site_name, "Home");

    let phone = &metrics.clients[0];
    assert_eq!(phone.name, "phone");
    assert_eq!(phone.ap_name, "Lobby AP");
    assert_eq!(phone.radio_description, "Lobby AP ng wifi0:ng");
    assert_eq!(phone.source_name, server.uri());

    let wired = &metrics.clients[1];
    assert_eq!(wired.name, "-no-name-");
    assert_eq!(wired.sw_name, "Core");

    assert_eq!(metrics.clients_dpi[0].name, "phone");

    let totals = DpiTotals::from_tables(&metrics.sites_dpi);
    let site = totals.site_total(&server.uri(), "Home (default)");
    assert_eq!(site.rx_bytes, 900);
    assert_eq!(totals.controller_total(&server.uri()), site);
}

#[tokio::test]
async fn poll_repeats_once_after_auth_failure() {
    let server = MockServer::start().await;
    // connect, the controller's own re-login, then the collector's.
    mount_handshake(&server, 3).await;

    Mock::given(method("GET"))
        .and(path("/api/self/sites"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    mount_get(&server, "/api/self/sites", json!([{"name": "default", "desc": "Home"}])).await;
    mount_get(&server, "/api/s/default/stat/device", json!([])).await;
    mount_get(&server, "/api/s/default/stat/sta", json!([])).await;

    let collector = UnifiCollector::new(vec![target(&server, PollOptions::default())]);
    let metrics = collector.metrics(&Filter::default()).await.unwrap();
    assert_eq!(metrics.sites.len(), 1);
}

#[tokio::test]
async fn unknown_controller_filter_is_an_error() {
    let server = MockServer::start().await;
    let collector = UnifiCollector::new(vec![target(&server, PollOptions::default())]);
    let filter = Filter {
        controller: Some("https://elsewhere:8443".into()),
        ..Filter::default()
    };
    let err = collector.metrics(&filter).await.unwrap_err();
    assert!(matches!(
        err,
        unipoll_core::CoreError::ControllerNotFound { .. }
    ));
}

// ── Events ──────────────────────────────────────────────────────────

#[tokio::test]
async fn events_respect_flags_and_enrich_alarms() {
    let server = MockServer::start().await;
    mount_handshake(&server, 1).await;
    mount_get(&server, "/api/self/sites", json!([{"name": "default", "desc": "Home"}])).await;
    mount_get(
        &server,
        "/api/s/default/stat/device",
        json!([{"type": "ugw", "mac": "aa:00:00:00:00:09", "name": "Edge"}]),
    )
    .await;
    mount_get(
        &server,
        "/api/s/default/stat/alarm",
        json!([{"_id": "a1", "msg": "Gateway [AA:00:00:00:00:09] rebooted",
                "datetime": "2024-06-15T08:00:00Z"}]),
    )
    .await;

    let options = PollOptions {
        save_alarms: true,
        ..PollOptions::default()
    };
    let collector = UnifiCollector::new(vec![target(&server, options)]);
    let events = collector.events(&Filter::default()).await.unwrap();

    assert!(events.events.is_empty());
    assert_eq!(events.alarms.len(), 1);
    assert_eq!(events.alarms[0].device_name, "Edge");
    assert_eq!(events.alarms[0].site_name, "Home (default)");

    let skipped = collector
        .events(&Filter {
            skip_events: true,
            ..Filter::default()
        })
        .await
        .unwrap();
    assert!(skipped.is_empty());
}
