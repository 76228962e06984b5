// Controller response types
//
// Typed records for everything the collector reads. Fields use
// `#[serde(default)]` at the container level because firmware versions
// disagree about which fields are present; numeric fields are `FlexInt`
// and boolean-ish fields are `FlexBool` for the same reason.
//
// `site_name` and `source_name` are never sent by the controller. The
// endpoint layer fills them in after decoding.

pub mod alarm;
pub mod anomaly;
pub mod client;
pub mod common;
pub mod dpi;
pub mod event;
pub mod ids;
pub mod network;
pub mod site;
pub mod stat;
pub mod uap;
pub mod udm;
pub mod usg;
pub mod usw;
pub mod uxg;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::flex::FlexBool;

pub use alarm::Alarm;
pub use anomaly::Anomaly;
pub use client::{Client, ClientDpiStats, User};
pub use common::{
    ConfigNetwork, DeviceHeader, DownlinkTable, EthernetTable, GeoInfo, LedState, NetworkTable,
    Port, SpeedtestServer, SpeedtestStatus, Storage, SysStats, SystemStats, Temperature, Uplink,
    UptimeStats, Wan,
};
pub use dpi::{DpiClient, DpiData, DpiTable};
pub use event::Event;
pub use ids::Ids;
pub use network::Network;
pub use site::{Health, Site};
pub use stat::{Ap, Gw, Sw, UapStat, UdmStat, UsgStat, UswStat, UxgStat};
pub use uap::{RadioTable, RadioTableStats, RogueAp, Uap, VapTable};
pub use udm::Udm;
pub use usg::Usg;
pub use usw::Usw;
pub use uxg::Uxg;

// ── Response Envelope ────────────────────────────────────────────────

/// Standard controller response envelope.
///
/// ```json
/// { "meta": { "rc": "ok" }, "data": [...] }
/// ```
#[derive(Debug, Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
pub struct DataEnvelope<T> {
    #[serde(default)]
    pub meta: Meta,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Envelope metadata. `/status` puts its payload here instead of `data`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Meta {
    pub rc: String,
    pub msg: Option<String>,
    pub up: FlexBool,
    pub server_version: String,
    pub uuid: String,
}

/// Result of `GET /status`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerStatus {
    pub up: bool,
    pub server_version: String,
    pub uuid: String,
}

impl From<Meta> for ServerStatus {
    fn from(meta: Meta) -> Self {
        Self {
            up: meta.up.val,
            server_version: meta.server_version,
            uuid: meta.uuid,
        }
    }
}

/// Drop `null` object members at every depth so they decode like absent
/// keys. Container-level `#[serde(default)]` only covers missing keys, and
/// controllers send `"hostname": null` and friends freely.
pub(crate) fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}

/// First non-empty string, or `""`.
pub(crate) fn pick<'a>(candidates: &[&'a str]) -> &'a str {
    candidates
        .iter()
        .copied()
        .find(|s| !s.is_empty())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn pick_first_non_empty() {
        assert_eq!(pick(&["", "b", "c"]), "b");
        assert_eq!(pick(&["", ""]), "");
        assert_eq!(pick(&[]), "");
    }

    #[test]
    fn null_members_decode_as_absent() {
        let mut raw = json!({
            "_id": "e1",
            "key": "EVT_AP_Lost_Contact",
            "msg": null,
            "hostname": null,
            "time": null,
            "datetime": "2024-06-15T10:30:00Z"
        });
        assert!(serde_json::from_value::<Event>(raw.clone()).is_err());

        strip_nulls(&mut raw);
        let event: Event = serde_json::from_value(raw).unwrap();
        assert_eq!(event.msg, "");
        assert_eq!(event.hostname, "");
        assert_eq!(event.key, "EVT_AP_Lost_Contact");
    }

    #[test]
    fn nested_nulls_are_stripped_inside_arrays() {
        let mut raw = json!({"data": [{"mac": "aa", "name": null}, {"list": [{"x": null}]}]});
        strip_nulls(&mut raw);
        assert_eq!(raw, json!({"data": [{"mac": "aa"}, {"list": [{}]}]}));
    }

    #[test]
    fn status_meta_accepts_string_up() {
        let envelope: DataEnvelope<Value> = serde_json::from_value(json!({
            "meta": {"rc": "ok", "up": "true", "server_version": "8.1.113", "uuid": "u-1"}
        }))
        .unwrap();
        let status = ServerStatus::from(envelope.meta);
        assert!(status.up);
        assert_eq!(status.server_version, "8.1.113");
    }
}
