// Version-tolerant `stat` blocks.
//
// Controller 5.10 sends the counters flat:
//     "stat": { "site_id": "...", "o": "gw", "lan-rx_bytes": 1, ... }
// Controller 5.11 and later nest them per subrole:
//     "stat": { "gw": { "site_id": "...", "o": "gw", "lan-rx_bytes": 1, ... } }
//
// Each counter struct has a string field named after its subrole (`gw`,
// `sw`, `ap`), so a nested payload cannot decode as flat: the subrole key
// holds an object there. That failure is what sends us to the nested shape.

use chrono::{DateTime, Utc};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::flex::FlexInt;

// ── Counter structs ──────────────────────────────────────────────────

/// Gateway counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Gw {
    pub site_id: String,
    pub o: String,
    pub oid: String,
    pub gw: String,
    pub time: FlexInt,
    pub datetime: DateTime<Utc>,
    pub duration: FlexInt,
    #[serde(rename = "wan-rx_packets")]
    pub wan_rx_packets: FlexInt,
    #[serde(rename = "wan-rx_bytes")]
    pub wan_rx_bytes: FlexInt,
    #[serde(rename = "wan-rx_dropped")]
    pub wan_rx_dropped: FlexInt,
    #[serde(rename = "wan-rx_errors")]
    pub wan_rx_errors: FlexInt,
    #[serde(rename = "wan-tx_packets")]
    pub wan_tx_packets: FlexInt,
    #[serde(rename = "wan-tx_bytes")]
    pub wan_tx_bytes: FlexInt,
    #[serde(rename = "lan-rx_packets")]
    pub lan_rx_packets: FlexInt,
    #[serde(rename = "lan-rx_bytes")]
    pub lan_rx_bytes: FlexInt,
    #[serde(rename = "lan-rx_dropped")]
    pub lan_rx_dropped: FlexInt,
    #[serde(rename = "lan-rx_errors")]
    pub lan_rx_errors: FlexInt,
    #[serde(rename = "lan-tx_packets")]
    pub lan_tx_packets: FlexInt,
    #[serde(rename = "lan-tx_bytes")]
    pub lan_tx_bytes: FlexInt,
}

/// Switch counters. Per-port counters live in the port table instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Sw {
    pub site_id: String,
    pub o: String,
    pub oid: String,
    pub sw: String,
    pub time: FlexInt,
    pub datetime: DateTime<Utc>,
    pub rx_packets: FlexInt,
    pub rx_bytes: FlexInt,
    pub rx_errors: FlexInt,
    pub rx_dropped: FlexInt,
    pub rx_crypts: FlexInt,
    pub rx_frags: FlexInt,
    pub tx_packets: FlexInt,
    pub tx_bytes: FlexInt,
    pub tx_errors: FlexInt,
    pub tx_dropped: FlexInt,
    pub tx_retries: FlexInt,
    pub rx_multicast: FlexInt,
    pub rx_broadcast: FlexInt,
    pub tx_multicast: FlexInt,
    pub tx_broadcast: FlexInt,
    pub bytes: FlexInt,
    pub duration: FlexInt,
}

/// Access point counters, split by user and guest traffic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Ap {
    pub site_id: String,
    pub o: String,
    pub oid: String,
    pub ap: String,
    pub time: FlexInt,
    pub datetime: DateTime<Utc>,
    pub bytes: FlexInt,
    pub duration: FlexInt,
    pub rx_packets: FlexInt,
    pub rx_bytes: FlexInt,
    pub rx_errors: FlexInt,
    pub rx_dropped: FlexInt,
    pub rx_frags: FlexInt,
    pub rx_crypts: FlexInt,
    pub tx_packets: FlexInt,
    pub tx_bytes: FlexInt,
    pub tx_errors: FlexInt,
    pub tx_dropped: FlexInt,
    pub tx_retries: FlexInt,
    pub wifi_tx_dropped: FlexInt,
    pub wifi_tx_attempts: FlexInt,
    pub mac_filter_rejections: FlexInt,
    #[serde(rename = "user-rx_packets")]
    pub user_rx_packets: FlexInt,
    #[serde(rename = "guest-rx_packets")]
    pub guest_rx_packets: FlexInt,
    #[serde(rename = "user-rx_bytes")]
    pub user_rx_bytes: FlexInt,
    #[serde(rename = "guest-rx_bytes")]
    pub guest_rx_bytes: FlexInt,
    #[serde(rename = "user-rx_errors")]
    pub user_rx_errors: FlexInt,
    #[serde(rename = "guest-rx_errors")]
    pub guest_rx_errors: FlexInt,
    #[serde(rename = "user-rx_dropped")]
    pub user_rx_dropped: FlexInt,
    #[serde(rename = "guest-rx_dropped")]
    pub guest_rx_dropped: FlexInt,
    #[serde(rename = "user-tx_packets")]
    pub user_tx_packets: FlexInt,
    #[serde(rename = "guest-tx_packets")]
    pub guest_tx_packets: FlexInt,
    #[serde(rename = "user-tx_bytes")]
    pub user_tx_bytes: FlexInt,
    #[serde(rename = "guest-tx_bytes")]
    pub guest_tx_bytes: FlexInt,
    #[serde(rename = "user-tx_errors")]
    pub user_tx_errors: FlexInt,
    #[serde(rename = "guest-tx_errors")]
    pub guest_tx_errors: FlexInt,
    #[serde(rename = "user-tx_dropped")]
    pub user_tx_dropped: FlexInt,
    #[serde(rename = "guest-tx_dropped")]
    pub guest_tx_dropped: FlexInt,
    #[serde(rename = "user-tx_retries")]
    pub user_tx_retries: FlexInt,
    #[serde(rename = "guest-tx_retries")]
    pub guest_tx_retries: FlexInt,
    #[serde(rename = "user-wifi_tx_dropped")]
    pub user_wifi_tx_dropped: FlexInt,
    #[serde(rename = "guest-wifi_tx_dropped")]
    pub guest_wifi_tx_dropped: FlexInt,
    #[serde(rename = "user-wifi_tx_attempts")]
    pub user_wifi_tx_attempts: FlexInt,
    #[serde(rename = "guest-wifi_tx_attempts")]
    pub guest_wifi_tx_attempts: FlexInt,
    #[serde(rename = "user-mac_filter_rejections")]
    pub user_mac_filter_rejections: FlexInt,
    #[serde(rename = "guest-mac_filter_rejections")]
    pub guest_mac_filter_rejections: FlexInt,
}

// ── Envelope adapters ────────────────────────────────────────────────

/// Decode `value` flat; on failure decode `value[subrole]`. A missing
/// subrole key yields the zero value.
fn flat_or_nested<T>(value: &Value, subrole: &str) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned + Default,
{
    match T::deserialize(value) {
        Ok(flat) => Ok(flat),
        Err(flat_err) => match value.get(subrole) {
            Some(nested) => T::deserialize(nested),
            None if value.is_object() || value.is_null() => Ok(T::default()),
            None => Err(flat_err),
        },
    }
}

macro_rules! subrole_stat {
    ($(#[$doc:meta])* $name:ident, $inner:ty, $key:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl std::ops::Deref for $name {
            type Target = $inner;

            fn deref(&self) -> &$inner {
                &self.0
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = Value::deserialize(deserializer)?;
                flat_or_nested(&value, $key)
                    .map($name)
                    .map_err(de::Error::custom)
            }
        }
    };
}

subrole_stat!(
    /// Gateway `stat`, flat (5.10) or under `gw` (5.11+).
    UsgStat,
    Gw,
    "gw"
);
subrole_stat!(
    /// Switch `stat`, flat (5.10) or under `sw` (5.11+).
    UswStat,
    Sw,
    "sw"
);
subrole_stat!(
    /// Access point `stat`, flat (5.10) or under `ap` (5.11+).
    UapStat,
    Ap,
    "ap"
);

/// Dream machine `stat`: gateway, switch, and (on models with radios)
/// access point counters side by side. Absent subroles are `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UdmStat {
    pub gw: Option<Gw>,
    pub sw: Option<Sw>,
    pub ap: Option<Ap>,
}

/// 10Gb gateway `stat`: gateway and switch counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UxgStat {
    pub gw: Option<Gw>,
    pub sw: Option<Sw>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn gateway_stat_flat_and_nested_agree() {
        let flat = json!({
            "site_id": "S",
            "o": "gw",
            "oid": "aa:bb",
            "gw": "aa:bb",
            "lan-rx_bytes": 37_599_596_992_669_u64,
            "wan-tx_bytes": "12"
        });
        let nested = json!({ "gw": flat.clone() });

        let a: UsgStat = serde_json::from_value(flat).unwrap();
        let b: UsgStat = serde_json::from_value(nested).unwrap();

        assert_eq!(a.lan_rx_bytes.val, 37_599_596_992_669.0);
        assert_eq!(b.lan_rx_bytes.val, 37_599_596_992_669.0);
        assert_eq!(a.site_id, b.site_id);
        assert_eq!(b.wan_tx_bytes.int64(), 12);
    }

    #[test]
    fn switch_stat_flat_and_nested_agree() {
        let flat = json!({"site_id": "S", "o": "sw", "sw": "aa:bb", "tx_bytes": 99});
        let a: UswStat = serde_json::from_value(flat.clone()).unwrap();
        let b: UswStat = serde_json::from_value(json!({ "sw": flat })).unwrap();
        assert_eq!(a.tx_bytes.int64(), 99);
        assert_eq!(b.tx_bytes.int64(), 99);
        assert_eq!(b.sw, "aa:bb");
    }

    #[test]
    fn ap_stat_nested_with_user_counters() {
        let raw = json!({"ap": {"o": "ap", "user-rx_bytes": 10, "guest-rx_bytes": 4}});
        let stat: UapStat = serde_json::from_value(raw).unwrap();
        assert_eq!(stat.user_rx_bytes.int64(), 10);
        assert_eq!(stat.guest_rx_bytes.int64(), 4);
    }

    #[test]
    fn missing_stat_is_zero() {
        let stat: UsgStat = serde_json::from_value(json!(null)).unwrap();
        assert!(stat.lan_rx_bytes.is_zero());
    }

    #[test]
    fn udm_stat_guards_missing_subroles() {
        let raw = json!({"gw": {"lan-rx_bytes": 1}, "sw": {"rx_bytes": 2}});
        let stat: UdmStat = serde_json::from_value(raw).unwrap();
        assert_eq!(stat.gw.unwrap().lan_rx_bytes.int64(), 1);
        assert_eq!(stat.sw.unwrap().rx_bytes.int64(), 2);
        assert!(stat.ap.is_none());
    }
}
