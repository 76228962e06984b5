use serde::{Deserialize, Serialize};

use super::pick;
use crate::flex::{FlexBool, FlexInt};

/// Name used when a client reports neither a name nor a hostname.
pub const NO_NAME: &str = "-no-name-";

/// A wireless or wired station currently connected.
///
/// `ap_name`, `sw_name`, `gw_name` and `radio_description` are filled in
/// by the collector from the device list; the controller never sends them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Client {
    #[serde(skip_deserializing)]
    pub source_name: String,
    #[serde(skip_deserializing)]
    pub site_name: String,
    #[serde(rename = "_id")]
    pub id: String,
    pub site_id: String,
    pub mac: String,
    pub ip: String,
    pub fixed_ip: String,
    pub use_fixedip: FlexBool,
    pub name: String,
    pub hostname: String,
    pub note: String,
    pub noted: FlexBool,
    pub oui: String,
    pub os_class: FlexInt,
    pub os_name: FlexInt,
    pub dev_cat: FlexInt,
    pub dev_family: FlexInt,
    pub dev_id: FlexInt,
    pub dev_vendor: FlexInt,
    pub network: String,
    pub network_id: String,
    pub usergroup_id: String,
    pub user_id: String,
    pub vlan: FlexInt,
    pub essid: String,
    pub bssid: String,
    pub ap_mac: String,
    #[serde(skip_deserializing)]
    pub ap_name: String,
    pub gw_mac: String,
    #[serde(skip_deserializing)]
    pub gw_name: String,
    pub sw_mac: String,
    #[serde(skip_deserializing)]
    pub sw_name: String,
    pub sw_port: FlexInt,
    pub sw_depth: FlexInt,
    pub channel: FlexInt,
    pub radio: String,
    pub radio_name: String,
    pub radio_proto: String,
    #[serde(skip_deserializing)]
    pub radio_description: String,
    pub signal: FlexInt,
    pub rssi: FlexInt,
    pub noise: FlexInt,
    pub ccq: FlexInt,
    pub tx_power: FlexInt,
    pub tx_bytes: FlexInt,
    #[serde(rename = "tx_bytes-r")]
    pub tx_bytes_r: FlexInt,
    pub tx_packets: FlexInt,
    pub tx_rate: FlexInt,
    pub tx_retries: FlexInt,
    pub rx_bytes: FlexInt,
    #[serde(rename = "rx_bytes-r")]
    pub rx_bytes_r: FlexInt,
    pub rx_packets: FlexInt,
    pub rx_rate: FlexInt,
    #[serde(rename = "bytes-r")]
    pub bytes_r: FlexInt,
    #[serde(rename = "wired-tx_bytes")]
    pub wired_tx_bytes: FlexInt,
    #[serde(rename = "wired-tx_bytes-r")]
    pub wired_tx_bytes_r: FlexInt,
    #[serde(rename = "wired-tx_packets")]
    pub wired_tx_packets: FlexInt,
    #[serde(rename = "wired-rx_bytes")]
    pub wired_rx_bytes: FlexInt,
    #[serde(rename = "wired-rx_bytes-r")]
    pub wired_rx_bytes_r: FlexInt,
    #[serde(rename = "wired-rx_packets")]
    pub wired_rx_packets: FlexInt,
    pub wifi_tx_attempts: FlexInt,
    pub anomalies: FlexInt,
    pub roam_count: FlexInt,
    pub satisfaction: FlexInt,
    pub powersave_enabled: FlexBool,
    pub qos_policy_applied: FlexBool,
    pub is_11r: FlexBool,
    pub is_guest: FlexBool,
    pub is_wired: FlexBool,
    pub blocked: FlexBool,
    pub assoc_time: FlexInt,
    pub latest_assoc_time: FlexInt,
    pub first_seen: FlexInt,
    pub last_seen: FlexInt,
    pub idle_time: FlexInt,
    pub uptime: FlexInt,
    pub dpi_stats: ClientDpiStats,
    pub dpi_stats_last_updated: FlexInt,
}

impl Client {
    /// `name` falls back to `hostname`; `hostname` to `name`. With neither,
    /// both become [`NO_NAME`].
    pub(crate) fn normalize_names(&mut self) {
        let name = pick(&[&self.name, &self.hostname, NO_NAME]).to_owned();
        let hostname = pick(&[&self.hostname, &self.name, NO_NAME]).to_owned();
        self.name = name;
        self.hostname = hostname;
    }
}

/// Summary DPI counters embedded in a client record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientDpiStats {
    pub app: FlexInt,
    pub cat: FlexInt,
    pub rx_bytes: FlexInt,
    pub rx_packets: FlexInt,
    pub tx_bytes: FlexInt,
    pub tx_packets: FlexInt,
}

/// A client from the historical "all users" view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(skip_deserializing)]
    pub source_name: String,
    #[serde(skip_deserializing)]
    pub site_name: String,
    #[serde(rename = "_id")]
    pub id: String,
    pub mac: String,
    pub site_id: String,
    pub oui: String,
    pub name: String,
    pub hostname: String,
    pub note: String,
    pub noted: FlexBool,
    pub is_guest: FlexBool,
    pub is_wired: FlexBool,
    pub blocked: FlexBool,
    pub first_seen: FlexInt,
    pub last_seen: FlexInt,
    pub duration: FlexInt,
    pub tx_bytes: FlexInt,
    pub tx_packets: FlexInt,
    pub rx_bytes: FlexInt,
    pub rx_packets: FlexInt,
    pub wifi_tx_attempts: FlexInt,
    pub tx_retries: FlexInt,
    pub usergroup_id: String,
    pub dev_id_override: FlexInt,
    pub fingerprint_override: FlexBool,
}

impl User {
    /// Like [`Client::normalize_names`], but the last resort is the MAC.
    pub(crate) fn normalize_names(&mut self) {
        let name = pick(&[&self.name, &self.hostname, &self.mac]).to_owned();
        let hostname = pick(&[&self.hostname, &self.name, &self.mac]).to_owned();
        self.name = name;
        self.hostname = hostname;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_names_fill_each_other() {
        let mut c = Client {
            hostname: "laptop".into(),
            ..Client::default()
        };
        c.normalize_names();
        assert_eq!((c.name.as_str(), c.hostname.as_str()), ("laptop", "laptop"));

        let mut c = Client {
            name: "Printer".into(),
            ..Client::default()
        };
        c.normalize_names();
        assert_eq!(c.hostname, "Printer");
    }

    #[test]
    fn nameless_client_and_user() {
        let mut c = Client {
            mac: "aa:bb".into(),
            ..Client::default()
        };
        c.normalize_names();
        assert_eq!(c.name, NO_NAME);
        assert_eq!(c.hostname, NO_NAME);

        let mut u = User {
            mac: "aa:bb".into(),
            ..User::default()
        };
        u.normalize_names();
        assert_eq!(u.name, "aa:bb");
        assert_eq!(u.hostname, "aa:bb");
    }
}
