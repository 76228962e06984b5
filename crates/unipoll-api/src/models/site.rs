use serde::{Deserialize, Serialize};

use crate::flex::{FlexBool, FlexInt};

/// A tenancy boundary inside a controller.
///
/// `name` is the opaque short id used in URLs; `desc` is the human label.
/// After fetch `desc` falls back to `name` and `site_name` is
/// `"{desc} ({name})"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Site {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub desc: String,
    #[serde(skip_deserializing)]
    pub site_name: String,
    #[serde(skip_deserializing)]
    pub source_name: String,
    pub attr_hidden_id: String,
    pub attr_no_delete: FlexBool,
    pub role: String,
    pub health: Vec<Health>,
    pub num_new_alarms: FlexInt,
}

impl Site {
    /// Label for entities that use the bare human name: desc, else name.
    pub fn label(&self) -> &str {
        super::pick(&[&self.desc, &self.name])
    }

    /// `"{desc} ({name})"` with the desc fallback applied.
    pub fn tagged_name(&self) -> String {
        format!("{} ({})", self.label(), self.name)
    }
}

/// One subsystem record (`wan`, `wlan`, `lan`, `www`, `vpn`) of site health.
///
/// Every subsystem shares this shape; counters that do not apply are zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Health {
    pub subsystem: String,
    pub status: String,
    pub num_user: FlexInt,
    pub num_guest: FlexInt,
    pub num_iot: FlexInt,
    #[serde(rename = "tx_bytes-r")]
    pub tx_bytes_r: FlexInt,
    #[serde(rename = "rx_bytes-r")]
    pub rx_bytes_r: FlexInt,
    pub num_ap: FlexInt,
    pub num_adopted: FlexInt,
    pub num_disabled: FlexInt,
    pub num_disconnected: FlexInt,
    pub num_pending: FlexInt,
    pub num_gw: FlexInt,
    pub num_sw: FlexInt,
    pub num_sta: FlexInt,
    pub wan_ip: String,
    pub gateways: Vec<String>,
    pub netmask: String,
    pub nameservers: Vec<String>,
    pub gw_mac: String,
    pub gw_name: String,
    #[serde(rename = "gw_system-stats")]
    pub gw_system_stats: GwSystemStats,
    pub gw_version: String,
    pub latency: FlexInt,
    pub uptime: FlexInt,
    pub drops: FlexInt,
    pub xput_up: FlexInt,
    pub xput_down: FlexInt,
    pub speedtest_status: String,
    pub speedtest_lastrun: FlexInt,
    pub speedtest_ping: FlexInt,
    pub lan_ip: String,
    pub remote_user_enabled: FlexBool,
    pub remote_user_num_active: FlexInt,
    pub remote_user_num_inactive: FlexInt,
    pub remote_user_rx_bytes: FlexInt,
    pub remote_user_tx_bytes: FlexInt,
    pub remote_user_rx_packets: FlexInt,
    pub remote_user_tx_packets: FlexInt,
    pub site_to_site_enabled: FlexBool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GwSystemStats {
    pub cpu: FlexInt,
    pub mem: FlexInt,
    pub uptime: FlexInt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_fall_back_to_name() {
        let site = Site {
            name: "default".into(),
            ..Site::default()
        };
        assert_eq!(site.label(), "default");
        assert_eq!(site.tagged_name(), "default (default)");

        let site = Site {
            name: "x1y2".into(),
            desc: "Office".into(),
            ..Site::default()
        };
        assert_eq!(site.label(), "Office");
        assert_eq!(site.tagged_name(), "Office (x1y2)");
    }
}
