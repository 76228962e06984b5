// Structures shared by several device variants.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::flex::{FlexBool, FlexInt};

// ── Device header ────────────────────────────────────────────────────

/// Fields every device variant carries. Flattened into each variant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceHeader {
    #[serde(rename = "_id")]
    pub id: String,
    pub mac: String,
    pub model: String,
    pub serial: String,
    pub site_id: String,
    #[serde(skip_deserializing)]
    pub site_name: String,
    #[serde(skip_deserializing)]
    pub source_name: String,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub version: String,
    pub ip: String,
    pub uptime: FlexInt,
    /// 0=offline, 1=online, 2=pending, 4=upgrading, 5=provisioning
    pub state: FlexInt,
    pub last_seen: FlexInt,
    pub adopted: FlexBool,
    pub locating: FlexBool,
    pub upgradable: FlexBool,
    pub unsupported: FlexBool,
    pub cfgversion: String,
    pub inform_ip: String,
    pub inform_url: String,
    pub board_rev: FlexInt,
    pub sys_stats: SysStats,
    #[serde(rename = "system-stats")]
    pub system_stats: SystemStats,
    pub config_network: ConfigNetwork,
    pub ethernet_table: Vec<EthernetTable>,
    pub temperatures: Vec<Temperature>,
    pub tx_bytes: FlexInt,
    pub rx_bytes: FlexInt,
    pub bytes: FlexInt,
    pub num_sta: FlexInt,
    #[serde(rename = "user-num_sta")]
    pub user_num_sta: FlexInt,
    #[serde(rename = "guest-num_sta")]
    pub guest_num_sta: FlexInt,
}

impl DeviceHeader {
    /// Trim the name and fall back to the MAC when nothing is left.
    pub(crate) fn normalize_name(&mut self) {
        let trimmed = self.name.trim();
        self.name = if trimmed.is_empty() {
            self.mac.clone()
        } else {
            trimmed.to_owned()
        };
    }
}

/// Load info.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SysStats {
    pub loadavg_1: FlexInt,
    pub loadavg_5: FlexInt,
    pub loadavg_15: FlexInt,
    pub mem_buffer: FlexInt,
    pub mem_total: FlexInt,
    pub mem_used: FlexInt,
}

/// CPU/memory percentages. Some gateways add a `temps` map such as
/// `{"CPU": "72 C", "PHY": "77 C"}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemStats {
    pub cpu: FlexInt,
    pub mem: FlexInt,
    pub uptime: FlexInt,
    pub temps: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigNetwork {
    #[serde(rename = "type")]
    pub kind: String,
    pub ip: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EthernetTable {
    pub mac: String,
    pub num_port: FlexInt,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Temperature {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: FlexInt,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Storage {
    pub mount_point: String,
    pub name: String,
    pub size: FlexInt,
    #[serde(rename = "type")]
    pub kind: String,
    pub used: FlexInt,
}

// ── Ports and links ──────────────────────────────────────────────────

/// A physical port on a switch or gateway. Not every port reports every field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Port {
    pub aggregated_by: FlexBool,
    pub autoneg: FlexBool,
    #[serde(rename = "bytes-r")]
    pub bytes_r: FlexInt,
    pub dns: Vec<String>,
    pub dot1x_mode: String,
    pub dot1x_status: String,
    pub enable: FlexBool,
    pub flowctrl_rx: FlexBool,
    pub flowctrl_tx: FlexBool,
    pub full_duplex: FlexBool,
    pub ip: String,
    pub ifname: String,
    pub is_uplink: FlexBool,
    pub mac: String,
    pub mac_table: Vec<MacTable>,
    pub jumbo: FlexBool,
    pub masked: FlexBool,
    pub media: String,
    pub name: String,
    pub network_name: String,
    pub netmask: String,
    pub num_port: FlexInt,
    pub op_mode: String,
    pub poe_caps: FlexInt,
    pub poe_class: String,
    pub poe_current: FlexInt,
    pub poe_enable: FlexBool,
    pub poe_good: FlexBool,
    pub poe_mode: String,
    pub poe_power: FlexInt,
    pub poe_voltage: FlexInt,
    pub port_delta: PortDelta,
    pub port_idx: FlexInt,
    pub port_poe: FlexBool,
    pub portconf_id: String,
    pub rx_broadcast: FlexInt,
    pub rx_bytes: FlexInt,
    #[serde(rename = "rx_bytes-r")]
    pub rx_bytes_r: FlexInt,
    pub rx_dropped: FlexInt,
    pub rx_errors: FlexInt,
    pub rx_multicast: FlexInt,
    pub rx_packets: FlexInt,
    pub rx_rate: FlexInt,
    pub satisfaction: FlexInt,
    pub satisfaction_reason: FlexInt,
    pub sfp_compliance: String,
    pub sfp_current: FlexInt,
    pub sfp_found: FlexBool,
    pub sfp_part: String,
    pub sfp_rev: String,
    pub sfp_rxfault: FlexBool,
    pub sfp_rxpower: FlexInt,
    pub sfp_serial: String,
    pub sfp_temperature: FlexInt,
    pub sfp_txfault: FlexBool,
    pub sfp_txpower: FlexInt,
    pub sfp_vendor: String,
    pub sfp_voltage: FlexInt,
    pub speed: FlexInt,
    pub speed_caps: FlexInt,
    pub stp_pathcost: FlexInt,
    pub stp_state: String,
    pub tx_broadcast: FlexInt,
    pub tx_bytes: FlexInt,
    #[serde(rename = "tx_bytes-r")]
    pub tx_bytes_r: FlexInt,
    pub tx_dropped: FlexInt,
    pub tx_errors: FlexInt,
    pub tx_multicast: FlexInt,
    pub tx_packets: FlexInt,
    pub tx_rate: FlexInt,
    #[serde(rename = "type")]
    pub kind: String,
    pub up: FlexBool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PortDelta {
    pub time_delta: FlexInt,
    pub time_delta_activity: FlexInt,
}

/// Learned MAC on a switch port (newer firmware only).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MacTable {
    pub age: FlexInt,
    pub authorized: FlexBool,
    pub hostname: String,
    pub ip: String,
    #[serde(rename = "lastReachable")]
    pub last_reachable: FlexInt,
    pub mac: String,
}

/// The upstream link of a device.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Uplink {
    #[serde(rename = "bytes-r")]
    pub bytes_r: FlexInt,
    pub drops: FlexInt,
    pub enable: FlexBool,
    pub full_duplex: FlexBool,
    pub gateways: Vec<String>,
    pub ip: String,
    pub latency: FlexInt,
    pub mac: String,
    pub max_speed: FlexInt,
    pub name: String,
    pub nameservers: Vec<String>,
    pub netmask: String,
    pub num_port: FlexInt,
    pub media: String,
    pub port_idx: FlexInt,
    pub rx_bytes: FlexInt,
    #[serde(rename = "rx_bytes-r")]
    pub rx_bytes_r: FlexInt,
    pub rx_dropped: FlexInt,
    pub rx_errors: FlexInt,
    pub rx_multicast: FlexInt,
    pub rx_packets: FlexInt,
    pub rx_rate: FlexInt,
    pub speed: FlexInt,
    pub speedtest_lastrun: FlexInt,
    pub speedtest_ping: FlexInt,
    pub speedtest_status: String,
    pub tx_bytes: FlexInt,
    #[serde(rename = "tx_bytes-r")]
    pub tx_bytes_r: FlexInt,
    pub tx_dropped: FlexInt,
    pub tx_errors: FlexInt,
    pub tx_packets: FlexInt,
    pub tx_rate: FlexInt,
    #[serde(rename = "type")]
    pub kind: String,
    pub up: FlexBool,
    pub uptime: FlexInt,
    pub uplink_mac: String,
    pub uplink_remote_port: FlexInt,
    pub xput_down: FlexInt,
    pub xput_up: FlexInt,
}

/// A WAN interface on a gateway.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Wan {
    pub autoneg: FlexBool,
    #[serde(rename = "bytes-r")]
    pub bytes_r: FlexInt,
    pub dns: Vec<String>,
    pub enable: FlexBool,
    pub flowctrl_rx: FlexBool,
    pub flowctrl_tx: FlexBool,
    pub full_duplex: FlexBool,
    pub gateway: String,
    pub ip: String,
    pub ifname: String,
    pub is_uplink: FlexBool,
    pub mac: String,
    pub max_speed: FlexInt,
    pub media: String,
    pub name: String,
    pub netmask: String,
    pub num_port: FlexInt,
    pub port_idx: FlexInt,
    pub port_poe: FlexBool,
    pub rx_broadcast: FlexInt,
    pub rx_bytes: FlexInt,
    #[serde(rename = "rx_bytes-r")]
    pub rx_bytes_r: FlexInt,
    pub rx_dropped: FlexInt,
    pub rx_errors: FlexInt,
    pub rx_multicast: FlexInt,
    pub rx_packets: FlexInt,
    pub rx_rate: FlexInt,
    pub speed: FlexInt,
    pub speed_caps: FlexInt,
    pub tx_broadcast: FlexInt,
    pub tx_bytes: FlexInt,
    #[serde(rename = "tx_bytes-r")]
    pub tx_bytes_r: FlexInt,
    pub tx_dropped: FlexInt,
    pub tx_errors: FlexInt,
    pub tx_multicast: FlexInt,
    pub tx_packets: FlexInt,
    pub tx_rate: FlexInt,
    #[serde(rename = "type")]
    pub kind: String,
    pub up: FlexBool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DownlinkTable {
    pub port_idx: FlexInt,
    pub speed: FlexInt,
    pub full_duplex: FlexBool,
    pub mac: String,
}

// ── Gateway extras ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedtestStatus {
    pub latency: FlexInt,
    pub rundate: FlexInt,
    pub runtime: FlexInt,
    pub server_desc: String,
    pub server: Option<SpeedtestServer>,
    pub source_interface: String,
    pub status_download: FlexInt,
    pub status_ping: FlexInt,
    pub status_summary: FlexInt,
    pub status_upload: FlexInt,
    pub xput_download: FlexInt,
    pub xput_upload: FlexInt,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedtestServer {
    pub cc: String,
    pub city: String,
    pub country: String,
    pub lat: FlexInt,
    pub lon: FlexInt,
    pub provider: String,
    pub provider_url: String,
}

/// One network on a gateway. The shape drifts between USG, UDM and UXG
/// firmware, so everything here is optional in practice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkTable {
    #[serde(rename = "_id")]
    pub id: String,
    pub attr_no_delete: FlexBool,
    pub attr_hidden_id: String,
    pub name: String,
    pub site_id: String,
    pub vlan_enabled: FlexBool,
    pub vlan: FlexInt,
    pub purpose: String,
    pub ip_subnet: String,
    pub domain_name: String,
    pub is_nat: FlexBool,
    pub is_guest: FlexBool,
    pub dhcpd_enabled: FlexBool,
    pub dhcpd_start: String,
    pub dhcpd_stop: String,
    pub dhcpd_leasetime: FlexInt,
    pub dhcpd_dns_enabled: FlexBool,
    pub dhcpd_gateway_enabled: FlexBool,
    pub dhcp_relay_enabled: FlexBool,
    pub networkgroup: String,
    pub enabled: FlexBool,
    pub mac: String,
    pub ip: String,
    pub up: FlexBool,
    #[serde(rename = "dpistats_table")]
    pub dpi_stats_table: Option<DpiStatsTable>,
    pub num_sta: FlexInt,
    pub rx_bytes: FlexInt,
    pub rx_packets: FlexInt,
    pub tx_bytes: FlexInt,
    pub tx_packets: FlexInt,
}

/// Per-network DPI counters embedded in a gateway's network table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DpiStatsTable {
    pub last_updated: FlexInt,
    pub by_cat: Vec<DpiStatsCat>,
    pub by_app: Vec<DpiStatsApp>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DpiStatsCat {
    pub cat: FlexInt,
    pub apps: Vec<FlexInt>,
    pub rx_bytes: FlexInt,
    pub tx_bytes: FlexInt,
    pub rx_packets: FlexInt,
    pub tx_packets: FlexInt,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DpiStatsApp {
    pub app: FlexInt,
    pub cat: FlexInt,
    pub clients: Vec<super::dpi::DpiClient>,
    pub known_clients: FlexInt,
    pub rx_bytes: FlexInt,
    pub tx_bytes: FlexInt,
    pub rx_packets: FlexInt,
    pub tx_packets: FlexInt,
}

// ── Newer-device extras (UXG, UDM Pro) ───────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LedState {
    pub pattern: String,
    pub tempo: FlexInt,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoInfo {
    pub accuracy: FlexInt,
    pub address: String,
    pub asn: FlexInt,
    pub city: String,
    pub continent_code: String,
    pub country_code: String,
    pub country_name: String,
    pub isp_name: String,
    pub isp_organization: String,
    pub latitude: FlexInt,
    pub longitude: FlexInt,
    pub timezone: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UptimeStats {
    pub availability: FlexInt,
    pub latency_average: FlexInt,
    pub time_period: FlexInt,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;

    #[test]
    fn name_trims_and_falls_back_to_mac() {
        let mut header = DeviceHeader {
            name: "  ".into(),
            mac: "aa:bb:cc:dd:ee:ff".into(),
            ..DeviceHeader::default()
        };
        header.normalize_name();
        assert_eq!(header.name, "aa:bb:cc:dd:ee:ff");

        header.name = "  Office AP ".into();
        header.normalize_name();
        assert_eq!(header.name, "Office AP");
    }

    #[test]
    fn network_table_tolerates_drift() {
        let raw = json!({
            "name": "LAN",
            "vlan": "10",
            "is_nat": "true",
            "dpistats_table": {"by_cat": [{"cat": 3, "rx_bytes": 5}]}
        });
        let net: NetworkTable = serde_json::from_value(raw).unwrap();
        assert_eq!(net.vlan.int64(), 10);
        assert!(net.is_nat.val);
        let dpi = net.dpi_stats_table.unwrap();
        assert_eq!(dpi.by_cat[0].rx_bytes.int64(), 5);
    }
}
