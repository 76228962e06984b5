use serde::{Deserialize, Serialize};

use super::common::{DeviceHeader, DownlinkTable, Port, Uplink};
use super::stat::UapStat;
use crate::flex::{FlexBool, FlexInt};

/// A wireless access point.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Uap {
    #[serde(flatten)]
    pub header: DeviceHeader,
    pub antenna_table: Vec<AntennaTable>,
    pub bandsteering_mode: String,
    pub has_eth1: FlexBool,
    pub has_speaker: FlexBool,
    pub has_fan: FlexBool,
    pub has_temperature: FlexBool,
    pub led_override: String,
    pub mesh_sta_vap_enabled: FlexBool,
    pub outdoor_mode_override: String,
    pub port_table: Vec<Port>,
    pub radio_table: Vec<RadioTable>,
    pub radio_table_stats: Vec<RadioTableStats>,
    pub vap_table: Vec<VapTable>,
    pub downlink_table: Vec<DownlinkTable>,
    pub uplink: Uplink,
    pub scanning: FlexBool,
    pub spectrum_scanning: FlexBool,
    pub satisfaction: FlexInt,
    pub isolated: FlexBool,
    pub wifi_caps: FlexInt,
    pub wlangroup_id_na: String,
    pub wlangroup_id_ng: String,
    #[serde(rename = "_uptime")]
    pub underscore_uptime: FlexInt,
    #[serde(rename = "bytes-d")]
    pub bytes_d: FlexInt,
    #[serde(rename = "tx_bytes-d")]
    pub tx_bytes_d: FlexInt,
    #[serde(rename = "rx_bytes-d")]
    pub rx_bytes_d: FlexInt,
    #[serde(rename = "bytes-r")]
    pub bytes_r: FlexInt,
    pub stat: UapStat,
    pub two_phase_adopt: FlexBool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AntennaTable {
    pub default: FlexBool,
    pub id: FlexInt,
    pub name: String,
    pub wifi0_gain: FlexInt,
    pub wifi1_gain: FlexInt,
}

/// Per-radio configuration. Shared with dream machines that have radios.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RadioTable {
    pub antenna_gain: FlexInt,
    pub builtin_ant_gain: FlexInt,
    pub builtin_antenna: FlexBool,
    pub channel: FlexInt,
    pub current_antenna_gain: FlexInt,
    pub has_dfs: FlexBool,
    pub has_fccdfs: FlexBool,
    pub has_ht160: FlexBool,
    pub ht: FlexInt,
    pub is_11ac: FlexBool,
    pub max_txpower: FlexInt,
    pub min_rssi: FlexInt,
    pub min_rssi_enabled: FlexBool,
    pub min_txpower: FlexInt,
    pub name: String,
    pub nss: FlexInt,
    pub radio: String,
    pub radio_caps: FlexInt,
    pub sens_level_enabled: FlexBool,
    pub tx_power: FlexInt,
    pub tx_power_mode: String,
    pub vwire_enabled: FlexBool,
    pub wlangroup_id: String,
}

/// Live per-radio statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RadioTableStats {
    pub name: String,
    pub channel: FlexInt,
    pub radio: String,
    pub ast_be_xmit: FlexInt,
    pub cu_total: FlexInt,
    pub cu_self_rx: FlexInt,
    pub cu_self_tx: FlexInt,
    pub gain: FlexInt,
    pub satisfaction: FlexInt,
    pub state: String,
    pub extchannel: FlexInt,
    pub tx_power: FlexInt,
    pub tx_packets: FlexInt,
    pub tx_retries: FlexInt,
    pub num_sta: FlexInt,
    #[serde(rename = "guest-num_sta")]
    pub guest_num_sta: FlexInt,
    #[serde(rename = "user-num_sta")]
    pub user_num_sta: FlexInt,
}

/// One SSID on one radio.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VapTable {
    pub anomalies_bar_chart: AnomaliesBarChart,
    pub anomalies_bar_chart_now: AnomaliesBarChart,
    pub reasons_bar_chart: ReasonsBarChart,
    pub reasons_bar_chart_now: ReasonsBarChart,
    pub rx_tcp_stats: TcpStats,
    pub tx_tcp_stats: TcpStats,
    pub wifi_tx_latency_mov: LatencyMov,
    pub ap_mac: String,
    pub avg_client_signal: FlexInt,
    pub bssid: String,
    pub ccq: FlexInt,
    pub channel: FlexInt,
    pub dns_avg_latency: FlexInt,
    pub essid: String,
    pub extchannel: FlexInt,
    pub id: String,
    pub is_guest: FlexBool,
    pub is_wep: FlexBool,
    pub mac_filter_rejections: FlexInt,
    pub name: String,
    pub num_satisfaction_sta: FlexInt,
    pub num_sta: FlexInt,
    pub radio: String,
    pub radio_name: String,
    pub rx_bytes: FlexInt,
    pub rx_crypts: FlexInt,
    pub rx_dropped: FlexInt,
    pub rx_errors: FlexInt,
    pub rx_frags: FlexInt,
    pub rx_nwids: FlexInt,
    pub rx_packets: FlexInt,
    pub satisfaction: FlexInt,
    pub satisfaction_now: FlexInt,
    pub site_id: String,
    pub state: String,
    pub t: String,
    pub tx_bytes: FlexInt,
    pub tx_combined_retries: FlexInt,
    pub tx_data_mpdu_bytes: FlexInt,
    pub tx_dropped: FlexInt,
    pub tx_errors: FlexInt,
    pub tx_packets: FlexInt,
    pub tx_power: FlexInt,
    pub tx_retries: FlexInt,
    pub tx_rts_retries: FlexInt,
    pub tx_success: FlexInt,
    pub tx_total: FlexInt,
    pub up: FlexBool,
    pub usage: String,
    pub wifi_tx_attempts: FlexInt,
    pub wifi_tx_dropped: FlexInt,
    pub wlanconf_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomaliesBarChart {
    pub high_dns_latency: FlexInt,
    pub high_tcp_latency: FlexInt,
    pub high_tcp_packet_loss: FlexInt,
    pub high_wifi_latency: FlexInt,
    pub high_wifi_retries: FlexInt,
    pub low_phy_rate: FlexInt,
    pub poor_stream_eff: FlexInt,
    pub sleepy_client: FlexInt,
    pub sta_arp_timeout: FlexInt,
    pub sta_dns_timeout: FlexInt,
    pub sta_ip_timeout: FlexInt,
    pub weak_signal: FlexInt,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReasonsBarChart {
    pub phy_rate: FlexInt,
    pub signal: FlexInt,
    pub sleepy_client: FlexInt,
    pub sta_arp_timeout: FlexInt,
    pub sta_dns_latency: FlexInt,
    pub sta_dns_timeout: FlexInt,
    pub sta_ip_timeout: FlexInt,
    pub stream_eff: FlexInt,
    pub tcp_latency: FlexInt,
    pub tcp_packet_loss: FlexInt,
    pub wifi_latency: FlexInt,
    pub wifi_retries: FlexInt,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TcpStats {
    pub goodbytes: FlexInt,
    pub lat_avg: FlexInt,
    pub lat_max: FlexInt,
    pub lat_min: FlexInt,
    pub stalls: FlexInt,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyMov {
    pub avg: FlexInt,
    pub max: FlexInt,
    pub min: FlexInt,
    pub total: FlexInt,
    pub total_count: FlexInt,
}

/// A neighboring access point seen by one of ours.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RogueAp {
    #[serde(skip_deserializing)]
    pub source_name: String,
    #[serde(skip_deserializing)]
    pub site_name: String,
    #[serde(rename = "_id")]
    pub id: String,
    pub ap_mac: String,
    pub bssid: String,
    pub site_id: String,
    pub age: FlexInt,
    pub band: String,
    pub bw: FlexInt,
    pub center_freq: FlexInt,
    pub channel: FlexInt,
    pub essid: String,
    pub freq: FlexInt,
    pub is_adhoc: FlexBool,
    pub is_rogue: FlexBool,
    pub is_ubnt: FlexBool,
    pub last_seen: FlexInt,
    pub noise: FlexInt,
    pub radio: String,
    pub radio_name: String,
    pub report_time: FlexInt,
    pub rssi: FlexInt,
    pub rssi_age: FlexInt,
    pub security: String,
    pub signal: FlexInt,
    pub oui: String,
}
