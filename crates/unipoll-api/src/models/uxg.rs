use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::common::{
    DeviceHeader, DownlinkTable, GeoInfo, LedState, NetworkTable, Port, SpeedtestStatus, Storage,
    Uplink, UptimeStats, Wan,
};
use super::stat::UxgStat;
use super::usw::SwitchCaps;
use crate::flex::{FlexBool, FlexInt};

/// A 10Gb gateway (UXG Pro and relatives).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Uxg {
    #[serde(flatten)]
    pub header: DeviceHeader,
    pub model_in_lts: FlexBool,
    pub model_in_eol: FlexBool,
    pub license_state: String,
    pub config_network_lan: ConfigNetworkLan,
    pub kernel_version: String,
    pub architecture: String,
    pub manufacturer_id: FlexInt,
    pub internet: FlexBool,
    pub port_table: Vec<Port>,
    pub usg_caps: FlexInt,
    pub fw_caps: FlexInt,
    pub hw_caps: FlexInt,
    pub switch_caps: SwitchCaps,
    pub has_fan: FlexBool,
    pub has_temperature: FlexBool,
    pub storage: Vec<Storage>,
    pub connected_at: FlexInt,
    pub provisioned_at: FlexInt,
    pub led_override: String,
    pub led_override_color: String,
    pub led_override_color_brightness: FlexInt,
    pub led_state: Option<LedState>,
    pub uptime_stats: BTreeMap<String, UptimeStats>,
    pub geo_info: BTreeMap<String, GeoInfo>,
    pub overheating: FlexBool,
    pub guest_kicks: FlexInt,
    #[serde(rename = "speedtest-status")]
    pub speedtest_status: SpeedtestStatus,
    #[serde(rename = "speedtest-status-saved")]
    pub speedtest_status_saved: FlexBool,
    pub wan1: Wan,
    pub wan2: Wan,
    pub uplink: Uplink,
    pub downlink_table: Vec<DownlinkTable>,
    pub network_table: Vec<NetworkTable>,
    pub next_interval: FlexInt,
    pub next_heartbeat_at: FlexInt,
    pub considered_lost_at: FlexInt,
    pub stat: Option<UxgStat>,
    #[serde(rename = "wlan-num_sta")]
    pub wlan_num_sta: FlexInt,
    #[serde(rename = "lan-num_sta")]
    pub lan_num_sta: FlexInt,
    pub num_desktop: FlexInt,
    pub num_mobile: FlexInt,
    pub num_handheld: FlexInt,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigNetworkLan {
    pub dhcp_enabled: FlexBool,
    pub vlan: FlexInt,
}
