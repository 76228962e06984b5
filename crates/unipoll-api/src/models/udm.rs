use serde::{Deserialize, Serialize};

use super::common::{
    DeviceHeader, DownlinkTable, NetworkTable, Port, SpeedtestStatus, Storage, Uplink, Wan,
};
use super::stat::UdmStat;
use super::uap::{RadioTable, RadioTableStats, VapTable};
use super::usw::{PortOverride, SwitchCaps};
use crate::flex::{FlexBool, FlexInt};

/// A dream machine: gateway, switch, and optionally access point in one box.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Udm {
    #[serde(flatten)]
    pub header: DeviceHeader,
    pub default: FlexBool,
    pub discovered_via: String,
    pub adopt_ip: String,
    pub adopt_url: String,
    pub adopt_status: FlexInt,
    pub upgrade_state: FlexInt,
    pub dot1x_portctrl_enabled: FlexBool,
    pub jumboframe_enabled: FlexBool,
    pub flowctrl_enabled: FlexBool,
    pub stp_version: String,
    pub stp_priority: FlexInt,
    pub switch_caps: SwitchCaps,
    pub has_fan: FlexBool,
    pub has_temperature: FlexBool,
    pub fan_level: FlexInt,
    pub general_temperature: FlexInt,
    pub overheating: FlexBool,
    pub storage: Vec<Storage>,
    pub usg_caps: FlexInt,
    #[serde(rename = "speedtest-status")]
    pub speedtest_status: SpeedtestStatus,
    #[serde(rename = "speedtest-status-saved")]
    pub speedtest_status_saved: FlexBool,
    pub wan1: Wan,
    pub wan2: Wan,
    pub uplink: Uplink,
    pub port_table: Vec<Port>,
    pub port_overrides: Vec<PortOverride>,
    pub downlink_table: Vec<DownlinkTable>,
    pub network_table: Vec<NetworkTable>,
    pub wlangroup_id_na: String,
    pub wlangroup_id_ng: String,
    pub bandsteering_mode: String,
    pub radio_table: Option<Vec<RadioTable>>,
    pub radio_table_stats: Option<Vec<RadioTableStats>>,
    pub vap_table: Option<Vec<VapTable>>,
    pub stat: UdmStat,
    #[serde(rename = "bytes-d")]
    pub bytes_d: FlexInt,
    #[serde(rename = "tx_bytes-d")]
    pub tx_bytes_d: FlexInt,
    #[serde(rename = "rx_bytes-d")]
    pub rx_bytes_d: FlexInt,
    #[serde(rename = "bytes-r")]
    pub bytes_r: FlexInt,
    #[serde(rename = "wlan-num_sta")]
    pub wlan_num_sta: FlexInt,
    #[serde(rename = "lan-num_sta")]
    pub lan_num_sta: FlexInt,
    #[serde(rename = "user-wlan-num_sta")]
    pub user_wlan_num_sta: FlexInt,
    #[serde(rename = "user-lan-num_sta")]
    pub user_lan_num_sta: FlexInt,
    #[serde(rename = "guest-wlan-num_sta")]
    pub guest_wlan_num_sta: FlexInt,
    #[serde(rename = "guest-lan-num_sta")]
    pub guest_lan_num_sta: FlexInt,
    pub num_desktop: FlexInt,
    pub num_mobile: FlexInt,
    pub num_handheld: FlexInt,
}
