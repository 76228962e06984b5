use serde::{Deserialize, Serialize};

use super::common::{DeviceHeader, DownlinkTable, Port, Uplink};
use super::stat::UswStat;
use crate::flex::{FlexBool, FlexInt};

/// A managed switch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Usw {
    #[serde(flatten)]
    pub header: DeviceHeader,
    pub dot1x_portctrl_enabled: FlexBool,
    pub flowctrl_enabled: FlexBool,
    pub jumboframe_enabled: FlexBool,
    pub has_fan: FlexBool,
    pub has_temperature: FlexBool,
    pub fan_level: FlexInt,
    pub general_temperature: FlexInt,
    pub overheating: FlexBool,
    pub total_max_power: FlexInt,
    pub led_override: String,
    pub port_overrides: Vec<PortOverride>,
    pub port_table: Vec<Port>,
    pub stp_priority: FlexInt,
    pub stp_version: String,
    pub switch_caps: SwitchCaps,
    pub downlink_table: Vec<DownlinkTable>,
    pub uplink: Uplink,
    pub last_uplink: LastUplink,
    pub uplink_depth: FlexInt,
    pub stat: UswStat,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PortOverride {
    pub name: String,
    pub poe_mode: String,
    pub port_idx: FlexInt,
    pub portconf_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchCaps {
    pub feature_caps: FlexInt,
    pub max_mirror_sessions: FlexInt,
    pub max_aggregate_sessions: FlexInt,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LastUplink {
    pub uplink_mac: String,
    pub uplink_remote_port: FlexInt,
}
