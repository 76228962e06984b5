use serde::{Deserialize, Serialize};

use super::common::{DeviceHeader, NetworkTable, Port, SpeedtestStatus, Uplink, Wan};
use super::stat::UsgStat;
use crate::flex::{FlexBool, FlexInt};

/// A security gateway. The controller reports these as `ugw`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Usg {
    #[serde(flatten)]
    pub header: DeviceHeader,
    pub fw_caps: FlexInt,
    pub hw_caps: FlexInt,
    pub usg_caps: FlexInt,
    pub license_state: String,
    pub led_override: String,
    pub guest_token: String,
    #[serde(rename = "speedtest-status")]
    pub speedtest_status: SpeedtestStatus,
    #[serde(rename = "speedtest-status-saved")]
    pub speedtest_status_saved: FlexBool,
    pub wan1: Wan,
    pub wan2: Wan,
    pub port_table: Vec<Port>,
    pub network_table: Vec<NetworkTable>,
    pub uplink: Uplink,
    pub stat: UsgStat,
    pub num_desktop: FlexInt,
    pub num_mobile: FlexInt,
    pub num_handheld: FlexInt,
}
