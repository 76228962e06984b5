use serde::{Deserialize, Serialize};

use crate::flex::FlexInt;

/// DPI counters for one site or one client.
///
/// `name` is the client name for client DPI (falling back to its MAC)
/// and empty for site DPI.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DpiTable {
    #[serde(skip_deserializing)]
    pub source_name: String,
    #[serde(skip_deserializing)]
    pub site_name: String,
    #[serde(skip_deserializing)]
    pub name: String,
    pub mac: String,
    pub by_app: Vec<DpiData>,
    pub by_cat: Vec<DpiData>,
    pub last_updated: FlexInt,
}

/// One application or category bucket. `app` is zero in category buckets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DpiData {
    pub app: FlexInt,
    pub cat: FlexInt,
    pub clients: Vec<DpiClient>,
    pub known_clients: FlexInt,
    pub rx_bytes: FlexInt,
    pub rx_packets: FlexInt,
    pub tx_bytes: FlexInt,
    pub tx_packets: FlexInt,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DpiClient {
    pub mac: String,
    pub rx_bytes: FlexInt,
    pub rx_packets: FlexInt,
    pub tx_bytes: FlexInt,
    pub tx_packets: FlexInt,
}
