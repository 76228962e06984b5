use serde::{Deserialize, Serialize};

use crate::flex::{FlexBool, FlexInt};

/// Gateway-side subnet configuration from `rest/networkconf`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Network {
    #[serde(skip_deserializing)]
    pub source_name: String,
    #[serde(skip_deserializing)]
    pub site_name: String,
    #[serde(rename = "_id")]
    pub id: String,
    pub site_id: String,
    pub name: String,
    pub purpose: String,
    pub networkgroup: String,
    pub ip_subnet: String,
    pub domain_name: String,
    pub vlan: FlexInt,
    pub vlan_enabled: FlexBool,
    pub enabled: FlexBool,
    pub is_nat: FlexBool,
    pub is_guest: FlexBool,
    pub dhcpd_enabled: FlexBool,
    pub dhcpd_dns_enabled: FlexBool,
    pub dhcpd_gateway_enabled: FlexBool,
    pub dhcpd_time_offset_enabled: FlexBool,
    pub dhcpd_ip_1: String,
    pub dhcpd_start: String,
    pub dhcpd_stop: String,
    pub dhcpd_leasetime: FlexInt,
    pub dhcp_relay_enabled: FlexBool,
    pub dhcpguard_enabled: FlexBool,
    pub num_sta: FlexInt,
    pub rx_bytes: FlexInt,
    pub rx_packets: FlexInt,
    pub tx_bytes: FlexInt,
    pub tx_packets: FlexInt,
}
