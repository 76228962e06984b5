use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::flex::{FlexBool, FlexInt, IpGeo};

/// A controller event (`stat/event`): roams, connects, admin logins, etc.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    #[serde(skip_deserializing)]
    pub source_name: String,
    #[serde(skip_deserializing)]
    pub site_name: String,
    #[serde(rename = "_id")]
    pub id: String,
    pub site_id: String,
    pub key: String,
    pub msg: String,
    pub subsystem: String,
    pub time: FlexInt,
    pub timestamp: FlexInt,
    pub datetime: DateTime<Utc>,
    pub is_admin: FlexBool,
    pub admin: String,
    pub user: String,
    pub guest: String,
    pub hostname: String,
    pub ip: String,
    pub network: String,
    pub ssid: String,
    pub ap: String,
    pub ap_from: String,
    pub ap_to: String,
    pub ap_name: String,
    pub gw: String,
    pub gw_name: String,
    pub sw: String,
    pub sw_name: String,
    pub radio: String,
    pub radio_from: String,
    pub radio_to: String,
    pub channel: FlexInt,
    pub channel_from: FlexInt,
    pub channel_to: FlexInt,
    pub bytes: FlexInt,
    pub duration: FlexInt,
    pub src_ip: String,
    pub src_mac: String,
    pub src_port: FlexInt,
    pub dest_ip: String,
    pub dst_mac: String,
    pub dest_port: FlexInt,
    pub proto: String,
    pub app_proto: String,
    pub host: String,
    pub in_iface: String,
    pub event_type: String,
    pub flow_id: FlexInt,
    pub catname: String,
    pub inner_alert_action: String,
    pub inner_alert_category: String,
    pub inner_alert_signature: String,
    pub inner_alert_gid: FlexInt,
    pub inner_alert_rev: FlexInt,
    pub inner_alert_severity: FlexInt,
    pub inner_alert_signature_id: FlexInt,
    pub unique_alertid: String,
    pub usgip: String,
    #[serde(rename = "srcipASN")]
    pub src_ip_asn: String,
    #[serde(rename = "srcipCountry")]
    pub src_ip_country: String,
    #[serde(rename = "usgipASN")]
    pub usg_ip_asn: String,
    #[serde(rename = "usgipCountry")]
    pub usg_ip_country: String,
    #[serde(rename = "srcipGeo")]
    pub src_ip_geo: IpGeo,
    #[serde(rename = "dstipGeo")]
    pub dst_ip_geo: IpGeo,
    #[serde(rename = "usgipGeo")]
    pub usg_ip_geo: IpGeo,
}
