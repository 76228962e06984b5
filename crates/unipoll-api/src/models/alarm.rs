use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::flex::{FlexBool, FlexInt, IpGeo};

/// A controller alarm (`stat/alarm`).
///
/// `device_name` is not sent by the controller; the collector fills it from
/// a MAC found in the message or the source/destination MAC fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Alarm {
    #[serde(skip_deserializing)]
    pub source_name: String,
    #[serde(skip_deserializing)]
    pub site_name: String,
    #[serde(skip_deserializing)]
    pub device_name: String,
    #[serde(rename = "_id")]
    pub id: String,
    pub site_id: String,
    pub key: String,
    pub msg: String,
    pub subsystem: String,
    pub archived: FlexBool,
    pub handled_time: String,
    pub handled_admin_id: String,
    pub time: FlexInt,
    pub timestamp: FlexInt,
    pub datetime: DateTime<Utc>,
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
    pub tx_id: FlexInt,
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
    #[serde(rename = "dstipASN")]
    pub dst_ip_asn: String,
    #[serde(rename = "dstipCountry")]
    pub dst_ip_country: String,
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
