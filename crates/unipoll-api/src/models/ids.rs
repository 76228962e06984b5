use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::flex::{FlexBool, FlexInt};

/// An intrusion detection/prevention event raised by a gateway.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Ids {
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
    pub archived: FlexBool,
    pub time: FlexInt,
    pub timestamp: FlexInt,
    pub datetime: DateTime<Utc>,
    pub flow_id: FlexInt,
    pub in_iface: String,
    pub event_type: String,
    pub src_ip: String,
    pub src_mac: String,
    pub src_port: FlexInt,
    pub dest_ip: String,
    pub dst_mac: String,
    pub dest_port: FlexInt,
    pub proto: String,
    pub app_proto: String,
    pub host: String,
    pub usgip: String,
    pub unique_alertid: String,
    #[serde(rename = "srcipCountry")]
    pub src_ip_country: String,
    #[serde(rename = "dstipCountry")]
    pub dst_ip_country: String,
    #[serde(rename = "usgipCountry")]
    pub usg_ip_country: String,
    #[serde(rename = "srcipGeo")]
    pub src_ip_geo: IdsGeo,
    #[serde(rename = "dstipGeo")]
    pub dst_ip_geo: IdsGeo,
    #[serde(rename = "usgipGeo")]
    pub usg_ip_geo: IdsGeo,
    #[serde(rename = "srcipASN")]
    pub src_ip_asn: String,
    #[serde(rename = "dstipASN")]
    pub dst_ip_asn: String,
    #[serde(rename = "usgipASN")]
    pub usg_ip_asn: String,
    pub catname: String,
    pub inner_alert_action: String,
    pub inner_alert_gid: FlexInt,
    pub inner_alert_signature_id: FlexInt,
    pub inner_alert_rev: FlexInt,
    pub inner_alert_signature: String,
    pub inner_alert_category: String,
    pub inner_alert_severity: FlexInt,
    pub icmp_type: FlexInt,
    pub icmp_code: FlexInt,
}

/// IDS records carry a richer geo block than events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IdsGeo {
    pub continent_code: String,
    pub country_code: String,
    pub country_code3: String,
    pub country_name: String,
    pub region: String,
    pub city: String,
    pub postal_code: String,
    pub latitude: FlexInt,
    pub longitude: FlexInt,
    pub dma_code: FlexInt,
    pub area_code: FlexInt,
}
