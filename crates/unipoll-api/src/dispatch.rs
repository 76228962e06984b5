// Device dispatcher
//
// `stat/device` returns one heterogeneous array. Each element is routed on
// its `type` field to a typed variant; unknown types and undecodable
// elements are reported through the log hooks and skipped so one odd
// device never hides the rest.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

use crate::error::Error;
use crate::hooks::LogHooks;
use crate::models::{DeviceHeader, Uap, Udm, Usg, Usw, Uxg, strip_nulls};

/// Device `type` tags the controller emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum DeviceKind {
    Uap,
    Usw,
    /// Older firmware reports gateways as `ugw`.
    #[strum(serialize = "ugw", to_string = "usg")]
    Usg,
    Udm,
    Uxg,
}

/// One decoded device of any variant.
#[derive(Debug, Clone)]
pub enum Device {
    Uap(Box<Uap>),
    Usw(Box<Usw>),
    Usg(Box<Usg>),
    Udm(Box<Udm>),
    Uxg(Box<Uxg>),
}

impl Device {
    pub fn kind(&self) -> DeviceKind {
        match self {
            Self::Uap(_) => DeviceKind::Uap,
            Self::Usw(_) => DeviceKind::Usw,
            Self::Usg(_) => DeviceKind::Usg,
            Self::Udm(_) => DeviceKind::Udm,
            Self::Uxg(_) => DeviceKind::Uxg,
        }
    }

    pub fn header(&self) -> &DeviceHeader {
        match self {
            Self::Uap(d) => &d.header,
            Self::Usw(d) => &d.header,
            Self::Usg(d) => &d.header,
            Self::Udm(d) => &d.header,
            Self::Uxg(d) => &d.header,
        }
    }

    fn header_mut(&mut self) -> &mut DeviceHeader {
        match self {
            Self::Uap(d) => &mut d.header,
            Self::Usw(d) => &mut d.header,
            Self::Usg(d) => &mut d.header,
            Self::Udm(d) => &mut d.header,
            Self::Uxg(d) => &mut d.header,
        }
    }

    /// Decode one raw `stat/device` record on its `type` tag.
    pub fn from_value(raw: &Value) -> Result<Self, Error> {
        let tag = raw
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("<type key missing>");
        let kind = tag
            .parse::<DeviceKind>()
            .map_err(|_| Error::UnknownDeviceType(tag.to_owned()))?;
        let mut raw = raw.clone();
        strip_nulls(&mut raw);
        Self::decode(kind, &raw).map_err(|e| Error::Decode {
            path: format!("{kind} device"),
            message: e.to_string(),
        })
    }

    fn decode(kind: DeviceKind, raw: &Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            DeviceKind::Uap => Self::Uap(Box::new(Uap::deserialize(raw)?)),
            DeviceKind::Usw => Self::Usw(Box::new(Usw::deserialize(raw)?)),
            DeviceKind::Usg => Self::Usg(Box::new(Usg::deserialize(raw)?)),
            DeviceKind::Udm => Self::Udm(Box::new(Udm::deserialize(raw)?)),
            DeviceKind::Uxg => Self::Uxg(Box::new(Uxg::deserialize(raw)?)),
        })
    }
}

/// Every device of one or more sites, bucketed by variant.
///
/// Each list keeps the order the controller returned.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Devices {
    pub uaps: Vec<Uap>,
    pub usgs: Vec<Usg>,
    pub usws: Vec<Usw>,
    pub udms: Vec<Udm>,
    pub uxgs: Vec<Uxg>,
}

impl Devices {
    pub fn push(&mut self, device: Device) {
        match device {
            Device::Uap(d) => self.uaps.push(*d),
            Device::Usw(d) => self.usws.push(*d),
            Device::Usg(d) => self.usgs.push(*d),
            Device::Udm(d) => self.udms.push(*d),
            Device::Uxg(d) => self.uxgs.push(*d),
        }
    }

    /// Append all of `other`, preserving order.
    pub fn extend(&mut self, other: Devices) {
        self.uaps.extend(other.uaps);
        self.usgs.extend(other.usgs);
        self.usws.extend(other.usws);
        self.udms.extend(other.udms);
        self.uxgs.extend(other.uxgs);
    }

    pub fn len(&self) -> usize {
        self.uaps.len() + self.usgs.len() + self.usws.len() + self.udms.len() + self.uxgs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Headers of every device, variant order uap, usg, usw, udm, uxg.
    pub fn headers(&self) -> impl Iterator<Item = &DeviceHeader> {
        self.uaps
            .iter()
            .map(|d| &d.header)
            .chain(self.usgs.iter().map(|d| &d.header))
            .chain(self.usws.iter().map(|d| &d.header))
            .chain(self.udms.iter().map(|d| &d.header))
            .chain(self.uxgs.iter().map(|d| &d.header))
    }

    /// Lower-cased MAC to device name, skipping entries missing either.
    pub fn names_by_mac(&self) -> HashMap<String, String> {
        self.headers()
            .filter(|h| !h.mac.is_empty() && !h.name.is_empty())
            .map(|h| (h.mac.to_lowercase(), h.name.clone()))
            .collect()
    }
}

/// Route each raw device record to its variant.
///
/// Decoded devices get `site_name`/`source_name` attached and their name
/// normalized. Unknown types are reported on the error hook; decode
/// failures go to the error hook with the payload on the debug hook.
pub fn parse_devices(
    data: &[Value],
    site_name: &str,
    source_name: &str,
    hooks: &LogHooks,
) -> Devices {
    let mut devices = Devices::default();

    for raw in data {
        match Device::from_value(raw) {
            Ok(mut device) => {
                let header = device.header_mut();
                header.site_name = site_name.to_owned();
                header.source_name = source_name.to_owned();
                header.normalize_name();
                devices.push(device);
            }
            Err(Error::UnknownDeviceType(tag)) => {
                hooks.error(&format!("unknown asset type - {tag} - skipping"));
            }
            Err(e) => {
                hooks.error(&format!("failed to decode device: {e}"));
                hooks.debug(&format!("undecodable device payload: {raw}"));
            }
        }
    }

    devices
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn recording_hooks() -> (LogHooks, Arc<Mutex<Vec<String>>>, Arc<Mutex<Vec<String>>>) {
        let errors = Arc::new(Mutex::new(Vec::new()));
        let debugs = Arc::new(Mutex::new(Vec::new()));
        let e = Arc::clone(&errors);
        let d = Arc::clone(&debugs);
        let hooks = LogHooks::new(
            Arc::new(move |m| d.lock().unwrap().push(m.to_owned())),
            Arc::new(move |m| e.lock().unwrap().push(m.to_owned())),
        );
        (hooks, errors, debugs)
    }

    fn device(kind: &str, mac: &str) -> Value {
        json!({"type": kind, "mac": mac, "name": format!("  {kind}-dev  ")})
    }

    #[test]
    fn dispatch_routes_every_variant() {
        let data = vec![
            device("uap", "00:00:00:00:00:01"),
            device("usw", "00:00:00:00:00:02"),
            device("ugw", "00:00:00:00:00:03"),
            device("uxg", "00:00:00:00:00:04"),
            device("udm", "00:00:00:00:00:05"),
            device("mystery", "00:00:00:00:00:06"),
        ];
        let (hooks, errors, _) = recording_hooks();
        let devices = parse_devices(&data, "Default", "https://ctl", &hooks);

        assert_eq!(devices.uaps.len(), 1);
        assert_eq!(devices.usws.len(), 1);
        assert_eq!(devices.usgs.len(), 1);
        assert_eq!(devices.uxgs.len(), 1);
        assert_eq!(devices.udms.len(), 1);
        assert_eq!(devices.len(), 5);

        let errors = errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("mystery"));

        let usg = &devices.usgs[0].header;
        assert_eq!(usg.name, "ugw-dev");
        assert_eq!(usg.site_name, "Default");
        assert_eq!(usg.source_name, "https://ctl");
    }

    #[test]
    fn unknown_types_do_not_perturb_order() {
        let data = vec![
            json!({"type": "nope"}),
            device("uap", "aa"),
            json!({"type": "nope"}),
            device("uap", "bb"),
            json!({"no_type": true}),
            device("uap", "cc"),
        ];
        let devices = parse_devices(&data, "", "", &LogHooks::silent());
        let macs: Vec<_> = devices.uaps.iter().map(|d| d.header.mac.as_str()).collect();
        assert_eq!(macs, ["aa", "bb", "cc"]);
    }

    #[test]
    fn blank_name_falls_back_to_mac() {
        let data = vec![json!({"type": "usw", "mac": "de:ad", "name": "   "})];
        let devices = parse_devices(&data, "", "", &LogHooks::silent());
        assert_eq!(devices.usws[0].header.name, "de:ad");
    }

    #[test]
    fn null_name_falls_back_to_mac() {
        let data = vec![
            json!({"type": "usw", "mac": "aa", "name": null}),
            json!({"type": "uap", "mac": "bb", "name": null, "model": null, "uptime": null}),
        ];
        let (hooks, errors, _) = recording_hooks();
        let devices = parse_devices(&data, "", "", &hooks);

        assert_eq!(devices.usws.len(), 1);
        assert_eq!(devices.usws[0].header.name, "aa");
        assert_eq!(devices.uaps[0].header.name, "bb");
        assert!(errors.lock().unwrap().is_empty());
    }

    #[test]
    fn decode_failure_is_logged_and_skipped() {
        let data = vec![
            json!({"type": "uap", "mac": "aa", "uptime": {"nested": 1}}),
            device("uap", "bb"),
        ];
        let (hooks, errors, debugs) = recording_hooks();
        let devices = parse_devices(&data, "", "", &hooks);
        assert_eq!(devices.uaps.len(), 1);
        assert_eq!(errors.lock().unwrap().len(), 1);
        assert!(debugs.lock().unwrap()[0].contains("\"aa\""));
    }

    #[test]
    fn names_by_mac_lowercases() {
        let data = vec![
            json!({"type": "uap", "mac": "AA:BB", "name": "Lobby"}),
            json!({"type": "usw", "mac": "", "name": "orphan"}),
        ];
        let devices = parse_devices(&data, "", "", &LogHooks::silent());
        let names = devices.names_by_mac();
        assert_eq!(names.len(), 1);
        assert_eq!(names["aa:bb"], "Lobby");
    }

    #[test]
    fn single_record_errors_are_typed() {
        assert!(matches!(
            Device::from_value(&json!({"type": "mystery"})),
            Err(Error::UnknownDeviceType(t)) if t == "mystery"
        ));
        assert!(matches!(
            Device::from_value(&json!({"mac": "aa"})),
            Err(Error::UnknownDeviceType(_))
        ));
        assert!(matches!(
            Device::from_value(&json!({"type": "uap", "uptime": {"nested": 1}})),
            Err(Error::Decode { .. })
        ));
        let device = Device::from_value(&json!({"type": "ugw", "mac": "aa"})).unwrap();
        assert_eq!(device.kind(), DeviceKind::Usg);
        assert_eq!(device.header().mac, "aa");
    }

    #[test]
    fn kind_parses_gateway_aliases() {
        assert_eq!("ugw".parse::<DeviceKind>().unwrap(), DeviceKind::Usg);
        assert_eq!("usg".parse::<DeviceKind>().unwrap(), DeviceKind::Usg);
        assert_eq!(DeviceKind::Usg.to_string(), "usg");
        assert!("UAP ".parse::<DeviceKind>().is_err());
    }
}
