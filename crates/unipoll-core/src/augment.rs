// Cross-entity enrichment applied after fetching.
//
// Clients learn the names of the AP, switch and gateway they hang off;
// client DPI tables learn the client name; alarms learn which device
// they are about.

use std::collections::HashMap;

use unipoll_api::Devices;
use unipoll_api::models::{Alarm, Client, DpiTable, VapTable};

/// Fill `ap_name`, `sw_name`, `gw_name` and `radio_description` on every
/// client from the devices of the same poll.
pub fn augment_clients(clients: &mut [Client], devices: &Devices) {
    let names = devices.names_by_mac();
    let radios = radio_descriptions(devices);

    for client in clients {
        let lookup = |mac: &str| names.get(&mac.to_lowercase()).cloned().unwrap_or_default();
        client.ap_name = lookup(&client.ap_mac);
        client.sw_name = lookup(&client.sw_mac);
        client.gw_name = lookup(&client.gw_mac);
        if let Some(prefix) = radios.get(&client.bssid.to_lowercase()) {
            client.radio_description = format!("{prefix}{}", client.radio_proto);
        }
    }
}

/// `bssid -> "{ap} {radio} {radio_name}:"` over every VAP of every AP.
fn radio_descriptions(devices: &Devices) -> HashMap<String, String> {
    let uaps = devices
        .uaps
        .iter()
        .map(|ap| (ap.header.name.as_str(), ap.vap_table.as_slice()));
    let udms = devices.udms.iter().map(|udm| {
        (
            udm.header.name.as_str(),
            udm.vap_table.as_deref().unwrap_or_default(),
        )
    });

    uaps.chain(udms)
        .flat_map(|(ap, vaps): (&str, &[VapTable])| {
            vaps.iter().filter(|v| !v.bssid.is_empty()).map(move |v| {
                (
                    v.bssid.to_lowercase(),
                    format!("{ap} {} {}:", v.radio, v.radio_name),
                )
            })
        })
        .collect()
}

/// Replace each client DPI table's name with the client's name when known.
pub fn name_client_dpi(tables: &mut [DpiTable], clients: &[Client]) {
    let names: HashMap<String, &str> = clients
        .iter()
        .map(|c| (c.mac.to_lowercase(), c.name.as_str()))
        .collect();

    for table in tables {
        match names.get(&table.mac.to_lowercase()) {
            Some(name) if !name.is_empty() => table.name = (*name).to_owned(),
            _ => table.name.clone_from(&table.mac),
        }
    }
}

/// Set `device_name` on alarms that reference a known device.
///
/// A bracketed MAC in the message wins; otherwise the source and then the
/// destination MAC are tried.
pub fn enrich_alarms(alarms: &mut [Alarm], names: &HashMap<String, String>) {
    for alarm in alarms {
        let found = bracketed_macs(&alarm.msg)
            .chain([alarm.src_mac.to_lowercase(), alarm.dst_mac.to_lowercase()])
            .find_map(|mac| names.get(&mac));
        if let Some(name) = found {
            alarm.device_name.clone_from(name);
        }
    }
}

/// Lower-cased `XX:XX:XX:XX:XX:XX` strings found between square brackets.
fn bracketed_macs(msg: &str) -> impl Iterator<Item = String> + '_ {
    msg.split('[')
        .skip(1)
        .filter_map(|rest| rest.split_once(']').map(|(inside, _)| inside.trim()))
        .filter(|s| s.len() == 17 && s.matches(':').count() == 5)
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use unipoll_api::models::{DeviceHeader, Uap};

    use super::*;

    fn ap(mac: &str, name: &str, bssid: &str) -> Uap {
        Uap {
            header: DeviceHeader {
                mac: mac.into(),
                name: name.into(),
                ..DeviceHeader::default()
            },
            vap_table: vec![VapTable {
                bssid: bssid.into(),
                radio: "na".into(),
                radio_name: "wifi1".into(),
                ..VapTable::default()
            }],
            ..Uap::default()
        }
    }

    #[test]
    fn clients_get_uplink_names_and_radio() {
        let devices = Devices {
            uaps: vec![ap("AA:AA:AA:AA:AA:01", "Lobby", "AA:AA:AA:AA:AA:F1")],
            ..Devices::default()
        };
        let mut clients = vec![Client {
            ap_mac: "aa:aa:aa:aa:aa:01".into(),
            sw_mac: "ff:ff:ff:ff:ff:ff".into(),
            bssid: "aa:aa:aa:aa:aa:f1".into(),
            radio_proto: "ac".into(),
            ..Client::default()
        }];

        augment_clients(&mut clients, &devices);
        assert_eq!(clients[0].ap_name, "Lobby");
        assert_eq!(clients[0].sw_name, "");
        assert_eq!(clients[0].radio_description, "Lobby na wifi1:ac");
    }

    #[test]
    fn client_dpi_takes_client_name_or_mac() {
        let clients = vec![Client {
            mac: "aa:01".into(),
            name: "laptop".into(),
            ..Client::default()
        }];
        let mut tables = vec![
            DpiTable {
                mac: "AA:01".into(),
                ..DpiTable::default()
            },
            DpiTable {
                mac: "bb:02".into(),
                ..DpiTable::default()
            },
        ];
        name_client_dpi(&mut tables, &clients);
        assert_eq!(tables[0].name, "laptop");
        assert_eq!(tables[1].name, "bb:02");
    }

    #[test]
    fn alarm_device_from_message_then_macs() {
        let names = HashMap::from([
            ("aa:bb:cc:dd:ee:01".to_owned(), "Gateway".to_owned()),
            ("aa:bb:cc:dd:ee:02".to_owned(), "Switch".to_owned()),
        ]);
        let mut alarms = vec![
            Alarm {
                msg: "Device [AA:BB:CC:DD:EE:01] lost contact".into(),
                src_mac: "aa:bb:cc:dd:ee:02".into(),
                ..Alarm::default()
            },
            Alarm {
                msg: "[not-a-mac] something".into(),
                dst_mac: "AA:BB:CC:DD:EE:02".into(),
                ..Alarm::default()
            },
            Alarm {
                msg: "nothing here".into(),
                ..Alarm::default()
            },
        ];
        enrich_alarms(&mut alarms, &names);
        assert_eq!(alarms[0].device_name, "Gateway");
        assert_eq!(alarms[1].device_name, "Switch");
        assert_eq!(alarms[2].device_name, "");
    }
}
