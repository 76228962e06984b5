// Per-poll snapshots handed to sinks.
//
// Both are plain values: built once per poll, merged across controllers,
// then dropped.

use chrono::{DateTime, Utc};
use serde::Serialize;
use unipoll_api::Devices;
use unipoll_api::models::{Alarm, Anomaly, Client, DpiTable, Event, Ids, Network, RogueAp, Site, User};

/// Everything measured in one poll.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Metrics {
    pub ts: DateTime<Utc>,
    pub sites: Vec<Site>,
    pub devices: Devices,
    pub clients: Vec<Client>,
    pub users: Vec<User>,
    pub networks: Vec<Network>,
    pub rogue_aps: Vec<RogueAp>,
    pub sites_dpi: Vec<DpiTable>,
    pub clients_dpi: Vec<DpiTable>,
}

impl Metrics {
    /// Append another controller's snapshot. The newest timestamp wins.
    pub fn merge(&mut self, other: Metrics) {
        self.ts = self.ts.max(other.ts);
        self.sites.extend(other.sites);
        self.devices.extend(other.devices);
        self.clients.extend(other.clients);
        self.users.extend(other.users);
        self.networks.extend(other.networks);
        self.rogue_aps.extend(other.rogue_aps);
        self.sites_dpi.extend(other.sites_dpi);
        self.clients_dpi.extend(other.clients_dpi);
    }
}

/// Time-windowed records from one events collection.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Events {
    pub events: Vec<Event>,
    pub alarms: Vec<Alarm>,
    pub anomalies: Vec<Anomaly>,
    pub ids: Vec<Ids>,
}

impl Events {
    pub fn merge(&mut self, other: Events) {
        self.events.extend(other.events);
        self.alarms.extend(other.alarms);
        self.anomalies.extend(other.anomalies);
        self.ids.extend(other.ids);
    }

    pub fn len(&self) -> usize {
        self.events.len() + self.alarms.len() + self.anomalies.len() + self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
