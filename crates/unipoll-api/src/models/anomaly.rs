use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One anomaly occurrence: a tag the controller raised for a device at
/// one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Anomaly {
    pub datetime: DateTime<Utc>,
    pub source_name: String,
    pub site_name: String,
    pub anomaly: String,
    pub device_mac: String,
}

/// Wire shape: one tag with every timestamp it fired at.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AnomalyRecord {
    pub anomaly: String,
    pub mac: String,
    pub timestamps: Vec<i64>,
}

impl AnomalyRecord {
    /// One [`Anomaly`] per timestamp. Timestamps are epoch milliseconds,
    /// truncated to the second.
    pub(crate) fn explode(self, source_name: &str, site_name: &str) -> Vec<Anomaly> {
        self.timestamps
            .iter()
            .map(|&ts| Anomaly {
                datetime: DateTime::from_timestamp(ts / 1000, 0).unwrap_or_default(),
                source_name: source_name.to_owned(),
                site_name: site_name.to_owned(),
                anomaly: self.anomaly.clone(),
                device_mac: self.mac.clone(),
            })
            .collect()
    }
}
