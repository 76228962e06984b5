// Time-windowed fetchers: events, alarms, anomalies and IDS.
//
// All records carry the site's `"{desc} ({name})"` tag. Alarms and
// anomalies come back sorted by datetime ascending; events keep the
// controller's newest-first order.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};

use crate::controller::Controller;
use crate::endpoints::{EVENT_LIMIT, for_each_site, require_site, time_bounds};
use crate::error::{Error, SitesResult};
use crate::models::anomaly::AnomalyRecord;
use crate::models::{Alarm, Anomaly, Event, Ids, Site};
use crate::paths;

fn window_body(start: Option<i64>, end: i64) -> Map<String, Value> {
    let mut body = Map::new();
    if let Some(start) = start {
        body.insert("start".into(), json!(start));
    }
    body.insert("end".into(), json!(end));
    body.insert("_limit".into(), json!(EVENT_LIMIT));
    body
}

impl Controller {
    /// Events of one site within `range` (0, 1 or 2 bounds).
    pub async fn get_site_events(
        &self,
        site: &Site,
        range: &[DateTime<Utc>],
    ) -> Result<Vec<Event>, Error> {
        require_site(site)?;
        let (start, end) = time_bounds(range)?;
        let mut body = window_body(start, end);
        body.insert("within".into(), json!(1));
        body.insert("_sort".into(), json!("-time"));

        let mut events: Vec<Event> = self
            .fetch(&paths::events(&site.name), Some(&Value::Object(body)))
            .await?;
        let site_name = site.tagged_name();
        for event in &mut events {
            event.site_name.clone_from(&site_name);
            event.source_name = self.source_name().to_owned();
        }
        Ok(events)
    }

    pub async fn get_events(&self, sites: &[Site], range: &[DateTime<Utc>]) -> SitesResult<Event> {
        for_each_site(sites, |site| self.get_site_events(site, range)).await
    }

    /// Alarms of one site, oldest first.
    pub async fn get_site_alarms(&self, site: &Site) -> Result<Vec<Alarm>, Error> {
        require_site(site)?;
        let mut alarms: Vec<Alarm> = self.fetch(&paths::alarms(&site.name), None).await?;
        let site_name = site.tagged_name();
        for alarm in &mut alarms {
            alarm.site_name.clone_from(&site_name);
            alarm.source_name = self.source_name().to_owned();
        }
        alarms.sort_by_key(|a| a.datetime);
        Ok(alarms)
    }

    pub async fn get_alarms(&self, sites: &[Site]) -> SitesResult<Alarm> {
        for_each_site(sites, |site| self.get_site_alarms(site)).await
    }

    /// Anomalies of one site, one record per timestamp, oldest first.
    pub async fn get_site_anomalies(
        &self,
        site: &Site,
        range: &[DateTime<Utc>],
    ) -> Result<Vec<Anomaly>, Error> {
        require_site(site)?;
        let (start, end) = time_bounds(range)?;
        let records: Vec<AnomalyRecord> = self
            .fetch(&paths::anomalies(&site.name, start, end), None)
            .await?;

        let site_name = site.tagged_name();
        let mut anomalies: Vec<Anomaly> = records
            .into_iter()
            .flat_map(|r| r.explode(self.source_name(), &site_name))
            .collect();
        anomalies.sort_by_key(|a| a.datetime);
        Ok(anomalies)
    }

    pub async fn get_anomalies(
        &self,
        sites: &[Site],
        range: &[DateTime<Utc>],
    ) -> SitesResult<Anomaly> {
        for_each_site(sites, |site| self.get_site_anomalies(site, range)).await
    }

    /// Intrusion detection events of one site within `range`.
    pub async fn get_site_ids(&self, site: &Site, range: &[DateTime<Utc>]) -> Result<Vec<Ids>, Error> {
        require_site(site)?;
        let (start, end) = time_bounds(range)?;
        let body = Value::Object(window_body(start, end));

        let mut records: Vec<Ids> = self.fetch(&paths::ids(&site.name), Some(&body)).await?;
        let site_name = site.tagged_name();
        for ids in &mut records {
            ids.site_name.clone_from(&site_name);
            ids.source_name = self.source_name().to_owned();
        }
        Ok(records)
    }

    pub async fn get_ids(&self, sites: &[Site], range: &[DateTime<Utc>]) -> SitesResult<Ids> {
        for_each_site(sites, |site| self.get_site_ids(site, range)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_body_omits_missing_start() {
        let body = window_body(None, 42);
        assert!(!body.contains_key("start"));
        assert_eq!(body["end"], 42);
        assert_eq!(body["_limit"], 50_000);

        let body = window_body(Some(7), 42);
        assert_eq!(body["start"], 7);
    }
}
