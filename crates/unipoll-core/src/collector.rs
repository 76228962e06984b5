// Collector
//
// Owns one lazily connected `Controller` per configured target, polls
// them concurrently, and merges the per-controller snapshots. A poll that
// fails with an auth-class error gets one re-login and one repeat.

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use futures_util::future::join_all;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use unipoll_api::models::Site;
use unipoll_api::{Controller, DEFAULT_USER_WINDOW_HOURS, SitesResult};

use crate::augment::{augment_clients, enrich_alarms, name_client_dpi};
use crate::error::CoreError;
use crate::filter::{Filter, filter_sites};
use crate::options::{PollOptions, Target};
use crate::snapshot::{Events, Metrics};

/// What sinks consume: a metrics snapshot and an events bundle.
#[async_trait]
pub trait Collector: Send + Sync {
    async fn metrics(&self, filter: &Filter) -> Result<Metrics, CoreError>;

    async fn events(&self, filter: &Filter) -> Result<Events, CoreError>;
}

/// One target and its session, connected on first use.
struct Slot {
    target: Target,
    session: Mutex<Option<Arc<Controller>>>,
}

impl Slot {
    async fn controller(&self) -> Result<Arc<Controller>, CoreError> {
        let mut session = self.session.lock().await;
        if let Some(ctrl) = session.as_ref() {
            return Ok(Arc::clone(ctrl));
        }
        let ctrl = Controller::connect(self.target.controller.clone())
            .await
            .map_err(|e| CoreError::controller(self.target.url(), e))?;
        info!(
            url = %self.target.url(),
            version = %ctrl.server_version(),
            "connected to controller"
        );
        let ctrl = Arc::new(ctrl);
        *session = Some(Arc::clone(&ctrl));
        Ok(ctrl)
    }

    /// Forget the session so the next use reconnects from scratch.
    async fn reset(&self) {
        self.session.lock().await.take();
    }

    /// Run `poll` once; on an auth-class error re-login and run it again.
    async fn with_reauth<T, F, Fut>(&self, poll: F) -> Result<T, CoreError>
    where
        F: Fn(Arc<Controller>) -> Fut,
        Fut: Future<Output = Result<T, CoreError>>,
    {
        let ctrl = self.controller().await?;
        match poll(Arc::clone(&ctrl)).await {
            Err(e) if e.is_auth_expired() => {
                warn!(url = %self.target.url(), error = %e, "poll failed, re-authenticating");
                if let Err(login) = ctrl.login().await {
                    self.reset().await;
                    return Err(CoreError::controller(self.target.url(), login));
                }
                poll(ctrl).await
            }
            other => other,
        }
    }
}

/// Collector over any number of UniFi controllers.
pub struct UnifiCollector {
    slots: Vec<Slot>,
}

impl UnifiCollector {
    pub fn new(targets: Vec<Target>) -> Self {
        Self {
            slots: targets
                .into_iter()
                .map(|target| Slot {
                    target,
                    session: Mutex::new(None),
                })
                .collect(),
        }
    }

    pub fn targets(&self) -> impl Iterator<Item = &Target> {
        self.slots.iter().map(|s| &s.target)
    }

    /// The connected controller for `url`, or the first one when `None`.
    pub async fn controller(&self, url: Option<&str>) -> Result<Arc<Controller>, CoreError> {
        self.slot(url)?.controller().await
    }

    /// Sites of one controller after applying its configured site filter.
    pub async fn sites(&self, url: Option<&str>) -> Result<Vec<Site>, CoreError> {
        let slot = self.slot(url)?;
        let wanted = &slot.target.options.sites;
        slot.with_reauth(|ctrl| async move {
            let sites = ctrl
                .get_sites()
                .await
                .map_err(|e| CoreError::controller(ctrl.source_name(), e))?;
            Ok(filter_sites(sites, wanted))
        })
        .await
    }

    fn slot(&self, url: Option<&str>) -> Result<&Slot, CoreError> {
        match url {
            None => self.slots.first().ok_or(CoreError::NoControllers),
            Some(url) => {
                let want = url.trim_end_matches('/');
                self.slots
                    .iter()
                    .find(|s| s.target.url() == want)
                    .ok_or_else(|| CoreError::ControllerNotFound {
                        url: url.to_owned(),
                    })
            }
        }
    }

    fn selected(&self, filter: &Filter) -> Result<Vec<&Slot>, CoreError> {
        if self.slots.is_empty() {
            return Err(CoreError::NoControllers);
        }
        let selected: Vec<&Slot> = self
            .slots
            .iter()
            .filter(|s| filter.matches(s.target.url()))
            .collect();
        if selected.is_empty() {
            return Err(CoreError::ControllerNotFound {
                url: filter.controller.clone().unwrap_or_default(),
            });
        }
        Ok(selected)
    }
}

/// Merge per-controller results: failures are logged, and only when every
/// controller failed is the last error returned.
fn merge_results<T, I>(results: I, mut merge: impl FnMut(&mut T, T)) -> Result<T, CoreError>
where
    T: Default,
    I: IntoIterator<Item = Result<T, CoreError>>,
{
    let mut merged: Option<T> = None;
    let mut last_err = None;
    for result in results {
        match result {
            Ok(part) => match merged.as_mut() {
                Some(acc) => merge(acc, part),
                None => merged = Some(part),
            },
            Err(e) => {
                error!(error = %e, "controller poll failed");
                last_err = Some(e);
            }
        }
    }
    match (merged, last_err) {
        (Some(all), _) => Ok(all),
        (None, Some(e)) => Err(e),
        (None, None) => Ok(T::default()),
    }
}

#[async_trait]
impl Collector for UnifiCollector {
    async fn metrics(&self, filter: &Filter) -> Result<Metrics, CoreError> {
        let slots = self.selected(filter)?;
        let polls = slots.iter().map(|slot| {
            let options = &slot.target.options;
            slot.with_reauth(move |ctrl| async move { poll_metrics(&ctrl, options).await })
        });
        merge_results(join_all(polls).await, Metrics::merge)
    }

    async fn events(&self, filter: &Filter) -> Result<Events, CoreError> {
        if filter.skip_events {
            return Ok(Events::default());
        }
        let slots = self.selected(filter)?;
        let polls = slots
            .iter()
            .filter(|slot| slot.target.options.wants_events())
            .map(|slot| {
                let options = &slot.target.options;
                let dur = filter.dur;
                slot.with_reauth(move |ctrl| async move { poll_events(&ctrl, options, dur).await })
            });
        merge_results(join_all(polls).await, Events::merge)
    }
}

// ── Per-controller polls ─────────────────────────────────────────────

/// Keep what an optional multi-site fetch collected, logging the failure.
/// Auth-class failures still propagate so the poll can re-login.
fn keep_partial<T: Debug>(
    ctrl: &Controller,
    what: &str,
    result: SitesResult<T>,
) -> Result<Vec<T>, CoreError> {
    match result {
        Ok(records) => Ok(records),
        Err(partial) => {
            let (records, e) = partial.into_parts();
            if e.is_auth_expired() {
                return Err(CoreError::controller(ctrl.source_name(), e));
            }
            warn!(
                url = %ctrl.source_name(),
                what,
                kept = records.len(),
                error = %e,
                "partial fetch"
            );
            Ok(records)
        }
    }
}

/// Collect one controller's metrics snapshot.
pub async fn poll_metrics(ctrl: &Controller, options: &PollOptions) -> Result<Metrics, CoreError> {
    let url = ctrl.source_name();
    let sites = filter_sites(
        ctrl.get_sites()
            .await
            .map_err(|e| CoreError::controller(url, e))?,
        &options.sites,
    );
    let devices = ctrl
        .get_devices(&sites)
        .await
        .map_err(|e| CoreError::controller(url, e))?;
    let mut clients = ctrl
        .get_clients(&sites)
        .await
        .map_err(|e| CoreError::controller(url, e))?;
    augment_clients(&mut clients, &devices);

    let mut metrics = Metrics {
        ts: Utc::now(),
        devices,
        ..Metrics::default()
    };

    if options.save_dpi {
        metrics.sites_dpi = keep_partial(ctrl, "site dpi", ctrl.get_sites_dpi(&sites).await)?;
        metrics.clients_dpi =
            keep_partial(ctrl, "client dpi", ctrl.get_clients_dpi(&sites).await)?;
        name_client_dpi(&mut metrics.clients_dpi, &clients);
    }
    if options.save_users {
        metrics.users = keep_partial(
            ctrl,
            "users",
            ctrl.get_users(&sites, DEFAULT_USER_WINDOW_HOURS).await,
        )?;
    }
    if options.save_networks {
        metrics.networks = keep_partial(ctrl, "networks", ctrl.get_networks(&sites).await)?;
    }
    if options.save_rogue {
        metrics.rogue_aps = keep_partial(ctrl, "rogue aps", ctrl.get_rogue_aps(&sites).await)?;
    }

    metrics.clients = clients;
    if options.save_sites {
        metrics.sites = sites;
    }

    debug!(
        url,
        sites = metrics.sites.len(),
        devices = metrics.devices.len(),
        clients = metrics.clients.len(),
        "polled controller"
    );
    Ok(metrics)
}

/// Collect one controller's events over the last `dur`.
pub async fn poll_events(
    ctrl: &Controller,
    options: &PollOptions,
    dur: Duration,
) -> Result<Events, CoreError> {
    let url = ctrl.source_name();
    let sites = filter_sites(
        ctrl.get_sites()
            .await
            .map_err(|e| CoreError::controller(url, e))?,
        &options.sites,
    );

    let end = Utc::now();
    let start = chrono::Duration::from_std(dur)
        .ok()
        .and_then(|d| end.checked_sub_signed(d))
        .unwrap_or(end);
    let range = [start, end];

    let mut events = Events::default();
    if options.save_events {
        events.events = keep_partial(ctrl, "events", ctrl.get_events(&sites, &range).await)?;
    }
    if options.save_alarms {
        events.alarms = keep_partial(ctrl, "alarms", ctrl.get_alarms(&sites).await)?;
        let names = match ctrl.get_devices(&sites).await {
            Ok(devices) => devices.names_by_mac(),
            Err(partial) => {
                let (devices, e) = partial.into_parts();
                warn!(url, error = %e, "device lookup for alarms failed");
                devices.names_by_mac()
            }
        };
        enrich_alarms(&mut events.alarms, &names);
    }
    if options.save_anomalies {
        events.anomalies =
            keep_partial(ctrl, "anomalies", ctrl.get_anomalies(&sites, &range).await)?;
    }
    if options.save_ids {
        events.ids = keep_partial(ctrl, "ids", ctrl.get_ids(&sites, &range).await)?;
    }

    debug!(url, records = events.len(), "collected events");
    Ok(events)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn merge_keeps_successes() {
        let results = vec![
            Ok(vec![1]),
            Err(CoreError::NoControllers),
            Ok(vec![2, 3]),
        ];
        let merged = merge_results(results, |acc: &mut Vec<i32>, part| acc.extend(part)).unwrap();
        assert_eq!(merged, [1, 2, 3]);
    }

    #[test]
    fn merge_all_failed_returns_error() {
        let results: Vec<Result<Vec<i32>, _>> = vec![Err(CoreError::NoControllers)];
        assert!(matches!(
            merge_results(results, |acc, part| acc.extend(part)),
            Err(CoreError::NoControllers)
        ));
    }

    #[tokio::test]
    async fn empty_collector_errors() {
        let collector = UnifiCollector::new(Vec::new());
        assert!(matches!(
            collector.metrics(&Filter::default()).await,
            Err(CoreError::NoControllers)
        ));
        assert!(matches!(
            collector.controller(Some("https://x")).await,
            Err(CoreError::ControllerNotFound { .. })
        ));
    }
}
