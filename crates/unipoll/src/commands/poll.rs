use std::collections::BTreeMap;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use unipoll_core::{Collector, DpiCounters, DpiTotals, Metrics};

use super::Context;
use crate::cli::PollArgs;
use crate::error::CliError;

pub async fn handle(ctx: &Context, args: &PollArgs) -> Result<(), CliError> {
    if args.once {
        return collect(ctx).await;
    }

    let token = CancellationToken::new();
    let shutdown = token.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("interrupt received, shutting down");
                shutdown.cancel();
            }
            Err(e) => warn!(error = %e, "cannot listen for ctrl-c"),
        }
    });

    run(ctx, &token).await;
    Ok(())
}

async fn run(ctx: &Context, token: &CancellationToken) {
    let mut ticker = tokio::time::interval(ctx.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    info!(
        interval = %humantime::format_duration(ctx.interval),
        controllers = ctx.urls().len(),
        "polling started"
    );

    loop {
        tokio::select! {
            () = token.cancelled() => break,
            _ = ticker.tick() => {
                if let Err(e) = collect(ctx).await {
                    error!(error = %e, "poll failed");
                }
            }
        }
    }
}

/// One metrics collection plus one events collection over the last
/// interval, logged as summaries.
async fn collect(ctx: &Context) -> Result<(), CliError> {
    let filter = ctx.filter(ctx.interval);

    let metrics = ctx.collector.metrics(&filter).await?;
    for s in summarize(&metrics) {
        info!(
            controller = %s.source,
            sites = s.sites,
            devices = s.devices,
            clients = s.clients,
            dpi_rx_bytes = s.dpi.rx_bytes,
            dpi_tx_bytes = s.dpi.tx_bytes,
            "metrics collected"
        );
    }

    let events = ctx.collector.events(&filter).await?;
    if !events.is_empty() {
        info!(
            events = events.events.len(),
            alarms = events.alarms.len(),
            anomalies = events.anomalies.len(),
            ids = events.ids.len(),
            "events collected"
        );
    }
    Ok(())
}

/// Per-controller counts of one merged snapshot.
#[derive(Debug, Default, PartialEq)]
struct Summary {
    source: String,
    sites: usize,
    devices: usize,
    clients: usize,
    dpi: DpiCounters,
}

fn summarize(metrics: &Metrics) -> Vec<Summary> {
    let mut by_source: BTreeMap<String, Summary> = BTreeMap::new();

    for site in &metrics.sites {
        entry(&mut by_source, &site.source_name).sites += 1;
    }
    for header in metrics.devices.headers() {
        entry(&mut by_source, &header.source_name).devices += 1;
    }
    for client in &metrics.clients {
        entry(&mut by_source, &client.source_name).clients += 1;
    }

    let totals = DpiTotals::from_tables(&metrics.sites_dpi);
    for source in totals.apps.keys() {
        entry(&mut by_source, source);
    }
    by_source
        .into_values()
        .map(|mut s| {
            s.dpi = totals.controller_total(&s.source);
            s
        })
        .collect()
}

fn entry<'a>(by_source: &'a mut BTreeMap<String, Summary>, source: &str) -> &'a mut Summary {
    by_source
        .entry(source.to_owned())
        .or_insert_with(|| Summary {
            source: source.to_owned(),
            ..Summary::default()
        })
}
