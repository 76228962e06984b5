use std::collections::BTreeMap;

use unipoll_core::{Collector, Events};

use super::Context;
use crate::cli::EventsArgs;
use crate::error::CliError;

pub async fn handle(ctx: &Context, args: &EventsArgs) -> Result<(), CliError> {
    if !ctx.collector.targets().any(|t| t.options.wants_events()) {
        tracing::warn!(
            "no controller has save_events, save_alarms, save_anomalies or save_ids enabled"
        );
    }

    let events = ctx.collector.events(&ctx.filter(args.since)).await?;
    for (site, counts) in count_by_site(&events) {
        println!(
            "{site:<40} events={} alarms={} anomalies={} ids={}",
            counts[0], counts[1], counts[2], counts[3]
        );
    }
    println!(
        "total: {} records over the last {}",
        events.len(),
        humantime::format_duration(args.since)
    );
    Ok(())
}

/// `site -> [events, alarms, anomalies, ids]`.
fn count_by_site(events: &Events) -> BTreeMap<&str, [usize; 4]> {
    let mut counts: BTreeMap<&str, [usize; 4]> = BTreeMap::new();
    let mut bump = |site, slot: usize| counts.entry(site).or_default()[slot] += 1;

    events.events.iter().for_each(|e| bump(e.site_name.as_str(), 0));
    events.alarms.iter().for_each(|a| bump(a.site_name.as_str(), 1));
    events.anomalies.iter().for_each(|a| bump(a.site_name.as_str(), 2));
    events.ids.iter().for_each(|i| bump(i.site_name.as_str(), 3));
    counts
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use unipoll_api::models::{Alarm, Event};

    use super::*;

    #[test]
    fn counts_are_grouped_per_site() {
        let event = |site: &str| Event {
            site_name: site.into(),
            ..Event::default()
        };
        let events = Events {
            events: vec![event("Home (default)"), event("Home (default)"), event("Lab (lab)")],
            alarms: vec![Alarm {
                site_name: "Lab (lab)".into(),
                ..Alarm::default()
            }],
            ..Events::default()
        };

        let counts = count_by_site(&events);
        assert_eq!(counts["Home (default)"], [2, 0, 0, 0]);
        assert_eq!(counts["Lab (lab)"], [1, 1, 0, 0]);
    }
}
