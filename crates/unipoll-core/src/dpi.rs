// DPI totals
//
// Folds site DPI tables into `controller -> site -> label -> counters`,
// once keyed by application name and once by category name.

use std::collections::BTreeMap;
use std::ops::AddAssign;

use serde::Serialize;
use unipoll_api::models::{DpiData, DpiTable};
use unipoll_api::registry;

/// Byte and packet counters of one DPI bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DpiCounters {
    pub tx_bytes: i64,
    pub rx_bytes: i64,
    pub tx_packets: i64,
    pub rx_packets: i64,
}

impl From<&DpiData> for DpiCounters {
    fn from(d: &DpiData) -> Self {
        Self {
            tx_bytes: d.tx_bytes.int64(),
            rx_bytes: d.rx_bytes.int64(),
            tx_packets: d.tx_packets.int64(),
            rx_packets: d.rx_packets.int64(),
        }
    }
}

/// Saturates at `i64::MAX` rather than wrapping.
impl AddAssign for DpiCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.tx_bytes = self.tx_bytes.saturating_add(rhs.tx_bytes);
        self.rx_bytes = self.rx_bytes.saturating_add(rhs.rx_bytes);
        self.tx_packets = self.tx_packets.saturating_add(rhs.tx_packets);
        self.rx_packets = self.rx_packets.saturating_add(rhs.rx_packets);
    }
}

/// `label -> counters` within one site.
pub type LabelTotals = BTreeMap<String, DpiCounters>;
/// `controller -> site -> label -> counters`.
pub type TotalsIndex = BTreeMap<String, BTreeMap<String, LabelTotals>>;

#[derive(Debug, Clone, Default, Serialize)]
pub struct DpiTotals {
    pub apps: TotalsIndex,
    pub cats: TotalsIndex,
}

impl DpiTotals {
    /// Totals over every site DPI table of a snapshot.
    pub fn from_tables(tables: &[DpiTable]) -> Self {
        let mut totals = Self::default();
        for table in tables {
            totals.add_table(table);
        }
        totals
    }

    pub fn add_table(&mut self, table: &DpiTable) {
        let apps = site_entry(&mut self.apps, table);
        for d in &table.by_app {
            let label = registry::application(d.cat.int64(), d.app.int64());
            *apps.entry(label).or_default() += DpiCounters::from(d);
        }

        let cats = site_entry(&mut self.cats, table);
        for d in &table.by_cat {
            let label = registry::category(d.cat.int64());
            *cats.entry(label).or_default() += DpiCounters::from(d);
        }
    }

    /// Sum of every application bucket of one site.
    pub fn site_total(&self, controller: &str, site: &str) -> DpiCounters {
        self.apps
            .get(controller)
            .and_then(|sites| sites.get(site))
            .map(sum)
            .unwrap_or_default()
    }

    /// Sum of every application bucket across a controller's sites.
    pub fn controller_total(&self, controller: &str) -> DpiCounters {
        self.apps
            .get(controller)
            .map(|sites| {
                let mut total = DpiCounters::default();
                for labels in sites.values() {
                    total += sum(labels);
                }
                total
            })
            .unwrap_or_default()
    }
}

fn site_entry<'a>(index: &'a mut TotalsIndex, table: &DpiTable) -> &'a mut LabelTotals {
    index
        .entry(table.source_name.clone())
        .or_default()
        .entry(table.site_name.clone())
        .or_default()
}

fn sum(labels: &LabelTotals) -> DpiCounters {
    let mut total = DpiCounters::default();
    for c in labels.values() {
        total += *c;
    }
    total
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn table(site: &str, app_bytes: &[(i64, i64, i64)]) -> DpiTable {
        let by_app: Vec<_> = app_bytes
            .iter()
            .map(|(cat, app, rx)| json!({"cat": cat, "app": app, "rx_bytes": rx, "tx_bytes": 1}))
            .collect();
        let mut cats: BTreeMap<i64, i64> = BTreeMap::new();
        for (cat, _, rx) in app_bytes {
            *cats.entry(*cat).or_default() += rx;
        }
        let by_cat: Vec<_> = cats
            .iter()
            .map(|(cat, rx)| json!({"cat": cat, "rx_bytes": rx}))
            .collect();
        let mut t: DpiTable =
            serde_json::from_value(json!({"by_app": by_app, "by_cat": by_cat})).unwrap();
        t.site_name = site.into();
        t.source_name = "https://ctl".into();
        t
    }

    #[test]
    fn apps_and_cats_agree_per_site() {
        let totals = DpiTotals::from_tables(&[table("A (a)", &[(10, 1, 100), (10, 3, 50), (24, 1, 7)])]);

        let site = totals.site_total("https://ctl", "A (a)");
        let cats: i64 = totals.cats["https://ctl"]["A (a)"]
            .values()
            .map(|c| c.rx_bytes)
            .sum();
        assert_eq!(site.rx_bytes, 157);
        assert_eq!(cats, 157);
        assert_eq!(totals.apps["https://ctl"]["A (a)"]["SSH"].rx_bytes, 100);
        assert_eq!(totals.cats["https://ctl"]["A (a)"]["Social Network"].rx_bytes, 7);
    }

    #[test]
    fn sites_sum_to_controller_total() {
        let totals = DpiTotals::from_tables(&[
            table("A (a)", &[(10, 1, 100)]),
            table("B (b)", &[(10, 1, 20), (99, 99, 3)]),
        ]);
        let a = totals.site_total("https://ctl", "A (a)");
        let b = totals.site_total("https://ctl", "B (b)");
        let all = totals.controller_total("https://ctl");
        assert_eq!(all.rx_bytes, a.rx_bytes + b.rx_bytes);
        assert_eq!(all.tx_bytes, 3);
        assert!(totals.apps["https://ctl"]["B (b)"].contains_key("Unknown (99:99)"));
    }

    #[test]
    fn unknown_controller_is_zero() {
        assert_eq!(DpiTotals::default().controller_total("x"), DpiCounters::default());
    }

    #[test]
    fn counters_saturate_instead_of_overflowing() {
        let mut total = DpiCounters {
            tx_bytes: i64::MAX - 1,
            rx_bytes: i64::MAX,
            tx_packets: 1,
            rx_packets: 0,
        };
        total += DpiCounters {
            tx_bytes: 10,
            rx_bytes: i64::MAX,
            tx_packets: 2,
            rx_packets: 3,
        };
        assert_eq!(total.tx_bytes, i64::MAX);
        assert_eq!(total.rx_bytes, i64::MAX);
        assert_eq!((total.tx_packets, total.rx_packets), (3, 3));
    }
}
