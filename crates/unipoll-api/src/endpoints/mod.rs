// Per-entity fetchers
//
// Every fetcher comes in two shapes: a per-site method that tags records
// with the site and controller, and a multi-site method that walks the
// given sites in order and returns `Partial` data when one of them fails.
// All are inherent methods on `Controller`, one file per entity family.

mod clients;
mod devices;
mod dpi;
mod events;
mod networks;
mod sites;

use std::fmt::Debug;
use std::future::Future;

use chrono::{DateTime, Utc};

pub use clients::DEFAULT_USER_WINDOW_HOURS;

use crate::error::{Error, Partial, SitesResult};
use crate::models::Site;

/// Record cap sent with event and IDS queries.
pub(crate) const EVENT_LIMIT: u32 = 50_000;

/// Multiplier from unix seconds to the controller's time query unit.
const TIME_QUERY_SCALE: i64 = 1_000_000;

fn encode_time(t: &DateTime<Utc>) -> i64 {
    t.timestamp() * TIME_QUERY_SCALE
}

/// Resolve 0, 1 or 2 time bounds into `(start, end)`.
///
/// No bounds: no start, end now. One: start there, end now. Two: both.
pub(crate) fn time_bounds(times: &[DateTime<Utc>]) -> Result<(Option<i64>, i64), Error> {
    match times {
        [] => Ok((None, encode_time(&Utc::now()))),
        [start] => Ok((Some(encode_time(start)), encode_time(&Utc::now()))),
        [start, end] => Ok((Some(encode_time(start)), encode_time(end))),
        _ => Err(Error::InvalidTimeRange { count: times.len() }),
    }
}

pub(crate) fn require_site(site: &Site) -> Result<(), Error> {
    if site.name.is_empty() {
        Err(Error::NoSiteProvided)
    } else {
        Ok(())
    }
}

/// Run `fetch` per site in order, concatenating results.
///
/// Stops at the first failure and hands back what was collected so far.
pub(crate) async fn for_each_site<'a, T, F, Fut>(sites: &'a [Site], mut fetch: F) -> SitesResult<T>
where
    T: Debug,
    F: FnMut(&'a Site) -> Fut,
    Fut: Future<Output = Result<Vec<T>, Error>>,
{
    let mut collected = Vec::new();
    for site in sites {
        match fetch(site).await {
            Ok(records) => collected.extend(records),
            Err(e) => return Err(Partial::new(collected, e)),
        }
    }
    Ok(collected)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use chrono::TimeZone;

    use super::*;

    #[test]
    fn time_bounds_arity() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();

        let (start, end) = time_bounds(&[]).unwrap();
        assert!(start.is_none());
        assert!(end > encode_time(&t1));

        let (start, _) = time_bounds(&[t0]).unwrap();
        assert_eq!(start, Some(t0.timestamp() * 1_000_000));

        let (start, end) = time_bounds(&[t0, t1]).unwrap();
        assert_eq!(start, Some(1_704_067_200_000_000));
        assert_eq!(end, 1_704_153_600_000_000);

        let err = time_bounds(&[t0, t1, t1]).unwrap_err();
        assert!(matches!(err, Error::InvalidTimeRange { count: 3 }));
        assert!(err.is_argument());
    }

    #[tokio::test]
    async fn for_each_site_keeps_partial_data() {
        let sites: Vec<Site> = ["a", "b", "c"]
            .iter()
            .map(|n| Site {
                name: (*n).into(),
                ..Site::default()
            })
            .collect();

        let result = for_each_site(&sites, |site| async move {
            if site.name == "c" {
                Err(Error::NoSiteProvided)
            } else {
                Ok(vec![site.name.clone()])
            }
        })
        .await;

        let (collected, err) = result.unwrap_err().into_parts();
        assert_eq!(collected, ["a", "b"]);
        assert!(matches!(err, Error::NoSiteProvided));
    }
}
