use std::time::Duration;

use tracing::warn;
use unipoll_api::models::Site;

/// Narrows a collection request.
#[derive(Debug, Clone)]
pub struct Filter {
    /// Only this controller URL; `None` polls all of them.
    pub controller: Option<String>,
    /// Look-back window for events, alarms, anomalies and IDS.
    pub dur: Duration,
    /// Return an empty events bundle without contacting controllers.
    pub skip_events: bool,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            controller: None,
            dur: Duration::from_secs(3600),
            skip_events: false,
        }
    }
}

impl Filter {
    pub(crate) fn matches(&self, url: &str) -> bool {
        self.controller
            .as_deref()
            .is_none_or(|want| want.trim_end_matches('/') == url)
    }
}

/// Keep only the sites named in `wanted`, preserving controller order.
///
/// Empty `wanted` or any `"all"` entry keeps every site. Configured names
/// that match nothing are logged.
pub fn filter_sites(sites: Vec<Site>, wanted: &[String]) -> Vec<Site> {
    if wanted.is_empty() || wanted.iter().any(|w| w.eq_ignore_ascii_case("all")) {
        return sites;
    }

    for name in wanted {
        if !sites.iter().any(|s| &s.name == name) {
            warn!(site = %name, "configured site not found on controller");
        }
    }

    sites
        .into_iter()
        .filter(|s| wanted.contains(&s.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sites(names: &[&str]) -> Vec<Site> {
        names
            .iter()
            .map(|n| Site {
                name: (*n).into(),
                ..Site::default()
            })
            .collect()
    }

    fn names(sites: &[Site]) -> Vec<&str> {
        sites.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn all_or_empty_keeps_everything() {
        let kept = filter_sites(sites(&["a", "b"]), &["All".into()]);
        assert_eq!(names(&kept), ["a", "b"]);
        let kept = filter_sites(sites(&["a", "b"]), &[]);
        assert_eq!(names(&kept), ["a", "b"]);
    }

    #[test]
    fn named_sites_keep_controller_order() {
        let kept = filter_sites(sites(&["a", "b", "c"]), &["c".into(), "a".into(), "zz".into()]);
        assert_eq!(names(&kept), ["a", "c"]);
    }

    #[test]
    fn controller_match_ignores_trailing_slash() {
        let filter = Filter {
            controller: Some("https://ctl:8443/".into()),
            ..Filter::default()
        };
        assert!(filter.matches("https://ctl:8443"));
        assert!(!filter.matches("https://other"));
        assert!(Filter::default().matches("https://anything"));
    }
}
