// Controller API paths
//
// Site-scoped templates take the site's short `name`. On UniFi OS every
// path here except the login path is served under `/proxy/network`.

pub const STATUS: &str = "/status";
pub const LOGOUT: &str = "/api/logout";
pub const SITES: &str = "/api/self/sites";

pub fn devices(site: &str) -> String {
    format!("/api/s/{site}/stat/device")
}

pub fn clients(site: &str) -> String {
    format!("/api/s/{site}/stat/sta")
}

pub fn all_users(site: &str) -> String {
    format!("/api/s/{site}/stat/alluser")
}

pub fn site_dpi(site: &str) -> String {
    format!("/api/s/{site}/stat/sitedpi")
}

pub fn client_dpi(site: &str) -> String {
    format!("/api/s/{site}/stat/stadpi")
}

pub fn events(site: &str) -> String {
    format!("/api/s/{site}/stat/event")
}

pub fn alarms(site: &str) -> String {
    format!("/api/s/{site}/stat/alarm")
}

pub fn ids(site: &str) -> String {
    format!("/api/s/{site}/stat/ips/event")
}

pub fn anomalies(site: &str, start: Option<i64>, end: i64) -> String {
    let mut path = format!("/api/s/{site}/stat/anomalies?scale=hourly&end={end}");
    if let Some(start) = start {
        path.push_str(&format!("&start={start}"));
    }
    path
}

pub fn networks(site: &str) -> String {
    format!("/api/s/{site}/rest/networkconf")
}

pub fn rogue_aps(site: &str) -> String {
    format!("/api/s/{site}/stat/rogueap")
}

pub fn devmgr(site: &str) -> String {
    format!("/api/s/{site}/cmd/devmgr")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anomaly_query() {
        assert_eq!(
            anomalies("default", None, 5),
            "/api/s/default/stat/anomalies?scale=hourly&end=5"
        );
        assert_eq!(
            anomalies("default", Some(1), 5),
            "/api/s/default/stat/anomalies?scale=hourly&end=5&start=1"
        );
    }
}
