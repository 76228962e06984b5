use thiserror::Error;

/// Top-level error type for the `unipoll-api` crate.
///
/// Each variant is one distinguishable failure kind of the controller
/// client. `unipoll-core` wraps these for the collector.
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// Controller URL unparseable, credentials empty, etc.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// URL parsing error while building a request path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Authentication ──────────────────────────────────────────────
    /// Login returned a non-2xx status, or a data request still answered
    /// 401 after one re-login.
    #[error("Authentication failed for {user} at {url}: HTTP {status}")]
    Authentication {
        url: String,
        user: String,
        status: u16,
    },

    // ── Transport ───────────────────────────────────────────────────
    /// Dial, TLS, timeout, or I/O failure on the HTTP transport.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx reply from a data path.
    #[error("HTTP {status} from {path}: {body}")]
    Http {
        path: String,
        status: u16,
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON decode failed at the top level of a fetch.
    #[error("Decode error at {path}: {message}")]
    Decode { path: String, message: String },

    /// Dispatcher saw a device `type` it does not know.
    #[error("Unknown device type: {0}")]
    UnknownDeviceType(String),

    /// Site DPI reply carried more than one data element.
    #[error("DPI bug on site {site}: expected at most 1 data element, got {count}")]
    DpiBug { site: String, count: usize },

    // ── Arguments ───────────────────────────────────────────────────
    /// A per-site operation was given no site.
    #[error("No site provided")]
    NoSiteProvided,

    /// More than two time bounds were passed to an event or anomaly fetch.
    #[error("Invalid time range: expected at most 2 bounds, got {count}")]
    InvalidTimeRange { count: usize },

    // ── Device manager ──────────────────────────────────────────────
    /// A device-manager command returned non-2xx.
    #[error("Command {cmd} failed (HTTP {status}): {message}")]
    Command {
        cmd: String,
        status: u16,
        message: String,
    },
}

impl Error {
    /// Returns `true` if this error indicates the session is gone
    /// and a fresh login might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a transient error worth retrying next cycle.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if the caller supplied bad arguments.
    pub fn is_argument(&self) -> bool {
        matches!(self, Self::NoSiteProvided | Self::InvalidTimeRange { .. })
    }
}

/// Failure of a multi-site fetch, carrying whatever was collected from
/// the sites that succeeded before the error.
#[derive(Debug, Error)]
#[error("{source} (keeping data collected before the failure)")]
pub struct Partial<C: std::fmt::Debug> {
    pub collected: C,
    #[source]
    pub source: Error,
}

impl<C: std::fmt::Debug> Partial<C> {
    pub(crate) fn new(collected: C, source: Error) -> Self {
        Self { collected, source }
    }

    /// Split into the partial data and the error.
    pub fn into_parts(self) -> (C, Error) {
        (self.collected, self.source)
    }
}

impl<C: std::fmt::Debug> From<Partial<C>> for Error {
    fn from(partial: Partial<C>) -> Self {
        partial.source
    }
}

/// Result of a fetch that walks several sites.
pub type SitesResult<T> = Result<Vec<T>, Partial<Vec<T>>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_keeps_collected_and_converts() {
        let partial = Partial::new(vec![1, 2], Error::NoSiteProvided);
        assert!(partial.to_string().starts_with("No site provided"));
        assert_eq!(partial.collected, [1, 2]);
        let err: Error = partial.into();
        assert!(err.is_argument());
    }

    #[test]
    fn auth_classification() {
        let err = Error::Authentication {
            url: "https://unifi:8443".into(),
            user: "poller".into(),
            status: 401,
        };
        assert!(err.is_auth_expired());
        assert!(!err.is_transient());
    }
}
