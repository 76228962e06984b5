// HTTP transport construction for controller sessions.
//
// One long-lived `reqwest::Client` per controller: TLS policy and the
// timeout are fixed at construction, the cookie jar holds the session.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::redirect::Policy;

use crate::error::Error;

/// TLS verification mode for a controller connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    /// Verify the controller certificate against the system store.
    Verify,
    /// Accept any certificate (controllers ship self-signed by default).
    DangerAcceptInvalid,
}

impl TlsMode {
    pub fn from_verify(verify: bool) -> Self {
        if verify {
            Self::Verify
        } else {
            Self::DangerAcceptInvalid
        }
    }
}

/// Shared transport settings for building controller HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    /// Applies to the whole request, body read included.
    pub timeout: Duration,
    pub cookie_jar: Arc<Jar>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::DangerAcceptInvalid,
            timeout: Duration::from_secs(60),
            cookie_jar: Arc::new(Jar::default()),
        }
    }
}

impl TransportConfig {
    pub fn new(tls: TlsMode, timeout: Duration) -> Self {
        Self {
            tls,
            timeout,
            ..Self::default()
        }
    }

    /// Build the session client. Keep-alive and connection reuse are the
    /// reqwest defaults.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        self.builder().build().map_err(Error::Transport)
    }

    /// Build a client that never follows redirects, sharing the session jar.
    ///
    /// Used to tell UniFi OS (`GET /` answers 200) from a classic
    /// controller (`GET /` answers 302 to the login page).
    pub fn build_probe_client(&self) -> Result<reqwest::Client, Error> {
        self.builder()
            .redirect(Policy::none())
            .build()
            .map_err(Error::Transport)
    }

    fn builder(&self) -> reqwest::ClientBuilder {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("unipoll/", env!("CARGO_PKG_VERSION")))
            .cookie_provider(Arc::clone(&self.cookie_jar));

        if self.tls == TlsMode::DangerAcceptInvalid {
            builder = builder.danger_accept_invalid_certs(true);
        }
        builder
    }
}
