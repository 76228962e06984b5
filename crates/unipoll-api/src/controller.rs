// Authenticated controller session
//
// Wraps one `reqwest::Client` (with its cookie jar) per controller and adds
// UniFi specifics: platform detection, login, CSRF echo, path prefixing,
// and a single transparent re-login when a data path answers 401.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap};
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::{debug, trace, warn};
use url::Url;

use crate::auth::{ControllerPlatform, Credentials};
use crate::error::Error;
use crate::hooks::LogHooks;
use crate::models::{DataEnvelope, ServerStatus, strip_nulls};
use crate::paths;
use crate::transport::{TlsMode, TransportConfig};

const JSON: &str = "application/json";
const BODY_PREVIEW: usize = 200;

/// Everything needed to talk to one controller.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Base URL, e.g. `https://127.0.0.1:8443`. Also the `source_name` tag.
    pub url: String,
    pub user: String,
    pub pass: SecretString,
    pub verify_tls: bool,
    pub timeout: Duration,
    pub hooks: LogHooks,
}

impl ControllerConfig {
    pub fn new(url: impl Into<String>, user: impl Into<String>, pass: SecretString) -> Self {
        Self {
            url: url.into(),
            user: user.into(),
            pass,
            verify_tls: false,
            timeout: Duration::from_secs(60),
            hooks: LogHooks::default(),
        }
    }
}

/// A long-lived session with one UniFi controller.
///
/// Safe to share between tasks: the cookie jar and CSRF token are the only
/// mutable state besides the login epoch. Logins are serialized; a burst of
/// 401s triggers exactly one re-login.
pub struct Controller {
    http: reqwest::Client,
    transport: TransportConfig,
    base_url: Url,
    source_name: String,
    credentials: Credentials,
    platform: ControllerPlatform,
    hooks: LogHooks,
    csrf_token: RwLock<Option<String>>,
    server_version: RwLock<String>,
    login_lock: Mutex<()>,
    /// Bumped after every successful login.
    login_epoch: AtomicU64,
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("url", &self.source_name)
            .field("user", &self.credentials.user)
            .field("platform", &self.platform)
            .finish_non_exhaustive()
    }
}

impl Controller {
    /// Build a session without touching the network.
    ///
    /// The platform defaults to classic; call [`detect`](Self::detect) or use
    /// [`connect`](Self::connect) for the full handshake.
    pub fn new(config: ControllerConfig) -> Result<Self, Error> {
        let source_name = config.url.trim_end_matches('/').to_owned();
        if source_name.is_empty() {
            return Err(Error::InvalidConfig("controller url is empty".into()));
        }
        if config.user.is_empty() || config.pass.expose_secret().is_empty() {
            return Err(Error::InvalidConfig(format!(
                "username and password are required for {source_name}"
            )));
        }

        let base_url = Url::parse(&source_name)?;
        let transport = TransportConfig::new(TlsMode::from_verify(config.verify_tls), config.timeout);
        let http = transport.build_client()?;

        Ok(Self {
            http,
            transport,
            base_url,
            source_name,
            credentials: Credentials {
                user: config.user,
                pass: config.pass,
            },
            platform: ControllerPlatform::Classic,
            hooks: config.hooks,
            csrf_token: RwLock::new(None),
            server_version: RwLock::new(String::new()),
            login_lock: Mutex::new(()),
            login_epoch: AtomicU64::new(0),
        })
    }

    /// Detect the platform, log in, and read the server version.
    pub async fn connect(config: ControllerConfig) -> Result<Self, Error> {
        let mut controller = Self::new(config)?;
        controller.detect().await?;
        controller.login().await?;
        let status = controller.server_status().await?;
        debug!(
            url = %controller.source_name,
            version = %status.server_version,
            platform = ?controller.platform,
            "connected to controller"
        );
        Ok(controller)
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// The controller URL as configured, used to tag every record.
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn user(&self) -> &str {
        &self.credentials.user
    }

    pub fn platform(&self) -> ControllerPlatform {
        self.platform
    }

    pub fn hooks(&self) -> &LogHooks {
        &self.hooks
    }

    /// Server version recorded by the last [`server_status`](Self::server_status).
    pub fn server_version(&self) -> String {
        self.server_version
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // ── Session ──────────────────────────────────────────────────────

    /// Probe `GET /` without following redirects.
    ///
    /// UniFi OS consoles answer 200; classic controllers redirect to
    /// their login page.
    pub async fn detect(&mut self) -> Result<ControllerPlatform, Error> {
        let probe = self.transport.build_probe_client()?;
        let resp = probe.get(self.base_url.clone()).send().await?;
        self.platform = if resp.status() == StatusCode::OK {
            ControllerPlatform::UnifiOs
        } else {
            ControllerPlatform::Classic
        };
        self.hooks.debug(&format!(
            "{} is {}",
            self.source_name,
            if self.platform.is_unifi_os() {
                "a UniFi OS console (new style api)"
            } else {
                "a classic controller"
            }
        ));
        Ok(self.platform)
    }

    /// Authenticate and store the session cookie.
    pub async fn login(&self) -> Result<(), Error> {
        let _guard = self.login_lock.lock().await;
        self.login_locked().await
    }

    async fn login_locked(&self) -> Result<(), Error> {
        let url = self.url(self.platform.login_path(), false)?;
        debug!(%url, user = %self.credentials.user, "logging in");

        let body = json!({
            "username": self.credentials.user,
            "password": self.credentials.pass.expose_secret(),
            "remember": true,
        });
        let resp = self
            .http
            .post(url)
            .header(ACCEPT, JSON)
            .json(&body)
            .send()
            .await?;

        self.capture_csrf(resp.headers());
        let status = resp.status();
        drain(resp).await;

        if !status.is_success() {
            return Err(Error::Authentication {
                url: self.source_name.clone(),
                user: self.credentials.user.clone(),
                status: status.as_u16(),
            });
        }

        self.login_epoch.fetch_add(1, Ordering::AcqRel);
        debug!("login successful");
        Ok(())
    }

    /// Re-login unless another request already did since `seen_epoch`.
    async fn relogin(&self, seen_epoch: u64) -> Result<(), Error> {
        let _guard = self.login_lock.lock().await;
        if self.login_epoch.load(Ordering::Acquire) != seen_epoch {
            trace!("session already renewed by a concurrent request");
            return Ok(());
        }
        self.hooks
            .debug(&format!("session expired, re-authenticating to {}", self.source_name));
        self.login_locked().await
    }

    /// End the session.
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.url(paths::LOGOUT, true)?;
        debug!(%url, "logging out");
        let resp = self.apply_csrf(self.http.post(url).header(ACCEPT, JSON)).send().await?;
        let status = resp.status();
        drain(resp).await;
        if !status.is_success() {
            warn!(status = status.as_u16(), "logout returned non-success");
        }
        Ok(())
    }

    /// Read `/status` and record the server version.
    pub async fn server_status(&self) -> Result<ServerStatus, Error> {
        let envelope: DataEnvelope<serde_json::Value> =
            self.get_data(paths::STATUS, None).await?;
        let status = ServerStatus::from(envelope.meta);
        *self
            .server_version
            .write()
            .unwrap_or_else(PoisonError::into_inner) = status.server_version.clone();
        Ok(status)
    }

    // ── Requests ─────────────────────────────────────────────────────

    /// Fetch `path` and decode the whole reply into `T`.
    ///
    /// GET when `body` is `None`, POST with a JSON body otherwise.
    pub async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<T, Error> {
        let raw = self.get_json(path, body).await?;
        decode(path, &raw)
    }

    /// Fetch `path` and return the raw reply bytes.
    pub async fn get_json(
        &self,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Vec<u8>, Error> {
        let method = if body.is_some() { Method::POST } else { Method::GET };
        self.request(method, path, body).await
    }

    /// PUT a JSON body to `path` and decode the reply into `T`.
    pub async fn put_data<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, Error> {
        let raw = self.request(Method::PUT, path, Some(body)).await?;
        decode(path, &raw)
    }

    /// Fetch a `{meta, data}` endpoint and return `data`.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Vec<T>, Error> {
        let envelope: DataEnvelope<T> = self.get_data(path, body).await?;
        Ok(envelope.data)
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Vec<u8>, Error> {
        let epoch = self.login_epoch.load(Ordering::Acquire);
        let resp = self.send(method.clone(), path, body).await?;
        let resp = if resp.status() == StatusCode::UNAUTHORIZED {
            drain(resp).await;
            self.relogin(epoch).await?;
            let retry = self.send(method, path, body).await?;
            if retry.status() == StatusCode::UNAUTHORIZED {
                drain(retry).await;
                return Err(Error::Authentication {
                    url: self.source_name.clone(),
                    user: self.credentials.user.clone(),
                    status: StatusCode::UNAUTHORIZED.as_u16(),
                });
            }
            retry
        } else {
            resp
        };

        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            let text = String::from_utf8_lossy(&bytes);
            return Err(Error::Http {
                path: path.to_owned(),
                status: status.as_u16(),
                body: text.chars().take(BODY_PREVIEW).collect(),
            });
        }
        Ok(bytes.to_vec())
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response, Error> {
        let url = self.url(path, true)?;
        debug!(%method, %url, "controller request");

        let mut builder = self.http.request(method, url).header(ACCEPT, JSON);
        if let Some(body) = body {
            builder = builder
                .header(CONTENT_TYPE, JSON)
                .body(serde_json::to_vec(body).map_err(|e| Error::Decode {
                    path: path.to_owned(),
                    message: e.to_string(),
                })?);
        }
        let resp = self.apply_csrf(builder).send().await?;
        self.capture_csrf(resp.headers());
        Ok(resp)
    }

    // ── Helpers ──────────────────────────────────────────────────────

    /// `{base}{prefix}{path}`. `path` may carry a query string.
    fn url(&self, path: &str, prefixed: bool) -> Result<Url, Error> {
        let prefix = if prefixed { self.platform.api_prefix() } else { "" };
        Ok(Url::parse(&format!("{}{prefix}{path}", self.source_name))?)
    }

    fn capture_csrf(&self, headers: &HeaderMap) {
        let token = headers
            .get("x-updated-csrf-token")
            .or_else(|| headers.get("x-csrf-token"))
            .and_then(|v| v.to_str().ok());
        if let Some(token) = token {
            trace!("captured CSRF token");
            *self.csrf_token.write().unwrap_or_else(PoisonError::into_inner) =
                Some(token.to_owned());
        }
    }

    fn apply_csrf(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let guard = self.csrf_token.read().unwrap_or_else(PoisonError::into_inner);
        match guard.as_deref() {
            Some(token) => builder.header("X-CSRF-Token", token),
            None => builder,
        }
    }
}

/// Parse, drop `null` members, then decode into `T`.
fn decode<T: DeserializeOwned>(path: &str, raw: &[u8]) -> Result<T, Error> {
    let err = |e: serde_json::Error| Error::Decode {
        path: path.to_owned(),
        message: e.to_string(),
    };
    let mut value: serde_json::Value = serde_json::from_slice(raw).map_err(err)?;
    strip_nulls(&mut value);
    serde_json::from_value(value).map_err(err)
}

/// Read the rest of a body we are discarding so the connection goes back
/// to the pool.
async fn drain(resp: reqwest::Response) {
    if let Err(e) = resp.bytes().await {
        debug!(error = %e, "failed to drain response body");
    }
}
