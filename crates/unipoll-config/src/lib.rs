//! Configuration for unipoll.
//!
//! A TOML file with `[defaults]` and any number of `[[controllers]]`,
//! layered under `UNIPOLL_` environment variables, resolved into
//! `unipoll_core::Target`s. Passwords come from the environment, a
//! `file://` path, the OS keyring, or plaintext, in that order.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use unipoll_api::{ControllerConfig, LogHooks};
use unipoll_core::{PollOptions, Target};

/// Environment variable that overrides every controller password.
pub const PASSWORD_ENV: &str = "UNIPOLL_PASSWORD";
/// Keyring service name; the account is `{user}@{url}`.
pub const KEYRING_SERVICE: &str = "unipoll";

const FILE_SCHEME: &str = "file://";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no password configured for {user} at {url}")]
    NoCredentials { url: String, user: String },

    #[error("failed to read password file {path}: {source}")]
    PasswordFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Durations ───────────────────────────────────────────────────────

/// `"30s"`, `"1m 30s"`, ... via humantime.
mod human_duration {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&humantime::format_duration(*d))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(d)?;
        humantime::parse_duration(&raw).map_err(D::Error::custom)
    }

    pub mod option {
        use std::time::Duration;

        use serde::{Deserialize, Deserializer, Serializer, de::Error};

        #[allow(clippy::ref_option)]
        pub fn serialize<S: Serializer>(d: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
            match d {
                Some(d) => s.collect_str(&humantime::format_duration(*d)),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
            Option::<String>::deserialize(d)?
                .map(|raw| humantime::parse_duration(&raw).map_err(D::Error::custom))
                .transpose()
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,

    /// Controllers to poll. Empty means one controller built from
    /// `[defaults]` alone.
    #[serde(default)]
    pub controllers: Vec<ControllerEntry>,
}

/// Values every controller inherits unless it overrides them.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Defaults {
    pub url: String,
    pub user: String,
    pub pass: String,
    #[serde(with = "human_duration")]
    pub interval: Duration,
    #[serde(with = "human_duration")]
    pub timeout: Duration,
    pub verify_tls: bool,
    pub sites: Vec<String>,
    pub save_sites: bool,
    pub save_dpi: bool,
    pub save_users: bool,
    pub save_networks: bool,
    pub save_rogue: bool,
    pub save_events: bool,
    pub save_alarms: bool,
    pub save_anomalies: bool,
    pub save_ids: bool,
    pub hash_pii: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            url: "https://127.0.0.1:8443".into(),
            user: "unifipoller".into(),
            pass: "unifipoller".into(),
            interval: Duration::from_secs(30),
            timeout: Duration::from_secs(60),
            verify_tls: false,
            sites: vec!["all".into()],
            save_sites: true,
            save_dpi: false,
            save_users: false,
            save_networks: false,
            save_rogue: false,
            save_events: false,
            save_alarms: false,
            save_anomalies: false,
            save_ids: false,
            hash_pii: false,
        }
    }
}

/// One `[[controllers]]` table. Unset fields fall back to `[defaults]`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ControllerEntry {
    pub url: Option<String>,
    pub user: Option<String>,
    /// Plaintext, or `file:///path/to/secret`.
    pub pass: Option<String>,
    #[serde(with = "human_duration::option", skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
    pub verify_tls: Option<bool>,
    pub sites: Option<Vec<String>>,
    pub save_sites: Option<bool>,
    pub save_dpi: Option<bool>,
    pub save_users: Option<bool>,
    pub save_networks: Option<bool>,
    pub save_rogue: Option<bool>,
    pub save_events: Option<bool>,
    pub save_alarms: Option<bool>,
    pub save_anomalies: Option<bool>,
    pub save_ids: Option<bool>,
    pub hash_pii: Option<bool>,
}

// ── Config file path ────────────────────────────────────────────────

/// Platform config path, e.g. `~/.config/unipoll/config.toml`.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "unipoll", "unipoll").map_or_else(
        || PathBuf::from("unipoll.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Layer defaults, the TOML file, then `UNIPOLL_` environment variables.
///
/// Nested keys use a double underscore: `UNIPOLL_DEFAULTS__INTERVAL=10s`.
/// A missing file is not an error.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    debug!(path = %path.display(), "loading config");

    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("UNIPOLL_").ignore(&["password", "config"]).split("__"))
        .extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Write `cfg` as TOML, creating parent directories.
pub fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(cfg)?)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve a password: `UNIPOLL_PASSWORD`, then a `file://` path, then
/// the keyring entry `{user}@{url}`, then the configured plaintext.
pub fn resolve_password(
    url: &str,
    user: &str,
    configured: Option<&str>,
) -> Result<SecretString, ConfigError> {
    // 1. Env var
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(SecretString::from(pw));
        }
    }

    // 2. Password file
    if let Some(path) = configured.and_then(|c| c.strip_prefix(FILE_SCHEME)) {
        let path = PathBuf::from(path);
        let contents = std::fs::read_to_string(&path)
            .map_err(|source| ConfigError::PasswordFile { path, source })?;
        return Ok(SecretString::from(contents.trim().to_owned()));
    }

    // 3. Keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &format!("{user}@{url}")) {
        if let Ok(pw) = entry.get_password() {
            return Ok(SecretString::from(pw));
        }
    }

    // 4. Plaintext in config
    match configured {
        Some(pw) if !pw.is_empty() => Ok(SecretString::from(pw.to_owned())),
        _ => Err(ConfigError::NoCredentials {
            url: url.into(),
            user: user.into(),
        }),
    }
}

// ── Resolution into targets ─────────────────────────────────────────

impl Config {
    /// Every controller with defaults applied, credentials resolved and
    /// values validated.
    pub fn targets(&self) -> Result<Vec<Target>, ConfigError> {
        if self.defaults.interval.is_zero() {
            return Err(ConfigError::Validation {
                field: "interval".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.controllers.is_empty() {
            return Ok(vec![self.target(&ControllerEntry::default())?]);
        }
        self.controllers.iter().map(|c| self.target(c)).collect()
    }

    fn target(&self, entry: &ControllerEntry) -> Result<Target, ConfigError> {
        let d = &self.defaults;
        let url = entry.url.clone().unwrap_or_else(|| d.url.clone());
        url::Url::parse(&url).map_err(|e| ConfigError::Validation {
            field: "url".into(),
            reason: format!("{url}: {e}"),
        })?;

        let user = entry.user.clone().unwrap_or_else(|| d.user.clone());
        if user.is_empty() {
            return Err(ConfigError::Validation {
                field: "user".into(),
                reason: format!("empty username for {url}"),
            });
        }

        let pass = resolve_password(&url, &user, entry.pass.as_deref().or(Some(d.pass.as_str())))?;
        if pass.expose_secret().is_empty() {
            return Err(ConfigError::NoCredentials { url, user });
        }

        let pick = |over: Option<bool>, default: bool| over.unwrap_or(default);
        let options = PollOptions {
            sites: entry.sites.clone().unwrap_or_else(|| d.sites.clone()),
            save_sites: pick(entry.save_sites, d.save_sites),
            save_dpi: pick(entry.save_dpi, d.save_dpi),
            save_users: pick(entry.save_users, d.save_users),
            save_networks: pick(entry.save_networks, d.save_networks),
            save_rogue: pick(entry.save_rogue, d.save_rogue),
            save_events: pick(entry.save_events, d.save_events),
            save_alarms: pick(entry.save_alarms, d.save_alarms),
            save_anomalies: pick(entry.save_anomalies, d.save_anomalies),
            save_ids: pick(entry.save_ids, d.save_ids),
            hash_pii: pick(entry.hash_pii, d.hash_pii),
        };

        let controller = ControllerConfig {
            url,
            user,
            pass,
            verify_tls: pick(entry.verify_tls, d.verify_tls),
            timeout: entry.timeout.unwrap_or(d.timeout),
            hooks: LogHooks::default(),
        };
        Ok(Target::new(controller, options))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use figment::Jail;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_without_file() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let cfg = load_config(Some(Path::new("missing.toml"))).unwrap();
            assert_eq!(cfg.defaults.interval, Duration::from_secs(30));
            assert_eq!(cfg.defaults.sites, ["all"]);

            let targets = cfg.targets().unwrap();
            assert_eq!(targets.len(), 1);
            assert_eq!(targets[0].controller.url, "https://127.0.0.1:8443");
            assert_eq!(targets[0].controller.user, "unifipoller");
            assert!(targets[0].options.save_sites);
            Ok(())
        });
    }

    #[test]
    fn file_then_env_layering() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file(
                "unipoll.toml",
                r#"
                [defaults]
                interval = "2m"
                save_dpi = true

                [[controllers]]
                url = "https://unifi.lan"
                user = "poller"
                pass = "s3cret"
                sites = ["default"]

                [[controllers]]
                url = "https://remote:8443"
                user = "poller"
                pass = "other"
                timeout = "5s"
                save_dpi = false
                "#,
            )?;
            jail.set_env("UNIPOLL_DEFAULTS__INTERVAL", "45s");

            let cfg = load_config(Some(Path::new("unipoll.toml"))).unwrap();
            assert_eq!(cfg.defaults.interval, Duration::from_secs(45));

            let targets = cfg.targets().unwrap();
            assert_eq!(targets.len(), 2);
            assert_eq!(targets[0].options.sites, ["default"]);
            assert!(targets[0].options.save_dpi);
            assert_eq!(targets[0].controller.timeout, Duration::from_secs(60));
            assert!(!targets[1].options.save_dpi);
            assert_eq!(targets[1].controller.timeout, Duration::from_secs(5));
            assert_eq!(targets[1].controller.pass.expose_secret(), "other");
            Ok(())
        });
    }

    #[test]
    fn password_env_wins() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env(PASSWORD_ENV, "from-env");
            let pw = resolve_password("https://h", "u", Some("plain")).unwrap();
            assert_eq!(pw.expose_secret(), "from-env");
            Ok(())
        });
    }

    #[test]
    fn password_file_is_trimmed() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("pw");
            std::fs::write(&path, "  hidden\n").unwrap();

            let configured = format!("file://{}", path.display());
            let pw = resolve_password("https://h", "u", Some(&configured)).unwrap();
            assert_eq!(pw.expose_secret(), "hidden");

            let missing = format!("file://{}", dir.path().join("nope").display());
            assert!(matches!(
                resolve_password("https://h", "u", Some(&missing)),
                Err(ConfigError::PasswordFile { .. })
            ));
            Ok(())
        });
    }

    #[test]
    fn invalid_values_are_rejected() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let mut cfg = Config::default();
            cfg.controllers.push(ControllerEntry {
                url: Some("not a url".into()),
                ..ControllerEntry::default()
            });
            assert!(matches!(
                cfg.targets(),
                Err(ConfigError::Validation { field, .. }) if field == "url"
            ));

            let mut cfg = Config::default();
            cfg.defaults.interval = Duration::ZERO;
            assert!(matches!(cfg.targets(), Err(ConfigError::Validation { .. })));
            Ok(())
        });
    }

    #[test]
    fn save_round_trips_through_load() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let mut cfg = Config::default();
            cfg.defaults.interval = Duration::from_secs(90);
            cfg.controllers.push(ControllerEntry {
                url: Some("https://unifi.lan".into()),
                timeout: Some(Duration::from_secs(10)),
                ..ControllerEntry::default()
            });
            save_config(&cfg, Path::new("nested/unipoll.toml")).unwrap();

            let loaded = load_config(Some(Path::new("nested/unipoll.toml"))).unwrap();
            assert_eq!(loaded.defaults.interval, Duration::from_secs(90));
            assert_eq!(loaded.controllers[0].timeout, Some(Duration::from_secs(10)));
            Ok(())
        });
    }
}
