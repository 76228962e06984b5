//! CLI error types with miette diagnostics.
//!
//! Maps config, collector and API failures into user-facing errors with
//! actionable help text and process exit codes.

use std::path::Path;

use miette::Diagnostic;
use thiserror::Error;

use unipoll_config::ConfigError;
use unipoll_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFIG: i32 = 5;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach controller at {url}")]
    #[diagnostic(
        code(unipoll::connection_failed),
        help(
            "Check that the controller is running and reachable.\n\
             Self-signed certificates need verify_tls = false."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: unipoll_api::Error,
    },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed for {user} at {url}")]
    #[diagnostic(
        code(unipoll::auth_failed),
        help(
            "Verify the user and password for this controller.\n\
             The password may come from UNIPOLL_PASSWORD, a file:// path,\n\
             the keyring entry '{user}@{url}', or the config file."
        )
    )]
    AuthFailed { url: String, user: String },

    // ── Lookup ───────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(unipoll::not_found),
        help("Run: unipoll {list_command} to see what is available")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(unipoll::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("{source}")]
    #[diagnostic(
        code(unipoll::config),
        help("Config is read from {path} and UNIPOLL_* environment variables.")
    )]
    Config {
        #[source]
        source: ConfigError,
        path: String,
    },

    // ── Collector / API ──────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(code(unipoll::collector))]
    Core(CoreError),

    #[error(transparent)]
    #[diagnostic(code(unipoll::api))]
    Api(unipoll_api::Error),

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(unipoll::json))]
    Json(#[from] serde_json::Error),
}

impl From<unipoll_api::Error> for CliError {
    fn from(err: unipoll_api::Error) -> Self {
        match err {
            unipoll_api::Error::Authentication { url, user, .. } => Self::AuthFailed { url, user },
            other => Self::Api(other),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Controller {
                url,
                source: unipoll_api::Error::Transport(e),
            } => Self::ConnectionFailed {
                url,
                source: unipoll_api::Error::Transport(e),
            },
            CoreError::Controller {
                source: unipoll_api::Error::Authentication { url, user, .. },
                ..
            } => Self::AuthFailed { url, user },
            CoreError::ControllerNotFound { url } => Self::NotFound {
                resource_type: "controller".into(),
                identifier: url,
                list_command: "sites".into(),
            },
            other => Self::Core(other),
        }
    }
}

impl CliError {
    pub fn config(source: ConfigError, path: &Path) -> Self {
        Self::Config {
            source,
            path: path.display().to_string(),
        }
    }

    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            Self::Config { .. } => exit_code::CONFIG,
            Self::Core(e) if e.is_auth_expired() => exit_code::AUTH,
            Self::Api(e) if e.is_auth_expired() => exit_code::AUTH,
            Self::Api(e) if e.is_transient() => exit_code::CONNECTION,
            Self::Core(_) | Self::Api(_) | Self::Io(_) | Self::Json(_) => exit_code::GENERAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn auth_failures_map_to_auth_exit() {
        let err = CliError::from(CoreError::Controller {
            url: "https://unifi".into(),
            source: unipoll_api::Error::Authentication {
                url: "https://unifi".into(),
                user: "poller".into(),
                status: 403,
            },
        });
        assert!(matches!(err, CliError::AuthFailed { .. }));
        assert_eq!(err.exit_code(), exit_code::AUTH);

        let expired = CliError::from(unipoll_api::Error::Authentication {
            url: "https://unifi".into(),
            user: "poller".into(),
            status: 401,
        });
        assert_eq!(expired.exit_code(), exit_code::AUTH);
    }

    #[test]
    fn unknown_controller_is_not_found() {
        let err = CliError::from(CoreError::ControllerNotFound {
            url: "https://nope".into(),
        });
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
        assert!(err.to_string().contains("https://nope"));
    }
}
