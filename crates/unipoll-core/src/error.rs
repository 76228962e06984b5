// ── Core error types ──
//
// Errors surfaced by the collector. Controller failures keep the
// underlying `unipoll_api::Error` so callers can still classify them.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    // ── Controller errors ────────────────────────────────────────────
    #[error("Controller {url}: {source}")]
    Controller {
        url: String,
        #[source]
        source: unipoll_api::Error,
    },

    #[error(transparent)]
    Api(#[from] unipoll_api::Error),

    // ── Lookup errors ────────────────────────────────────────────────
    #[error("No controller configured with url {url}")]
    ControllerNotFound { url: String },

    #[error("No controllers configured")]
    NoControllers,
}

impl CoreError {
    pub(crate) fn controller(url: &str, source: impl Into<unipoll_api::Error>) -> Self {
        Self::Controller {
            url: url.to_owned(),
            source: source.into(),
        }
    }

    /// The API error underneath, if any.
    pub fn api_error(&self) -> Option<&unipoll_api::Error> {
        match self {
            Self::Controller { source, .. } | Self::Api(source) => Some(source),
            _ => None,
        }
    }

    /// Whether a fresh login might clear this error.
    pub fn is_auth_expired(&self) -> bool {
        self.api_error().is_some_and(unipoll_api::Error::is_auth_expired)
    }
}
