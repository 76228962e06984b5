// Pluggable debug/error log sinks.
//
// Decoders and the dispatcher take these explicitly so they never reach
// for a global logger. The defaults forward to `tracing`.

use std::fmt;
use std::sync::Arc;

/// A log sink: receives one fully formatted message.
pub type LogFn = Arc<dyn Fn(&str) + Send + Sync>;

/// The two log sinks a [`Controller`](crate::Controller) calls into.
#[derive(Clone)]
pub struct LogHooks {
    pub debug: LogFn,
    pub error: LogFn,
}

impl LogHooks {
    pub fn new(debug: LogFn, error: LogFn) -> Self {
        Self { debug, error }
    }

    /// Discard everything.
    pub fn silent() -> Self {
        Self {
            debug: Arc::new(|_| {}),
            error: Arc::new(|_| {}),
        }
    }

    pub fn debug(&self, msg: &str) {
        (self.debug)(msg);
    }

    pub fn error(&self, msg: &str) {
        (self.error)(msg);
    }
}

impl Default for LogHooks {
    fn default() -> Self {
        Self {
            debug: Arc::new(|msg| tracing::debug!(target: "unipoll_api", "{msg}")),
            error: Arc::new(|msg| tracing::error!(target: "unipoll_api", "{msg}")),
        }
    }
}

impl fmt::Debug for LogHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogHooks").finish_non_exhaustive()
    }
}
