//! Poll orchestration on top of `unipoll-api`.
//!
//! - **[`UnifiCollector`]** polls every configured controller concurrently
//!   and merges the results. It implements [`Collector`], the interface
//!   sinks consume.
//! - **[`Metrics`] / [`Events`]** are the per-poll snapshots.
//! - **[`DpiTotals`]** folds site DPI into per-controller, per-site totals
//!   keyed by application and category name.

pub mod augment;
pub mod collector;
pub mod dpi;
pub mod error;
pub mod filter;
pub mod options;
pub mod snapshot;

pub use collector::{Collector, UnifiCollector, poll_events, poll_metrics};
pub use dpi::{DpiCounters, DpiTotals};
pub use error::CoreError;
pub use filter::{Filter, filter_sites};
pub use options::{PollOptions, Target};
pub use snapshot::{Events, Metrics};
