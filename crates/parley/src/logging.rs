//! Logging setup and raw traffic logging.

use parley_transport::RawHooks;
use tracing_subscriber::{EnvFilter, fmt};

/// Installs a `tracing` subscriber for applications that don't bring
/// their own.
///
/// `RUST_LOG` wins when set. Otherwise the filter is `info`, or
/// `info,parley=debug` when `debug` is on so raw traffic shows up.
/// Calling this more than once is harmless.
pub fn init(debug: bool) {
    let default = if debug { "info,parley=debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt().with_env_filter(filter).with_target(debug).try_init();
}

/// Logs raw protocol traffic when enabled.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawLog {
    enabled: bool,
}

impl RawLog {
    pub(crate) fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub(crate) fn input(self, data: &str) {
        if self.enabled {
            tracing::debug!(target: "parley::raw", "RECV: {data}");
        }
    }

    pub(crate) fn output(self, data: &str) {
        if self.enabled {
            tracing::debug!(target: "parley::raw", "SENT: {data}");
        }
    }

    /// Hooks for the engine that feed into this logger.
    pub(crate) fn hooks(self) -> RawHooks {
        RawHooks::new(move |data| self.input(data), move |data| self.output(data))
    }
}
