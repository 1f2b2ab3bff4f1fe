//! Logger setup for the command line driver and tests.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Default `env_logger` filter: dependencies at `warn`, this crate at `level`.
///
/// # Examples
/// ```
/// use log::LevelFilter;
/// use locomotor::logging::default_filter;
/// assert_eq!(default_filter(LevelFilter::Debug), "warn,locomotor=debug");
/// ```
#[must_use]
pub fn default_filter(level: LevelFilter) -> String {
    format!("warn,{}={}", env!("CARGO_CRATE_NAME"), level.to_string().to_lowercase())
}

/// Initializes the global logger.
///
/// When `verbose` is `true`, per-tick locomotion decisions logged at debug
/// level are printed. Otherwise only info level and above are shown. Bevy
/// and other dependencies stay at `warn` either way. `RUST_LOG` takes
/// precedence, e.g. `RUST_LOG=locomotor=trace`.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = Builder::from_env(Env::default().default_filter_or(default_filter(level)));
    builder.format_timestamp(None);

    // A logger may already be installed by an earlier test or an embedding
    // application; keep that one.
    if builder.try_init().is_err() {
        log::debug!("logger already initialised");
    }
}
