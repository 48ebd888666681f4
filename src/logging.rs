use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `IDIOM_LOG=idiom=debug`.
pub const LOG_ENV: &str = "IDIOM_LOG";
const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber. Safe to call more than once.
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
