use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used by the binaries when RUST_LOG is not set.
pub const DEFAULT_LOG_SETTINGS: &str = "core_smx=info,api_smx=info,tower_http=info";

/// Installs the global tracing subscriber, filtered by RUST_LOG or else by `default_log_settings`.
/// A second call leaves the first subscriber in place.
pub fn setup_logging(default_log_settings: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_log_settings));

    if tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_err()
    {
        tracing::debug!("Tracing subscriber already installed");
    }
}
