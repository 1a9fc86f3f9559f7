//! Tracing setup: subscriber initialization plus span and event helpers.

pub mod events;
pub mod spans;

use std::sync::Once;

use equinet_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the configured log filter.
pub const LOG_ENV_VAR: &str = "EQUINET_LOG";

static INIT: Once = Once::new();

/// Initialize the global subscriber from config.
///
/// `EQUINET_LOG` takes precedence over `config.log_level`. Idempotent: only
/// the first call installs a subscriber, and an already-installed foreign
/// subscriber is left in place.
pub fn init_tracing(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
        install(filter, config.json);
    });
}

/// Initialize tracing with a custom filter string (for testing or embedding).
pub fn init_tracing_with_filter(filter: &str) {
    INIT.call_once(|| install(EnvFilter::new(filter), false));
}

fn install(filter: EnvFilter, json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);
    let _ = if json {
        builder
            .with_file(true)
            .with_line_number(true)
            .json()
            .try_init()
    } else {
        builder.try_init()
    };
}
