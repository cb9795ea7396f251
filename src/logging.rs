//! Tracing subscriber setup
//!
//! The library only emits `tracing` events. Binaries and tests that want to
//! see them call [`init`] once at startup; `RUST_LOG` overrides the default
//! filter.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info,node_descriptor=debug";

/// Install the global subscriber
///
/// Returns `false` if a global subscriber was already set, which leaves the
/// existing one in place.
pub fn init() -> bool {
    init_with_filter(DEFAULT_FILTER)
}

/// Install the global subscriber with a fallback filter directive
pub fn init_with_filter(default_filter: &str) -> bool {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_harmless() {
        init();
        assert!(!init());
    }
}
