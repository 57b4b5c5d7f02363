use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,polystrip=debug";

pub fn init() {
    init_with_filter(DEFAULT_FILTER);
}

/// Install the fmt subscriber, preferring `RUST_LOG` over `default_filter`.
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init_with_filter(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
