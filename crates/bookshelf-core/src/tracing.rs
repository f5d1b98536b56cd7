use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset: info-level for the catalog
/// service and the shared Bookshelf crates, warn for everything else.
const DEFAULT_FILTER: &str = "warn,bookshelf_catalog=info,bookshelf_core=info";

/// Initialize structured JSON logging to stdout for a Bookshelf service.
/// Call once from `main`; the filter comes from `RUST_LOG` when set and
/// falls back to [`DEFAULT_FILTER`] otherwise.
///
/// Safe to call more than once — later calls are silently ignored, which
/// keeps test binaries that start several components from panicking.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json())
        .try_init();
}
