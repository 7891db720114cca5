pub use tracing::{debug, error, info, instrument, span, warn, Level};

pub fn init() {
  tracing_subscriber::fmt::init();
}

/// Installs the fmt subscriber with `filter` as the directive set,
/// ignoring whatever `RUST_LOG` holds.
pub fn init_env_override(filter: &str) {
  use tracing_subscriber::EnvFilter;

  #[cfg(debug_assertions)]
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::new(filter))
    .init();

  #[cfg(not(debug_assertions))]
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::new(filter))
    .with_ansi(false)
    .init();
}
