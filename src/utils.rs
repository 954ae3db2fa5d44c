/// Initializes a `tracing` subscriber with an environment filter.
///
/// Intended for binaries embedding this crate which don't set up their own
/// subscriber. Defaults to `info` when `RUST_LOG` is unset.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init()?;

    Ok(())
}
