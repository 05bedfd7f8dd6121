use anyhow::Context as _;

/// Installs a stderr subscriber filtered by `RUST_LOG` (default `info`).
///
/// Library code only emits `tracing` events; embedding applications bring
/// their own subscriber.
pub fn init() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
        .context("build log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("initialize tracing subscriber: {err}"))?;

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "bindery logging ready");
    Ok(())
}
