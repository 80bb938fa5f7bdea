use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> anyhow::Result<()> {
    // Init logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = arenda::ClientConfig::from_env();
    info!(
        target: "arenda",
        "arenda starting: base_url='{}', refresh_secs={}, timeout_secs={}",
        config.base_url,
        config.refresh_interval.as_secs(),
        config.request_timeout.as_secs()
    );

    let rt = tokio::runtime::Runtime::new()?;
    arenda::cli::run_shell(&rt, &config)
}
