use eyre::{
    Context as _,
    Result,
};
use tracing_subscriber::{
    fmt,
    prelude::*,
    EnvFilter,
};

const DEBUG_DIRECTIVES: &str = "fc_metrics=debug,fc_metrics_gatherer=debug,fc_metrics_config=debug,warn";

/// Logs go to stderr, stdout carries only metric lines. `RUST_LOG` takes precedence over `--debug`.
pub fn log_init(debug: bool) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if debug => EnvFilter::try_new(DEBUG_DIRECTIVES).context("Invalid log directives")?,
        Err(_) => EnvFilter::new("warn"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(debug))
        .with(tracing_error::ErrorLayer::default())
        .try_init()
        .context("Failed to initialize tracing subscriber")
}
