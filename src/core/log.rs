// Logging initialization for the server binary
use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

/// `RUST_LOG` wins when it holds valid directives; otherwise the crate and
/// its HTTP layer log at info (debug when verbose) and everything else at warn.
fn build_filter(verbose: bool, env_directives: Option<&str>) -> EnvFilter {
    env_directives
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| {
            let level = if verbose { "debug" } else { "info" };
            EnvFilter::new(format!("warn,cotacao={level},tower_http={level}"))
        })
}

pub fn init_logging(verbose: bool) {
    let env_directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(verbose, env_directives.as_deref());

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}
