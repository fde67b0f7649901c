use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Overrides the level chosen from `--verbose`, e.g. `COVREPORT_LOG=covreport=trace`.
pub const LOG_ENV: &str = "COVREPORT_LOG";

pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    }
}

/// Installs the global fmt subscriber on stdout. A second call is a no-op.
pub fn init(verbose: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level(verbose).into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
