use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `--verbose` selects debug output and
/// the default shows warnings only. Safe to call more than once.
pub fn init(verbose: bool) {
    let default_level = if verbose { "saw_rank=debug" } else { "saw_rank=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
