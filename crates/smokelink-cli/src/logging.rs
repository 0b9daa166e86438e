use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Initialize logging on stderr so JSON written to stdout stays clean.
/// Falls back to WARN if level is None or invalid; `quiet` keeps errors only.
pub fn init_logging(log_level: Option<&str>, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        log_level
            .and_then(|s| s.parse::<Level>().ok())
            .unwrap_or(Level::WARN)
    };

    FmtSubscriber::builder()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}
