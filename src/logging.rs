//! Tracing subscriber setup for the command-line tool.

use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Default filter directive for a verbosity count.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "menu_builder=info",
        1 => "menu_builder=debug",
        _ => "menu_builder=trace",
    }
}

/// Initialize tracing. `RUST_LOG` takes precedence over the verbosity count.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose >= 2)
        .with_line_number(verbose >= 2)
        .with_writer(std::io::stderr)
        .try_init();

    debug!(verbose, "logging initialized");
}
