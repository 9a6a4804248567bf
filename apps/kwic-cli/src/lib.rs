//! Drivers for the snippet extractor: transcript/JSON output, request
//! resolution from flags and config, batch runs and the interactive session.

pub mod driver;
pub mod output;
pub mod session;

use tracing_subscriber::EnvFilter;

/// Logs go to stderr so stdout carries only the transcript.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "kwic_cli=debug,kwic_text=debug,kwic_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
