//! Subscriber setup shared by the binaries
//!
//! Logs go to stderr so a table rendered on stdout stays readable.
//! Filtering follows `RUST_LOG`, defaulting to `info`.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber
///
/// Calling this twice keeps the first subscriber.
pub fn init(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if installed.is_err() {
        tracing::debug!("Subscriber already installed");
    }
}
