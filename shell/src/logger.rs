//! Configures a default `tracing` subscriber for shells that don't bring
//! their own log routing.

use time::macros::format_description;
use tracing_subscriber::fmt::time::UtcTime;

use crate::Log;

/// Installs a global `tracing` subscriber that writes to stderr.
///
/// Shells that already route logs somewhere (a log window, a file, etc) should
/// skip this and install their own subscriber instead; the spectator crates
/// only ever emit through `tracing` and don't care who is listening.
pub fn init() {
    let timer = UtcTime::new(format_description!(
        "[hour]:[minute]:[second].[subsecond digits:3]"
    ));

    let result = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_timer(timer)
        .with_writer(std::io::stderr)
        .try_init();

    if result.is_err() {
        tracing::warn!(
            target: Log::General,
            "Unable to install tracing subscriber, one is already set"
        );
    }
}
