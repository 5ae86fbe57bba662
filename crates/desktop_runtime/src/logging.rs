//! Process-wide `tracing` subscriber setup.

use tracing::Level;

/// Installs a compact stderr formatter capped at `level`.
///
/// Safe to call more than once; later calls leave the first subscriber in place and return
/// `false`.
pub fn init(level: Level) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_names(false)
        .compact()
        .try_init()
        .is_ok()
}
