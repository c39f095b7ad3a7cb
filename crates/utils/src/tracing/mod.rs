use scoped_core::{DEFAULT_LOG_FILTER, SCOPED_LOG_VAR};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Re-export tracing macros for convenience
pub use tracing::{debug, error, info, instrument, span, trace, warn, Level, Span};

/// Initialize the tracing system
///
/// The filter is read from `SCOPED_LOG` (same syntax as `RUST_LOG`) and
/// falls back to `info`. Output goes to stderr so stdout stays reserved for
/// the demo commentary and JSON reports.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = EnvFilter::try_from_env(SCOPED_LOG_VAR)
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(is_tty())
        .compact()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Check if we're running in a TTY environment
fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}

/// Create a span covering one scope, from acquisition to release
pub fn scope_span(target: &str, form: &str) -> Span {
    span!(Level::DEBUG, "scope", resource = %target, form = %form)
}

/// Emit a structured event once a resource has been acquired
pub fn scope_entered(target: &str, mode: &str) {
    debug!(target_path = %target, mode = %mode, "scope_entered");
}

/// Emit a structured event once a resource has been released
pub fn scope_released(target: &str, body_failed: bool) {
    if body_failed {
        debug!(target_path = %target, "scope_released_after_failure");
    } else {
        debug!(target_path = %target, "scope_released");
    }
}

/// Emit a structured event when a body-of-work failure is swallowed
pub fn failure_suppressed(target: &str, failure: &str) {
    info!(target_path = %target, failure = %failure, "failure_suppressed");
}

/// Emit a structured event when a release failure hides a body failure
pub fn failure_masked(target: &str, failure: &str) {
    warn!(target_path = %target, failure = %failure, "failure_masked_by_release");
}
