//! Logging setup shared by hosts of the expense engine.

/// Tracing subscriber installation.
pub mod tracing;

pub use self::tracing::{LogFormat, init_with};

/// Initialize process-wide logging with JSON output.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    init_with(LogFormat::Json);
}
