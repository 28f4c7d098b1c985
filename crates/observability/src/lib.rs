//! Process-wide tracing setup shared by the binaries.

/// Initialize tracing with the default filter (`info`, overridable via `RUST_LOG`).
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env());
}

/// Tracing configuration (filters, output format).
pub mod tracing;
