//! Process-wide logging setup shared by the advance-api binaries and tests.

/// Initialize tracing with the default filter (`info`, request traces at `debug`;
/// overridable via `RUST_LOG`).
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::DEFAULT_FILTER);
}

/// Tracing subscriber configuration (filters, formatting).
pub mod tracing;
