//! Logging facilities for Lattice Recycler.
//!
//! Lattice Recycler uses the `tracing` crate for instrumentation. Every
//! subsystem logs under its own target so applications can filter them
//! individually. To see logs, install a subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("lattice_recycler::data_source=trace")
//!         .init();
//! }
//! ```

/// Span names used throughout Lattice Recycler for tracing.
pub mod span_names {
    /// Setup of a bound list.
    pub const SETUP: &str = "lattice_recycler::setup";
    /// List invalidation through the handle.
    pub const INVALIDATE: &str = "lattice_recycler::invalidate";
    /// Binding a view holder.
    pub const BIND: &str = "lattice_recycler::bind";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "lattice_recycler_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "lattice_recycler_core::signal";
    /// Item definition registry target.
    pub const REGISTRY: &str = "lattice_recycler::registry";
    /// Data source target.
    pub const DATA_SOURCE: &str = "lattice_recycler::data_source";
    /// Adapter bridge target.
    pub const ADAPTER: &str = "lattice_recycler::adapter";
    /// Handle target.
    pub const HANDLE: &str = "lattice_recycler::handle";
}

/// Performance span guard for profiling.
///
/// Enters an `info`-level span for the lifetime of the guard.
///
/// ```
/// use lattice_recycler_core::PerfSpan;
///
/// {
///     let _span = PerfSpan::new("bind_visible_rows");
///     // ... timed work ...
/// }
/// ```
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "lattice_recycler::perf", "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}

/// Logs an error under the core target.
#[macro_export]
macro_rules! recycler_error {
    ($($arg:tt)*) => {
        tracing::error!(target: "lattice_recycler_core", $($arg)*)
    };
}
