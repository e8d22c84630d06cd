//! Core systems for Lattice Recycler.
//!
//! This crate provides the foundational pieces the list-binding layer is
//! built on:
//!
//! - **Signal/Slot System**: Type-safe, synchronous change notification
//! - **Thread Affinity**: Tokens that pin an object to its UI thread
//! - **Logging**: Tracing targets and span names for every subsystem
//!
//! # Signal/Slot Example
//!
//! ```
//! use lattice_recycler_core::Signal;
//!
//! let count_changed = Signal::<usize>::new();
//!
//! let conn_id = count_changed.connect(|count| {
//!     println!("List now holds {} items", count);
//! });
//!
//! count_changed.emit(3);
//! count_changed.disconnect(conn_id);
//! ```
//!
//! # Thread Affinity Example
//!
//! ```
//! use lattice_recycler_core::ThreadAffinity;
//!
//! let affinity = ThreadAffinity::current();
//! affinity.assert_same_thread();
//! ```

pub mod logging;
pub mod signal;
pub mod thread_check;

pub use logging::{span_names, targets, PerfSpan};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use thread_check::ThreadAffinity;
