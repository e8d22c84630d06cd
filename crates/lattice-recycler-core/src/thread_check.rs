//! Thread affinity verification for Lattice Recycler.
//!
//! Everything that touches a bound list (data source mutation, adapter
//! invalidation, empty-view toggling, item callbacks) must run on the thread
//! that owns the list view host. Rather than consulting a process-wide
//! "main thread", each handle carries a [`ThreadAffinity`] token captured
//! when it is set up, and asserts against it.
//!
//! Violations are programmer errors: the assertions always run, in debug and
//! release builds alike, and panic with a descriptive message.
//!
//! # Usage
//!
//! ```
//! use lattice_recycler_core::thread_check::ThreadAffinity;
//!
//! struct ListState {
//!     affinity: ThreadAffinity,
//!     rows: std::cell::Cell<usize>,
//! }
//!
//! impl ListState {
//!     fn new() -> Self {
//!         Self {
//!             affinity: ThreadAffinity::current(),
//!             rows: std::cell::Cell::new(0),
//!         }
//!     }
//!
//!     fn set_rows(&self, rows: usize) {
//!         self.affinity.assert_same_thread();
//!         self.rows.set(rows);
//!     }
//! }
//! ```

use std::thread::{Thread, ThreadId};

/// Thread affinity token.
///
/// Records the thread an object is bound to and verifies that subsequent
/// operations occur on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadAffinity {
    thread_id: ThreadId,
}

impl Default for ThreadAffinity {
    fn default() -> Self {
        Self::current()
    }
}

impl ThreadAffinity {
    /// Create an affinity token for the current thread.
    #[inline]
    pub fn current() -> Self {
        Self {
            thread_id: std::thread::current().id(),
        }
    }

    /// Create an affinity token for a specific thread.
    ///
    /// Useful when a list is configured on a worker thread but will be
    /// driven from the UI thread.
    pub fn of(thread: &Thread) -> Self {
        Self {
            thread_id: thread.id(),
        }
    }

    /// Get the thread ID this affinity is bound to.
    #[inline]
    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// Check if the current thread matches this affinity.
    #[inline]
    pub fn is_same_thread(&self) -> bool {
        std::thread::current().id() == self.thread_id
    }

    /// Assert that we are on the bound thread.
    ///
    /// # Panics
    ///
    /// Panics with a descriptive message if called from a different thread.
    #[inline]
    #[track_caller]
    pub fn assert_same_thread(&self) {
        self.assert_same_thread_with_msg("list accessed from a thread other than its UI thread")
    }

    /// Assert that we are on the bound thread, with a custom message.
    ///
    /// # Panics
    ///
    /// Panics if called from a different thread.
    #[track_caller]
    pub fn assert_same_thread_with_msg(&self, msg: &str) {
        if !self.is_same_thread() {
            self.panic_wrong_thread(msg);
        }
    }

    #[cold]
    #[inline(never)]
    #[track_caller]
    fn panic_wrong_thread(&self, msg: &str) -> ! {
        let current = std::thread::current();
        let current_name = current.name().unwrap_or("<unnamed>");
        let current_id = current.id();
        let location = std::panic::Location::caller();
        crate::recycler_error!(
            bound = ?self.thread_id,
            current = ?current_id,
            %location,
            "{msg}"
        );

        panic!(
            "\n\
            ══════════════════════════════════════════════════════════════════════\n\
            THREAD AFFINITY VIOLATION\n\
            ══════════════════════════════════════════════════════════════════════\n\
            \n\
            {msg}\n\
            \n\
            Location: {location}\n\
            Bound UI thread: {:?}\n\
            Current thread: \"{current_name}\" (ID: {current_id:?})\n\
            \n\
            Data source mutation, list invalidation and empty-view updates\n\
            must happen on the thread that owns the list view host.\n\
            \n\
            POSSIBLE SOLUTIONS:\n\
            \n\
            1. Deliver the result to the UI thread and mutate there\n\
            2. Configure the handle with the correct thread via\n\
               RecyclerSetup::on_thread(ThreadAffinity::of(&ui_thread))\n\
            \n\
            ══════════════════════════════════════════════════════════════════════",
            self.thread_id
        )
    }
}
