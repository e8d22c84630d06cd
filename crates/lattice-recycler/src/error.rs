//! Error types for the list-binding layer.
//!
//! Every variant reports a caller contract violation, never a transient
//! condition, so nothing in this crate retries. Thread-affinity violations
//! are not represented here: they panic (see
//! [`ThreadAffinity`](lattice_recycler_core::ThreadAffinity)).

use crate::registry::ViewType;

/// Result type alias for list-binding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or driving a bound list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An item type or view type is already bound to a different definition.
    #[error("Item type '{item_type}' or view type {view_type} is already registered to another definition")]
    DuplicateRegistration {
        item_type: &'static str,
        view_type: ViewType,
    },

    /// The item type was never registered.
    #[error("Didn't find a view type for item type '{item_type}'")]
    UnknownType { item_type: &'static str },

    /// The view type was never registered.
    #[error("Unable to find an item definition for view type {0}")]
    UnknownViewType(ViewType),

    /// The data source (or adapter) is already attached.
    #[error("Already attached; detach before attaching again")]
    AlreadyAttached,

    /// The operation requires an attached data source (or adapter).
    #[error("Not attached; the data source must be attached to a handle")]
    NotAttached,

    /// An index was outside the valid range.
    #[error("Index {index} is out of range for a data source of size {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A type-erased definition received an item or holder of another type.
    #[error("Definition for '{expected}' was given a value of type '{found}'")]
    DefinitionMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Every view type is already registered.
    #[error("No unused view type is left in the registry")]
    ViewTypesExhausted,

    /// `RecyclerSetup::build` was called without a data source.
    #[error("Must provide a data source with with_data_source()")]
    MissingDataSource,
}

impl Error {
    /// Create an index error.
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Create a definition mismatch error.
    pub fn mismatch(expected: &'static str, found: &'static str) -> Self {
        Self::DefinitionMismatch { expected, found }
    }

    /// Returns `true` for errors caused by the attach/detach lifecycle.
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Self::AlreadyAttached | Self::NotAttached)
    }
}
