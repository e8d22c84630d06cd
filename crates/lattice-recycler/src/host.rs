//! Traits for the external collaborators the binding layer drives.
//!
//! The list view host owns rendering, layout and view inflation; the
//! binding layer only asks it to inflate layouts and tells it which rows
//! changed. The host in turn calls back into
//! [`DefinitionAdapter`](crate::DefinitionAdapter).

use std::ops::Range;

use crate::data_source::ListChange;
use crate::item::{ResourceId, View};

/// The platform list widget a handle is bound to.
pub trait ListViewHost: Send + Sync {
    /// Inflates a layout into a view.
    fn inflate(&self, layout: ResourceId) -> View;

    /// Requests re-layout for the rows affected by a change.
    fn notify(&self, change: &ListChange);

    /// The range of positions currently on screen, if the host knows it.
    fn visible_range(&self) -> Option<Range<usize>> {
        None
    }
}

/// A UI element shown in place of the list while it is empty.
pub trait EmptyView: Send + Sync {
    /// Shows or hides the element.
    fn set_visible(&self, visible: bool);
}
