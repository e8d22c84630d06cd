//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::ops::Range;
use std::sync::Arc;

use lattice_recycler::prelude::*;
use parking_lot::Mutex;

pub const PERSON_LAYOUT: ResourceId = ResourceId(0x7f0b_0001);
pub const HEADER_LAYOUT: ResourceId = ResourceId(0x7f0b_0002);

/// A list view host that records what it is asked to do.
#[derive(Default)]
pub struct RecordingHost {
    pub changes: Mutex<Vec<ListChange>>,
    pub inflated: Mutex<Vec<ResourceId>>,
    pub visible: Mutex<Option<Range<usize>>>,
}

impl RecordingHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn take_changes(&self) -> Vec<ListChange> {
        std::mem::take(&mut *self.changes.lock())
    }

    pub fn set_visible(&self, range: Range<usize>) {
        *self.visible.lock() = Some(range);
    }
}

impl ListViewHost for RecordingHost {
    fn inflate(&self, layout: ResourceId) -> View {
        self.inflated.lock().push(layout);
        Box::new(layout)
    }

    fn notify(&self, change: &ListChange) {
        self.changes.lock().push(*change);
    }

    fn visible_range(&self) -> Option<Range<usize>> {
        self.visible.lock().clone()
    }
}

/// An empty view that records every visibility it is given.
#[derive(Default)]
pub struct RecordingEmptyView {
    pub states: Mutex<Vec<bool>>,
}

impl RecordingEmptyView {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn is_visible(&self) -> Option<bool> {
        self.states.lock().last().copied()
    }
}

impl EmptyView for RecordingEmptyView {
    fn set_visible(&self, visible: bool) {
        self.states.lock().push(visible);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: u64,
    pub name: String,
}

impl Person {
    pub fn new(id: u64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub title: String,
}

impl Header {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct PersonHolder {
    pub layout: Option<ResourceId>,
    pub name: String,
    pub bound_index: Option<usize>,
    pub recycled: usize,
}

#[derive(Debug, Default)]
pub struct HeaderHolder {
    pub title: String,
}

pub fn person_definition() -> ItemDefinition<Person, PersonHolder> {
    ItemDefinition::new(
        PERSON_LAYOUT,
        |view: View| PersonHolder {
            layout: view.downcast_ref::<ResourceId>().copied(),
            ..PersonHolder::default()
        },
        |holder: &mut PersonHolder, scope: &ItemScope<'_, Person>| {
            holder.name = scope.item().name.clone();
            holder.bound_index = Some(scope.index());
        },
    )
}

pub fn header_definition() -> ItemDefinition<Header, HeaderHolder> {
    ItemDefinition::new(
        HEADER_LAYOUT,
        |_view: View| HeaderHolder::default(),
        |holder: &mut HeaderHolder, scope: &ItemScope<'_, Header>| {
            holder.title = scope.item().title.clone();
        },
    )
}

/// A bound list with the person definition and an empty view.
pub struct Fixture {
    pub host: Arc<RecordingHost>,
    pub empty_view: Arc<RecordingEmptyView>,
    pub data_source: DataSource,
    pub handle: RecyclerHandle,
}

impl Fixture {
    pub fn new(definition: ItemDefinition<Person, PersonHolder>) -> Self {
        Self::with_data_source(DataSource::new(), definition)
    }

    pub fn with_data_source(
        data_source: DataSource,
        definition: ItemDefinition<Person, PersonHolder>,
    ) -> Self {
        let host = RecordingHost::new();
        let empty_view = RecordingEmptyView::new();
        let handle = RecyclerSetup::new(host.clone())
            .with_data_source(data_source.clone())
            .with_empty_view(empty_view.clone())
            .with_item(definition)
            .with_item(header_definition())
            .build()
            .expect("setup should succeed");
        Self {
            host,
            empty_view,
            data_source,
            handle,
        }
    }

    pub fn adapter(&self) -> &DefinitionAdapter {
        self.handle.adapter()
    }

    /// Creates and binds a holder for `position`.
    pub fn bound_holder(&self, position: usize) -> ViewHolder {
        let adapter = self.adapter();
        let view_type = adapter.view_type_for_position(position).unwrap();
        let mut holder = adapter.create_view_holder(view_type).unwrap();
        adapter.bind_view_holder(&mut holder, position).unwrap();
        holder
    }
}

/// Collects values pushed from callbacks.
pub fn recorder<T>() -> Arc<Mutex<Vec<T>>> {
    Arc::new(Mutex::new(Vec::new()))
}
