//! Builder that configures and binds a list in one expression.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use lattice_recycler::prelude::*;
//!
//! struct Host;
//!
//! impl ListViewHost for Host {
//!     fn inflate(&self, _layout: ResourceId) -> View {
//!         Box::new(())
//!     }
//!
//!     fn notify(&self, _change: &ListChange) {}
//! }
//!
//! #[derive(Debug, PartialEq)]
//! struct Person {
//!     name: String,
//! }
//!
//! struct PersonHolder {
//!     name: String,
//! }
//!
//! let data_source = DataSource::new();
//! let handle = RecyclerSetup::new(Arc::new(Host))
//!     .with_data_source(data_source.clone())
//!     .with_item(
//!         ItemDefinition::<Person, PersonHolder>::new(
//!             ResourceId(1),
//!             |_view| PersonHolder { name: String::new() },
//!             |holder, scope| holder.name = scope.item().name.clone(),
//!         )
//!         .on_click(|scope| println!("Clicked {}", scope.item().name)),
//!     )
//!     .build()
//!     .unwrap();
//!
//! data_source.add(Person { name: "Ada".into() }).unwrap();
//! assert_eq!(handle.adapter().item_count(), 1);
//! ```

use std::fmt;
use std::sync::Arc;

use lattice_recycler_core::{span_names, targets, PerfSpan, ThreadAffinity};

use crate::data_source::DataSource;
use crate::definition::{Definition, ItemDefinition};
use crate::error::{Error, Result};
use crate::handle::RecyclerHandle;
use crate::host::{EmptyView, ListViewHost};
use crate::item::Item;
use crate::registry::{ItemRegistry, ViewType};

/// Configures a list and produces an attached [`RecyclerHandle`].
///
/// Item types are assigned view types in the order they are added. The
/// first registration error is kept and returned by [`build`](Self::build).
pub struct RecyclerSetup {
    host: Arc<dyn ListViewHost>,
    data_source: Option<DataSource>,
    empty_view: Option<Arc<dyn EmptyView>>,
    registry: ItemRegistry,
    affinity: ThreadAffinity,
    error: Option<Error>,
}

impl RecyclerSetup {
    /// Starts configuring a list shown by `host`.
    ///
    /// The list is bound to the current thread unless
    /// [`on_thread`](Self::on_thread) says otherwise.
    pub fn new(host: Arc<dyn ListViewHost>) -> Self {
        Self {
            host,
            data_source: None,
            empty_view: None,
            registry: ItemRegistry::new(),
            affinity: ThreadAffinity::current(),
            error: None,
        }
    }

    /// Sets the data source. Required.
    pub fn with_data_source(mut self, data_source: DataSource) -> Self {
        self.data_source = Some(data_source);
        self
    }

    /// Sets the view shown while the list is empty.
    pub fn with_empty_view(mut self, empty_view: Arc<dyn EmptyView>) -> Self {
        self.empty_view = Some(empty_view);
        self
    }

    /// Registers a definition under the next free view type.
    pub fn with_item<I, VH>(self, definition: ItemDefinition<I, VH>) -> Self
    where
        I: Item,
        VH: Send + Sync + 'static,
    {
        self.with_definition(Arc::new(definition))
    }

    /// Registers a shared definition under the next free view type.
    ///
    /// Adding the same `Arc` again is a no-op.
    pub fn with_definition(mut self, definition: Arc<dyn Definition>) -> Self {
        let view_type = match self.registry.view_type_for_item_type(definition.item_type()) {
            Ok(view_type) => Some(view_type),
            Err(_) => self.registry.next_view_type(),
        };
        match view_type {
            Some(view_type) => self.register(view_type, definition),
            None => self.fail(Error::ViewTypesExhausted),
        }
        self
    }

    /// Registers a shared definition under an explicit view type.
    pub fn with_definition_at(mut self, view_type: ViewType, definition: Arc<dyn Definition>) -> Self {
        self.register(view_type, definition);
        self
    }

    /// Starts from a pre-populated registry. Definitions added afterwards
    /// continue its view type numbering.
    pub fn with_registry(mut self, registry: ItemRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Binds the list to another thread than the one building it.
    pub fn on_thread(mut self, affinity: ThreadAffinity) -> Self {
        self.affinity = affinity;
        self
    }

    fn register(&mut self, view_type: ViewType, definition: Arc<dyn Definition>) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.registry.register(view_type, definition) {
            self.fail(err);
        }
    }

    fn fail(&mut self, err: Error) {
        if self.error.is_none() {
            tracing::warn!(target: targets::REGISTRY, %err, "registration failed during setup");
            self.error = Some(err);
        }
    }

    /// Creates the handle and attaches the data source.
    ///
    /// When called on the list's UI thread the empty view is shown or hidden
    /// right away; otherwise that happens on the first invalidation.
    pub fn build(self) -> Result<RecyclerHandle> {
        let _span = PerfSpan::new(span_names::SETUP);
        if let Some(err) = self.error {
            return Err(err);
        }
        let data_source = self.data_source.ok_or(Error::MissingDataSource)?;

        tracing::debug!(
            target: targets::HANDLE,
            item_types = self.registry.len(),
            items = data_source.len(),
            empty_view = self.empty_view.is_some(),
            "building list"
        );
        let handle = RecyclerHandle::new(
            self.affinity,
            Arc::new(self.registry),
            data_source,
            self.host,
            self.empty_view,
        );
        handle.attach_data_source()?;

        if self.affinity.is_same_thread() {
            handle.show_or_hide_empty_view(handle.data_source().is_empty());
        } else {
            tracing::debug!(target: targets::HANDLE, "built off the UI thread, empty view left untouched");
        }
        Ok(handle)
    }
}

impl fmt::Debug for RecyclerSetup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecyclerSetup")
            .field("registry", &self.registry)
            .field("has_data_source", &self.data_source.is_some())
            .field("has_empty_view", &self.empty_view.is_some())
            .field("affinity", &self.affinity)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
