//! The handle: the façade a bound list is driven through.
//!
//! A [`RecyclerHandle`] ties together the item registry, the data source and
//! the adapter bridge of one list. It owns the attach/detach lifecycle, the
//! UI-thread affinity, and the empty view.
//!
//! Handles are cheap to clone; all clones share one state. When the last
//! clone is dropped the data source is detached.
//!
//! # Lifecycle
//!
//! ```text
//!            attach_data_source()
//! Detached ─────────────────────────▶ Attached
//!     ▲                                   │
//!     └───────────────────────────────────┘
//!            detach_data_source()
//! ```
//!
//! # Callbacks and ownership
//!
//! Definitions are owned by the handle. A callback that captures a handle
//! clone keeps the handle alive forever; use [`ItemScope::handle`] instead.
//!
//! [`ItemScope::handle`]: crate::ItemScope::handle

use std::fmt;
use std::sync::{Arc, Weak};

use lattice_recycler_core::{span_names, targets, Signal, ThreadAffinity};
use parking_lot::Mutex;

use crate::adapter::DefinitionAdapter;
use crate::data_source::{DataSource, DataSourceListener, ListChange};
use crate::definition::Definition;
use crate::error::{Error, Result};
use crate::host::{EmptyView, ListViewHost};
use crate::item::{Item, ItemType};
use crate::registry::{ItemRegistry, ViewType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HandleState {
    Detached,
    Attached,
}

/// Signals emitted by a handle.
///
/// Slots run synchronously on the thread that triggered the change.
#[derive(Default)]
pub struct HandleSignals {
    /// Emitted after the data source was attached.
    pub attached: Signal<()>,
    /// Emitted after the data source was detached.
    pub detached: Signal<()>,
    /// Emitted whenever empty-view visibility is applied, with the new value.
    pub empty_view_toggled: Signal<bool>,
}

impl fmt::Debug for HandleSignals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandleSignals")
            .field("attached", &self.attached.connection_count())
            .field("detached", &self.detached.connection_count())
            .field("empty_view_toggled", &self.empty_view_toggled.connection_count())
            .finish()
    }
}

struct HandleInner {
    affinity: ThreadAffinity,
    registry: Arc<ItemRegistry>,
    data_source: DataSource,
    adapter: Arc<DefinitionAdapter>,
    empty_view: Option<Arc<dyn EmptyView>>,
    state: Mutex<HandleState>,
    signals: HandleSignals,
}

impl HandleInner {
    fn is_attached(&self) -> bool {
        *self.state.lock() == HandleState::Attached && self.data_source.is_attached_to(self)
    }

    fn show_or_hide_empty_view(&self, show: bool) {
        self.affinity
            .assert_same_thread_with_msg("empty view toggled from a thread other than the list's UI thread");
        if let Some(empty_view) = &self.empty_view {
            empty_view.set_visible(show);
        }
        tracing::trace!(target: targets::HANDLE, show, "empty view visibility applied");
        self.signals.empty_view_toggled.emit(show);
    }

    fn invalidate_list<F>(&self, mutation: F) -> Result<()>
    where
        F: FnOnce(&DefinitionAdapter),
    {
        self.affinity
            .assert_same_thread_with_msg("list invalidated from a thread other than its UI thread");
        if !self.is_attached() {
            return Err(Error::NotAttached);
        }

        let _span = tracing::debug_span!(target: targets::HANDLE, span_names::INVALIDATE).entered();
        mutation(&self.adapter);
        self.show_or_hide_empty_view(self.data_source.is_empty());
        Ok(())
    }
}

impl DataSourceListener for HandleInner {
    fn check_mutation(&self) -> Result<()> {
        self.affinity
            .assert_same_thread_with_msg("data source mutated from a thread other than its list's UI thread");
        if self.is_attached() {
            Ok(())
        } else {
            Err(Error::NotAttached)
        }
    }

    fn on_list_changed(&self, change: ListChange) -> Result<()> {
        self.invalidate_list(|adapter| adapter.notify(change))
    }
}

impl Drop for HandleInner {
    fn drop(&mut self) {
        if *self.state.get_mut() == HandleState::Attached {
            self.data_source.detach_listener(&*self);
            self.adapter.detach();
            tracing::debug!(target: targets::HANDLE, "last handle dropped, data source detached");
        }
    }
}

/// A non-owning reference to a handle.
#[derive(Clone)]
pub(crate) struct WeakHandle(Weak<HandleInner>);

impl WeakHandle {
    pub(crate) fn upgrade(&self) -> Option<RecyclerHandle> {
        self.0.upgrade().map(|inner| RecyclerHandle { inner })
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

/// The façade a bound list is driven through.
///
/// Created by [`RecyclerSetup::build`](crate::RecyclerSetup::build).
#[derive(Clone)]
pub struct RecyclerHandle {
    inner: Arc<HandleInner>,
}

impl RecyclerHandle {
    /// Creates a detached handle and its adapter bridge.
    pub(crate) fn new(
        affinity: ThreadAffinity,
        registry: Arc<ItemRegistry>,
        data_source: DataSource,
        host: Arc<dyn ListViewHost>,
        empty_view: Option<Arc<dyn EmptyView>>,
    ) -> Self {
        let adapter = Arc::new(DefinitionAdapter::new(
            Arc::clone(&registry),
            data_source.clone(),
            host,
        ));
        Self {
            inner: Arc::new(HandleInner {
                affinity,
                registry,
                data_source,
                adapter,
                empty_view,
                state: Mutex::new(HandleState::Detached),
                signals: HandleSignals::default(),
            }),
        }
    }

    pub(crate) fn downgrade(&self) -> WeakHandle {
        WeakHandle(Arc::downgrade(&self.inner))
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Attaches the data source and the adapter to this handle.
    ///
    /// Fails with [`Error::AlreadyAttached`] if this handle is attached, or
    /// if the data source is attached to another handle.
    #[tracing::instrument(skip(self), target = "lattice_recycler::handle", level = "debug")]
    pub fn attach_data_source(&self) -> Result<()> {
        {
            let mut state = self.inner.state.lock();
            if *state == HandleState::Attached {
                if self.inner.data_source.is_attached_to(&*self.inner) {
                    return Err(Error::AlreadyAttached);
                }
                tracing::debug!(target: targets::HANDLE, "data source was detached directly, resetting");
                self.inner.adapter.detach();
                *state = HandleState::Detached;
            }

            let listener: Arc<dyn DataSourceListener> = self.inner.clone();
            self.inner.data_source.attach(&listener)?;
            if let Err(err) = self.inner.adapter.attach(self) {
                self.inner.data_source.detach_listener(&*self.inner);
                return Err(err);
            }
            *state = HandleState::Attached;
        }

        tracing::debug!(target: targets::HANDLE, items = self.inner.data_source.len(), "data source attached");
        self.inner.signals.attached.emit(());
        Ok(())
    }

    /// Detaches the data source and the adapter. Does nothing if detached.
    #[tracing::instrument(skip(self), target = "lattice_recycler::handle", level = "debug")]
    pub fn detach_data_source(&self) {
        {
            let mut state = self.inner.state.lock();
            if *state == HandleState::Detached {
                return;
            }
            self.inner.data_source.detach_listener(&*self.inner);
            self.inner.adapter.detach();
            *state = HandleState::Detached;
        }

        tracing::debug!(target: targets::HANDLE, "data source detached");
        self.inner.signals.detached.emit(());
    }

    /// Returns `true` while the data source is attached to this handle.
    ///
    /// Turns `false` if the data source was detached directly through
    /// [`DataSource::detach`].
    pub fn is_attached(&self) -> bool {
        self.inner.is_attached()
    }

    // -------------------------------------------------------------------------
    // UI-thread operations
    // -------------------------------------------------------------------------

    /// Runs `mutation` against the adapter, then shows the empty view if
    /// the data source is empty and hides it otherwise.
    ///
    /// # Panics
    ///
    /// Panics if called from a thread other than the handle's UI thread.
    ///
    /// # Example
    ///
    /// ```ignore
    /// handle.invalidate_list(|adapter| adapter.notify_data_set_changed())?;
    /// ```
    pub fn invalidate_list<F>(&self, mutation: F) -> Result<()>
    where
        F: FnOnce(&DefinitionAdapter),
    {
        self.inner.invalidate_list(mutation)
    }

    /// Shows or hides the empty view, if one is configured.
    ///
    /// # Panics
    ///
    /// Panics if called from a thread other than the handle's UI thread.
    pub fn show_or_hide_empty_view(&self, show: bool) {
        self.inner.show_or_hide_empty_view(show);
    }

    // -------------------------------------------------------------------------
    // Registry lookups
    // -------------------------------------------------------------------------

    /// View type registered for an item type.
    pub fn view_type_for_item_type(&self, item_type: ItemType) -> Result<ViewType> {
        self.inner.registry.view_type_for_item_type(item_type)
    }

    /// View type registered for `T`.
    pub fn view_type_for<T: Item>(&self) -> Result<ViewType> {
        self.inner.registry.view_type_for::<T>()
    }

    /// Definition registered for an item type.
    pub fn definition_for_item_type(&self, item_type: ItemType) -> Result<Arc<dyn Definition>> {
        self.inner.registry.definition_for_item_type(item_type)
    }

    /// Definition registered for `T`.
    pub fn definition_for<T: Item>(&self) -> Result<Arc<dyn Definition>> {
        self.inner.registry.definition_for::<T>()
    }

    /// Definition registered under a view type.
    pub fn definition_for_view_type(&self, view_type: ViewType) -> Result<Arc<dyn Definition>> {
        self.inner.registry.definition_for_view_type(view_type)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The adapter bridge the host drives.
    pub fn adapter(&self) -> &Arc<DefinitionAdapter> {
        &self.inner.adapter
    }

    /// The data source backing the list.
    pub fn data_source(&self) -> &DataSource {
        &self.inner.data_source
    }

    /// The item registry.
    pub fn registry(&self) -> &Arc<ItemRegistry> {
        &self.inner.registry
    }

    /// The handle's signals.
    pub fn signals(&self) -> &HandleSignals {
        &self.inner.signals
    }

    /// The UI thread this handle is bound to.
    pub fn affinity(&self) -> ThreadAffinity {
        self.inner.affinity
    }

    /// Returns `true` if both handles share the same state.
    pub fn ptr_eq(&self, other: &RecyclerHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for RecyclerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecyclerHandle")
            .field("attached", &self.is_attached())
            .field("items", &self.inner.data_source.len())
            .field("registry", &self.inner.registry)
            .field("has_empty_view", &self.inner.empty_view.is_some())
            .field("affinity", &self.inner.affinity)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(RecyclerHandle: Send, Sync, Clone);
static_assertions::assert_impl_all!(HandleSignals: Send, Sync);
