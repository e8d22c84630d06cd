//! The adapter bridge between a data source and the list view host.
//!
//! [`DefinitionAdapter`] implements the host's side of the list contract:
//! how many rows there are, which view type each row has, how to build a
//! holder for a view type, and how to bind a row into a holder. It answers
//! from the [`ItemRegistry`] and the [`DataSource`], and dispatches click,
//! swipe and recycle events back to the item definitions.
//!
//! # Positions at event time
//!
//! Positions shift as the list mutates, so a bound holder remembers the item
//! it shows rather than the index it was bound at. Click events look the
//! item up again and report its *current* index.

use std::fmt;
use std::sync::Arc;

use lattice_recycler_core::{span_names, targets};
use parking_lot::RwLock;

use crate::data_source::{DataSource, ListChange};
use crate::definition::{ClickKind, Definition, ErasedHolder, ItemScope};
use crate::error::{Error, Result};
use crate::handle::{RecyclerHandle, WeakHandle};
use crate::host::ListViewHost;
use crate::item::{Item, ItemRef};
use crate::registry::{ItemRegistry, ViewType};
use crate::swipe::SwipeLocation;

/// A view holder created by the adapter.
///
/// Wraps the caller's holder type together with its view type and the item
/// it is currently bound to.
pub struct ViewHolder {
    view_type: ViewType,
    holder: ErasedHolder,
    bound_item: Option<ItemRef>,
    bound_position: Option<usize>,
}

impl ViewHolder {
    /// The view type this holder was created for.
    pub fn view_type(&self) -> ViewType {
        self.view_type
    }

    /// The caller's holder, if it is a `VH`.
    pub fn get<VH: 'static>(&self) -> Option<&VH> {
        self.holder.downcast_ref::<VH>()
    }

    /// The caller's holder, mutably, if it is a `VH`.
    pub fn get_mut<VH: 'static>(&mut self) -> Option<&mut VH> {
        self.holder.downcast_mut::<VH>()
    }

    /// The item this holder is bound to.
    pub fn bound_item(&self) -> Option<&ItemRef> {
        self.bound_item.as_ref()
    }

    /// The position this holder was last bound at.
    ///
    /// This goes stale as the list mutates; events use the item's current
    /// index instead.
    pub fn bound_position(&self) -> Option<usize> {
        self.bound_position
    }

    /// Returns `true` if the holder is bound to an item.
    pub fn is_bound(&self) -> bool {
        self.bound_item.is_some()
    }
}

impl fmt::Debug for ViewHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewHolder")
            .field("view_type", &self.view_type)
            .field("bound_item", &self.bound_item)
            .field("bound_position", &self.bound_position)
            .finish_non_exhaustive()
    }
}

/// Bridges a data source and an item registry to a list view host.
pub struct DefinitionAdapter {
    registry: Arc<ItemRegistry>,
    data_source: DataSource,
    host: Arc<dyn ListViewHost>,
    handle: RwLock<Option<WeakHandle>>,
}

impl DefinitionAdapter {
    /// Creates an adapter. It stays detached until a handle attaches it.
    pub fn new(
        registry: Arc<ItemRegistry>,
        data_source: DataSource,
        host: Arc<dyn ListViewHost>,
    ) -> Self {
        Self {
            registry,
            data_source,
            host,
            handle: RwLock::new(None),
        }
    }

    /// The registry definitions are resolved from.
    pub fn registry(&self) -> &Arc<ItemRegistry> {
        &self.registry
    }

    /// The data source rows are read from.
    pub fn data_source(&self) -> &DataSource {
        &self.data_source
    }

    // -------------------------------------------------------------------------
    // Handle back-reference
    // -------------------------------------------------------------------------

    /// Stores a non-owning reference to the handle driving this adapter.
    pub fn attach(&self, handle: &RecyclerHandle) -> Result<()> {
        let mut slot = self.handle.write();
        if slot.as_ref().is_some_and(WeakHandle::is_alive) {
            return Err(Error::AlreadyAttached);
        }
        *slot = Some(handle.downgrade());
        tracing::debug!(target: targets::ADAPTER, "attached to handle");
        Ok(())
    }

    /// Clears the handle reference. Does nothing if not attached.
    pub fn detach(&self) {
        if self.handle.write().take().is_some() {
            tracing::debug!(target: targets::ADAPTER, "detached from handle");
        }
    }

    /// Returns `true` if a live handle is attached.
    pub fn is_attached(&self) -> bool {
        self.handle
            .read()
            .as_ref()
            .is_some_and(WeakHandle::is_alive)
    }

    fn handle(&self) -> Result<RecyclerHandle> {
        self.handle
            .read()
            .as_ref()
            .and_then(WeakHandle::upgrade)
            .ok_or(Error::NotAttached)
    }

    // -------------------------------------------------------------------------
    // List contract
    // -------------------------------------------------------------------------

    /// Number of rows.
    pub fn item_count(&self) -> usize {
        self.data_source.len()
    }

    /// View type of the row at `position`.
    pub fn view_type_for_position(&self, position: usize) -> Result<ViewType> {
        let item = self.data_source.get(position)?;
        self.registry.view_type_for_item(item.as_ref())
    }

    /// Returns `true` if any definition derives stable IDs from its items.
    pub fn has_stable_ids(&self) -> bool {
        self.registry.has_stable_ids()
    }

    /// Identity of the row at `position`.
    ///
    /// Uses the definition's stable ID extractor if it has one, otherwise
    /// the position itself.
    pub fn item_id(&self, position: usize) -> Result<u64> {
        let item = self.data_source.get(position)?;
        let definition = self.definition_for(item.as_ref())?;
        Ok(definition
            .stable_id(item.as_ref())?
            .unwrap_or(position as u64))
    }

    /// Creates a holder for a view type, inflating its layout through the host.
    pub fn create_view_holder(&self, view_type: ViewType) -> Result<ViewHolder> {
        let definition = self.registry.definition_for_view_type(view_type)?;
        let view = self.host.inflate(definition.layout());
        tracing::trace!(target: targets::ADAPTER, %view_type, layout = %definition.layout(), "created view holder");
        Ok(ViewHolder {
            view_type,
            holder: definition.create_holder(view),
            bound_item: None,
            bound_position: None,
        })
    }

    /// Binds the row at `position` into `holder`.
    ///
    /// Fails with [`Error::DefinitionMismatch`] if the holder was created for
    /// another view type than the row's.
    pub fn bind_view_holder(&self, holder: &mut ViewHolder, position: usize) -> Result<()> {
        let handle = self.handle()?;
        let item = self.data_source.get(position)?;
        let view_type = self.registry.view_type_for_item(item.as_ref())?;
        if view_type != holder.view_type {
            let found = self
                .registry
                .definition_for_view_type(holder.view_type)
                .map(|definition| definition.item_type().name())
                .unwrap_or("an unregistered view type");
            return Err(Error::mismatch(item.item_type().name(), found));
        }
        let definition = self.registry.definition_for_view_type(view_type)?;

        let _span = tracing::trace_span!(target: targets::ADAPTER, span_names::BIND, position, %view_type).entered();
        definition.bind(
            &mut *holder.holder,
            &ItemScope::new(position, item.as_ref(), &handle),
        )?;
        holder.bound_item = Some(item);
        holder.bound_position = Some(position);
        Ok(())
    }

    /// Called by the host when a holder goes back to its pool.
    pub fn on_view_recycled(&self, holder: &mut ViewHolder) -> Result<()> {
        let definition = self.registry.definition_for_view_type(holder.view_type)?;
        definition.recycled(&mut *holder.holder)?;
        holder.bound_item = None;
        holder.bound_position = None;
        tracing::trace!(target: targets::ADAPTER, view_type = %holder.view_type, "recycled view holder");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Dispatches a click on a bound holder.
    ///
    /// Returns `Ok(false)` if the holder is unbound, its item is no longer in
    /// the data source, or the definition has no click callback.
    pub fn dispatch_click(&self, holder: &ViewHolder) -> Result<bool> {
        self.dispatch(ClickKind::Click, holder)
    }

    /// Dispatches a long click on a bound holder. See
    /// [`dispatch_click`](Self::dispatch_click).
    pub fn dispatch_long_click(&self, holder: &ViewHolder) -> Result<bool> {
        self.dispatch(ClickKind::LongClick, holder)
    }

    fn dispatch(&self, kind: ClickKind, holder: &ViewHolder) -> Result<bool> {
        let handle = self.handle()?;
        let Some(item) = holder.bound_item() else {
            return Ok(false);
        };
        let Some(index) = self.data_source.index_of_ref(item) else {
            tracing::trace!(target: targets::ADAPTER, ?kind, "bound item no longer present, ignoring");
            return Ok(false);
        };
        let definition = self.definition_for(item.as_ref())?;
        definition.click(kind, &ItemScope::new(index, item.as_ref(), &handle))
    }

    /// Swipe locations configured for the row at `position`.
    pub fn swipe_locations(&self, position: usize) -> Result<Vec<SwipeLocation>> {
        let item = self.data_source.get(position)?;
        Ok(self.definition_for(item.as_ref())?.swipe_locations())
    }

    /// Dispatches a completed swipe on the row at `position`.
    ///
    /// If the action's callback returns `true` the item is removed from the
    /// data source and `Ok(true)` is returned. Otherwise the row is reported
    /// as changed so the host can settle it back into place.
    #[tracing::instrument(skip(self), target = "lattice_recycler::adapter", level = "trace")]
    pub fn dispatch_swipe(&self, position: usize, location: SwipeLocation) -> Result<bool> {
        let handle = self.handle()?;
        let item = self.data_source.get(position)?;
        let definition = self.definition_for(item.as_ref())?;

        let remove = definition
            .swipe(location, &ItemScope::new(position, item.as_ref(), &handle))?
            .unwrap_or(false);
        tracing::debug!(target: targets::ADAPTER, position, ?location, remove, "swipe dispatched");

        // The callback may have mutated the list; find the item again.
        match self.data_source.index_of_ref(&item) {
            Some(index) if remove => {
                self.data_source.remove_at(index)?;
            }
            Some(index) => {
                handle.invalidate_list(|adapter| adapter.notify_item_changed(index))?;
            }
            None => {}
        }
        Ok(remove)
    }

    fn definition_for(&self, item: &dyn Item) -> Result<Arc<dyn Definition>> {
        self.registry.definition_for_item_type(item.item_type())
    }

    // -------------------------------------------------------------------------
    // Notifications to the host
    // -------------------------------------------------------------------------

    /// Forwards a change to the host.
    pub fn notify(&self, change: ListChange) {
        tracing::trace!(target: targets::ADAPTER, ?change, "notifying host");
        self.host.notify(&change);
    }

    /// Reports that one item was inserted at `index`.
    pub fn notify_item_inserted(&self, index: usize) {
        self.notify(ListChange::Inserted { index, count: 1 });
    }

    /// Reports that one item was removed from `index`.
    pub fn notify_item_removed(&self, index: usize) {
        self.notify(ListChange::Removed { index, count: 1 });
    }

    /// Reports that the item at `index` changed.
    pub fn notify_item_changed(&self, index: usize) {
        self.notify(ListChange::Changed { index, count: 1 });
    }

    /// Reports that an item moved from `from` to `to`.
    pub fn notify_item_moved(&self, from: usize, to: usize) {
        self.notify(ListChange::Moved { from, to });
    }

    /// Reports that anything may have changed.
    pub fn notify_data_set_changed(&self) {
        self.notify(ListChange::Reset);
    }

    /// Reports the rows currently on screen as changed, so they rebind.
    ///
    /// Falls back to a full reset when the host does not report its visible
    /// range.
    pub fn notify_visible_rows_changed(&self) {
        let count = self.item_count();
        match self.host.visible_range() {
            Some(range) => {
                let start = range.start.min(count);
                let end = range.end.min(count);
                if end > start {
                    self.notify(ListChange::Changed {
                        index: start,
                        count: end - start,
                    });
                }
            }
            None => self.notify_data_set_changed(),
        }
    }
}

impl fmt::Debug for DefinitionAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefinitionAdapter")
            .field("registry", &self.registry)
            .field("item_count", &self.item_count())
            .field("attached", &self.is_attached())
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(DefinitionAdapter: Send, Sync);
static_assertions::assert_impl_all!(ViewHolder: Send, Sync);
