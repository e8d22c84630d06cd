//! Item definitions: how one item type is laid out, bound and handled.
//!
//! An [`ItemDefinition<I, VH>`] is written against concrete types: the item
//! type `I` and the view holder type `VH` the caller builds from an inflated
//! view. The registry stores it type-erased as `Arc<dyn Definition>`, and
//! the adapter drives it through that trait.
//!
//! # Example
//!
//! ```
//! use lattice_recycler::{ItemDefinition, ResourceId, View};
//!
//! #[derive(Debug, PartialEq)]
//! struct Contact {
//!     id: u64,
//!     name: String,
//! }
//!
//! struct ContactHolder {
//!     title: String,
//! }
//!
//! let definition = ItemDefinition::<Contact, ContactHolder>::new(
//!     ResourceId(0x7f0b_0001),
//!     |_view: View| ContactHolder { title: String::new() },
//!     |holder, scope| holder.title = scope.item().name.clone(),
//! )
//! .has_stable_ids(|contact| contact.id)
//! .on_click(|scope| println!("Clicked {}: {}", scope.index(), scope.item().name));
//! ```

use std::any::{type_name, Any};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::handle::RecyclerHandle;
use crate::item::{Item, ItemType, ResourceId, View};
use crate::swipe::{SwipeAction, SwipeLocation, SwipeStyle};

/// Constructs a view holder from an inflated view.
pub type HolderCreator<VH> = Arc<dyn Fn(View) -> VH + Send + Sync>;

/// Binds an item to its view holder.
pub type BindCallback<I, VH> = Arc<dyn Fn(&mut VH, &ItemScope<'_, I>) + Send + Sync>;

/// Callback for click-like events on an item.
pub type ItemCallback<I> = Arc<dyn Fn(&ItemScope<'_, I>) + Send + Sync>;

/// Extracts a stable ID from an item.
pub type IdGetter<I> = Arc<dyn Fn(&I) -> u64 + Send + Sync>;

/// Called when a view holder is returned to the host's pool.
pub type RecycleCallback<VH> = Arc<dyn Fn(&mut VH) + Send + Sync>;

/// A type-erased view holder as produced by [`Definition::create_holder`].
pub type ErasedHolder = Box<dyn Any + Send + Sync>;

/// Which click gesture is being dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickKind {
    /// A regular tap or click.
    Click,
    /// A long press.
    LongClick,
}

/// The context handed to bind, click and swipe callbacks.
///
/// Carries the item's current index, the item itself, and the handle, so
/// callback bodies can look up definitions or mutate the list.
pub struct ItemScope<'a, I: ?Sized> {
    index: usize,
    item: &'a I,
    handle: &'a RecyclerHandle,
}

impl<'a, I: ?Sized> ItemScope<'a, I> {
    /// Creates a scope.
    pub fn new(index: usize, item: &'a I, handle: &'a RecyclerHandle) -> Self {
        Self {
            index,
            item,
            handle,
        }
    }

    /// The index of the item in the data source at the time of the call.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The item.
    pub fn item(&self) -> &'a I {
        self.item
    }

    /// The handle of the list the item belongs to.
    pub fn handle(&self) -> &'a RecyclerHandle {
        self.handle
    }
}

impl<'a> ItemScope<'a, dyn Item> {
    /// Narrows an erased scope to a concrete item type.
    pub fn downcast<T: Item>(&self) -> Option<ItemScope<'a, T>> {
        let item = self.item.downcast_ref::<T>()?;
        Some(ItemScope::new(self.index, item, self.handle))
    }
}

impl<I: ?Sized + fmt::Debug> fmt::Debug for ItemScope<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemScope")
            .field("index", &self.index)
            .field("item", &self.item)
            .finish_non_exhaustive()
    }
}

/// Type-erased interface the registry and adapter use to drive a definition.
///
/// Implemented by [`ItemDefinition`]; callers rarely implement it directly.
pub trait Definition: Send + Sync + 'static {
    /// The item type this definition binds.
    fn item_type(&self) -> ItemType;

    /// The name of the view holder type, for diagnostics.
    fn holder_type_name(&self) -> &'static str;

    /// The layout the host inflates for this item type.
    fn layout(&self) -> ResourceId;

    /// Returns `true` if a stable ID extractor is configured.
    fn has_stable_ids(&self) -> bool;

    /// Returns `true` if a callback is configured for the gesture.
    fn handles_click(&self, kind: ClickKind) -> bool;

    /// Swipe locations with a configured action, in a stable order.
    fn swipe_locations(&self) -> Vec<SwipeLocation>;

    /// The visuals of the swipe action at a location.
    fn swipe_style(&self, location: SwipeLocation) -> Option<&SwipeStyle>;

    /// This definition as `Any`, for downcasting to `ItemDefinition<I, VH>`.
    fn as_any(&self) -> &dyn Any;

    /// Builds a view holder from an inflated view.
    fn create_holder(&self, view: View) -> ErasedHolder;

    /// Binds an item to a holder created by this definition.
    fn bind(&self, holder: &mut dyn Any, scope: &ItemScope<'_, dyn Item>) -> Result<()>;

    /// Extracts the stable ID of an item, if an extractor is configured.
    fn stable_id(&self, item: &dyn Item) -> Result<Option<u64>>;

    /// Dispatches a click gesture. Returns `false` if no callback is configured.
    fn click(&self, kind: ClickKind, scope: &ItemScope<'_, dyn Item>) -> Result<bool>;

    /// Dispatches a swipe. Returns `None` if no action is configured at the
    /// location, otherwise whether the item should be removed.
    fn swipe(&self, location: SwipeLocation, scope: &ItemScope<'_, dyn Item>) -> Result<Option<bool>>;

    /// Notifies that a holder was returned to the host's pool.
    fn recycled(&self, holder: &mut dyn Any) -> Result<()>;
}

/// Describes how items of type `I` are displayed through holders of type `VH`.
pub struct ItemDefinition<I, VH> {
    layout: ResourceId,
    creator: HolderCreator<VH>,
    binder: BindCallback<I, VH>,
    id_getter: Option<IdGetter<I>>,
    on_click: Option<ItemCallback<I>>,
    on_long_click: Option<ItemCallback<I>>,
    on_recycled: Option<RecycleCallback<VH>>,
    swipe_actions: BTreeMap<SwipeLocation, SwipeAction<I>>,
}

impl<I: Item, VH: Send + Sync + 'static> ItemDefinition<I, VH> {
    /// Creates a definition from a layout, a holder constructor and a bind
    /// callback.
    pub fn new<C, B>(layout: ResourceId, creator: C, binder: B) -> Self
    where
        C: Fn(View) -> VH + Send + Sync + 'static,
        B: Fn(&mut VH, &ItemScope<'_, I>) + Send + Sync + 'static,
    {
        Self {
            layout,
            creator: Arc::new(creator),
            binder: Arc::new(binder),
            id_getter: None,
            on_click: None,
            on_long_click: None,
            on_recycled: None,
            swipe_actions: BTreeMap::new(),
        }
    }

    /// Derives stable IDs from items instead of using their positions.
    pub fn has_stable_ids<F>(mut self, id_getter: F) -> Self
    where
        F: Fn(&I) -> u64 + Send + Sync + 'static,
    {
        self.id_getter = Some(Arc::new(id_getter));
        self
    }

    /// Sets the click callback.
    pub fn on_click<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ItemScope<'_, I>) + Send + Sync + 'static,
    {
        self.on_click = Some(Arc::new(callback));
        self
    }

    /// Sets the long-click callback.
    pub fn on_long_click<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ItemScope<'_, I>) + Send + Sync + 'static,
    {
        self.on_long_click = Some(Arc::new(callback));
        self
    }

    /// Sets the callback run when a holder is recycled.
    pub fn on_recycled<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut VH) + Send + Sync + 'static,
    {
        self.on_recycled = Some(Arc::new(callback));
        self
    }

    /// Adds a swipe action at a location, replacing any previous one there.
    pub fn with_swipe_action(mut self, location: SwipeLocation, action: SwipeAction<I>) -> Self {
        self.swipe_actions.insert(location, action);
        self
    }

    /// Adds the same swipe action at several locations.
    pub fn with_swipe_action_on(
        mut self,
        locations: &[SwipeLocation],
        action: SwipeAction<I>,
    ) -> Self {
        for &location in locations {
            self.swipe_actions.insert(location, action.clone());
        }
        self
    }

    /// The swipe action configured at a location.
    pub fn swipe_action(&self, location: SwipeLocation) -> Option<&SwipeAction<I>> {
        self.swipe_actions.get(&location)
    }

    fn typed_holder<'h>(&self, holder: &'h mut dyn Any) -> Result<&'h mut VH> {
        holder
            .downcast_mut::<VH>()
            .ok_or_else(|| Error::mismatch(type_name::<VH>(), "another view holder type"))
    }

    fn typed_scope<'a>(&self, scope: &ItemScope<'a, dyn Item>) -> Result<ItemScope<'a, I>> {
        scope
            .downcast::<I>()
            .ok_or_else(|| Error::mismatch(type_name::<I>(), scope.item().item_type().name()))
    }
}

impl<I: Item, VH: Send + Sync + 'static> Definition for ItemDefinition<I, VH> {
    fn item_type(&self) -> ItemType {
        ItemType::of::<I>()
    }

    fn holder_type_name(&self) -> &'static str {
        type_name::<VH>()
    }

    fn layout(&self) -> ResourceId {
        self.layout
    }

    fn has_stable_ids(&self) -> bool {
        self.id_getter.is_some()
    }

    fn handles_click(&self, kind: ClickKind) -> bool {
        match kind {
            ClickKind::Click => self.on_click.is_some(),
            ClickKind::LongClick => self.on_long_click.is_some(),
        }
    }

    fn swipe_locations(&self) -> Vec<SwipeLocation> {
        self.swipe_actions.keys().copied().collect()
    }

    fn swipe_style(&self, location: SwipeLocation) -> Option<&SwipeStyle> {
        self.swipe_actions.get(&location).map(SwipeAction::style)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn create_holder(&self, view: View) -> ErasedHolder {
        Box::new((self.creator)(view))
    }

    fn bind(&self, holder: &mut dyn Any, scope: &ItemScope<'_, dyn Item>) -> Result<()> {
        let holder = self.typed_holder(holder)?;
        let scope = self.typed_scope(scope)?;
        (self.binder)(holder, &scope);
        Ok(())
    }

    fn stable_id(&self, item: &dyn Item) -> Result<Option<u64>> {
        let Some(id_getter) = &self.id_getter else {
            return Ok(None);
        };
        let item = item
            .downcast_ref::<I>()
            .ok_or_else(|| Error::mismatch(type_name::<I>(), item.item_type().name()))?;
        Ok(Some(id_getter(item)))
    }

    fn click(&self, kind: ClickKind, scope: &ItemScope<'_, dyn Item>) -> Result<bool> {
        let callback = match kind {
            ClickKind::Click => &self.on_click,
            ClickKind::LongClick => &self.on_long_click,
        };
        let Some(callback) = callback else {
            return Ok(false);
        };
        callback(&self.typed_scope(scope)?);
        Ok(true)
    }

    fn swipe(&self, location: SwipeLocation, scope: &ItemScope<'_, dyn Item>) -> Result<Option<bool>> {
        let Some(action) = self.swipe_actions.get(&location) else {
            return Ok(None);
        };
        let scope = self.typed_scope(scope)?;
        Ok(Some(action.invoke(&scope)))
    }

    fn recycled(&self, holder: &mut dyn Any) -> Result<()> {
        if let Some(on_recycled) = &self.on_recycled {
            on_recycled(self.typed_holder(holder)?);
        }
        Ok(())
    }
}

impl<I: Item, VH: Send + Sync + 'static> fmt::Debug for ItemDefinition<I, VH> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemDefinition")
            .field("item_type", &type_name::<I>())
            .field("holder_type", &type_name::<VH>())
            .field("layout", &self.layout)
            .field("stable_ids", &self.id_getter.is_some())
            .field("swipe_locations", &self.swipe_locations())
            .finish_non_exhaustive()
    }
}
