//! Observable, ordered collection of heterogeneous items.
//!
//! A [`DataSource`] is the backing collection of a bound list. Cloning it
//! shares the same items, so the caller can keep one clone for mutation
//! while the handle holds another.
//!
//! # Attachment
//!
//! Exactly one [`DataSourceListener`] (normally a
//! [`RecyclerHandle`](crate::RecyclerHandle)) may be attached at a time.
//! Every mutation requires an attached listener and fails with
//! [`Error::NotAttached`] otherwise, so no change is ever applied without
//! being reported. Reads work in any state, and a data source may be
//! pre-populated before it is attached.
//!
//! # Notification order
//!
//! The listener first validates the mutation (thread affinity, lifecycle),
//! then the collection is changed, then the internal lock is released and
//! the listener receives a [`ListChange`]. Listeners may therefore read the
//! data source, and even mutate it again, from inside the notification.
//!
//! # Example
//!
//! ```
//! use lattice_recycler::DataSource;
//!
//! let data_source = DataSource::with_items(vec!["first", "second"]);
//! assert_eq!(data_source.len(), 2);
//!
//! // Mutation requires an attached handle.
//! assert!(data_source.add("third").is_err());
//! ```

use std::fmt;
use std::sync::{Arc, Weak};

use lattice_recycler_core::targets;
use parking_lot::{Mutex, RwLock};

use crate::error::{Error, Result};
use crate::item::{Item, ItemRef};

/// A structural or content change to a data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListChange {
    /// `count` items were inserted starting at `index`.
    Inserted { index: usize, count: usize },
    /// `count` items were removed starting at `index`.
    Removed { index: usize, count: usize },
    /// `count` items starting at `index` were replaced or changed in place.
    Changed { index: usize, count: usize },
    /// The item at `from` now sits at `to`.
    Moved { from: usize, to: usize },
    /// Anything may have changed.
    Reset,
}

impl ListChange {
    /// Returns `true` if the change can alter the number of items.
    pub fn is_structural(&self) -> bool {
        !matches!(self, Self::Changed { .. })
    }
}

/// Receives the changes of an attached data source.
pub trait DataSourceListener: Send + Sync {
    /// Validates a mutation before it is applied.
    ///
    /// Called before the collection is touched; an error aborts the
    /// mutation. May panic on thread-affinity violations.
    fn check_mutation(&self) -> Result<()> {
        Ok(())
    }

    /// Called after the collection changed, with no lock held.
    ///
    /// The change is already applied when this runs. An error is handed
    /// back to the caller of the mutation but does not roll it back, so a
    /// listener should only fail for problems it could not have caught in
    /// [`check_mutation`](Self::check_mutation).
    fn on_list_changed(&self, change: ListChange) -> Result<()>;
}

fn same_listener(attached: &Weak<dyn DataSourceListener>, listener: &dyn DataSourceListener) -> bool {
    std::ptr::addr_eq(attached.as_ptr(), std::ptr::from_ref(listener))
}

#[derive(Default)]
struct Shared {
    items: RwLock<Vec<ItemRef>>,
    listener: Mutex<Option<Weak<dyn DataSourceListener>>>,
}

/// Observable ordered collection of items.
#[derive(Clone, Default)]
pub struct DataSource {
    shared: Arc<Shared>,
}

impl DataSource {
    /// Creates an empty data source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a data source pre-populated with items of one type.
    pub fn with_items<T, I>(items: I) -> Self
    where
        T: Item,
        I: IntoIterator<Item = T>,
    {
        Self::from_refs(items.into_iter().map(|item| Arc::new(item) as ItemRef))
    }

    /// Creates a data source pre-populated with already erased items.
    pub fn from_refs<I>(items: I) -> Self
    where
        I: IntoIterator<Item = ItemRef>,
    {
        Self {
            shared: Arc::new(Shared {
                items: RwLock::new(items.into_iter().collect()),
                listener: Mutex::new(None),
            }),
        }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Number of items.
    pub fn len(&self) -> usize {
        self.shared.items.read().len()
    }

    /// Number of items. Alias of [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.len()
    }

    /// Returns `true` if there are no items.
    pub fn is_empty(&self) -> bool {
        self.shared.items.read().is_empty()
    }

    /// Returns the item at `index`.
    pub fn get(&self, index: usize) -> Result<ItemRef> {
        let items = self.shared.items.read();
        items
            .get(index)
            .cloned()
            .ok_or_else(|| Error::out_of_range(index, items.len()))
    }

    /// Returns a copy of the item at `index` if it is a `T`.
    pub fn get_as<T: Item + Clone>(&self, index: usize) -> Result<Option<T>> {
        let item = self.get(index)?;
        Ok(item.downcast_ref::<T>().cloned())
    }

    /// Index of the first item equal to `item`.
    pub fn index_of(&self, item: &dyn Item) -> Option<usize> {
        self.shared
            .items
            .read()
            .iter()
            .position(|candidate| candidate.dyn_eq(item))
    }

    /// Index of this exact shared item, compared by identity.
    pub fn index_of_ref(&self, item: &ItemRef) -> Option<usize> {
        self.shared
            .items
            .read()
            .iter()
            .position(|candidate| Arc::ptr_eq(candidate, item))
    }

    /// Returns `true` if an item equal to `item` is present.
    pub fn contains(&self, item: &dyn Item) -> bool {
        self.index_of(item).is_some()
    }

    /// A copy of the current item list.
    pub fn snapshot(&self) -> Vec<ItemRef> {
        self.shared.items.read().clone()
    }

    // -------------------------------------------------------------------------
    // Attachment
    // -------------------------------------------------------------------------

    /// Attaches the listener that receives every change.
    ///
    /// The listener is held weakly. Fails with [`Error::AlreadyAttached`] if
    /// a live listener is already attached.
    pub fn attach(&self, listener: &Arc<dyn DataSourceListener>) -> Result<()> {
        let mut slot = self.shared.listener.lock();
        if slot.as_ref().is_some_and(|current| current.strong_count() > 0) {
            return Err(Error::AlreadyAttached);
        }
        *slot = Some(Arc::downgrade(listener));
        tracing::debug!(target: targets::DATA_SOURCE, items = self.len(), "attached");
        Ok(())
    }

    /// Detaches the listener. Items are kept. Does nothing if not attached.
    pub fn detach(&self) {
        if self.shared.listener.lock().take().is_some() {
            tracing::debug!(target: targets::DATA_SOURCE, "detached");
        }
    }

    /// Detaches `listener` if it is the one attached.
    ///
    /// Returns `false`, leaving any other listener in place, otherwise. The
    /// comparison is by address, so it also matches a listener whose last
    /// strong reference is being dropped.
    pub fn detach_listener(&self, listener: &dyn DataSourceListener) -> bool {
        let mut slot = self.shared.listener.lock();
        if !slot.as_ref().is_some_and(|current| same_listener(current, listener)) {
            return false;
        }
        *slot = None;
        tracing::debug!(target: targets::DATA_SOURCE, "detached");
        true
    }

    /// Returns `true` if a live listener is attached.
    pub fn is_attached(&self) -> bool {
        self.shared
            .listener
            .lock()
            .as_ref()
            .is_some_and(|listener| listener.strong_count() > 0)
    }

    /// Returns `true` if `listener` is the live attached listener.
    pub fn is_attached_to(&self, listener: &dyn DataSourceListener) -> bool {
        self.shared.listener.lock().as_ref().is_some_and(|current| {
            current.strong_count() > 0 && same_listener(current, listener)
        })
    }

    fn listener(&self) -> Result<Arc<dyn DataSourceListener>> {
        self.shared
            .listener
            .lock()
            .as_ref()
            .and_then(Weak::upgrade)
            .ok_or(Error::NotAttached)
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Applies `op` under the write lock, then reports its change.
    fn mutate<R>(
        &self,
        op: impl FnOnce(&mut Vec<ItemRef>) -> Result<(R, Option<ListChange>)>,
    ) -> Result<R> {
        let listener = self.listener()?;
        listener.check_mutation()?;

        let (result, change) = {
            let mut items = self.shared.items.write();
            op(&mut items)?
        };

        if let Some(change) = change {
            tracing::trace!(target: targets::DATA_SOURCE, ?change, "notifying listener");
            listener.on_list_changed(change)?;
        }
        Ok(result)
    }

    /// Appends an item.
    pub fn add<T: Item>(&self, item: T) -> Result<()> {
        self.add_ref(Arc::new(item))
    }

    /// Appends an already erased item.
    pub fn add_ref(&self, item: ItemRef) -> Result<()> {
        self.mutate(|items| {
            let index = items.len();
            items.push(item);
            Ok(((), Some(ListChange::Inserted { index, count: 1 })))
        })
    }

    /// Inserts an item at `index`, shifting later items back.
    pub fn insert<T: Item>(&self, index: usize, item: T) -> Result<()> {
        self.insert_ref(index, Arc::new(item))
    }

    /// Inserts an already erased item at `index`.
    pub fn insert_ref(&self, index: usize, item: ItemRef) -> Result<()> {
        self.mutate(|items| {
            if index > items.len() {
                return Err(Error::out_of_range(index, items.len()));
            }
            items.insert(index, item);
            Ok(((), Some(ListChange::Inserted { index, count: 1 })))
        })
    }

    /// Appends several items of one type, reported as a single range.
    pub fn add_all<T, I>(&self, items: I) -> Result<()>
    where
        T: Item,
        I: IntoIterator<Item = T>,
    {
        self.extend(items.into_iter().map(|item| Arc::new(item) as ItemRef))
    }

    /// Appends several erased items, reported as a single range.
    pub fn extend<I>(&self, new_items: I) -> Result<()>
    where
        I: IntoIterator<Item = ItemRef>,
    {
        let new_items: Vec<ItemRef> = new_items.into_iter().collect();
        self.mutate(|items| {
            let index = items.len();
            let count = new_items.len();
            items.extend(new_items);
            let change = (count > 0).then_some(ListChange::Inserted { index, count });
            Ok(((), change))
        })
    }

    /// Removes and returns the item at `index`.
    pub fn remove_at(&self, index: usize) -> Result<ItemRef> {
        self.mutate(|items| {
            if index >= items.len() {
                return Err(Error::out_of_range(index, items.len()));
            }
            let removed = items.remove(index);
            Ok((removed, Some(ListChange::Removed { index, count: 1 })))
        })
    }

    /// Removes the first item equal to `item`.
    ///
    /// Returns `Ok(false)`, without notifying, if no such item exists.
    pub fn remove(&self, item: &dyn Item) -> Result<bool> {
        self.mutate(|items| {
            match items.iter().position(|candidate| candidate.dyn_eq(item)) {
                Some(index) => {
                    items.remove(index);
                    Ok((true, Some(ListChange::Removed { index, count: 1 })))
                }
                None => Ok((false, None)),
            }
        })
    }

    /// Removes every item.
    pub fn clear(&self) -> Result<()> {
        self.mutate(|items| {
            items.clear();
            Ok(((), Some(ListChange::Reset)))
        })
    }

    /// Replaces the item at `index`, returning the previous one.
    pub fn set<T: Item>(&self, index: usize, item: T) -> Result<ItemRef> {
        self.set_ref(index, Arc::new(item))
    }

    /// Replaces the item at `index` with an erased item.
    pub fn set_ref(&self, index: usize, item: ItemRef) -> Result<ItemRef> {
        self.mutate(|items| {
            let len = items.len();
            let slot = items
                .get_mut(index)
                .ok_or_else(|| Error::out_of_range(index, len))?;
            let previous = std::mem::replace(slot, item);
            Ok((previous, Some(ListChange::Changed { index, count: 1 })))
        })
    }

    /// Moves the item at `from` so that it ends up at `to`.
    ///
    /// Moving an item onto its own position changes nothing and is not
    /// reported.
    pub fn move_item(&self, from: usize, to: usize) -> Result<()> {
        self.mutate(|items| {
            let len = items.len();
            for index in [from, to] {
                if index >= len {
                    return Err(Error::out_of_range(index, len));
                }
            }
            if from == to {
                return Ok(((), None));
            }
            let item = items.remove(from);
            items.insert(to, item);
            Ok(((), Some(ListChange::Moved { from, to })))
        })
    }

    /// Replaces all items with items of one type.
    pub fn set_items<T, I>(&self, items: I) -> Result<()>
    where
        T: Item,
        I: IntoIterator<Item = T>,
    {
        self.replace_refs(items.into_iter().map(|item| Arc::new(item) as ItemRef))
    }

    /// Replaces all items with erased items.
    pub fn replace_refs<I>(&self, new_items: I) -> Result<()>
    where
        I: IntoIterator<Item = ItemRef>,
    {
        let new_items: Vec<ItemRef> = new_items.into_iter().collect();
        self.mutate(|items| {
            *items = new_items;
            Ok(((), Some(ListChange::Reset)))
        })
    }
}

impl fmt::Debug for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSource")
            .field("items", &*self.shared.items.read())
            .field("attached", &self.is_attached())
            .finish()
    }
}

static_assertions::assert_impl_all!(DataSource: Send, Sync);
