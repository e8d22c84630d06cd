//! Registry mapping item types to view types and item definitions.
//!
//! The registry is an arena: a vector of entries is the single source of
//! truth, and two side tables map an [`ItemType`] and a [`ViewType`] to an
//! index into it. It is filled during setup through `&mut self` and shared
//! read-only behind an `Arc` afterwards, so lookups never lock.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use lattice_recycler_core::targets;

use crate::definition::Definition;
use crate::error::{Error, Result};
use crate::item::{Item, ItemType};

/// Integer identifier of a bound item type, unique within one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ViewType(pub u32);

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct Entry {
    view_type: ViewType,
    definition: Arc<dyn Definition>,
}

/// Maps item types to view types, and view types to definitions.
#[derive(Default)]
pub struct ItemRegistry {
    entries: Vec<Entry>,
    by_item_type: HashMap<ItemType, usize>,
    by_view_type: HashMap<ViewType, usize>,
}

impl ItemRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a definition under a view type.
    ///
    /// The item type is taken from the definition. Re-registering the same
    /// definition instance under the same view type is a no-op; binding an
    /// item type or view type that is already taken by anything else fails
    /// with [`Error::DuplicateRegistration`].
    #[tracing::instrument(skip(self, definition), target = "lattice_recycler::registry", level = "trace")]
    pub fn register(&mut self, view_type: ViewType, definition: Arc<dyn Definition>) -> Result<()> {
        let item_type = definition.item_type();
        let duplicate = || Error::DuplicateRegistration {
            item_type: item_type.name(),
            view_type,
        };

        match (self.by_item_type.get(&item_type), self.by_view_type.get(&view_type)) {
            (Some(&a), Some(&b)) if a == b && Arc::ptr_eq(&self.entries[a].definition, &definition) => {
                tracing::trace!(target: targets::REGISTRY, %item_type, %view_type, "identical registration ignored");
                return Ok(());
            }
            (None, None) => {}
            _ => return Err(duplicate()),
        }

        let index = self.entries.len();
        self.entries.push(Entry {
            view_type,
            definition,
        });
        self.by_item_type.insert(item_type, index);
        self.by_view_type.insert(view_type, index);
        tracing::debug!(target: targets::REGISTRY, %item_type, %view_type, "registered item definition");
        Ok(())
    }

    /// The view type the next sequential registration should use.
    ///
    /// One past the highest registered view type. If that is
    /// `ViewType(u32::MAX)`, the lowest unused view type instead. Returns
    /// `None` only when every view type is taken.
    pub fn next_view_type(&self) -> Option<ViewType> {
        let Some(highest) = self.by_view_type.keys().max() else {
            return Some(ViewType(0));
        };
        match highest.0.checked_add(1) {
            Some(next) => Some(ViewType(next)),
            None => (0..=u32::MAX)
                .map(ViewType)
                .find(|view_type| !self.by_view_type.contains_key(view_type)),
        }
    }

    /// Returns the view type bound to an item type.
    pub fn view_type_for_item_type(&self, item_type: ItemType) -> Result<ViewType> {
        self.by_item_type
            .get(&item_type)
            .map(|&index| self.entries[index].view_type)
            .ok_or(Error::UnknownType {
                item_type: item_type.name(),
            })
    }

    /// Returns the view type bound to `T`.
    pub fn view_type_for<T: Item>(&self) -> Result<ViewType> {
        self.view_type_for_item_type(ItemType::of::<T>())
    }

    /// Returns the view type bound to the runtime type of `item`.
    pub fn view_type_for_item(&self, item: &dyn Item) -> Result<ViewType> {
        self.view_type_for_item_type(item.item_type())
    }

    /// Returns the definition bound to a view type.
    pub fn definition_for_view_type(&self, view_type: ViewType) -> Result<Arc<dyn Definition>> {
        self.by_view_type
            .get(&view_type)
            .map(|&index| self.entries[index].definition.clone())
            .ok_or(Error::UnknownViewType(view_type))
    }

    /// Returns the definition bound to an item type.
    pub fn definition_for_item_type(&self, item_type: ItemType) -> Result<Arc<dyn Definition>> {
        let view_type = self.view_type_for_item_type(item_type)?;
        self.definition_for_view_type(view_type)
    }

    /// Returns the definition bound to `T`.
    pub fn definition_for<T: Item>(&self) -> Result<Arc<dyn Definition>> {
        self.definition_for_item_type(ItemType::of::<T>())
    }

    /// Returns `true` if any registered definition supplies stable IDs.
    pub fn has_stable_ids(&self) -> bool {
        self.entries.iter().any(|entry| entry.definition.has_stable_ids())
    }

    /// Number of registered definitions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(view type, definition)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ViewType, &Arc<dyn Definition>)> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.view_type, &entry.definition))
    }
}

impl fmt::Debug for ItemRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.entries
                    .iter()
                    .map(|entry| (entry.view_type, entry.definition.item_type())),
            )
            .finish()
    }
}
