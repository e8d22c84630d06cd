//! Items and the values exchanged with the list view host.
//!
//! Any `'static + Send + Sync + Debug + PartialEq` type is an [`Item`]; no
//! wrapper or base type is needed. Items are identified by their
//! [`ItemType`], which is keyed by `TypeId` so lookups are checked by the
//! compiler rather than by comparing type-name strings.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Runtime identity of an item type.
///
/// Equality and hashing use only the `TypeId`; the name is kept for
/// diagnostics and error messages.
#[derive(Clone, Copy)]
pub struct ItemType {
    id: TypeId,
    name: &'static str,
}

impl ItemType {
    /// The item type of `T`.
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The underlying `TypeId`.
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// The fully qualified type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The type name without its module path.
    pub fn short_name(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        base.rsplit("::").next().unwrap_or(base)
    }
}

impl PartialEq for ItemType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ItemType {}

impl Hash for ItemType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemType({})", self.name)
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A value that can live in a [`DataSource`](crate::DataSource).
///
/// Blanket-implemented for every `'static + Send + Sync + Debug + PartialEq`
/// type.
pub trait Item: Any + Send + Sync + fmt::Debug {
    /// The runtime type of this item.
    fn item_type(&self) -> ItemType;

    /// This item as `Any`, for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Equality against another, possibly differently typed, item.
    fn dyn_eq(&self, other: &dyn Item) -> bool;
}

impl<T> Item for T
where
    T: Any + Send + Sync + fmt::Debug + PartialEq,
{
    fn item_type(&self) -> ItemType {
        ItemType::of::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn Item) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| other == self)
    }
}

impl dyn Item {
    /// Returns `true` if this item is a `T`.
    pub fn is<T: Item>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Downcasts to a concrete item type.
    pub fn downcast_ref<T: Item>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Shared reference to a type-erased item, as stored by the data source.
pub type ItemRef = Arc<dyn Item>;

/// Wraps an item into an [`ItemRef`].
pub fn item_ref<T: Item>(item: T) -> ItemRef {
    Arc::new(item)
}

/// Identifier of a host resource: a layout, drawable, string or color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub u32);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08x}", self.0)
    }
}

/// A view produced by the host when inflating a layout.
///
/// The binding layer never inspects it; it is handed to the definition's
/// holder constructor, which downcasts it to whatever the host produces.
pub type View = Box<dyn Any + Send + Sync>;
