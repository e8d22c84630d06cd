//! Swipe action configuration.
//!
//! Gesture detection is left to the host's swipe provider. This module only
//! stores what should happen for each item type and swipe location: the
//! visuals drawn behind the row, and a callback that decides whether the
//! swiped item is removed.

use std::fmt;
use std::sync::Arc;

use crate::definition::ItemScope;
use crate::item::ResourceId;

/// The edge a row is swiped towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SwipeLocation {
    /// Swiped towards the leading (left) edge.
    Left,
    /// Swiped towards the trailing (right) edge.
    Right,
}

impl SwipeLocation {
    /// Both locations.
    pub const ALL: [SwipeLocation; 2] = [SwipeLocation::Left, SwipeLocation::Right];
}

/// Visuals drawn behind a row while it is swiped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwipeStyle {
    /// Drawable shown next to the text.
    pub icon: Option<ResourceId>,
    /// String resource for the label.
    pub text: Option<ResourceId>,
    /// Background color resource.
    pub color: Option<ResourceId>,
}

/// Callback invoked when a swipe completes. Return `true` to remove the item.
pub type SwipeCallback<I> = Arc<dyn Fn(&ItemScope<'_, I>) -> bool + Send + Sync>;

/// A swipe action for items of type `I`.
///
/// # Example
///
/// ```
/// use lattice_recycler::{ResourceId, SwipeAction};
///
/// #[derive(Debug, PartialEq)]
/// struct Message(String);
///
/// let delete = SwipeAction::<Message>::new()
///     .icon(ResourceId(0x7f08_0001))
///     .text(ResourceId(0x7f0f_0002))
///     .color(ResourceId(0x7f05_0003))
///     .callback(|scope| {
///         println!("Deleting {:?}", scope.item());
///         true
///     });
/// assert!(delete.has_callback());
/// ```
pub struct SwipeAction<I> {
    style: SwipeStyle,
    callback: Option<SwipeCallback<I>>,
}

impl<I> Default for SwipeAction<I> {
    fn default() -> Self {
        Self {
            style: SwipeStyle::default(),
            callback: None,
        }
    }
}

impl<I> Clone for SwipeAction<I> {
    fn clone(&self) -> Self {
        Self {
            style: self.style,
            callback: self.callback.clone(),
        }
    }
}

impl<I> SwipeAction<I> {
    /// Creates an action with no visuals and no callback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the icon drawable.
    pub fn icon(mut self, icon: ResourceId) -> Self {
        self.style.icon = Some(icon);
        self
    }

    /// Sets the label string resource.
    pub fn text(mut self, text: ResourceId) -> Self {
        self.style.text = Some(text);
        self
    }

    /// Sets the background color resource.
    pub fn color(mut self, color: ResourceId) -> Self {
        self.style.color = Some(color);
        self
    }

    /// Sets the completion callback.
    pub fn callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ItemScope<'_, I>) -> bool + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    /// The visuals of this action.
    pub fn style(&self) -> &SwipeStyle {
        &self.style
    }

    /// Returns `true` if a callback is configured.
    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// Runs the callback. Without one the item is kept.
    pub fn invoke(&self, scope: &ItemScope<'_, I>) -> bool {
        self.callback.as_ref().is_some_and(|callback| callback(scope))
    }
}

impl<I> fmt::Debug for SwipeAction<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwipeAction")
            .field("style", &self.style)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}
