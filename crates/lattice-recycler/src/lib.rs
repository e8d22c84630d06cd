//! Lattice Recycler - declarative list binding.
//!
//! Describe each item type once with an [`ItemDefinition`] (layout, view
//! holder, bind callback, click and swipe behaviour), hand a [`DataSource`]
//! to [`RecyclerSetup`], and the resulting [`RecyclerHandle`] keeps the
//! list view host in sync with every mutation of the data source.
//!
//! The core crate's signal, thread-affinity and logging facilities are
//! re-exported here.
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
//!     fn notify(&self, change: &ListChange) {
//!         println!("re-layout: {:?}", change);
//!     }
//! }
//!
//! #[derive(Debug, PartialEq)]
//! struct Track {
//!     id: u64,
//!     title: String,
//! }
//!
//! #[derive(Default)]
//! struct TrackHolder {
//!     title: String,
//! }
//!
//! fn main() -> Result<()> {
//!     let tracks = DataSource::new();
//!     let handle = RecyclerSetup::new(Arc::new(Host))
//!         .with_data_source(tracks.clone())
//!         .with_item(
//!             ItemDefinition::<Track, TrackHolder>::new(
//!                 ResourceId(0x7f0b_0010),
//!                 |_view| TrackHolder::default(),
//!                 |holder, scope| holder.title = scope.item().title.clone(),
//!             )
//!             .has_stable_ids(|track| track.id)
//!             .with_swipe_action(
//!                 SwipeLocation::Left,
//!                 SwipeAction::new().text(ResourceId(0x7f0f_0001)).callback(|_| true),
//!             ),
//!         )
//!         .build()?;
//!
//!     tracks.add(Track { id: 7, title: "Intro".into() })?;
//!
//!     let adapter = handle.adapter();
//!     let view_type = adapter.view_type_for_position(0)?;
//!     let mut holder = adapter.create_view_holder(view_type)?;
//!     adapter.bind_view_holder(&mut holder, 0)?;
//!     assert_eq!(holder.get::<TrackHolder>().map(|h| h.title.as_str()), Some("Intro"));
//!
//!     // Swiping left removes the track.
//!     assert!(adapter.dispatch_swipe(0, SwipeLocation::Left)?);
//!     assert!(tracks.is_empty());
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod data_source;
pub mod definition;
pub mod error;
pub mod handle;
pub mod host;
pub mod item;
pub mod prelude;
pub mod registry;
pub mod setup;
pub mod swipe;

pub use lattice_recycler_core::*;

pub use adapter::{DefinitionAdapter, ViewHolder};
pub use data_source::{DataSource, DataSourceListener, ListChange};
pub use definition::{ClickKind, Definition, ErasedHolder, ItemDefinition, ItemScope};
pub use error::{Error, Result};
pub use handle::{HandleSignals, RecyclerHandle};
pub use host::{EmptyView, ListViewHost};
pub use item::{item_ref, Item, ItemRef, ItemType, ResourceId, View};
pub use registry::{ItemRegistry, ViewType};
pub use setup::RecyclerSetup;
pub use swipe::{SwipeAction, SwipeLocation, SwipeStyle};
