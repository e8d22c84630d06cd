//! Prelude module for Lattice Recycler.
//!
//! ```ignore
//! use lattice_recycler::prelude::*;
//! ```
//!
//! This provides access to:
//! - Setup and the handle (`RecyclerSetup`, `RecyclerHandle`)
//! - Item definitions and callback scopes (`ItemDefinition`, `ItemScope`)
//! - The data source and its changes (`DataSource`, `ListChange`)
//! - Host-facing types (`ListViewHost`, `EmptyView`, `DefinitionAdapter`)

// ============================================================================
// Setup and Handle
// ============================================================================

pub use crate::handle::{HandleSignals, RecyclerHandle};
pub use crate::setup::RecyclerSetup;

// ============================================================================
// Items and Definitions
// ============================================================================

pub use crate::definition::{ClickKind, Definition, ItemDefinition, ItemScope};
pub use crate::item::{Item, ItemRef, ItemType, ResourceId, View};
pub use crate::registry::{ItemRegistry, ViewType};
pub use crate::swipe::{SwipeAction, SwipeLocation, SwipeStyle};

// ============================================================================
// Data and Host
// ============================================================================

pub use crate::adapter::{DefinitionAdapter, ViewHolder};
pub use crate::data_source::{DataSource, ListChange};
pub use crate::host::{EmptyView, ListViewHost};

// ============================================================================
// Errors and Threading
// ============================================================================

pub use crate::error::{Error, Result};
pub use lattice_recycler_core::{Signal, ThreadAffinity};
