//! Client Reconciliation Layer
//!
//! Transport-agnostic pieces a UI embeds to keep reordering responsive:
//! the optimistic per-container state machine and the array-move helper
//! that interprets a drag gesture.

mod reorder;

pub use reorder::{commit_drag, move_entry, OrderSync, ReorderTransport, SyncState};
