//! Optimistic Reorder State Machine
//!
//! Keeps a responsive local view of a container's ordering while a drag
//! gesture is in progress, independent of server round-trip latency. The
//! order captured at drag start is the single rollback point: a failed
//! server call snaps the view back to it. No automatic retry; the user
//! re-attempts the gesture.

use async_trait::async_trait;

use crate::domain::DomainResult;

/// Take the entry at `from` out and reinsert it at `to`. Every other
/// entry keeps its relative order. Out-of-range indices are a no-op.
pub fn move_entry<T>(entries: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= entries.len() || to >= entries.len() {
        return;
    }
    let entry = entries.remove(from);
    entries.insert(to, entry);
}

/// Where the local view stands relative to the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Local order mirrors the last known server order
    Synced,
    /// Gesture in progress; local order mutated optimistically
    Dragging,
    /// Gesture released; reorder request in flight
    Pending,
    /// Request failed; local order was reset to the pre-drag snapshot
    Reverted,
}

/// Per-container view of the ordering during interactive reordering
#[derive(Debug, Clone)]
pub struct OrderSync {
    order: Vec<u32>,
    /// Last known-good server order, captured when a drag starts
    snapshot: Option<Vec<u32>>,
    state: SyncState,
}

impl OrderSync {
    pub fn new(server_order: Vec<u32>) -> Self {
        Self {
            order: server_order,
            snapshot: None,
            state: SyncState::Synced,
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    /// The order currently shown to the user
    pub fn order(&self) -> &[u32] {
        &self.order
    }

    /// Drag-start. Captures the rollback snapshot. Ignored while a prior
    /// request is still in flight.
    pub fn begin_drag(&mut self) -> bool {
        if self.state == SyncState::Pending {
            return false;
        }
        self.snapshot = Some(self.order.clone());
        self.state = SyncState::Dragging;
        true
    }

    /// Visual feedback while dragging: apply the move locally, no network
    pub fn drag_move(&mut self, from: usize, to: usize) {
        if self.state != SyncState::Dragging {
            return;
        }
        move_entry(&mut self.order, from, to);
    }

    /// Drag-end. Returns the full order to send to the server.
    pub fn release(&mut self) -> Vec<u32> {
        if self.state == SyncState::Dragging {
            self.state = SyncState::Pending;
        }
        self.order.clone()
    }

    /// Server confirmed: adopt the canonical order
    pub fn confirm(&mut self, server_order: Vec<u32>) {
        self.order = server_order;
        self.snapshot = None;
        self.state = SyncState::Synced;
    }

    /// Server rejected or the request failed: snap back to the snapshot
    pub fn fail(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            self.order = snapshot;
        }
        self.state = SyncState::Reverted;
    }

    /// Replace the view with a freshly fetched server order
    pub fn resync(&mut self, server_order: Vec<u32>) {
        self.order = server_order;
        self.snapshot = None;
        self.state = SyncState::Synced;
    }
}

/// What the state machine needs from the network side
#[async_trait]
pub trait ReorderTransport {
    /// Submit a full ordering; returns the canonical server order
    async fn reorder(&self, container_id: u32, order: &[u32]) -> DomainResult<Vec<u32>>;
}

/// Drive a released drag to completion: send the reorder, then settle the
/// view as Synced (success) or Reverted (failure). The error is passed back
/// so the UI can notify the user.
pub async fn commit_drag<T: ReorderTransport>(
    sync: &mut OrderSync,
    transport: &T,
    container_id: u32,
) -> DomainResult<()> {
    let order = sync.release();
    match transport.reorder(container_id, &order).await {
        Ok(server_order) => {
            sync.confirm(server_order);
            Ok(())
        }
        Err(e) => {
            sync.fail();
            Err(e)
        }
    }
}
