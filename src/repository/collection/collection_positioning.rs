//! Collection Positioning Operations
//!
//! Position management for container memberships. Per container, positions
//! must always be exactly 0..n-1 in membership order.

use async_trait::async_trait;
use rusqlite::params;
use std::collections::HashSet;

use crate::domain::{DomainError, DomainResult};

/// Trait for membership positioning operations
#[async_trait]
pub trait CollectionPositioningOperations {
    /// Next tail position for a container (used in add)
    async fn next_position(&self, container_id: u32) -> DomainResult<i32>;

    /// Rewrite a container's positions to be sequential (0, 1, 2, ...)
    async fn reindex_members(&self, container_id: u32) -> DomainResult<()>;

    /// Replace a container's ordering with the given permutation of its
    /// current members. All position writes are one atomic unit.
    async fn reorder(&self, container_id: u32, ordered_recipe_ids: &[u32]) -> DomainResult<()>;
}

#[async_trait]
impl CollectionPositioningOperations for super::collection_repo::CollectionRepository {
    async fn next_position(&self, container_id: u32) -> DomainResult<i32> {
        let conn = self.conn.lock().await;

        conn.query_row(
            &format!(
                "SELECT COALESCE(MAX(position), -1) + 1 FROM {} WHERE {} = ?",
                self.kind.member_table(),
                self.kind.container_column()
            ),
            params![container_id],
            |row| row.get(0),
        )
        .map_err(|e| DomainError::Storage(e.to_string()))
    }

    async fn reindex_members(&self, container_id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        super::renumber_in_tx(
            &tx,
            self.kind.member_table(),
            self.kind.container_column(),
            container_id,
        )?;

        tx.commit().map_err(|e| DomainError::Storage(e.to_string()))
    }

    async fn reorder(&self, container_id: u32, ordered_recipe_ids: &[u32]) -> DomainResult<()> {
        let conn = self.conn.lock().await;

        if !super::collection_repo::exists(
            &conn,
            &format!("SELECT 1 FROM {} WHERE id = ?", self.kind.container_table()),
            params![container_id],
        )? {
            return Err(DomainError::NotFound(format!(
                "{} {}",
                self.kind.container_table(),
                container_id
            )));
        }

        // Current members, any order
        let mut current = HashSet::new();
        {
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT recipe_id FROM {} WHERE {} = ?",
                    self.kind.member_table(),
                    self.kind.container_column()
                ))
                .map_err(|e| DomainError::Storage(e.to_string()))?;
            let mut rows = stmt
                .query(params![container_id])
                .map_err(|e| DomainError::Storage(e.to_string()))?;
            while let Ok(Some(row)) = rows.next() {
                let id: u32 = row.get(0).map_err(|e| DomainError::Storage(e.to_string()))?;
                current.insert(id);
            }
        }

        // The payload must be an exact permutation: same ids, no repeats
        let proposed: HashSet<u32> = ordered_recipe_ids.iter().copied().collect();
        if ordered_recipe_ids.len() != current.len() || proposed != current {
            return Err(DomainError::InvalidOrder(format!(
                "expected a permutation of {} members, got {} ids",
                current.len(),
                ordered_recipe_ids.len()
            )));
        }

        let tx = conn
            .unchecked_transaction()
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        for (position, recipe_id) in ordered_recipe_ids.iter().enumerate() {
            tx.execute(
                &format!(
                    "UPDATE {} SET position = ? WHERE {} = ? AND recipe_id = ?",
                    self.kind.member_table(),
                    self.kind.container_column()
                ),
                params![position as i32, container_id, *recipe_id],
            )
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        }
        tx.commit().map_err(|e| DomainError::Storage(e.to_string()))?;

        log::debug!(
            "reordered {} {} ({} members)",
            self.kind.container_table(),
            container_id,
            ordered_recipe_ids.len()
        );
        Ok(())
    }
}
