//! Collection Repository Module
//!
//! The membership store for container↔recipe ordering, split into:
//! - collection_repo: membership CRUD (members, add, remove)
//! - collection_positioning: position management (next position, reindex, reorder)

mod collection_repo;
mod collection_positioning;

pub use collection_repo::CollectionRepository;
pub use collection_positioning::CollectionPositioningOperations;

use rusqlite::{params, Connection};

use crate::domain::{DomainError, DomainResult};

/// Rewrite a container's positions to 0..n-1 in current position order.
/// Runs on an open transaction so callers can pair it with a delete.
pub(crate) fn renumber_in_tx(
    conn: &Connection,
    member_table: &str,
    container_column: &str,
    container_id: u32,
) -> DomainResult<()> {
    let mut recipe_ids = Vec::new();
    {
        let mut stmt = conn
            .prepare(&format!(
                "SELECT recipe_id FROM {} WHERE {} = ? ORDER BY position, recipe_id",
                member_table, container_column
            ))
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        let mut rows = stmt
            .query(params![container_id])
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        while let Ok(Some(row)) = rows.next() {
            let id: u32 = row.get(0).map_err(|e| DomainError::Storage(e.to_string()))?;
            recipe_ids.push(id);
        }
    }

    for (position, recipe_id) in recipe_ids.iter().enumerate() {
        conn.execute(
            &format!(
                "UPDATE {} SET position = ? WHERE {} = ? AND recipe_id = ?",
                member_table, container_column
            ),
            params![position as i32, container_id, *recipe_id],
        )
        .map_err(|e| DomainError::Storage(e.to_string()))?;
    }

    Ok(())
}
