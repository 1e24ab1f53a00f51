//! Collection Repository - Membership CRUD
//!
//! SQLite-backed store for the ordered many-to-many relation between a
//! container (notebook or book) and its recipes. One repository instance
//! serves one container kind; the kind selects the join table.
//! Position management is in collection_positioning.

use rusqlite::params;

use crate::domain::{ContainerKind, DomainError, DomainResult, Membership};
use super::super::db::DbConn;

pub struct CollectionRepository {
    pub(super) conn: DbConn,
    pub(super) kind: ContainerKind,
}

impl CollectionRepository {
    pub fn new(conn: DbConn, kind: ContainerKind) -> Self {
        Self { conn, kind }
    }

    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// All memberships of a container, ordered by position ascending
    pub async fn members(&self, container_id: u32) -> DomainResult<Vec<Membership>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {col}, recipe_id, position FROM {table} WHERE {col} = ? ORDER BY position, recipe_id",
                col = self.kind.container_column(),
                table = self.kind.member_table(),
            ))
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        let mut rows = stmt
            .query(params![container_id])
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        let mut memberships = Vec::new();
        while let Ok(Some(row)) = rows.next() {
            memberships.push(Membership {
                container_id: row.get(0).map_err(|e| DomainError::Storage(e.to_string()))?,
                recipe_id: row.get(1).map_err(|e| DomainError::Storage(e.to_string()))?,
                position: row.get(2).map_err(|e| DomainError::Storage(e.to_string()))?,
            });
        }
        Ok(memberships)
    }

    /// Member recipe ids of a container, in position order
    pub async fn member_recipe_ids(&self, container_id: u32) -> DomainResult<Vec<u32>> {
        Ok(self
            .members(container_id)
            .await?
            .into_iter()
            .map(|m| m.recipe_id)
            .collect())
    }

    /// Whether a membership exists for the pair
    pub async fn contains(&self, container_id: u32, recipe_id: u32) -> DomainResult<bool> {
        let conn = self.conn.lock().await;
        exists(
            &conn,
            &format!(
                "SELECT 1 FROM {} WHERE {} = ? AND recipe_id = ?",
                self.kind.member_table(),
                self.kind.container_column()
            ),
            params![container_id, recipe_id],
        )
    }

    /// Add a recipe at the tail of a container's ordering.
    /// Returns the assigned position.
    pub async fn add_member(&self, container_id: u32, recipe_id: u32) -> DomainResult<i32> {
        let conn = self.conn.lock().await;

        if !exists(
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
        if !exists(&conn, "SELECT 1 FROM recipes WHERE id = ?", params![recipe_id])? {
            return Err(DomainError::NotFound(format!("recipe {}", recipe_id)));
        }
        if exists(
            &conn,
            &format!(
                "SELECT 1 FROM {} WHERE {} = ? AND recipe_id = ?",
                self.kind.member_table(),
                self.kind.container_column()
            ),
            params![container_id, recipe_id],
        )? {
            return Err(DomainError::Duplicate(format!(
                "recipe {} in {} {}",
                recipe_id,
                self.kind.container_table(),
                container_id
            )));
        }

        // Tail position: max existing + 1, 0 for an empty container
        let position: i32 = conn
            .query_row(
                &format!(
                    "SELECT COALESCE(MAX(position), -1) + 1 FROM {} WHERE {} = ?",
                    self.kind.member_table(),
                    self.kind.container_column()
                ),
                params![container_id],
                |row| row.get(0),
            )
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        conn.execute(
            &format!(
                "INSERT INTO {} ({}, recipe_id, position) VALUES (?, ?, ?)",
                self.kind.member_table(),
                self.kind.container_column()
            ),
            params![container_id, recipe_id, position],
        )
        .map_err(|e| DomainError::Storage(e.to_string()))?;

        log::debug!(
            "added recipe {} to {} {} at position {}",
            recipe_id,
            self.kind.container_table(),
            container_id,
            position
        );
        Ok(position)
    }

    /// Remove a recipe from a container and close the position gap.
    /// Delete and renumber happen in one transaction.
    pub async fn remove_member(&self, container_id: u32, recipe_id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        let deleted = tx
            .execute(
                &format!(
                    "DELETE FROM {} WHERE {} = ? AND recipe_id = ?",
                    self.kind.member_table(),
                    self.kind.container_column()
                ),
                params![container_id, recipe_id],
            )
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        if deleted == 0 {
            return Err(DomainError::NotFound(format!(
                "recipe {} in {} {}",
                recipe_id,
                self.kind.container_table(),
                container_id
            )));
        }

        super::renumber_in_tx(
            &tx,
            self.kind.member_table(),
            self.kind.container_column(),
            container_id,
        )?;

        tx.commit().map_err(|e| DomainError::Storage(e.to_string()))?;
        log::debug!(
            "removed recipe {} from {} {}",
            recipe_id,
            self.kind.container_table(),
            container_id
        );
        Ok(())
    }
}

/// One-row existence check
pub(super) fn exists(
    conn: &rusqlite::Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> DomainResult<bool> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| DomainError::Storage(e.to_string()))?;
    stmt.exists(params)
        .map_err(|e| DomainError::Storage(e.to_string()))
}
