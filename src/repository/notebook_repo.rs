//! Notebook Repository
//!
//! SQLite-backed CRUD for notebooks. Deleting a notebook also deletes its
//! membership rows, in the same transaction (explicit cascade).

use async_trait::async_trait;
use rusqlite::params;

use crate::domain::{DomainError, DomainResult, Notebook};
use super::db::DbConn;
use super::traits::Repository;

pub struct NotebookRepository {
    conn: DbConn,
}

impl NotebookRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<Notebook> for NotebookRepository {
    async fn create(&self, entity: &Notebook) -> DomainResult<Notebook> {
        let conn = self.conn.lock().await;
        let now = chrono::Utc::now().timestamp_millis();

        conn.execute(
            "INSERT INTO notebooks (owner_id, title, description, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
            params![entity.owner_id, entity.title, entity.description, now, now],
        )
        .map_err(|e| DomainError::Storage(e.to_string()))?;

        let mut created = entity.clone();
        created.id = conn.last_insert_rowid() as u32;
        created.created_at = Some(now);
        created.updated_at = Some(now);
        Ok(created)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Notebook>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn
            .prepare("SELECT id, owner_id, title, description, created_at, updated_at FROM notebooks WHERE id = ?")
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        let mut rows = stmt
            .query(params![id])
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        if let Ok(Some(row)) = rows.next() {
            Ok(Some(row_to_notebook(row)?))
        } else {
            Ok(None)
        }
    }

    async fn list_by_owner(&self, owner_id: u32) -> DomainResult<Vec<Notebook>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn
            .prepare("SELECT id, owner_id, title, description, created_at, updated_at FROM notebooks WHERE owner_id = ? ORDER BY updated_at DESC, id")
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        let mut rows = stmt
            .query(params![owner_id])
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        let mut notebooks = Vec::new();
        while let Ok(Some(row)) = rows.next() {
            notebooks.push(row_to_notebook(row)?);
        }
        Ok(notebooks)
    }

    async fn update(&self, entity: &Notebook) -> DomainResult<Notebook> {
        let conn = self.conn.lock().await;
        let now = chrono::Utc::now().timestamp_millis();

        let changed = conn
            .execute(
                "UPDATE notebooks SET title = ?, description = ?, updated_at = ? WHERE id = ?",
                params![entity.title, entity.description, now, entity.id],
            )
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        if changed == 0 {
            return Err(DomainError::NotFound(format!("Notebook {}", entity.id)));
        }

        let mut updated = entity.clone();
        updated.updated_at = Some(now);
        Ok(updated)
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        // Memberships first, then the notebook itself
        tx.execute("DELETE FROM notebook_recipes WHERE notebook_id = ?", params![id])
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        let deleted = tx
            .execute("DELETE FROM notebooks WHERE id = ?", params![id])
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        if deleted == 0 {
            return Err(DomainError::NotFound(format!("Notebook {}", id)));
        }

        tx.commit().map_err(|e| DomainError::Storage(e.to_string()))?;
        Ok(())
    }
}

/// Convert a database row to Notebook
fn row_to_notebook(row: &rusqlite::Row<'_>) -> DomainResult<Notebook> {
    Ok(Notebook {
        id: row.get(0).map_err(|e| DomainError::Storage(e.to_string()))?,
        owner_id: row.get(1).map_err(|e| DomainError::Storage(e.to_string()))?,
        title: row.get(2).map_err(|e| DomainError::Storage(e.to_string()))?,
        description: row.get(3).ok(),
        created_at: row.get(4).ok(),
        updated_at: row.get(5).ok(),
    })
}
