//! Book Repository
//!
//! SQLite-backed CRUD for books. Mirrors the notebook repository, plus the
//! print lifecycle status column. Deleting a book cascades to its
//! membership rows in the same transaction.

use async_trait::async_trait;
use rusqlite::params;

use crate::domain::{Book, BookStatus, DomainError, DomainResult};
use super::db::DbConn;
use super::traits::Repository;

pub struct BookRepository {
    conn: DbConn,
}

const BOOK_COLUMNS: &str = "id, owner_id, title, description, status, cover_image, created_at, updated_at";

impl BookRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }

    /// Persist a status change. Transition legality is checked by the
    /// command layer before this runs.
    pub async fn set_status(&self, id: u32, status: BookStatus) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let now = chrono::Utc::now().timestamp_millis();

        let changed = conn
            .execute(
                "UPDATE books SET status = ?, updated_at = ? WHERE id = ?",
                params![status.as_str(), now, id],
            )
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        if changed == 0 {
            return Err(DomainError::NotFound(format!("Book {}", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl Repository<Book> for BookRepository {
    async fn create(&self, entity: &Book) -> DomainResult<Book> {
        let conn = self.conn.lock().await;
        let now = chrono::Utc::now().timestamp_millis();

        conn.execute(
            "INSERT INTO books (owner_id, title, description, status, cover_image, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                entity.owner_id,
                entity.title,
                entity.description,
                entity.status.as_str(),
                entity.cover_image,
                now,
                now
            ],
        )
        .map_err(|e| DomainError::Storage(e.to_string()))?;

        let mut created = entity.clone();
        created.id = conn.last_insert_rowid() as u32;
        created.created_at = Some(now);
        created.updated_at = Some(now);
        Ok(created)
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Book>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn
            .prepare(&format!("SELECT {} FROM books WHERE id = ?", BOOK_COLUMNS))
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        let mut rows = stmt
            .query(params![id])
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        if let Ok(Some(row)) = rows.next() {
            Ok(Some(row_to_book(row)?))
        } else {
            Ok(None)
        }
    }

    async fn list_by_owner(&self, owner_id: u32) -> DomainResult<Vec<Book>> {
        let conn = self.conn.lock().await;

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM books WHERE owner_id = ? ORDER BY updated_at DESC, id",
                BOOK_COLUMNS
            ))
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        let mut rows = stmt
            .query(params![owner_id])
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        let mut books = Vec::new();
        while let Ok(Some(row)) = rows.next() {
            books.push(row_to_book(row)?);
        }
        Ok(books)
    }

    async fn update(&self, entity: &Book) -> DomainResult<Book> {
        let conn = self.conn.lock().await;
        let now = chrono::Utc::now().timestamp_millis();

        let changed = conn
            .execute(
                "UPDATE books SET title = ?, description = ?, status = ?, cover_image = ?, updated_at = ? WHERE id = ?",
                params![
                    entity.title,
                    entity.description,
                    entity.status.as_str(),
                    entity.cover_image,
                    now,
                    entity.id
                ],
            )
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        if changed == 0 {
            return Err(DomainError::NotFound(format!("Book {}", entity.id)));
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

        tx.execute("DELETE FROM book_recipes WHERE book_id = ?", params![id])
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        let deleted = tx
            .execute("DELETE FROM books WHERE id = ?", params![id])
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        if deleted == 0 {
            return Err(DomainError::NotFound(format!("Book {}", id)));
        }

        tx.commit().map_err(|e| DomainError::Storage(e.to_string()))?;
        Ok(())
    }
}

/// Convert a database row to Book
fn row_to_book(row: &rusqlite::Row<'_>) -> DomainResult<Book> {
    let status: String = row.get(4).unwrap_or_else(|_| "draft".to_string());
    Ok(Book {
        id: row.get(0).map_err(|e| DomainError::Storage(e.to_string()))?,
        owner_id: row.get(1).map_err(|e| DomainError::Storage(e.to_string()))?,
        title: row.get(2).map_err(|e| DomainError::Storage(e.to_string()))?,
        description: row.get(3).ok(),
        status: BookStatus::from_str(&status),
        cover_image: row.get(5).ok(),
        created_at: row.get(6).ok(),
        updated_at: row.get(7).ok(),
    })
}
