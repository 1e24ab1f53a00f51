//! Database Connection and Setup
//!
//! Manages the SQLite database connection and migrations.

use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

/// Shared handle to the single SQLite connection
pub type DbConn = Arc<Mutex<Connection>>;

/// Open the database at `db_path` and run migrations
pub fn init_db(db_path: &Path) -> DomainResult<DbConn> {
    let conn = Connection::open(db_path)
        .map_err(|e| DomainError::Storage(format!("Failed to open db: {}", e)))?;
    open_with(conn)
}

/// In-memory database, used by tests
pub fn init_db_in_memory() -> DomainResult<DbConn> {
    let conn = Connection::open_in_memory()
        .map_err(|e| DomainError::Storage(format!("Failed to open db: {}", e)))?;
    open_with(conn)
}

fn open_with(conn: Connection) -> DomainResult<DbConn> {
    run_migrations(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS recipes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id INTEGER NOT NULL,
            title TEXT NOT NULL,
            ingredients TEXT NOT NULL DEFAULT '[]',
            steps TEXT NOT NULL DEFAULT '',
            author TEXT,
            prep_time TEXT,
            image_url TEXT,
            tags TEXT NOT NULL DEFAULT '[]',
            created_at INTEGER,
            updated_at INTEGER
        );

        CREATE TABLE IF NOT EXISTS notebooks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id INTEGER NOT NULL,
            title TEXT NOT NULL,
            description TEXT,
            created_at INTEGER,
            updated_at INTEGER
        );

        CREATE TABLE IF NOT EXISTS books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id INTEGER NOT NULL,
            title TEXT NOT NULL,
            description TEXT,
            status TEXT NOT NULL DEFAULT 'draft',
            cover_image TEXT,
            created_at INTEGER,
            updated_at INTEGER
        );

        CREATE TABLE IF NOT EXISTS notebook_recipes (
            notebook_id INTEGER NOT NULL,
            recipe_id INTEGER NOT NULL,
            position INTEGER NOT NULL DEFAULT 0,
            UNIQUE(notebook_id, recipe_id)
        );

        CREATE TABLE IF NOT EXISTS book_recipes (
            book_id INTEGER NOT NULL,
            recipe_id INTEGER NOT NULL,
            position INTEGER NOT NULL DEFAULT 0,
            UNIQUE(book_id, recipe_id)
        );

        CREATE INDEX IF NOT EXISTS idx_recipes_owner ON recipes(owner_id);
        CREATE INDEX IF NOT EXISTS idx_notebooks_owner ON notebooks(owner_id);
        CREATE INDEX IF NOT EXISTS idx_books_owner ON books(owner_id);
        CREATE INDEX IF NOT EXISTS idx_notebook_recipes_notebook ON notebook_recipes(notebook_id);
        CREATE INDEX IF NOT EXISTS idx_book_recipes_book ON book_recipes(book_id);",
    )
    .map_err(|e| DomainError::Storage(format!("Migration failed: {}", e)))?;

    Ok(())
}
