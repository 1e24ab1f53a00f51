//! Recipe Shelf Backend
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Data access abstractions and implementations
//! - commands: Application-facing operations a transport layer can expose
//! - client: Optimistic reorder state machine for interactive UIs
//!
//! Callers are expected to have authenticated the user and verified container
//! ownership before invoking any command; commands attribute work to the
//! owner ids already present on the entities.

use std::path::Path;

pub mod domain;
pub mod repository;
pub mod commands;
pub mod client;

use domain::{ContainerKind, DomainResult};
use repository::{
    init_db, init_db_in_memory, BookRepository, CollectionRepository, DbConn, NotebookRepository,
    RecipeRepository,
};

/// Application state shared across commands
pub struct AppState {
    pub recipe_repo: RecipeRepository,
    pub notebook_repo: NotebookRepository,
    pub book_repo: BookRepository,
    pub notebook_recipes: CollectionRepository,
    pub book_recipes: CollectionRepository,
}

impl AppState {
    /// Open (or create) the database at `db_path` and wire up repositories
    pub fn open(db_path: &Path) -> DomainResult<Self> {
        Ok(Self::from_conn(init_db(db_path)?))
    }

    /// In-memory state, used by tests
    pub fn open_in_memory() -> DomainResult<Self> {
        Ok(Self::from_conn(init_db_in_memory()?))
    }

    fn from_conn(conn: DbConn) -> Self {
        Self {
            recipe_repo: RecipeRepository::new(conn.clone()),
            notebook_repo: NotebookRepository::new(conn.clone()),
            book_repo: BookRepository::new(conn.clone()),
            notebook_recipes: CollectionRepository::new(conn.clone(), ContainerKind::Notebook),
            book_recipes: CollectionRepository::new(conn, ContainerKind::Book),
        }
    }

    /// Membership store for a container kind
    pub fn collection(&self, kind: ContainerKind) -> &CollectionRepository {
        match kind {
            ContainerKind::Notebook => &self.notebook_recipes,
            ContainerKind::Book => &self.book_recipes,
        }
    }
}
