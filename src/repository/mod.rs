//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
mod recipe_repo;
mod notebook_repo;
mod book_repo;
mod collection;

#[cfg(test)]
mod tests;

pub use traits::{Repository, SearchableRepository};
pub use db::{init_db, init_db_in_memory, DbConn};
pub use recipe_repo::RecipeRepository;
pub use notebook_repo::NotebookRepository;
pub use book_repo::BookRepository;
pub use collection::{CollectionPositioningOperations, CollectionRepository};
