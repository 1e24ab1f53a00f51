//! Book Commands
//!
//! Book CRUD, print lifecycle transitions, and compiling a book from an
//! existing notebook.

use crate::domain::{Book, BookStatus, ContainerKind, DomainError, DomainResult};
use crate::repository::Repository;
use crate::AppState;

/// Create a new book (starts as a draft)
pub async fn create_book(
    state: &AppState,
    owner_id: u32,
    title: String,
    description: Option<String>,
) -> DomainResult<Book> {
    if title.trim().is_empty() {
        return Err(DomainError::InvalidInput("title must not be empty".to_string()));
    }

    let mut book = Book::new(0, owner_id, title); // ID assigned by database
    book.description = description;
    state.book_repo.create(&book).await
}

/// Create a book from a notebook, copying its title, description and member
/// list in order. The new book starts as a draft.
pub async fn from_notebook(state: &AppState, notebook_id: u32) -> DomainResult<Book> {
    let notebook = state
        .notebook_repo
        .find_by_id(notebook_id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("Notebook {}", notebook_id)))?;

    let mut book = Book::new(0, notebook.owner_id, notebook.title);
    book.description = notebook.description;
    let book = state.book_repo.create(&book).await?;

    let recipe_ids = state
        .collection(ContainerKind::Notebook)
        .member_recipe_ids(notebook_id)
        .await?;
    for recipe_id in recipe_ids {
        state
            .collection(ContainerKind::Book)
            .add_member(book.id, recipe_id)
            .await?;
    }

    Ok(book)
}

/// Get book by ID
pub async fn get_book(state: &AppState, id: u32) -> DomainResult<Option<Book>> {
    state.book_repo.find_by_id(id).await
}

/// List an owner's books
pub async fn list_books(state: &AppState, owner_id: u32) -> DomainResult<Vec<Book>> {
    state.book_repo.list_by_owner(owner_id).await
}

/// Update title/description/cover
pub async fn update_book(
    state: &AppState,
    id: u32,
    title: Option<String>,
    description: Option<String>,
    cover_image: Option<String>,
) -> DomainResult<Book> {
    let existing = state
        .book_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("Book {}", id)))?;

    let updated = Book {
        id: existing.id,
        owner_id: existing.owner_id,
        title: title.unwrap_or(existing.title),
        description: description.or(existing.description),
        status: existing.status,
        cover_image: cover_image.or(existing.cover_image),
        created_at: existing.created_at,
        updated_at: existing.updated_at,
    };

    state.book_repo.update(&updated).await
}

/// Advance (or roll back) the print lifecycle. Illegal transitions are
/// rejected before anything is written.
pub async fn set_book_status(state: &AppState, id: u32, status: BookStatus) -> DomainResult<Book> {
    let existing = state
        .book_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("Book {}", id)))?;

    if !existing.status.can_transition_to(status) {
        return Err(DomainError::InvalidInput(format!(
            "cannot move book {} from {} to {}",
            id,
            existing.status.as_str(),
            status.as_str()
        )));
    }

    state.book_repo.set_status(id, status).await?;
    log::info!("book {} is now {}", id, status.as_str());

    let mut book = existing;
    book.status = status;
    Ok(book)
}

/// Delete book (cascade deletes its memberships)
pub async fn delete_book(state: &AppState, id: u32) -> DomainResult<()> {
    state.book_repo.delete(id).await
}
