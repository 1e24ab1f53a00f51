//! Notebook Commands
//!
//! Notebook CRUD. Membership operations live in collection_cmd and are
//! shared with books.

use crate::domain::{DomainError, DomainResult, Notebook};
use crate::repository::Repository;
use crate::AppState;

/// Create a new notebook
pub async fn create_notebook(
    state: &AppState,
    owner_id: u32,
    title: String,
    description: Option<String>,
) -> DomainResult<Notebook> {
    if title.trim().is_empty() {
        return Err(DomainError::InvalidInput("title must not be empty".to_string()));
    }

    let mut notebook = Notebook::new(0, owner_id, title); // ID assigned by database
    notebook.description = description;
    state.notebook_repo.create(&notebook).await
}

/// Get notebook by ID
pub async fn get_notebook(state: &AppState, id: u32) -> DomainResult<Option<Notebook>> {
    state.notebook_repo.find_by_id(id).await
}

/// List an owner's notebooks
pub async fn list_notebooks(state: &AppState, owner_id: u32) -> DomainResult<Vec<Notebook>> {
    state.notebook_repo.list_by_owner(owner_id).await
}

/// Update title/description
pub async fn update_notebook(
    state: &AppState,
    id: u32,
    title: Option<String>,
    description: Option<String>,
) -> DomainResult<Notebook> {
    let existing = state
        .notebook_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("Notebook {}", id)))?;

    let updated = Notebook {
        id: existing.id,
        owner_id: existing.owner_id,
        title: title.unwrap_or(existing.title),
        description: description.or(existing.description),
        created_at: existing.created_at,
        updated_at: existing.updated_at,
    };

    state.notebook_repo.update(&updated).await
}

/// Delete notebook (cascade deletes its memberships)
pub async fn delete_notebook(state: &AppState, id: u32) -> DomainResult<()> {
    state.notebook_repo.delete(id).await
}
