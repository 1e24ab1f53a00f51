//! Recipe Commands
//!
//! Recipe CRUD and lookup operations.

use crate::domain::{DomainError, DomainResult, Recipe};
use crate::repository::{Repository, SearchableRepository};
use crate::AppState;

/// Create a new recipe
pub async fn create_recipe(
    state: &AppState,
    owner_id: u32,
    title: String,
    ingredients: Vec<String>,
    steps: String,
) -> DomainResult<Recipe> {
    if title.trim().is_empty() {
        return Err(DomainError::InvalidInput("title must not be empty".to_string()));
    }

    let mut recipe = Recipe::new(0, owner_id, title); // ID assigned by database
    recipe.ingredients = ingredients;
    recipe.steps = steps;
    state.recipe_repo.create(&recipe).await
}

/// Get recipe by ID
pub async fn get_recipe(state: &AppState, id: u32) -> DomainResult<Option<Recipe>> {
    state.recipe_repo.find_by_id(id).await
}

/// List an owner's recipes
pub async fn list_recipes(state: &AppState, owner_id: u32) -> DomainResult<Vec<Recipe>> {
    state.recipe_repo.list_by_owner(owner_id).await
}

/// Search an owner's recipes by title
pub async fn search_recipes(
    state: &AppState,
    owner_id: u32,
    query: &str,
) -> DomainResult<Vec<Recipe>> {
    state.recipe_repo.search(owner_id, query).await
}

/// List an owner's recipes carrying a tag
pub async fn list_recipes_by_tag(
    state: &AppState,
    owner_id: u32,
    tag: &str,
) -> DomainResult<Vec<Recipe>> {
    state.recipe_repo.list_by_tag(owner_id, tag).await
}

/// Update recipe fields. Absent options leave the stored value unchanged.
#[allow(clippy::too_many_arguments)]
pub async fn update_recipe(
    state: &AppState,
    id: u32,
    title: Option<String>,
    ingredients: Option<Vec<String>>,
    steps: Option<String>,
    author: Option<String>,
    prep_time: Option<String>,
    image_url: Option<String>,
    tags: Option<Vec<String>>,
) -> DomainResult<Recipe> {
    let existing = state
        .recipe_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("Recipe {}", id)))?;

    let updated = Recipe {
        id: existing.id,
        owner_id: existing.owner_id,
        title: title.unwrap_or(existing.title),
        ingredients: ingredients.unwrap_or(existing.ingredients),
        steps: steps.unwrap_or(existing.steps),
        author: author.or(existing.author),
        prep_time: prep_time.or(existing.prep_time),
        image_url: image_url.or(existing.image_url),
        tags: tags.unwrap_or(existing.tags),
        created_at: existing.created_at,
        updated_at: existing.updated_at,
    };

    state.recipe_repo.update(&updated).await
}

/// Delete a recipe. It is removed from every notebook and book that
/// references it, and those containers are renumbered.
pub async fn delete_recipe(state: &AppState, id: u32) -> DomainResult<()> {
    state.recipe_repo.delete(id).await
}
