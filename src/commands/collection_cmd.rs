//! Membership Commands
//!
//! Operations on a container's ordered recipe collection. The same commands
//! serve notebooks and books; the `ContainerKind` picks the store.
//!
//! Ownership of the container is a precondition checked by the caller.

use crate::client::move_entry;
use crate::domain::{ContainerKind, DomainError, DomainResult, Membership, Recipe};
use crate::repository::{CollectionPositioningOperations, Repository};
use crate::AppState;

/// Add a recipe at the tail of a container. Returns the assigned position.
pub async fn add_recipe(
    state: &AppState,
    kind: ContainerKind,
    container_id: u32,
    recipe_id: u32,
) -> DomainResult<i32> {
    state.collection(kind).add_member(container_id, recipe_id).await
}

/// Add several recipes, appended in input order. Each add is independent:
/// one failing (say, an id that is already a member) never blocks the rest,
/// and its error is reported per id.
pub async fn add_recipes(
    state: &AppState,
    kind: ContainerKind,
    container_id: u32,
    recipe_ids: &[u32],
) -> Vec<(u32, DomainResult<i32>)> {
    let repo = state.collection(kind);
    let mut outcomes = Vec::with_capacity(recipe_ids.len());
    for &recipe_id in recipe_ids {
        outcomes.push((recipe_id, repo.add_member(container_id, recipe_id).await));
    }
    outcomes
}

/// Remove a recipe from a container
pub async fn remove_recipe(
    state: &AppState,
    kind: ContainerKind,
    container_id: u32,
    recipe_id: u32,
) -> DomainResult<()> {
    state.collection(kind).remove_member(container_id, recipe_id).await
}

/// Replace a container's ordering with a full permutation of its members
pub async fn reorder_recipes(
    state: &AppState,
    kind: ContainerKind,
    container_id: u32,
    ordered_recipe_ids: &[u32],
) -> DomainResult<Vec<u32>> {
    let repo = state.collection(kind);
    repo.reorder(container_id, ordered_recipe_ids).await?;
    // Canonical order as the store now sees it
    repo.member_recipe_ids(container_id).await
}

/// Apply a drag gesture: take the member at `from_index` out and reinsert it
/// at `to_index`, leaving every other member's relative order unchanged.
pub async fn move_recipe(
    state: &AppState,
    kind: ContainerKind,
    container_id: u32,
    from_index: usize,
    to_index: usize,
) -> DomainResult<Vec<u32>> {
    let repo = state.collection(kind);
    let mut order = repo.member_recipe_ids(container_id).await?;

    if from_index >= order.len() || to_index >= order.len() {
        return Err(DomainError::InvalidInput(format!(
            "index out of range: {} -> {} with {} members",
            from_index,
            to_index,
            order.len()
        )));
    }

    move_entry(&mut order, from_index, to_index);
    repo.reorder(container_id, &order).await?;
    Ok(order)
}

/// Memberships of a container, ordered by position
pub async fn list_memberships(
    state: &AppState,
    kind: ContainerKind,
    container_id: u32,
) -> DomainResult<Vec<Membership>> {
    state.collection(kind).members(container_id).await
}

/// A container's recipes, fetched in membership order
pub async fn list_recipes(
    state: &AppState,
    kind: ContainerKind,
    container_id: u32,
) -> DomainResult<Vec<Recipe>> {
    let ids = state.collection(kind).member_recipe_ids(container_id).await?;

    let mut recipes = Vec::with_capacity(ids.len());
    for id in ids {
        let recipe = state
            .recipe_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("recipe {}", id)))?;
        recipes.push(recipe);
    }
    Ok(recipes)
}
