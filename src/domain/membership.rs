//! Membership Entity
//!
//! The join row linking one container (notebook or book) to one recipe,
//! carrying its zero-based position within the container's ordering.
//! For any container the positions of its memberships are exactly
//! {0, 1, ..., n-1} — no gaps, no duplicates.

use serde::{Deserialize, Serialize};

/// Which join table a membership lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    Notebook,
    Book,
}

impl ContainerKind {
    /// Join table for this kind
    pub fn member_table(&self) -> &'static str {
        match self {
            ContainerKind::Notebook => "notebook_recipes",
            ContainerKind::Book => "book_recipes",
        }
    }

    /// Container-id column within the join table
    pub fn container_column(&self) -> &'static str {
        match self {
            ContainerKind::Notebook => "notebook_id",
            ContainerKind::Book => "book_id",
        }
    }

    /// Table holding the containers themselves
    pub fn container_table(&self) -> &'static str {
        match self {
            ContainerKind::Notebook => "notebooks",
            ContainerKind::Book => "books",
        }
    }
}

/// One ordered link between a container and a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub container_id: u32,
    pub recipe_id: u32,
    /// Zero-based rank within the container
    pub position: i32,
}

impl Membership {
    pub fn new(container_id: u32, recipe_id: u32, position: i32) -> Self {
        Self {
            container_id,
            recipe_id,
            position,
        }
    }
}
