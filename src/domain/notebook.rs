//! Notebook Entity
//!
//! A thematic, ordered collection of recipe references.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// A notebook grouping recipes under a theme
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notebook {
    pub id: u32,
    /// Owning user account
    pub owner_id: u32,
    pub title: String,
    pub description: Option<String>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl Notebook {
    pub fn new(id: u32, owner_id: u32, title: String) -> Self {
        Self {
            id,
            owner_id,
            title,
            description: None,
            created_at: None,
            updated_at: None,
        }
    }
}

impl Entity for Notebook {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}
