//! Recipe Entity
//!
//! A single recipe owned by one user account. Containers (notebooks, books)
//! reference recipes by id without owning them.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// A recipe with ordered ingredients and free-text steps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique identifier
    pub id: u32,
    /// Owning user account
    pub owner_id: u32,
    /// Recipe title
    pub title: String,
    /// Ordered ingredient lines
    pub ingredients: Vec<String>,
    /// Preparation steps (free text)
    pub steps: String,
    /// Attributed author ("Grandma Rosa"), if any
    pub author: Option<String>,
    /// Preparation time, free form ("45 min")
    pub prep_time: Option<String>,
    /// Reference into object storage, if an image was attached
    pub image_url: Option<String>,
    /// User-assigned tags, kept deduplicated
    pub tags: Vec<String>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl Recipe {
    /// Create a new recipe with default values
    pub fn new(id: u32, owner_id: u32, title: String) -> Self {
        Self {
            id,
            owner_id,
            title,
            ingredients: Vec::new(),
            steps: String::new(),
            author: None,
            prep_time: None,
            image_url: None,
            tags: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Add a tag, ignoring duplicates
    pub fn add_tag(&mut self, tag: String) {
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

impl Entity for Recipe {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}
