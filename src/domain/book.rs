//! Book Entity
//!
//! A book is a notebook-like collection compiled for print. It carries a
//! lifecycle status and an optional cover image; both are orthogonal to the
//! ordering of its recipes.

use serde::{Deserialize, Serialize};
use super::entity::Entity;

/// Print lifecycle of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    /// Being assembled, content still changing
    #[default]
    Draft,
    /// Content frozen and ready to order
    Ready,
    /// Print order placed with the vendor
    Ordered,
    /// Physical copy produced
    Printed,
}

impl BookStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Draft => "draft",
            BookStatus::Ready => "ready",
            BookStatus::Ordered => "ordered",
            BookStatus::Printed => "printed",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "ready" => BookStatus::Ready,
            "ordered" => BookStatus::Ordered,
            "printed" => BookStatus::Printed,
            _ => BookStatus::Draft,
        }
    }

    /// Whether a transition to `next` is allowed.
    /// Forward one step at a time; a ready book can go back to draft.
    pub fn can_transition_to(&self, next: BookStatus) -> bool {
        matches!(
            (*self, next),
            (BookStatus::Draft, BookStatus::Ready)
                | (BookStatus::Ready, BookStatus::Draft)
                | (BookStatus::Ready, BookStatus::Ordered)
                | (BookStatus::Ordered, BookStatus::Printed)
        )
    }
}

/// A printable book of recipes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: u32,
    /// Owning user account
    pub owner_id: u32,
    pub title: String,
    pub description: Option<String>,
    pub status: BookStatus,
    /// Reference into object storage for the cover, if chosen
    pub cover_image: Option<String>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl Book {
    pub fn new(id: u32, owner_id: u32, title: String) -> Self {
        Self {
            id,
            owner_id,
            title,
            description: None,
            status: BookStatus::Draft,
            cover_image: None,
            created_at: None,
            updated_at: None,
        }
    }
}

impl Entity for Book {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}
