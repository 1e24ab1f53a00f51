//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO external dependencies (except serde for serialization).

mod entity;
mod recipe;
mod notebook;
mod book;
mod membership;

pub use entity::{Entity, DomainError, DomainResult};
pub use recipe::Recipe;
pub use notebook::Notebook;
pub use book::{Book, BookStatus};
pub use membership::{ContainerKind, Membership};
