//! Command Layer
//!
//! Application-facing operations, grouped per entity. A transport layer
//! (HTTP handlers, IPC, a CLI) calls these after authenticating the user and
//! checking container ownership.

pub mod recipe_cmd;
pub mod notebook_cmd;
pub mod book_cmd;
pub mod collection_cmd;
