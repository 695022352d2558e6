//! Note models and lookup contracts
//!
//! Note storage (content, revisions, alias management) is owned by an
//! external component. This module defines the canonical [`Note`] record and
//! the lookup contracts the current-user area consumes: [`NoteResolver`] for
//! reference resolution and [`NoteStore`] for the owned-notes listing.

pub mod models;
pub mod resolver;

pub use models::*;
pub use resolver::{NoteResolver, NoteStore};
