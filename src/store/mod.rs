//! Storage backends
//!
//! The store contracts live next to their domains ([`crate::notes`],
//! [`crate::history`], [`crate::media`], [`crate::users`]); this module
//! provides the in-memory backend that implements all of them. Durable
//! persistence is an external concern — a deployment swaps this backend for
//! one over its storage engine without touching the services.

pub mod memory;

pub use memory::MemoryStore;
