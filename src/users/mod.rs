//! User identity models and directory contract
//!
//! Identity and authentication live outside this service; what arrives here
//! is an already-authenticated [`Principal`] used as a lookup key.

pub mod directory;
pub mod models;

pub use directory::UserDirectory;
pub use models::*;
