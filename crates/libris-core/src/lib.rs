//! # libris-core
//!
//! Foundation crate for the Libris catalog.
//! Defines the domain models, storage traits, errors, config, validation
//! rules, and tracing setup. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod tracing;
pub mod traits;
pub mod validation;

// Re-export the most commonly used types at the crate root.
pub use config::LibrisConfig;
pub use errors::{LibrisError, LibrisResult};
pub use models::{Book, BookAttributes, Page, PageRequest, Review, User};
