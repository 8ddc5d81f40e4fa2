//! Observability for Libris.
//! `tracing` crate with `EnvFilter`, structured events for catalog operations.

pub mod events;
pub mod setup;

pub use setup::init_tracing;
