//! Configuration system for Libris.
//! TOML-based, layered resolution: CLI > env > config file > defaults.

pub mod defaults;
pub mod libris_config;
pub mod pagination_config;
pub mod search_config;
pub mod server_config;
pub mod storage_config;

pub use libris_config::{CliOverrides, LibrisConfig};
pub use pagination_config::PaginationConfig;
pub use search_config::SearchConfig;
pub use server_config::ServerConfig;
pub use storage_config::StorageConfig;
