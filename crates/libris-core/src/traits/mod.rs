//! Storage seams implemented by `libris-storage::StorageEngine`.

pub mod catalog_storage;
pub mod session_storage;

pub use catalog_storage::ICatalogStorage;
pub use session_storage::ISessionStorage;
