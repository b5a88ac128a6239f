//! Service layer for albumd
//!
//! Business logic shared by the CLI commands: each function takes a
//! [`CollectionStore`](crate::store::CollectionStore) handle, so the commands
//! never touch the collection file directly.

pub mod album_service;
pub mod query_service;

// Re-export commonly used types
pub use album_service::NewAlbumInput;
pub use query_service::{filter, search, AlbumFilter};
