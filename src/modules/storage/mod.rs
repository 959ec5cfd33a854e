//! Storage module for file management
//!
//! Provides the injectable file store interface and its local
//! filesystem backend over a single flat upload directory.

mod local_store;

pub use local_store::{FileStore, LocalFileStore, StoredFile};
