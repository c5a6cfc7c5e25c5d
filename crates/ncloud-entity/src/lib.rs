//! # ncloud-entity
//!
//! Entity models for the ncloud namespace: directories, files, the pure
//! tree index used for subtree enumeration, and the metadata store
//! traits implemented by `ncloud-database`.

pub mod directory;
pub mod file;
pub mod store;

pub use directory::{Directory, NewDirectory, TreeIndex};
pub use file::{File, NewFile};
pub use store::{DirectoryStore, FileStore};
