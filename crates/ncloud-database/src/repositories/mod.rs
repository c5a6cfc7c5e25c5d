//! Repository implementations over the metadata store.

pub mod directory;
pub mod file;
