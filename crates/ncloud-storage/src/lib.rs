//! # ncloud-storage
//!
//! Local filesystem content store. The layout is directory-addressed:
//! one top-level folder per directory id, holding its files by file id.
//! Moving a directory in the namespace therefore touches no bytes on
//! disk; moving a file is a single rename between two folders.

pub mod local;

pub use local::LocalContentStore;
