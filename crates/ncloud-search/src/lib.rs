//! # ncloud-search
//!
//! Write-side client for the Meilisearch projection of the namespace.
//! The index holds denormalized `{_id, name, parent_directory, user,
//! type}` documents and is eventually consistent with the metadata
//! store; the engine's own indexing and ranking are out of scope.

pub mod client;

pub use client::MeilisearchIndex;
