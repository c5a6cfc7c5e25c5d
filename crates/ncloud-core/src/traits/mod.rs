//! Trait seams for the external stores.
//!
//! The traits are defined here in `ncloud-core` and implemented in the
//! leaf crates (`ncloud-search`, `ncloud-storage`), so that the service
//! layer can be exercised against in-memory fakes.

pub mod content;
pub mod search;

pub use content::ContentStore;
pub use search::{SearchDocument, SearchIndex};
