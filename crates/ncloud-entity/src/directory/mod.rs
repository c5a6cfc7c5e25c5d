//! Directory entity and tree structures.

pub mod model;
pub mod tree;

pub use model::{Directory, NewDirectory};
pub use tree::TreeIndex;
