//! # ncloud-service
//!
//! The namespace mutation coordinator. Every structural change to a
//! user's namespace (move, copy, delete, restore) flows through
//! [`namespace::NamespaceService`], which applies it to the three
//! stores in a fixed order: metadata first, then the search projection,
//! then disk. The metadata store is authoritative; projection and disk
//! failures degrade to log warnings.

pub mod context;
pub mod namespace;
pub mod tree;

pub use context::RequestContext;
pub use namespace::NamespaceService;
pub use tree::TreeIndexBuilder;
