//! # ncloud-database
//!
//! PostgreSQL metadata store for the ncloud namespace. The metadata
//! store is authoritative: every mutation writes here first, and the
//! search index and disk tree are projections allowed to lag behind.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::directory::DirectoryRepository;
pub use repositories::file::FileRepository;
