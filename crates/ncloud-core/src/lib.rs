//! # ncloud-core
//!
//! Core crate for the ncloud namespace engine. Contains configuration
//! schemas, the store trait seams, and the unified error system.
//!
//! This crate has **no** internal dependencies on other ncloud crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
