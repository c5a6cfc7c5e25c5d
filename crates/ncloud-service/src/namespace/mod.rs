//! Namespace mutation operations.

pub mod request;
pub mod service;

pub use request::{
    CopyFilesRequest, CopyRequest, CreateDirectoryRequest, DeleteTarget, DirectoryListing,
    MoveItem, MoveRequest, RenameRequest, RestoreDirectoriesRequest, RestoreFilesRequest,
    UpdatedResponse, UserRoots,
};
pub use service::NamespaceService;
