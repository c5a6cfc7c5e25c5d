//! # ncloud-auth
//!
//! Capability tokens for the ncloud namespace: signed, self-contained
//! credentials that authorize operations on a directory or file without
//! a database lookup.

pub mod capability;

pub use capability::claims::CapabilityClaims;
pub use capability::codec::CapabilityCodec;
pub use capability::gate::PermissionGate;
pub use capability::permission::Permission;
