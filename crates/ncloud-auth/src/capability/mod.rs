//! Capability token scheme.
//!
//! A capability token is an HMAC-signed JWT carrying an entity id, an
//! explicit permission set, and, for file tokens, the id of the parent
//! directory at issuance time. Tokens are durable: they carry no expiry
//! and no server-side revocation list. Revocation is structural: the
//! parent binding invalidates a file token the instant the file moves,
//! and a fresh token is issued as part of the move.

pub mod claims;
pub mod codec;
pub mod gate;
pub mod permission;
