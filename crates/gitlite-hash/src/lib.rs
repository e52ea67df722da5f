//! Hash computation and object identity for gitlite.
//!
//! Provides the core [`ObjectId`] type (a 20-byte SHA-1 digest addressed by
//! its 40-character lowercase hex form), streaming hash computation, and the
//! hex encoding/decoding used throughout gitlite.

mod error;
pub mod hasher;
pub mod hex;
mod oid;

pub use error::HashError;
pub use oid::ObjectId;
