//! # Storage Layer
//!
//! Attachments live in the file's own extended attributes, so the "store" is
//! the platform itself. This module abstracts it behind two small traits:
//!
//! - [`backend::AttributeStore`]: get/set/clear a named text value on a path
//! - [`backend::TimestampAccessor`]: read/write the path's creation time
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: Production backend
//!   - Uses OS extended attributes through the `xattr` crate
//!   - Prefixes keys with the user namespace where the platform requires one
//!     (`user.net.filebot.metadata` on Linux)
//!   - Filesystems without attribute support surface as `MetaError::Capability`
//!
//! - [`mem_backend::MemBackend`]: In-memory backend for testing
//!   - No persistence
//!   - Switches to simulate write failures, timestamp failures and
//!     unsupported paths
//!
//! ## Atomicity
//!
//! Each key is written on its own. Nothing here spans two keys, so a crash
//! between two writes leaves one applied and the other not.

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::{AttributeStore, StorageBackend, TimestampAccessor};
pub use fs_backend::FsBackend;
pub use mem_backend::MemBackend;
