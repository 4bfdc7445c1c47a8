//! # Metattr Architecture
//!
//! Metattr attaches media identification results (episode, movie, track, ...)
//! to the files they describe, using the filesystem's extended attributes. A
//! file that was identified once carries the answer with it: no database, no
//! cache directory, and the data survives renames and moves within the same
//! filesystem.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs)                                     │
//! │  - show / set-name / clear / copy                           │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Attachment (attachment.rs)                                 │
//! │  - MetaAttributes: one path, three fields                   │
//! │  - Degrade-vs-fail policy lives here                        │
//! └─────────────────────────────────────────────────────────────┘
//!              │                               │
//!              ▼                               ▼
//! ┌───────────────────────────┐   ┌─────────────────────────────┐
//! │  Codec (codec.rs)         │   │  Storage (store/)           │
//! │  + Registry (registry.rs) │   │  - AttributeStore           │
//! │  - JSON text, "@type" tag │   │  - TimestampAccessor        │
//! │  - pure, no I/O           │   │  - FsBackend / MemBackend   │
//! └───────────────────────────┘   └─────────────────────────────┘
//! ```
//!
//! ## On-disk format
//!
//! Two attributes, names fixed for compatibility with existing attachments:
//!
//! - `net.filebot.filename`: the original file name, verbatim
//! - `net.filebot.metadata`: a JSON object tagged with `"@type"`
//!
//! On Linux both live in the `user.` namespace.
//!
//! ## Module Overview
//!
//! - [`attachment`]: The `MetaAttributes` façade
//! - [`model`]: `MetadataObject` and its payload types
//! - [`registry`]: Stable kind ↔ tag table
//! - [`codec`]: Encode/decode of metadata text
//! - [`store`]: Storage abstraction and implementations
//! - [`config`]: Configuration management
//! - [`normalization`]: Title normalization helpers
//! - [`error`]: Error types

pub mod attachment;
pub mod codec;
pub mod config;
pub mod error;
pub mod model;
pub mod normalization;
pub mod registry;
pub mod store;

pub use attachment::{MetaAttributes, FILENAME_KEY, METADATA_KEY};
pub use error::{MetaError, Result};
pub use model::{MetadataKind, MetadataObject};
