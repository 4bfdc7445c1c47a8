//! # Attachments
//!
//! [`MetaAttributes`] binds one path to a [`StorageBackend`] and exposes the
//! three attached fields: the original file name, the metadata object and the
//! creation time.
//!
//! The handle holds no state besides the path. It buffers nothing, so any
//! number of handles may be created for the same file and dropped at will.
//!
//! ## Failure policy
//!
//! - Attribute reads and writes propagate backend errors, including
//!   `MetaError::Capability` for filesystems without attribute support.
//! - Metadata that cannot be encoded is never written; the old value stays.
//! - Metadata that cannot be decoded is reported as `MetaError::Decode`; the
//!   caller may treat it as missing and overwrite it.
//! - [`MetaAttributes::creation_time`] never fails: any error yields the Unix
//!   epoch (0 ms).
//!
//! ## Partial writes
//!
//! [`MetaAttributes::clear`] and [`MetaAttributes::copy_to`] touch two keys one
//! after the other. A crash in between leaves one key updated. Every operation
//! is idempotent, so repeating it completes the job.
//!
//! Concurrent writers on the same path need their own locking around the
//! whole sequence.

use crate::codec;
use crate::config::{MetattrConfig, DEFAULT_MAX_VALUE_BYTES};
use crate::error::{MetaError, Result};
use crate::model::MetadataObject;
use crate::registry::TypeRegistry;
use crate::store::StorageBackend;
use chrono::{DateTime, Utc};
use log::debug;
use std::path::{Path, PathBuf};

/// Attribute holding the file name before it was renamed.
pub const FILENAME_KEY: &str = "net.filebot.filename";

/// Attribute holding the encoded [`MetadataObject`].
pub const METADATA_KEY: &str = "net.filebot.metadata";

pub struct MetaAttributes<'a, B: StorageBackend + ?Sized> {
    backend: &'a B,
    path: PathBuf,
    registry: &'static TypeRegistry,
    max_value_bytes: usize,
}

impl<'a, B: StorageBackend + ?Sized> MetaAttributes<'a, B> {
    pub fn new(backend: &'a B, path: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            path: path.into(),
            registry: TypeRegistry::standard(),
            max_value_bytes: DEFAULT_MAX_VALUE_BYTES,
        }
    }

    pub fn with_config(mut self, config: &MetattrConfig) -> Self {
        self.max_value_bytes = config.max_value_bytes;
        self
    }

    pub fn with_max_value_bytes(mut self, max_value_bytes: usize) -> Self {
        self.max_value_bytes = max_value_bytes;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set_creation_time(&self, time: DateTime<Utc>) -> Result<()> {
        self.backend.set_creation_time(&self.path, time)
    }

    /// Creation time of the file, or the Unix epoch if it cannot be read.
    pub fn creation_time(&self) -> DateTime<Utc> {
        match self.backend.creation_time(&self.path) {
            Ok(time) => time,
            Err(e) => {
                debug!(
                    "creation time of {} unavailable: {}",
                    self.path.display(),
                    e
                );
                DateTime::<Utc>::UNIX_EPOCH
            }
        }
    }

    /// Store the original file name. `None` or `""` clears it.
    pub fn set_original_name(&self, name: Option<&str>) -> Result<()> {
        self.backend.set_attribute(&self.path, FILENAME_KEY, name)
    }

    pub fn original_name(&self) -> Result<Option<String>> {
        Ok(self
            .backend
            .get_attribute(&self.path, FILENAME_KEY)?
            .filter(|name| !name.is_empty()))
    }

    /// Encode and store `object`. On failure nothing is written.
    pub fn set_object(&self, object: &MetadataObject) -> Result<()> {
        let text = codec::encode(object, self.registry)?;
        if text.len() > self.max_value_bytes {
            return Err(MetaError::Encode(format!(
                "encoded {} is {} bytes, limit is {}",
                self.registry.tag_of(object.kind()),
                text.len(),
                self.max_value_bytes
            )));
        }
        self.backend
            .set_attribute(&self.path, METADATA_KEY, Some(text.as_str()))
    }

    /// Read and decode the stored object. Missing or blank values are `None`.
    pub fn object(&self) -> Result<Option<MetadataObject>> {
        match self.raw_object()? {
            Some(text) => codec::decode(&text, self.registry).map(Some),
            None => Ok(None),
        }
    }

    /// The stored metadata text, undecoded. Missing or blank values are `None`.
    pub fn raw_object(&self) -> Result<Option<String>> {
        Ok(self
            .backend
            .get_attribute(&self.path, METADATA_KEY)?
            .filter(|text| !text.trim().is_empty()))
    }

    /// Remove both the original name and the metadata object.
    pub fn clear(&self) -> Result<()> {
        self.backend.set_attribute(&self.path, FILENAME_KEY, None)?;
        self.backend.set_attribute(&self.path, METADATA_KEY, None)
    }

    /// Copy the original name and metadata text to `target`. Fields missing
    /// here are cleared there. Metadata is copied without being decoded.
    pub fn copy_to(&self, target: &Path) -> Result<()> {
        let name = self.original_name()?;
        let text = self.raw_object()?;
        debug!(
            "copy attachments {} -> {}",
            self.path.display(),
            target.display()
        );
        self.backend
            .set_attribute(target, FILENAME_KEY, name.as_deref())?;
        self.backend
            .set_attribute(target, METADATA_KEY, text.as_deref())
    }
}
