use crate::error::Result;
use chrono::{DateTime, Utc};
use std::path::Path;

/// Named text values stored alongside a file.
pub trait AttributeStore {
    /// Read the value stored under `key`.
    /// Returns Ok(None) if the attribute is not set; that is never an error.
    /// Returns `MetaError::Capability` if the path cannot carry attributes at all.
    fn get_attribute(&self, path: &Path, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`. `None` or an empty string removes the
    /// attribute; removing an attribute that is not set succeeds.
    fn set_attribute(&self, path: &Path, key: &str, value: Option<&str>) -> Result<()>;
}

/// Access to a file's creation (birth) time.
pub trait TimestampAccessor {
    fn creation_time(&self, path: &Path) -> Result<DateTime<Utc>>;

    fn set_creation_time(&self, path: &Path, time: DateTime<Utc>) -> Result<()>;
}

/// Everything [`crate::attachment::MetaAttributes`] needs from the platform.
pub trait StorageBackend: AttributeStore + TimestampAccessor {}

impl<T: AttributeStore + TimestampAccessor + ?Sized> StorageBackend for T {}
