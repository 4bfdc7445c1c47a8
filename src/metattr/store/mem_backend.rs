use super::backend::{AttributeStore, TimestampAccessor};
use crate::error::{MetaError, Result};
use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

/// In-memory backend for testing.
///
/// Uses `RefCell` for interior mutability; it is meant for single-threaded
/// tests and is deliberately not `Sync`.
#[derive(Default)]
pub struct MemBackend {
    attributes: RefCell<HashMap<(PathBuf, String), String>>,
    created: RefCell<HashMap<PathBuf, DateTime<Utc>>>,
    unsupported: RefCell<HashSet<PathBuf>>,
    simulate_write_error: RefCell<bool>,
    simulate_time_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every attribute call on `path` fail as if its filesystem had no
    /// extended attribute support.
    pub fn mark_unsupported(&self, path: impl Into<PathBuf>) {
        self.unsupported.borrow_mut().insert(path.into());
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Make every timestamp call fail.
    pub fn set_simulate_time_error(&self, simulate: bool) {
        *self.simulate_time_error.borrow_mut() = simulate;
    }

    /// Number of attributes currently stored for `path`.
    pub fn attribute_count(&self, path: &Path) -> usize {
        self.attributes
            .borrow()
            .keys()
            .filter(|(p, _)| p == path)
            .count()
    }

    fn check_supported(&self, path: &Path) -> Result<()> {
        if self.unsupported.borrow().contains(path) {
            return Err(MetaError::Capability {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    fn check_time_error(&self) -> Result<()> {
        if *self.simulate_time_error.borrow() {
            return Err(MetaError::Io(io::Error::other("Simulated timestamp error")));
        }
        Ok(())
    }
}

impl AttributeStore for MemBackend {
    fn get_attribute(&self, path: &Path, key: &str) -> Result<Option<String>> {
        self.check_supported(path)?;
        let attributes = self.attributes.borrow();
        Ok(attributes
            .get(&(path.to_path_buf(), key.to_string()))
            .cloned())
    }

    fn set_attribute(&self, path: &Path, key: &str, value: Option<&str>) -> Result<()> {
        self.check_supported(path)?;
        if *self.simulate_write_error.borrow() {
            return Err(MetaError::Io(io::Error::other("Simulated write error")));
        }

        let mut attributes = self.attributes.borrow_mut();
        let entry = (path.to_path_buf(), key.to_string());
        match value.filter(|v| !v.is_empty()) {
            Some(value) => {
                attributes.insert(entry, value.to_string());
            }
            None => {
                attributes.remove(&entry);
            }
        }
        Ok(())
    }
}

impl TimestampAccessor for MemBackend {
    fn creation_time(&self, path: &Path) -> Result<DateTime<Utc>> {
        self.check_time_error()?;
        self.created.borrow().get(path).copied().ok_or_else(|| {
            MetaError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no creation time recorded for {}", path.display()),
            ))
        })
    }

    fn set_creation_time(&self, path: &Path, time: DateTime<Utc>) -> Result<()> {
        self.check_time_error()?;
        self.created.borrow_mut().insert(path.to_path_buf(), time);
        Ok(())
    }
}
