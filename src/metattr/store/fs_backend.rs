use super::backend::{AttributeStore, TimestampAccessor};
use crate::error::{MetaError, Result};
use chrono::{DateTime, Utc};
use log::debug;
use std::fs;
use std::io;
use std::path::Path;

/// Error numbers the attribute syscalls report, per platform.
#[cfg(any(target_os = "linux", target_os = "android"))]
mod errno {
    pub const E2BIG: i32 = 7;
    pub const ENOSPC: i32 = 28;
    pub const ERANGE: i32 = 34;
    pub const ENODATA: i32 = 61;
    pub const EOPNOTSUPP: i32 = 95;

    pub const NOT_SUPPORTED: &[i32] = &[EOPNOTSUPP];
    pub const NO_ATTRIBUTE: &[i32] = &[ENODATA];
    pub const TOO_LARGE: &[i32] = &[E2BIG, ENOSPC, ERANGE];
}

#[cfg(any(target_os = "macos", target_os = "ios"))]
mod errno {
    pub const E2BIG: i32 = 7;
    pub const ENOSPC: i32 = 28;
    pub const ERANGE: i32 = 34;
    pub const ENOTSUP: i32 = 45;
    pub const ENOATTR: i32 = 93;
    pub const EOPNOTSUPP: i32 = 102;

    pub const NOT_SUPPORTED: &[i32] = &[ENOTSUP, EOPNOTSUPP];
    pub const NO_ATTRIBUTE: &[i32] = &[ENOATTR];
    pub const TOO_LARGE: &[i32] = &[E2BIG, ENOSPC, ERANGE];
}

#[cfg(target_os = "freebsd")]
mod errno {
    pub const E2BIG: i32 = 7;
    pub const ENOSPC: i32 = 28;
    pub const ERANGE: i32 = 34;
    pub const EOPNOTSUPP: i32 = 45;
    pub const ENOATTR: i32 = 87;

    pub const NOT_SUPPORTED: &[i32] = &[EOPNOTSUPP];
    pub const NO_ATTRIBUTE: &[i32] = &[ENOATTR];
    pub const TOO_LARGE: &[i32] = &[E2BIG, ENOSPC, ERANGE];
}

#[cfg(target_os = "netbsd")]
mod errno {
    pub const E2BIG: i32 = 7;
    pub const ENOSPC: i32 = 28;
    pub const ERANGE: i32 = 34;
    pub const EOPNOTSUPP: i32 = 45;
    pub const ENOTSUP: i32 = 86;
    pub const ENOATTR: i32 = 93;

    pub const NOT_SUPPORTED: &[i32] = &[EOPNOTSUPP, ENOTSUP];
    pub const NO_ATTRIBUTE: &[i32] = &[ENOATTR];
    pub const TOO_LARGE: &[i32] = &[E2BIG, ENOSPC, ERANGE];
}

#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "netbsd"
)))]
mod errno {
    pub const NOT_SUPPORTED: &[i32] = &[];
    pub const NO_ATTRIBUTE: &[i32] = &[];
    pub const TOO_LARGE: &[i32] = &[];
}

fn has_code(err: &io::Error, codes: &[i32]) -> bool {
    err.raw_os_error().is_some_and(|code| codes.contains(&code))
}

/// Namespace prefix user attributes need on this platform.
pub fn default_prefix() -> &'static str {
    if cfg!(any(
        target_os = "linux",
        target_os = "android",
        target_os = "freebsd",
        target_os = "netbsd"
    )) {
        "user."
    } else {
        ""
    }
}

/// Production backend: OS extended attributes plus filesystem timestamps.
#[derive(Debug, Clone)]
pub struct FsBackend {
    prefix: String,
}

impl Default for FsBackend {
    fn default() -> Self {
        Self {
            prefix: default_prefix().to_string(),
        }
    }
}

impl FsBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn attribute_name(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    fn classify(path: &Path, err: io::Error) -> MetaError {
        if err.kind() == io::ErrorKind::Unsupported || has_code(&err, errno::NOT_SUPPORTED) {
            MetaError::Capability {
                path: path.to_path_buf(),
            }
        } else {
            MetaError::Io(err)
        }
    }

    /// A write the filesystem refused because the value exceeds its own
    /// attribute size limit is an encode failure, not an I/O error.
    fn classify_write(path: &Path, name: &str, len: usize, err: io::Error) -> MetaError {
        if has_code(&err, errno::TOO_LARGE) {
            MetaError::Encode(format!(
                "{} bytes for {} exceed the attribute size limit of {}: {}",
                len,
                name,
                path.display(),
                err
            ))
        } else {
            Self::classify(path, err)
        }
    }

    fn ensure_supported(path: &Path) -> Result<()> {
        if xattr::SUPPORTED_PLATFORM {
            Ok(())
        } else {
            Err(MetaError::Capability {
                path: path.to_path_buf(),
            })
        }
    }
}

impl AttributeStore for FsBackend {
    fn get_attribute(&self, path: &Path, key: &str) -> Result<Option<String>> {
        Self::ensure_supported(path)?;
        let name = self.attribute_name(key);
        let raw = xattr::get(path, &name).map_err(|e| Self::classify(path, e))?;
        match raw {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| MetaError::Decode(format!("attribute {} is not UTF-8: {}", name, e))),
            None => Ok(None),
        }
    }

    fn set_attribute(&self, path: &Path, key: &str, value: Option<&str>) -> Result<()> {
        Self::ensure_supported(path)?;
        let name = self.attribute_name(key);
        match value.filter(|v| !v.is_empty()) {
            Some(value) => {
                debug!("set {} on {} ({} bytes)", name, path.display(), value.len());
                xattr::set(path, &name, value.as_bytes())
                    .map_err(|e| Self::classify_write(path, &name, value.len(), e))
            }
            None => {
                debug!("remove {} from {}", name, path.display());
                match xattr::remove(path, &name) {
                    Ok(()) => Ok(()),
                    Err(e) if has_code(&e, errno::NO_ATTRIBUTE) => Ok(()),
                    Err(e) => Err(Self::classify(path, e)),
                }
            }
        }
    }
}

impl TimestampAccessor for FsBackend {
    fn creation_time(&self, path: &Path) -> Result<DateTime<Utc>> {
        let created = fs::metadata(path)?.created()?;
        Ok(created.into())
    }

    fn set_creation_time(&self, path: &Path, time: DateTime<Utc>) -> Result<()> {
        set_created(path, time).map_err(MetaError::Io)
    }
}

#[cfg(target_os = "macos")]
fn set_created(path: &Path, time: DateTime<Utc>) -> io::Result<()> {
    use std::fs::{File, FileTimes};
    use std::os::macos::fs::FileTimesExt;

    let file = File::options().write(true).open(path)?;
    file.set_times(FileTimes::new().set_created(time.into()))
}

#[cfg(windows)]
fn set_created(path: &Path, time: DateTime<Utc>) -> io::Result<()> {
    use std::fs::{File, FileTimes};
    use std::os::windows::fs::FileTimesExt;

    let file = File::options().write(true).open(path)?;
    file.set_times(FileTimes::new().set_created(time.into()))
}

#[cfg(not(any(target_os = "macos", windows)))]
fn set_created(path: &Path, _time: DateTime<Utc>) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        format!(
            "cannot set creation time of {} on this platform",
            path.display()
        ),
    ))
}
