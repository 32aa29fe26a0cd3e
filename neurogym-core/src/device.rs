//! Stable anonymous device identity.
//!
//! Records are keyed by device, not by account: a single opaque UUID is
//! minted on first use and reused for every later session. The identifier
//! carries no personal information and never leaves the local store except
//! inside the records it labels.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::Result;

/// File-backed holder of the device identifier.
#[derive(Debug, Clone)]
pub struct DeviceVault {
    path: PathBuf,
}

impl DeviceVault {
    /// Use the file at `path` as the identity backing store. The file is
    /// created lazily by [`get_or_create`](Self::get_or_create).
    #[must_use]
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Return the stored identifier, minting and persisting a fresh UUID
    /// when none exists yet. Stable across calls until [`clear`](Self::clear).
    ///
    /// # Errors
    /// Returns [`crate::TrainError::Io`] if the backing file cannot be read
    /// or written.
    pub fn get_or_create(&self) -> Result<String> {
        if let Ok(existing) = fs::read_to_string(&self.path) {
            let trimmed = existing.trim();
            if !trimmed.is_empty() {
                debug!(path = %self.path.display(), "Device id loaded");
                return Ok(trimmed.to_string());
            }
        }

        let id = Uuid::new_v4().to_string();
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, &id)?;
        info!(path = %self.path.display(), "Device id minted");
        Ok(id)
    }

    /// Whether an identifier is currently stored.
    #[must_use]
    pub fn has(&self) -> bool {
        fs::read_to_string(&self.path)
            .map(|s| !s.trim().is_empty())
            .unwrap_or(false)
    }

    /// Remove the stored identifier. The next
    /// [`get_or_create`](Self::get_or_create) mints a new one.
    ///
    /// # Errors
    /// Returns [`crate::TrainError::Io`] if the backing file exists but
    /// cannot be removed.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_stable_until_cleared() {
        let dir = tempfile::tempdir().expect("tempdir");
        let vault = DeviceVault::new(dir.path().join("device_id"));

        assert!(!vault.has());
        let first = vault.get_or_create().expect("mint");
        assert!(!first.is_empty());
        assert!(vault.has());
        assert_eq!(vault.get_or_create().expect("reload"), first);

        vault.clear().expect("clear");
        assert!(!vault.has());
        let second = vault.get_or_create().expect("remint");
        assert_ne!(second, first);
    }

    #[test]
    fn clear_on_missing_file_is_fine() {
        let dir = tempfile::tempdir().expect("tempdir");
        let vault = DeviceVault::new(dir.path().join("device_id"));
        vault.clear().expect("clear");
        vault.clear().expect("clear twice");
    }

    #[test]
    fn parent_directories_are_created() {
        let dir = tempfile::tempdir().expect("tempdir");
        let vault = DeviceVault::new(dir.path().join("nested").join("device_id"));
        let id = vault.get_or_create().expect("mint");
        assert_eq!(
            uuid::Uuid::parse_str(&id).expect("valid uuid").to_string(),
            id
        );
    }
}
