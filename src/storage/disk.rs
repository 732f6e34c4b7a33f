//! On-disk vault layout:
//!
//! ```text
//! <root>/
//!   config.toml            optional settings
//!   groups/
//!     default/.vault       created by `sherlock setup`
//!     <gid>/.vault         one encrypted blob per group
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::VaultStorage;
use crate::errors::{Result, SherlockError};
use crate::vault::DEFAULT_GROUP;

const GROUPS_DIR: &str = "groups";
const VAULT_FILE: &str = ".vault";

/// File-system backed vault storage rooted at a single directory.
#[derive(Debug, Clone)]
pub struct DiskStorage {
    root: PathBuf,
}

impl DiskStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Default root: `$HOME/.sherlock`.
    pub fn default_root() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".sherlock"))
            .ok_or_else(|| SherlockError::Config("cannot determine home directory".into()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn groups_dir(&self) -> PathBuf {
        self.root.join(GROUPS_DIR)
    }

    fn group_dir(&self, gid: &str) -> Result<PathBuf> {
        // Group ids become directory names; refuse anything that could
        // escape the groups directory.
        if gid.is_empty()
            || gid == "."
            || gid == ".."
            || gid.contains(['/', '\\'])
            || gid.contains('\0')
        {
            return Err(SherlockError::InvalidInput(format!(
                "'{gid}' cannot be used as a group directory name"
            )));
        }
        Ok(self.groups_dir().join(gid))
    }

    fn vault_path(&self, gid: &str) -> Result<PathBuf> {
        Ok(self.group_dir(gid)?.join(VAULT_FILE))
    }

    fn create_dir(path: &Path) -> Result<()> {
        fs::create_dir_all(path)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
        }
        Ok(())
    }

    /// Write atomically: temp file in the same directory, then rename,
    /// so a reader never sees a half-written vault.
    fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
        let parent = path.parent().unwrap_or(Path::new("."));
        let tmp_path = parent.join(format!(
            "{}.tmp",
            path.file_name().unwrap_or_default().to_string_lossy()
        ));

        fs::write(&tmp_path, data).map_err(|e| {
            SherlockError::Storage(format!("cannot write {}: {e}", tmp_path.display()))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&tmp_path, path).map_err(|e| {
            SherlockError::Storage(format!("cannot replace {}: {e}", path.display()))
        })?;
        Ok(())
    }
}

impl VaultStorage for DiskStorage {
    fn init_root(&mut self, initial_vault: &[u8]) -> Result<()> {
        Self::create_dir(&self.root)?;
        Self::create_dir(&self.group_dir(DEFAULT_GROUP)?)?;

        let vault = self.vault_path(DEFAULT_GROUP)?;
        if vault.exists() {
            debug!(root = %self.root.display(), "root already initialised");
            return Ok(());
        }
        Self::write_atomic(&vault, initial_vault)?;
        debug!(root = %self.root.display(), bytes = initial_vault.len(), "initialised root");
        Ok(())
    }

    fn create_group(&mut self, gid: &str, initial_vault: &[u8]) -> Result<()> {
        let dir = self.group_dir(gid)?;
        let vault = dir.join(VAULT_FILE);
        if vault.exists() {
            return Err(SherlockError::GroupExists(gid.to_string()));
        }

        // A directory without a vault is debris from an earlier failed
        // create; reuse it.
        let fresh = !dir.exists();
        Self::create_dir(&dir)?;
        if let Err(e) = Self::write_atomic(&vault, initial_vault) {
            if fresh {
                let _ = fs::remove_dir_all(&dir);
            }
            return Err(e);
        }
        debug!(gid, bytes = initial_vault.len(), "created group");
        Ok(())
    }

    fn group_exists(&self, gid: &str) -> bool {
        self.group_dir(gid).map(|p| p.is_dir()).unwrap_or(false)
    }

    fn vault_exists(&self, gid: &str) -> bool {
        self.vault_path(gid).map(|p| p.is_file()).unwrap_or(false)
    }

    fn read_group_vault(&self, gid: &str) -> Result<Vec<u8>> {
        let path = self.vault_path(gid)?;
        if !path.is_file() {
            return Err(SherlockError::GroupNotFound(gid.to_string()));
        }
        let data = fs::read(&path)?;
        debug!(gid, bytes = data.len(), "read vault");
        Ok(data)
    }

    fn write(&mut self, gid: &str, vault: &[u8]) -> Result<()> {
        let dir = self.group_dir(gid)?;
        if !dir.is_dir() {
            return Err(SherlockError::GroupNotFound(gid.to_string()));
        }
        Self::write_atomic(&dir.join(VAULT_FILE), vault)?;
        debug!(gid, bytes = vault.len(), "wrote vault");
        Ok(())
    }

    fn list_registered_groups(&self) -> Result<Vec<String>> {
        let groups_dir = self.groups_dir();
        if !groups_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut groups = Vec::new();
        for entry in fs::read_dir(&groups_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.join(VAULT_FILE).is_file() {
                groups.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        groups.sort();
        Ok(groups)
    }
}
