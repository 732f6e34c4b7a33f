//! Storage module: where encrypted group vaults live.
//!
//! The orchestrator only ever sees opaque byte blobs keyed by group id;
//! `VaultStorage` is the seam, `DiskStorage` the implementation the CLI
//! uses.

pub mod disk;

pub use disk::DiskStorage;

use crate::errors::Result;

/// A keyed store of encrypted group blobs.
pub trait VaultStorage {
    /// Create the root layout and the default group's vault.
    ///
    /// Idempotent: an existing default vault is left untouched.
    fn init_root(&mut self, initial_vault: &[u8]) -> Result<()>;

    /// Register a new group with its first (empty) vault.
    ///
    /// Fails with `GroupExists` if the group already holds a vault. A
    /// registered group without one is taken over.
    fn create_group(&mut self, gid: &str, initial_vault: &[u8]) -> Result<()>;

    /// Whether a group is registered, regardless of its vault state.
    fn group_exists(&self, gid: &str) -> bool;

    /// Whether the group's vault blob is present.
    fn vault_exists(&self, gid: &str) -> bool;

    /// Read the group's vault blob. `GroupNotFound` if it is missing.
    fn read_group_vault(&self, gid: &str) -> Result<Vec<u8>>;

    /// Replace the group's vault blob in full.
    fn write(&mut self, gid: &str, vault: &[u8]) -> Result<()>;

    /// Ids of all groups that hold a vault, sorted.
    fn list_registered_groups(&self) -> Result<Vec<String>>;
}
