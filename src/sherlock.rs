//! The orchestrator tying storage, crypto and the vault model together.
//!
//! Every operation works on exactly one group and follows the same path:
//! read the blob, decrypt it, parse the group, and (for mutations) apply a
//! single `Mutation`, re-serialize, re-encrypt and write the whole blob
//! back. Serialization and encryption happen in memory before the one
//! `write` call, so a failed operation leaves the stored vault untouched.

use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::crypto::{self, ensure_secure, Scheme};
use crate::errors::{Result, SherlockError};
use crate::storage::VaultStorage;
use crate::vault::{self, query, Account, Group, Mutation, DEFAULT_GROUP};

/// What `setup` ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupOutcome {
    /// Fresh store, default vault created.
    Created,
    /// Default vault already present; nothing written.
    AlreadySetUp,
    /// Default vault discarded and recreated empty.
    Overwritten,
}

/// Single-invocation façade over a `VaultStorage`.
pub struct Sherlock<S: VaultStorage> {
    storage: S,
    /// Scheme for vaults created by this instance. Loaded vaults are
    /// re-saved in whatever scheme they were found in.
    scheme: Scheme,
}

impl<S: VaultStorage> Sherlock<S> {
    pub fn new(storage: S, scheme: Scheme) -> Self {
        Self { storage, scheme }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    // ------------------------------------------------------------------
    // Setup and groups
    // ------------------------------------------------------------------

    /// `Ok` once the default group and its vault exist.
    pub fn is_setup(&self) -> Result<()> {
        if self.storage.group_exists(DEFAULT_GROUP) && self.storage.vault_exists(DEFAULT_GROUP) {
            Ok(())
        } else {
            Err(SherlockError::NotSetUp)
        }
    }

    /// Create the default group's vault if it is missing.
    ///
    /// With `overwrite`, an existing default vault is replaced by an
    /// empty one under the new passphrase. Its accounts are lost.
    pub fn setup(&mut self, passphrase: &str, overwrite: bool) -> Result<SetupOutcome> {
        let existed = self.is_setup().is_ok();
        if existed && !overwrite {
            debug!("setup skipped, default vault present");
            return Ok(SetupOutcome::AlreadySetUp);
        }

        let blob = seal(&self.scheme, passphrase, &Group::new(DEFAULT_GROUP)?)?;
        self.storage.init_root(&blob)?;

        if existed {
            self.storage.write(DEFAULT_GROUP, &blob)?;
            warn!("default vault overwritten");
            return Ok(SetupOutcome::Overwritten);
        }
        info!("sherlock set up");
        Ok(SetupOutcome::Created)
    }

    /// Register a new, empty group protected by `passphrase`.
    pub fn add_group(&mut self, gid: &str, passphrase: &str, insecure: bool) -> Result<()> {
        if self.storage.vault_exists(gid) {
            return Err(SherlockError::GroupExists(gid.to_string()));
        }
        let group = Group::new(gid)?;
        if !insecure {
            ensure_secure(passphrase)?;
        }

        let blob = seal(&self.scheme, passphrase, &group)?;
        self.storage.create_group(gid, &blob)?;
        info!(gid, "group created");
        Ok(())
    }

    /// Whether `gid` is registered and holds a vault.
    pub fn group_exists(&self, gid: &str) -> bool {
        self.storage.group_exists(gid) && self.storage.vault_exists(gid)
    }

    /// Ids of every registered group. Needs no passphrase.
    pub fn list_groups(&self) -> Result<Vec<String>> {
        self.storage.list_registered_groups()
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Decrypt and return a whole group.
    pub fn load_group(&self, gid: &str, passphrase: &str) -> Result<Group> {
        self.open(gid, passphrase).map(|(group, _)| group)
    }

    /// Resolve `group@account` and return a copy of the account.
    pub fn get_account(&self, query: &str, passphrase: &str) -> Result<Account> {
        let (gid, name) = query::split(query)?;
        let group = self.load_group(gid, passphrase)?;
        group.lookup(name).cloned()
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Create `group@name` with the given password and tag.
    pub fn add_account(
        &mut self,
        query: &str,
        passphrase: &str,
        password: &str,
        tag: &str,
        insecure: bool,
    ) -> Result<()> {
        let (gid, name) = query::split(query)?;
        let account = Account::new(name, password, tag, insecure)?;
        self.mutate(gid, passphrase, Mutation::AddAccount(account))
    }

    /// Remove `group@name`. The group stays even if it becomes empty.
    pub fn delete_account(&mut self, query: &str, passphrase: &str) -> Result<()> {
        let (gid, name) = query::split(query)?;
        self.mutate(
            gid,
            passphrase,
            Mutation::DeleteAccount {
                name: name.to_string(),
            },
        )
    }

    pub fn update_password(
        &mut self,
        query: &str,
        passphrase: &str,
        new_password: &str,
        insecure: bool,
    ) -> Result<()> {
        let (gid, name) = query::split(query)?;
        self.mutate(
            gid,
            passphrase,
            Mutation::ChangePassword {
                name: name.to_string(),
                password: Zeroizing::new(new_password.to_string()),
                insecure,
            },
        )
    }

    pub fn update_name(&mut self, query: &str, passphrase: &str, new_name: &str) -> Result<()> {
        let (gid, name) = query::split(query)?;
        self.mutate(
            gid,
            passphrase,
            Mutation::RenameAccount {
                name: name.to_string(),
                new_name: new_name.to_string(),
            },
        )
    }

    pub fn update_tag(&mut self, query: &str, passphrase: &str, tag: &str) -> Result<()> {
        let (gid, name) = query::split(query)?;
        self.mutate(
            gid,
            passphrase,
            Mutation::ChangeTag {
                name: name.to_string(),
                tag: tag.to_string(),
            },
        )
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Load → apply one mutation → seal → write.
    fn mutate(&mut self, gid: &str, passphrase: &str, mutation: Mutation) -> Result<()> {
        let kind = mutation.kind();
        let (mut group, scheme) = self.open(gid, passphrase)?;

        vault::apply(&mut group, mutation)?;

        let blob = seal(&scheme, passphrase, &group)?;
        self.storage.write(gid, &blob)?;
        info!(gid, op = kind, accounts = group.len(), "vault updated");
        Ok(())
    }

    /// Read, decrypt and parse a group, reporting the scheme it used.
    fn open(&self, gid: &str, passphrase: &str) -> Result<(Group, Scheme)> {
        let blob = self.storage.read_group_vault(gid)?;
        let (plaintext, scheme) = crypto::decrypt(passphrase, &blob)?;
        let group = Group::from_json(&plaintext)?;

        if group.id() != gid {
            warn!(gid, stored = group.id(), "vault id does not match its group");
        }
        debug!(gid, accounts = group.len(), ?scheme, "vault opened");
        Ok((group, scheme))
    }
}

fn seal(scheme: &Scheme, passphrase: &str, group: &Group) -> Result<Vec<u8>> {
    let plaintext = group.to_json()?;
    crypto::encrypt(scheme, passphrase, &plaintext)
}
