//! The closed set of state changes a group can undergo.
//!
//! The orchestrator loads a group, hands it to `apply` together with one
//! `Mutation`, and re-persists the result. Nothing else writes to a group.

use std::fmt;

use zeroize::Zeroizing;

use super::account::Account;
use super::group::Group;
use crate::errors::{Result, SherlockError};

/// One state change to apply to a loaded group.
pub enum Mutation {
    AddAccount(Account),
    DeleteAccount {
        name: String,
    },
    RenameAccount {
        name: String,
        new_name: String,
    },
    ChangePassword {
        name: String,
        password: Zeroizing<String>,
        insecure: bool,
    },
    ChangeTag {
        name: String,
        tag: String,
    },
}

impl Mutation {
    /// Short operation name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddAccount(_) => "add-account",
            Self::DeleteAccount { .. } => "delete-account",
            Self::RenameAccount { .. } => "rename-account",
            Self::ChangePassword { .. } => "change-password",
            Self::ChangeTag { .. } => "change-tag",
        }
    }
}

impl fmt::Debug for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddAccount(account) => f.debug_tuple("AddAccount").field(account).finish(),
            Self::ChangePassword { name, insecure, .. } => f
                .debug_struct("ChangePassword")
                .field("name", name)
                .field("insecure", insecure)
                .finish_non_exhaustive(),
            Self::DeleteAccount { name } => {
                f.debug_struct("DeleteAccount").field("name", name).finish()
            }
            Self::RenameAccount { name, new_name } => f
                .debug_struct("RenameAccount")
                .field("name", name)
                .field("new_name", new_name)
                .finish(),
            Self::ChangeTag { name, tag } => f
                .debug_struct("ChangeTag")
                .field("name", name)
                .field("tag", tag)
                .finish(),
        }
    }
}

/// Apply `mutation` to `group`. On error the group is unchanged.
pub fn apply(group: &mut Group, mutation: Mutation) -> Result<()> {
    match mutation {
        Mutation::AddAccount(account) => group.append(account),
        Mutation::DeleteAccount { name } => group.delete(&name),
        Mutation::RenameAccount { name, new_name } => {
            let target = new_name.trim();
            // Renaming onto itself is a no-op rename, not a collision.
            if target != name && group.exists(target) {
                return Err(SherlockError::AccountExists(target.to_string()));
            }
            group.lookup_mut(&name)?.update_name(target)
        }
        Mutation::ChangePassword {
            name,
            password,
            insecure,
        } => group.lookup_mut(&name)?.update_password(&password, insecure),
        Mutation::ChangeTag { name, tag } => group.lookup_mut(&name)?.update_tag(&tag),
    }
}
