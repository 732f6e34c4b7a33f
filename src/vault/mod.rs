//! Vault module: the in-memory data model.
//!
//! This module provides:
//! - `Account`, a single credential (`account`)
//! - `Group`, an ordered set of uniquely named accounts (`group`)
//! - `group@account` query parsing (`query`)
//! - The `Mutation` enum and its `apply` dispatcher (`mutation`)

pub mod account;
pub mod group;
pub mod mutation;
pub mod query;

// Re-export the most commonly used items.
pub use account::{Account, Expiry};
pub use group::Group;
pub use mutation::{apply, Mutation};
pub use query::{split, SEPARATOR};

/// Id of the group created by `sherlock setup`.
pub const DEFAULT_GROUP: &str = "default";
