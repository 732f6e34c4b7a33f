//! A group (vault): the unit of encryption and persistence.
//!
//! Every group is stored as one encrypted JSON document:
//!
//! ```json
//! { "id": "team", "accounts": [ { "name": ..., "password": ..., ... } ] }
//! ```

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use zeroize::Zeroizing;

use super::account::Account;
use super::query::validate_identifier;
use crate::errors::{Result, SherlockError};

/// Timestamp format used in listing rows.
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// An ordered collection of uniquely named accounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Group {
    id: String,
    accounts: Vec<Account>,
}

impl Group {
    /// Create an empty group. The id follows the account-name rules
    /// since it forms the left half of every query.
    pub fn new(id: &str) -> Result<Self> {
        validate_identifier("group id", id)?;
        Ok(Self {
            id: id.to_string(),
            accounts: Vec::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Accounts in insertion order.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Append an account, refusing duplicate names.
    pub fn append(&mut self, account: Account) -> Result<()> {
        if self.exists(account.name()) {
            return Err(SherlockError::AccountExists(account.name().to_string()));
        }
        self.accounts.push(account);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<&Account> {
        self.accounts
            .iter()
            .find(|a| a.name() == name)
            .ok_or_else(|| SherlockError::AccountNotFound(name.to_string()))
    }

    pub fn lookup_mut(&mut self, name: &str) -> Result<&mut Account> {
        self.accounts
            .iter_mut()
            .find(|a| a.name() == name)
            .ok_or_else(|| SherlockError::AccountNotFound(name.to_string()))
    }

    /// Remove an account. The group itself survives even when emptied.
    pub fn delete(&mut self, name: &str) -> Result<()> {
        let index = self
            .accounts
            .iter()
            .position(|a| a.name() == name)
            .ok_or_else(|| SherlockError::AccountNotFound(name.to_string()))?;
        self.accounts.remove(index);
        Ok(())
    }

    pub fn exists(&self, name: &str) -> bool {
        self.accounts.iter().any(|a| a.name() == name)
    }

    /// Column headers matching `to_rows`.
    pub fn headers(verbose: bool) -> Vec<&'static str> {
        let mut headers = vec!["Group", "Account", "Tag", "Created On"];
        if verbose {
            headers.extend(["Updated On", "Expires In"]);
        }
        headers
    }

    /// Project accounts matching `tag_filter` into display rows.
    ///
    /// `expiry_months` is the password rotation period used for the
    /// verbose "Expires In" column.
    pub fn to_rows(&self, verbose: bool, tag_filter: &str, expiry_months: u32) -> Vec<Vec<String>> {
        self.rows_at(Utc::now(), verbose, tag_filter, expiry_months)
    }

    fn rows_at(
        &self,
        now: DateTime<Utc>,
        verbose: bool,
        tag_filter: &str,
        expiry_months: u32,
    ) -> Vec<Vec<String>> {
        self.accounts
            .iter()
            .filter(|a| a.matches_tag(tag_filter))
            .map(|a| {
                let mut row = vec![
                    self.id.clone(),
                    a.name().to_string(),
                    a.tag().to_string(),
                    a.created_at().format(DATE_FORMAT).to_string(),
                ];
                if verbose {
                    row.push(a.updated_at().format(DATE_FORMAT).to_string());
                    row.push(a.expiration(now, expiry_months).to_string());
                }
                row
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------

    /// Serialize to the JSON document stored inside the vault blob.
    pub fn to_json(&self) -> Result<Zeroizing<Vec<u8>>> {
        serde_json::to_vec(self)
            .map(Zeroizing::new)
            .map_err(|e| SherlockError::Serialization(format!("group '{}': {e}", self.id)))
    }

    /// Parse decrypted vault contents.
    ///
    /// Legacy vaults have no integrity check, so a wrong passphrase shows
    /// up here as unparsable bytes; that is reported as `WrongKey`.
    ///
    /// A document that parses but breaks the group rules (duplicate
    /// names) is `CorruptVault`. Names that only fail the shape rules are
    /// kept, since older writers were laxer, and logged.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let group: Self = serde_json::from_slice(bytes).map_err(|_| SherlockError::WrongKey)?;
        group.check_loaded()?;
        Ok(group)
    }

    fn check_loaded(&self) -> Result<()> {
        if let Err(e) = validate_identifier("group id", &self.id) {
            warn!(gid = %self.id, "stored group id is malformed: {e}");
        }

        let mut seen = HashSet::with_capacity(self.accounts.len());
        for account in &self.accounts {
            if !seen.insert(account.name()) {
                return Err(SherlockError::CorruptVault {
                    group: self.id.clone(),
                    reason: format!("account '{}' appears more than once", account.name()),
                });
            }
            if let Err(e) = validate_identifier("account name", account.name()) {
                warn!(gid = %self.id, "stored account name is malformed: {e}");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(name: &str) -> Account {
        Account::new(name, "pw", "", true).unwrap()
    }

    fn tagged(name: &str, tag: &str) -> Account {
        Account::new(name, "pw", tag, true).unwrap()
    }

    #[test]
    fn new_validates_id() {
        assert!(Group::new("test-group").is_ok());
        assert!(Group::new("").is_err());
        assert!(Group::new("test group").is_err());
        assert!(Group::new("test@group").is_err());
    }

    #[test]
    fn append_rejects_duplicate_names() {
        let mut g = Group::new("g").unwrap();
        g.append(account("same-account")).unwrap();
        g.append(account("other")).unwrap();

        let dup = Account::new("same-account", "different", "tagged", true).unwrap();
        assert!(matches!(
            g.append(dup),
            Err(SherlockError::AccountExists(name)) if name == "same-account"
        ));
        assert_eq!(g.len(), 2);
    }

    #[test]
    fn append_preserves_insertion_order() {
        let mut g = Group::new("g").unwrap();
        for name in ["zebra", "alpha", "middle"] {
            g.append(account(name)).unwrap();
        }
        let names: Vec<&str> = g.accounts().iter().map(Account::name).collect();
        assert_eq!(names, ["zebra", "alpha", "middle"]);
    }

    #[test]
    fn lookup_and_exists() {
        let mut g = Group::new("g").unwrap();
        g.append(account("svc")).unwrap();

        assert!(g.exists("svc"));
        assert!(!g.exists("nope"));
        assert_eq!(g.lookup("svc").unwrap().name(), "svc");
        assert!(matches!(
            g.lookup("nope"),
            Err(SherlockError::AccountNotFound(_))
        ));
    }

    #[test]
    fn delete_succeeds_exactly_once() {
        let mut g = Group::new("g").unwrap();
        g.append(account("svc")).unwrap();

        g.delete("svc").unwrap();
        assert!(g.is_empty());
        assert!(matches!(
            g.delete("svc"),
            Err(SherlockError::AccountNotFound(_))
        ));
    }

    #[test]
    fn rows_filter_by_tag() {
        let mut g = Group::new("team").unwrap();
        g.append(tagged("a", "prod")).unwrap();
        g.append(tagged("b", "dev")).unwrap();
        g.append(tagged("c", "prod")).unwrap();

        let all = g.to_rows(false, "", 6);
        assert_eq!(all.len(), 3);

        let prod = g.to_rows(false, "prod", 6);
        let names: Vec<&str> = prod.iter().map(|r| r[1].as_str()).collect();
        assert_eq!(names, ["a", "c"]);
        assert!(prod.iter().all(|r| r[0] == "team"));
    }

    #[test]
    fn verbose_rows_match_headers() {
        let mut g = Group::new("team").unwrap();
        g.append(account("svc")).unwrap();

        let plain = g.to_rows(false, "", 6);
        assert_eq!(plain[0].len(), Group::headers(false).len());

        let now = Utc::now();
        let verbose = g.rows_at(now, true, "", 6);
        assert_eq!(verbose[0].len(), Group::headers(true).len());
        assert!(verbose[0][5].starts_with("valid for"));
    }

    #[test]
    fn serialize_roundtrip() {
        let mut g = Group::new("team").unwrap();
        g.append(tagged("svc", "prod")).unwrap();

        let bytes = g.to_json().unwrap();
        let back = Group::from_json(&bytes).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn serialized_shape_has_id_and_accounts() {
        let g = Group::new("team").unwrap();
        let json: serde_json::Value = serde_json::from_slice(&g.to_json().unwrap()).unwrap();
        assert_eq!(json["id"], "team");
        assert!(json["accounts"].as_array().unwrap().is_empty());
    }

    #[test]
    fn garbage_deserializes_as_wrong_key() {
        assert!(matches!(
            Group::from_json(b"\x8f\x02garbage"),
            Err(SherlockError::WrongKey)
        ));
    }

    fn stored(names: &[&str]) -> Vec<u8> {
        let accounts: Vec<String> = names
            .iter()
            .map(|n| {
                format!(
                    r#"{{"name":"{n}","password":"pw","tag":"","created_at":"2024-01-01T00:00:00Z","updated_at":"2024-01-01T00:00:00Z"}}"#
                )
            })
            .collect();
        format!(r#"{{"id":"team","accounts":[{}]}}"#, accounts.join(",")).into_bytes()
    }

    #[test]
    fn duplicate_stored_names_are_corrupt() {
        assert!(matches!(
            Group::from_json(&stored(&["svc", "db", "svc"])),
            Err(SherlockError::CorruptVault { .. })
        ));
    }

    #[test]
    fn lax_stored_names_still_load() {
        let group = Group::from_json(&stored(&["old name", "db"])).unwrap();
        assert_eq!(group.len(), 2);
        assert!(group.exists("old name"));
    }
}
