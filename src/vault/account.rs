//! A single credential stored inside a group.
//!
//! Uniqueness of `name` is a group-level invariant; an `Account` only
//! validates its own shape.

use std::fmt;

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use super::query::validate_identifier;
use crate::crypto::ensure_secure;
use crate::errors::{Result, SherlockError};

/// A named credential record.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    /// Unique within its group. No whitespace, no `@`.
    pub(crate) name: String,

    /// The secret itself. Wiped from memory on drop.
    pub(crate) password: String,

    /// Optional free-text label; empty means untagged.
    #[serde(default)]
    pub(crate) tag: String,

    pub(crate) created_at: DateTime<Utc>,

    pub(crate) updated_at: DateTime<Utc>,
}

impl Account {
    /// Create an account, validating the name and password.
    ///
    /// Unless `insecure` is set the password must rate at least
    /// `Satisfactory`.
    pub fn new(name: &str, password: &str, tag: &str, insecure: bool) -> Result<Self> {
        validate_identifier("account name", name)?;
        validate_password(password, insecure)?;

        let now = Utc::now();
        Ok(Self {
            name: name.to_string(),
            password: password.to_string(),
            tag: tag.trim().to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // ------------------------------------------------------------------
    // Field updates. Each validates first and leaves the account
    // untouched on error.
    // ------------------------------------------------------------------

    /// Replace the password. Surrounding whitespace is trimmed.
    pub fn update_password(&mut self, new_password: &str, insecure: bool) -> Result<()> {
        let new_password = new_password.trim();
        validate_password(new_password, insecure)?;

        self.password.zeroize();
        self.password = new_password.to_string();
        self.touch();
        Ok(())
    }

    /// Rename the account. Surrounding whitespace is trimmed.
    pub fn update_name(&mut self, new_name: &str) -> Result<()> {
        let new_name = new_name.trim();
        validate_identifier("account name", new_name)?;

        self.name = new_name.to_string();
        self.touch();
        Ok(())
    }

    /// Replace the tag. An empty tag clears it.
    pub fn update_tag(&mut self, new_tag: &str) -> Result<()> {
        self.tag = new_tag.trim().to_string();
        self.touch();
        Ok(())
    }

    /// Empty filter matches everything, otherwise exact tag equality.
    pub fn matches_tag(&self, filter: &str) -> bool {
        filter.is_empty() || self.tag == filter
    }

    /// Whether the password is past `months` since its last update.
    pub fn expiration(&self, now: DateTime<Utc>, months: u32) -> Expiry {
        let expires_at = self
            .updated_at
            .checked_add_months(Months::new(months))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        if now > expires_at {
            Expiry::Expired(now - expires_at)
        } else {
            Expiry::ValidFor(expires_at - now)
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Drop for Account {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .field("tag", &self.tag)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

fn validate_password(password: &str, insecure: bool) -> Result<()> {
    if password.is_empty() {
        return Err(SherlockError::InvalidInput(
            "password cannot be empty".into(),
        ));
    }
    if insecure {
        return Ok(());
    }
    ensure_secure(password)
}

/// Password age relative to the configured rotation period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    ValidFor(Duration),
    Expired(Duration),
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (span, expired) = match self {
            Self::ValidFor(d) => (d, false),
            Self::Expired(d) => (d, true),
        };
        let days = span.num_days();
        let hours = span.num_hours() % 24;

        if expired {
            write!(f, "expired {days} days {hours} hours ago")
        } else {
            write!(f, "valid for {days} days {hours} hours")
        }
    }
}
