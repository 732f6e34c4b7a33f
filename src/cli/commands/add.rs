//! `sherlock add`: register a group or store a new account.

use crate::cli::output;
use crate::cli::{open, prompt_new_passphrase, prompt_passphrase, read_new_password, Cli};
use crate::crypto::{generate_password, password_strength};
use crate::errors::{Result, SherlockError};
use crate::vault;

/// Execute `add group`.
pub fn execute_group(cli: &Cli, gid: &str, insecure: bool) -> Result<()> {
    let (mut sherlock, _) = open(cli)?;

    // Fail before prompting if the id is taken.
    if sherlock.group_exists(gid) {
        return Err(SherlockError::GroupExists(gid.to_string()));
    }

    let passphrase = prompt_new_passphrase(gid)?;
    sherlock.add_group(gid, &passphrase, insecure)?;

    output::success(&format!("Group '{gid}' created"));
    output::tip(&format!("Add an account: sherlock add account {gid}@<name>"));
    Ok(())
}

/// Execute `add account`.
pub fn execute_account(
    cli: &Cli,
    query: &str,
    tag: &str,
    insecure: bool,
    generate: Option<usize>,
) -> Result<()> {
    let (gid, name) = vault::split(query)?;
    let (mut sherlock, _) = open(cli)?;

    let password = match generate {
        Some(len) => generate_password(len)?,
        None => read_new_password(&format!("Password for '{name}'"))?,
    };
    let passphrase = prompt_passphrase(gid)?;

    sherlock.add_account(query, &passphrase, &password, tag, insecure)?;

    output::success(&format!("Account '{name}' added to group '{gid}'"));
    output::info(&format!("Password strength: {}", password_strength(&password)));
    if generate.is_some() {
        output::tip(&format!("Reveal it with: sherlock get {query} --verbose"));
    }
    Ok(())
}
