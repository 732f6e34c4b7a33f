//! `sherlock update`: change an account's password, name, or tag.

use crate::cli::output;
use crate::cli::{open, prompt_passphrase, read_new_password, read_value, Cli};
use crate::crypto::password_strength;
use crate::errors::Result;
use crate::vault;

/// Execute `update password`.
pub fn execute_password(cli: &Cli, query: &str, insecure: bool) -> Result<()> {
    let (gid, name) = vault::split(query)?;
    let (mut sherlock, _) = open(cli)?;

    let password = read_new_password(&format!("New password for '{name}'"))?;
    let passphrase = prompt_passphrase(gid)?;
    sherlock.update_password(query, &passphrase, &password, insecure)?;

    output::success(&format!("Password for '{name}' updated"));
    output::info(&format!("Password strength: {}", password_strength(&password)));
    Ok(())
}

/// Execute `update name`.
pub fn execute_name(cli: &Cli, query: &str) -> Result<()> {
    let (gid, name) = vault::split(query)?;
    let (mut sherlock, _) = open(cli)?;

    let new_name = read_value(&format!("New name for '{name}'"))?;
    let passphrase = prompt_passphrase(gid)?;
    sherlock.update_name(query, &passphrase, &new_name)?;

    output::success(&format!("Renamed '{name}' to '{}'", new_name.trim()));
    Ok(())
}

/// Execute `update tag`.
pub fn execute_tag(cli: &Cli, query: &str) -> Result<()> {
    let (gid, name) = vault::split(query)?;
    let (mut sherlock, _) = open(cli)?;

    let tag = read_value(&format!("New tag for '{name}' (empty to clear)"))?;
    let passphrase = prompt_passphrase(gid)?;
    sherlock.update_tag(query, &passphrase, &tag)?;

    output::success(&format!("Tag for '{name}' updated"));
    Ok(())
}
