//! `sherlock del account`: remove an account from its group.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open, prompt_passphrase, Cli};
use crate::errors::{Result, SherlockError};
use crate::vault;

/// Execute the `del account` command.
pub fn execute(cli: &Cli, query: &str, force: bool) -> Result<()> {
    let (gid, name) = vault::split(query)?;

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete account '{name}' from group '{gid}'?"))
            .default(false)
            .interact()
            .map_err(|e| SherlockError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let (mut sherlock, _) = open(cli)?;
    let passphrase = prompt_passphrase(gid)?;
    sherlock.delete_account(query, &passphrase)?;

    output::success(&format!("Deleted account '{name}' from group '{gid}'"));
    Ok(())
}
