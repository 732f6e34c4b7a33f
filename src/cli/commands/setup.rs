//! `sherlock setup`: create the default group.

use std::io::{self, IsTerminal};

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open, prompt_new_passphrase, Cli};
use crate::errors::{Result, SherlockError};
use crate::sherlock::SetupOutcome;
use crate::vault::DEFAULT_GROUP;

/// Execute the `setup` command.
pub fn execute(cli: &Cli, overwrite: bool) -> Result<()> {
    let (mut sherlock, _) = open(cli)?;
    let already = sherlock.is_setup().is_ok();

    if already && !overwrite {
        output::info("Sherlock is already set up.");
        output::tip("Use `sherlock setup --overwrite` to recreate the default group.");
        return Ok(());
    }

    if already && io::stdin().is_terminal() {
        let confirmed = Confirm::new()
            .with_prompt("This deletes every account in the default group. Continue?")
            .default(false)
            .interact()
            .map_err(|e| SherlockError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            return Err(SherlockError::UserCancelled);
        }
    }

    let passphrase = prompt_new_passphrase(DEFAULT_GROUP)?;
    match sherlock.setup(&passphrase, overwrite)? {
        SetupOutcome::Created => {
            output::success(&format!(
                "Sherlock set up at {}",
                sherlock.storage().root().display()
            ));
            output::tip("Add an account: sherlock add account default@<name>");
        }
        SetupOutcome::Overwritten => {
            output::success("Default group recreated (previous accounts discarded)");
        }
        SetupOutcome::AlreadySetUp => output::info("Sherlock is already set up."),
    }

    Ok(())
}
