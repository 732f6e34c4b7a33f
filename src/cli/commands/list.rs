//! `sherlock list`: show a group's accounts, or every registered group.

use crate::cli::output;
use crate::cli::{open, prompt_passphrase, Cli};
use crate::errors::Result;
use crate::vault::{Group, DEFAULT_GROUP};

/// Execute the `list` command.
pub fn execute(
    cli: &Cli,
    group: Option<&str>,
    tag: Option<&str>,
    all: bool,
    verbose: bool,
) -> Result<()> {
    let (sherlock, settings) = open(cli)?;

    if all {
        let groups = sherlock.list_groups()?;
        output::info(&format!("{} registered group(s)", groups.len()));
        let rows = groups.into_iter().map(|g| vec![g]).collect();
        output::print_table(&["Group"], rows);
        return Ok(());
    }

    let gid = group.unwrap_or(DEFAULT_GROUP);
    let passphrase = prompt_passphrase(gid)?;
    let vault = sherlock.load_group(gid, &passphrase)?;

    let rows = vault.to_rows(verbose, tag.unwrap_or(""), settings.password_expiry_months);
    if rows.is_empty() {
        match tag {
            Some(t) => output::info(&format!("No accounts tagged '{t}' in group '{gid}'.")),
            None => {
                output::info(&format!("No accounts in group '{gid}' yet."));
                output::tip(&format!("Run `sherlock add account {gid}@<name>` to add one."));
            }
        }
        return Ok(());
    }

    output::info(&format!("Group '{gid}': {} account(s)", rows.len()));
    output::print_table(&Group::headers(verbose), rows);
    Ok(())
}
