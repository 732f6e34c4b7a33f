//! `sherlock get`: show one account and copy its password.

use chrono::Utc;

use crate::cli::output;
use crate::cli::{open, prompt_passphrase, Cli};
use crate::crypto::password_strength;
use crate::errors::Result;
use crate::vault;

/// Execute the `get` command.
pub fn execute(cli: &Cli, query: &str, verbose: bool) -> Result<()> {
    let (gid, _) = vault::split(query)?;
    let (sherlock, settings) = open(cli)?;

    let passphrase = prompt_passphrase(gid)?;
    let account = sherlock.get_account(query, &passphrase)?;

    output::field("Group", gid);
    output::field("Account", account.name());
    if !account.tag().is_empty() {
        output::field("Tag", account.tag());
    }
    output::field(
        "Expires",
        &account
            .expiration(Utc::now(), settings.password_expiry_months)
            .to_string(),
    );
    if verbose {
        output::field("Strength", &password_strength(account.password()).to_string());
        println!("{}", account.password());
    }

    match copy_to_clipboard(account.password()) {
        Ok(()) => output::success("Password copied to clipboard"),
        Err(e) => output::warning(&format!("Could not copy to clipboard: {e}")),
    }

    Ok(())
}

fn copy_to_clipboard(text: &str) -> std::result::Result<(), arboard::Error> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_owned())
}
