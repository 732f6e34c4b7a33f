//! CLI module: Clap argument parser, prompts, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, BufRead, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{Result, SherlockError};
use crate::sherlock::Sherlock;
use crate::storage::DiskStorage;

/// Environment variable consulted before prompting for a group passphrase.
pub const PASSPHRASE_ENV: &str = "SHERLOCK_PASSPHRASE";

/// Sherlock CLI: local, per-group encrypted password manager.
#[derive(Parser)]
#[command(
    name = "sherlock",
    about = "Local password manager with independently encrypted groups",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sherlock root directory (default: ~/.sherlock)
    #[arg(long, env = "SHERLOCK_ROOT", global = true)]
    pub root: Option<PathBuf>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create the default group
    Setup {
        /// Discard and recreate an existing default group
        #[arg(long)]
        overwrite: bool,
    },

    /// Add a group or an account
    Add {
        #[command(subcommand)]
        target: AddTarget,
    },

    /// Delete an account
    Del {
        #[command(subcommand)]
        target: DelTarget,
    },

    /// Show an account and copy its password to the clipboard
    Get {
        /// Account to show, as group@account
        query: String,
        /// Also print the password
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the accounts of a group
    List {
        /// Group to list (default: "default")
        group: Option<String>,
        /// Only show accounts with this tag
        #[arg(short, long)]
        tag: Option<String>,
        /// List registered groups instead (no passphrase needed)
        #[arg(short, long)]
        all: bool,
        /// Show update time and password expiration
        #[arg(short, long)]
        verbose: bool,
    },

    /// Change an account's password, name, or tag
    Update {
        #[command(subcommand)]
        target: UpdateTarget,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

#[derive(clap::Subcommand)]
pub enum AddTarget {
    /// Register a new group with its own passphrase
    Group {
        /// Group id
        id: String,
        /// Skip the passphrase strength check
        #[arg(long)]
        insecure: bool,
    },

    /// Store a new account in a group
    Account {
        /// Account to create, as group@account
        query: String,
        /// Free-form label for filtering
        #[arg(short, long, default_value = "")]
        tag: String,
        /// Skip the password strength check
        #[arg(long)]
        insecure: bool,
        /// Generate a random password of this length instead of prompting
        #[arg(short, long = "gen", value_name = "LEN")]
        generate: Option<usize>,
    },
}

#[derive(clap::Subcommand)]
pub enum DelTarget {
    /// Delete an account from its group
    Account {
        /// Account to delete, as group@account
        query: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(clap::Subcommand)]
pub enum UpdateTarget {
    /// Replace an account's password
    Password {
        /// Account to update, as group@account
        query: String,
        /// Skip the password strength check
        #[arg(long)]
        insecure: bool,
    },

    /// Rename an account
    Name {
        /// Account to update, as group@account
        query: String,
    },

    /// Change an account's tag
    Tag {
        /// Account to update, as group@account
        query: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the root directory: `--root` / `SHERLOCK_ROOT`, else `~/.sherlock`.
pub fn root_dir(cli: &Cli) -> Result<PathBuf> {
    match &cli.root {
        Some(root) => Ok(root.clone()),
        None => DiskStorage::default_root(),
    }
}

/// Build the orchestrator for this invocation from the root's settings.
pub fn open(cli: &Cli) -> Result<(Sherlock<DiskStorage>, Settings)> {
    let root = root_dir(cli)?;
    let settings = Settings::load(&root)?;
    let sherlock = Sherlock::new(DiskStorage::new(root), settings.scheme());
    Ok((sherlock, settings))
}

fn passphrase_from_env() -> Option<Zeroizing<String>> {
    match std::env::var(PASSPHRASE_ENV) {
        Ok(pw) if !pw.is_empty() => Some(Zeroizing::new(pw)),
        _ => None,
    }
}

/// Get a group passphrase: `SHERLOCK_PASSPHRASE` first, then a hidden prompt.
pub fn prompt_passphrase(gid: &str) -> Result<Zeroizing<String>> {
    if let Some(pw) = passphrase_from_env() {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt(format!("Passphrase for group '{gid}'"))
        .interact()
        .map_err(|e| SherlockError::CommandFailed(format!("passphrase prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Choose a passphrase for a new group, with confirmation.
///
/// Also respects `SHERLOCK_PASSPHRASE` for scripted usage.
pub fn prompt_new_passphrase(gid: &str) -> Result<Zeroizing<String>> {
    if let Some(pw) = passphrase_from_env() {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt(format!("Choose a passphrase for group '{gid}'"))
        .with_confirmation("Confirm passphrase", "Passphrases do not match, try again")
        .interact()
        .map_err(|e| SherlockError::CommandFailed(format!("passphrase prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Read a new account password.
///
/// Piped stdin is used as-is (trailing newline stripped); on a terminal
/// the user is prompted twice.
pub fn read_new_password(prompt: &str) -> Result<Zeroizing<String>> {
    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        return Ok(Zeroizing::new(buf.trim_end_matches(['\r', '\n']).to_string()));
    }

    let pw = dialoguer::Password::new()
        .with_prompt(prompt)
        .with_confirmation("Confirm password", "Passwords do not match, try again")
        .interact()
        .map_err(|e| SherlockError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Read a plain (non-secret) value, from piped stdin or an input prompt.
pub fn read_value(prompt: &str) -> Result<String> {
    if !io::stdin().is_terminal() {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        return Ok(line.trim_end_matches(['\r', '\n']).to_string());
    }

    dialoguer::Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| SherlockError::CommandFailed(format!("input prompt: {e}")))
}
