use thiserror::Error;

/// All errors that can occur in Sherlock.
#[derive(Debug, Error)]
pub enum SherlockError {
    // --- Validation errors ---
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid query '{0}', expected the form group@account")]
    InvalidQuery(String),

    #[error("Password is insecure (use --insecure to ignore this check)")]
    InsecurePassword,

    // --- Account errors ---
    #[error("Account '{0}' already exists in this group")]
    AccountExists(String),

    #[error("Account '{0}' not found")]
    AccountNotFound(String),

    // --- Group errors ---
    #[error("Group '{0}' already exists")]
    GroupExists(String),

    #[error("Group '{0}' not found (use `sherlock add group <id>`)")]
    GroupNotFound(String),

    #[error("Wrong group key")]
    WrongKey,

    #[error("Vault for group '{group}' is inconsistent: {reason}")]
    CorruptVault { group: String, reason: String },

    #[error("Sherlock needs to be set up first (use `sherlock setup`)")]
    NotSetUp,

    // --- Storage errors ---
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Crypto errors ---
    #[error("Crypto error: {0}")]
    Crypto(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    Config(String),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    Serialization(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

/// Convenience type alias for Sherlock results.
pub type Result<T> = std::result::Result<T, SherlockError>;
