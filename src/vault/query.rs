//! `group@account` queries and the identifier rules they impose.

use crate::errors::{Result, SherlockError};

/// Separator between the group id and the account name in a query.
pub const SEPARATOR: char = '@';

/// Longest group id or account name accepted.
const MAX_IDENTIFIER_LEN: usize = 64;

/// Split `group@account` into its two halves.
///
/// The separator must appear exactly once. Whether the halves are valid
/// identifiers is checked by `Group` and `Account`, not here.
pub fn split(query: &str) -> Result<(&str, &str)> {
    let mut parts = query.split(SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(group), Some(account), None) => Ok((group, account)),
        _ => Err(SherlockError::InvalidQuery(query.to_string())),
    }
}

/// Validate a group id or account name.
///
/// Must be non-empty, at most 64 characters, contain no whitespace and
/// no `@` (it would make the enclosing query ambiguous).
pub(crate) fn validate_identifier(kind: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(SherlockError::InvalidInput(format!(
            "{kind} cannot be empty"
        )));
    }
    if value.chars().count() > MAX_IDENTIFIER_LEN {
        return Err(SherlockError::InvalidInput(format!(
            "{kind} cannot exceed {MAX_IDENTIFIER_LEN} characters"
        )));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(SherlockError::InvalidInput(format!(
            "{kind} '{value}' must be a single word without spaces"
        )));
    }
    if value.contains(SEPARATOR) {
        return Err(SherlockError::InvalidInput(format!(
            "{kind} '{value}' cannot contain '{SEPARATOR}'"
        )));
    }
    Ok(())
}
