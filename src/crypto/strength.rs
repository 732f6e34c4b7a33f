//! Heuristic password strength rating.
//!
//! Score = digits × 4 + (length − uppercase) × 2 + (length − lowercase) × 2
//!       + symbols × 6, where only `$ # _ -` count as symbols.
//!
//! `length` is the UTF-8 byte length, so a multi-byte character weighs
//! more than an ASCII one; class counts are per character.
//!
//! This is a cheap proxy for character-class diversity, not an entropy
//! estimate. The weights and thresholds are fixed so existing vaults and
//! scripts see the same verdicts.

use std::fmt;

use crate::errors::{Result, SherlockError};

/// Characters that earn the symbol bonus.
pub const SCORED_SYMBOLS: &[char] = &['$', '#', '_', '-'];

const HIGH_THRESHOLD: u32 = 75;
const SATISFACTORY_THRESHOLD: u32 = 45;

/// Three-tier verdict. Ordered, so `strength >= Strength::Satisfactory` works.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Strength {
    Low,
    Satisfactory,
    High,
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Satisfactory => "satisfactory",
            Self::High => "high",
        };
        f.write_str(s)
    }
}

/// Raw score before bucketing.
pub fn score(password: &str) -> u32 {
    let len = u32::try_from(password.len()).unwrap_or(u32::MAX);
    let mut digits = 0u32;
    let mut upper = 0u32;
    let mut lower = 0u32;
    let mut symbols = 0u32;

    for c in password.chars() {
        if c.is_ascii_digit() {
            digits += 1;
        } else if c.is_ascii_uppercase() {
            upper += 1;
        } else if c.is_ascii_lowercase() {
            lower += 1;
        } else if SCORED_SYMBOLS.contains(&c) {
            symbols += 1;
        }
    }

    digits
        .saturating_mul(4)
        .saturating_add((len - upper).saturating_mul(2))
        .saturating_add((len - lower).saturating_mul(2))
        .saturating_add(symbols.saturating_mul(6))
}

/// Bucket a password into `Low`, `Satisfactory` or `High`.
pub fn password_strength(password: &str) -> Strength {
    match score(password) {
        s if s >= HIGH_THRESHOLD => Strength::High,
        s if s >= SATISFACTORY_THRESHOLD => Strength::Satisfactory,
        _ => Strength::Low,
    }
}

/// Fail with `InsecurePassword` unless the password rates at least
/// `Satisfactory`.
pub fn ensure_secure(password: &str) -> Result<()> {
    if password_strength(password) < Strength::Satisfactory {
        return Err(SherlockError::InsecurePassword);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercase_only_is_low() {
        assert_eq!(score("abcdefghij"), 20);
        assert_eq!(password_strength("abcdefghij"), Strength::Low);
    }

    #[test]
    fn mixed_with_scored_symbols_is_high() {
        assert_eq!(score("$wsert-2w345_2@34#!0?"), 128);
        assert_eq!(password_strength("$wsert-2w345_2@34#!0?"), Strength::High);
    }

    #[test]
    fn length_counts_utf8_bytes() {
        // "é" is two bytes and neither class: 2*2 + 2*2
        assert_eq!(score("é"), 8);
        // 10 bytes, 6 ASCII lowercase: 10*2 + 4*2
        assert_eq!(score("pässwörd"), 28);
    }

    #[test]
    fn satisfactory_band() {
        // 4 digits: 16, 9 non-upper: 18, 5 non-lower: 10, one '#': 6 => 50
        assert_eq!(score("abcd1234#"), 50);
        assert_eq!(password_strength("abcd1234#"), Strength::Satisfactory);
    }

    #[test]
    fn scored_symbols_alone_can_clear_the_bar() {
        // "1111111111" = 10 digits: 40 + 20 + 20 = 80
        assert_eq!(password_strength("1111111111"), Strength::High);
        // "____" = 4 symbols: 0 + 8 + 8 + 24 = 40, "_____": 50
        assert_eq!(password_strength("____"), Strength::Low);
        assert_eq!(password_strength("_____"), Strength::Satisfactory);
    }

    #[test]
    fn unscored_punctuation_only_counts_towards_length() {
        // "S3cr3t!9$": 12 + 16 + 12 + 6 = 46, '!' earns no bonus
        assert_eq!(score("S3cr3t!9$"), 46);
        assert_eq!(score("S3cr3t!9!"), 40);
        assert!(ensure_secure("S3cr3t!9$").is_ok());
    }

    #[test]
    fn ensure_secure_accepts_satisfactory() {
        assert!(ensure_secure("abcd1234#").is_ok());
        assert!(matches!(
            ensure_secure("helloworld"),
            Err(SherlockError::InsecurePassword)
        ));
    }

    #[test]
    fn empty_password_scores_zero() {
        assert_eq!(score(""), 0);
    }
}
