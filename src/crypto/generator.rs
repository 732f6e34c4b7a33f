//! Random password generation for `add account --gen <N>`.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use zeroize::Zeroizing;

use super::strength::SCORED_SYMBOLS;
use crate::errors::{Result, SherlockError};

/// Shortest password the generator will produce (one of each class).
pub const MIN_LEN: usize = 4;

/// Longest password the generator will produce.
pub const MAX_LEN: usize = 128;

// Similar (0/O, 1/l/I) and ambiguous (quotes, brackets, slashes)
// characters are left out so generated passwords survive being read aloud
// or typed from a printout.
const LOWER: &[u8] = b"abcdefghijkmnopqrstuvwxyz";
const UPPER: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
const DIGITS: &[u8] = b"23456789";
const SYMBOLS: &[u8] = b"$#_-!%&*+=?@^";

/// Generate a random password of `len` characters containing at least one
/// lowercase letter, uppercase letter, digit, and strength-scored symbol.
pub fn generate_password(len: usize) -> Result<Zeroizing<String>> {
    if !(MIN_LEN..=MAX_LEN).contains(&len) {
        return Err(SherlockError::InvalidInput(format!(
            "generated password length must be between {MIN_LEN} and {MAX_LEN} (got {len})"
        )));
    }

    let mut rng = rand::rng();
    let scored: Vec<u8> = SCORED_SYMBOLS.iter().map(|&c| c as u8).collect();
    let mut bytes = Zeroizing::new(Vec::with_capacity(len));
    bytes.push(pick(LOWER, &mut rng)?);
    bytes.push(pick(UPPER, &mut rng)?);
    bytes.push(pick(DIGITS, &mut rng)?);
    bytes.push(pick(&scored, &mut rng)?);

    let alphabet: Vec<u8> = [LOWER, UPPER, DIGITS, SYMBOLS].concat();
    while bytes.len() < len {
        bytes.push(pick(&alphabet, &mut rng)?);
    }
    bytes.shuffle(&mut rng);

    let password = String::from_utf8(bytes.to_vec())
        .map_err(|_| SherlockError::Crypto("generator produced non-UTF-8 output".into()))?;
    Ok(Zeroizing::new(password))
}

fn pick<R: Rng + ?Sized>(set: &[u8], rng: &mut R) -> Result<u8> {
    set.choose(rng)
        .copied()
        .ok_or_else(|| SherlockError::Crypto("empty generator alphabet".into()))
}
