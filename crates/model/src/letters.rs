//! Spreadsheet column letters.
//!
//! Columns are numbered with a bijective base-26 system: the digits are
//! `A`(=1) to `Z`(=26) and there is no zero digit, so `Z` is followed by `AA`
//! rather than `BA`.

use std::num::NonZeroU32;

const RADIX: u32 = 26;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LettersError {
    #[error("column index must be positive, got {0}")]
    InvalidArgument(u32),
    #[error("column letters are empty")]
    Empty,
    #[error("invalid column letter {0:?}")]
    InvalidLetter(char),
    #[error("column letters {0:?} overflow u32")]
    Overflow(String),
}

/// Encodes a positive column index, e.g. `27` as `AA`.
pub fn encode(column: u32) -> Result<String, LettersError> {
    let column = NonZeroU32::new(column).ok_or(LettersError::InvalidArgument(column))?;
    Ok(column_letters(column))
}

pub fn column_letters(column: NonZeroU32) -> String {
    let mut column = column.get();
    let mut letters = Vec::with_capacity(7);
    while column > 0 {
        let remainder = (column - 1) % RADIX;
        letters.push(b'A' + remainder as u8);
        column = (column - remainder - 1) / RADIX;
    }
    letters.reverse();
    // Only `A..=Z` was pushed.
    letters.into_iter().map(char::from).collect()
}

/// Inverse of [`encode`]. Only upper case letters are accepted.
pub fn decode(letters: &str) -> Result<u32, LettersError> {
    if letters.is_empty() {
        return Err(LettersError::Empty);
    }
    letters.chars().try_fold(0u32, |column, letter| {
        if !letter.is_ascii_uppercase() {
            return Err(LettersError::InvalidLetter(letter));
        }
        let digit = letter as u32 - 'A' as u32 + 1;
        column
            .checked_mul(RADIX)
            .and_then(|column| column.checked_add(digit))
            .ok_or_else(|| LettersError::Overflow(letters.to_owned()))
    })
}

/// Largest column index whose letters are at most `width` characters long.
pub fn max_column(width: u32) -> u64 {
    (1..=width).fold(0u64, |total, exp| {
        total.saturating_add(u64::from(RADIX).saturating_pow(exp))
    })
}
