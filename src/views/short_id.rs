//! Compact rendering of link ids.
//!
//! A UUID is written as its 128-bit value in base 58 with the Flickr alphabet
//! and left-padded to [`SHORT_ID_LENGTH`] symbols, so every UUID maps to
//! exactly one short id and back.

use uuid::Uuid;

const ALPHABET: &[u8; 58] = b"123456789abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ";
const BASE: u128 = 58;

/// Symbols needed for `u128::MAX` in base 58.
pub const SHORT_ID_LENGTH: usize = 22;

#[derive(Debug, PartialEq)]
pub enum Error {
    InvalidLength(usize),
    InvalidSymbol(char),
    Overflow,
}

pub fn encode(id: &Uuid) -> String {
    let mut value = id.as_u128();
    let mut symbols = Vec::with_capacity(SHORT_ID_LENGTH);
    while value > 0 {
        symbols.push(ALPHABET[(value % BASE) as usize]);
        value /= BASE;
    }
    symbols.resize(SHORT_ID_LENGTH, ALPHABET[0]);
    symbols.iter().rev().map(|symbol| *symbol as char).collect()
}

pub fn decode(short_id: &str) -> Result<Uuid, Error> {
    let length = short_id.chars().count();
    if length != SHORT_ID_LENGTH {
        return Err(Error::InvalidLength(length));
    }

    let value = short_id.chars().try_fold(0u128, |acc, symbol| {
        let digit = ALPHABET
            .iter()
            .position(|candidate| *candidate as char == symbol)
            .ok_or(Error::InvalidSymbol(symbol))?;
        acc.checked_mul(BASE)
            .and_then(|acc| acc.checked_add(digit as u128))
            .ok_or(Error::Overflow)
    })?;

    Ok(Uuid::from_u128(value))
}
