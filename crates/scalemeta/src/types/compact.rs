// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Compact (variable-length) unsigned integer codec.
//!
//! The two low bits of the first byte select the mode:
//!
//! ```text
//! 0b00  single byte    value < 2^6     value << 2
//! 0b01  two bytes      value < 2^14    (value << 2) | 0b01, LE
//! 0b10  four bytes     value < 2^30    (value << 2) | 0b10, LE
//! 0b11  big integer    value >= 2^30   ((len - 4) << 2) | 0b11, then `len` LE bytes
//! ```

use super::primitive::{take, take_slice};
use crate::error::{Error, Result};

const SINGLE_MAX: u128 = (1 << 6) - 1;
const TWO_MAX: u128 = (1 << 14) - 1;
const FOUR_MAX: u128 = (1 << 30) - 1;

/// Append the compact encoding of `value` to `out`.
pub fn encode_to(value: u128, out: &mut Vec<u8>) {
    match value {
        0..=SINGLE_MAX => out.push((value as u8) << 2),
        0..=TWO_MAX => out.extend_from_slice(&(((value as u16) << 2) | 0b01).to_le_bytes()),
        0..=FOUR_MAX => out.extend_from_slice(&(((value as u32) << 2) | 0b10).to_le_bytes()),
        _ => {
            let bytes = value.to_le_bytes();
            let len = significant_bytes(value);
            out.push((((len - 4) as u8) << 2) | 0b11);
            out.extend_from_slice(&bytes[..len]);
        }
    }
}

/// Compact encoding of `value` as a fresh buffer.
pub fn encode(value: u128) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(value));
    encode_to(value, &mut out);
    out
}

/// Number of bytes `encode(value)` produces.
pub fn encoded_len(value: u128) -> usize {
    match value {
        0..=SINGLE_MAX => 1,
        0..=TWO_MAX => 2,
        0..=FOUR_MAX => 4,
        _ => 1 + significant_bytes(value),
    }
}

/// Decode a compact integer from the front of `input`, advancing it.
///
/// Non-canonical encodings (a value that fits a shorter mode) are rejected.
pub fn decode(input: &mut &[u8]) -> Result<u128> {
    let [first] = take::<1>(input)?;
    let value = match first & 0b11 {
        0b00 => u128::from(first >> 2),
        0b01 => {
            let [second] = take::<1>(input)?;
            let value = u128::from(u16::from_le_bytes([first, second]) >> 2);
            require_canonical(value > SINGLE_MAX, value)?
        }
        0b10 => {
            let rest = take::<3>(input)?;
            let value = u128::from(u32::from_le_bytes([first, rest[0], rest[1], rest[2]]) >> 2);
            require_canonical(value > TWO_MAX, value)?
        }
        _ => {
            let len = usize::from(first >> 2) + 4;
            if len > 16 {
                return Err(Error::invalid_input(
                    "Compact",
                    format!("{}-byte integer exceeds u128", len),
                ));
            }
            let raw = take_slice(input, len)?;
            let mut bytes = [0u8; 16];
            bytes[..len].copy_from_slice(raw);
            let value = u128::from_le_bytes(bytes);
            require_canonical(value > FOUR_MAX && significant_bytes(value) == len, value)?
        }
    };
    Ok(value)
}

fn require_canonical(canonical: bool, value: u128) -> Result<u128> {
    if canonical {
        Ok(value)
    } else {
        Err(Error::invalid_input(
            "Compact",
            format!("non-canonical encoding of {}", value),
        ))
    }
}

/// Minimal byte count for the big-integer mode (never below 4).
fn significant_bytes(value: u128) -> usize {
    let bits = 128 - value.leading_zeros() as usize;
    bits.div_ceil(8).max(4)
}
