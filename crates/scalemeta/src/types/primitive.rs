// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Primitive scalar kinds and their little-endian fixed-width codecs.
//!
//! # Layout
//!
//! | kind | bytes |
//! |------|-------|
//! | `bool` | 1 (`0x00` / `0x01`) |
//! | `char` | 4 (Unicode scalar as `u32`) |
//! | `str` | compact length + UTF-8 |
//! | `uN` / `iN` | `N / 8`, little-endian |
//! | `u256` / `i256` | 32, raw |

use super::compact;
use crate::error::{Error, Result};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Primitive type kinds carried by portable metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    Char,
    Str,
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
    I8,
    I16,
    I32,
    I64,
    I128,
    I256,
}

impl PrimitiveKind {
    /// All kinds, in declaration order.
    pub const ALL: [PrimitiveKind; 15] = [
        Self::Bool,
        Self::Char,
        Self::Str,
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
        Self::U128,
        Self::U256,
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::I128,
        Self::I256,
    ];

    /// Canonical lower-case name (`u32`, `bool`, `str`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Str => "str",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::U128 => "u128",
            Self::U256 => "u256",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::I128 => "i128",
            Self::I256 => "i256",
        }
    }

    /// Encoded size in bytes (None for `str`).
    pub const fn size(self) -> Option<usize> {
        match self {
            Self::Bool | Self::U8 | Self::I8 => Some(1),
            Self::U16 | Self::I16 => Some(2),
            Self::Char | Self::U32 | Self::I32 => Some(4),
            Self::U64 | Self::I64 => Some(8),
            Self::U128 | Self::I128 => Some(16),
            Self::U256 | Self::I256 => Some(32),
            Self::Str => None,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PrimitiveKind {
    type Err = Error;

    /// Case-insensitive: metadata spells kinds `U32`, `Str`, `Bool`.
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownType(s.to_string()))
    }
}

impl Serialize for PrimitiveKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for PrimitiveKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse()
            .map_err(|_| de::Error::custom(format!("unknown primitive `{}`", raw)))
    }
}

/// A decoded primitive value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveValue {
    Bool(bool),
    Char(char),
    Str(String),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    U256([u8; 32]),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    I256([u8; 32]),
}

impl PrimitiveValue {
    /// Kind of this value.
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Bool(_) => PrimitiveKind::Bool,
            Self::Char(_) => PrimitiveKind::Char,
            Self::Str(_) => PrimitiveKind::Str,
            Self::U8(_) => PrimitiveKind::U8,
            Self::U16(_) => PrimitiveKind::U16,
            Self::U32(_) => PrimitiveKind::U32,
            Self::U64(_) => PrimitiveKind::U64,
            Self::U128(_) => PrimitiveKind::U128,
            Self::U256(_) => PrimitiveKind::U256,
            Self::I8(_) => PrimitiveKind::I8,
            Self::I16(_) => PrimitiveKind::I16,
            Self::I32(_) => PrimitiveKind::I32,
            Self::I64(_) => PrimitiveKind::I64,
            Self::I128(_) => PrimitiveKind::I128,
            Self::I256(_) => PrimitiveKind::I256,
        }
    }

    /// Append the encoded value to `out`.
    pub fn encode_to(&self, out: &mut Vec<u8>) {
        match self {
            Self::Bool(v) => out.push(u8::from(*v)),
            Self::Char(v) => out.extend_from_slice(&u32::from(*v).to_le_bytes()),
            Self::Str(v) => {
                compact::encode_to(v.len() as u128, out);
                out.extend_from_slice(v.as_bytes());
            }
            Self::U8(v) => out.push(*v),
            Self::U16(v) => out.extend_from_slice(&v.to_le_bytes()),
            Self::U32(v) => out.extend_from_slice(&v.to_le_bytes()),
            Self::U64(v) => out.extend_from_slice(&v.to_le_bytes()),
            Self::U128(v) => out.extend_from_slice(&v.to_le_bytes()),
            Self::I8(v) => out.extend_from_slice(&v.to_le_bytes()),
            Self::I16(v) => out.extend_from_slice(&v.to_le_bytes()),
            Self::I32(v) => out.extend_from_slice(&v.to_le_bytes()),
            Self::I64(v) => out.extend_from_slice(&v.to_le_bytes()),
            Self::I128(v) => out.extend_from_slice(&v.to_le_bytes()),
            Self::U256(raw) | Self::I256(raw) => out.extend_from_slice(raw),
        }
    }

    /// Decode a value of `kind` from the front of `input`, advancing it.
    pub fn decode(kind: PrimitiveKind, input: &mut &[u8]) -> Result<Self> {
        let value = match kind {
            PrimitiveKind::Bool => match take::<1>(input)? {
                [0] => Self::Bool(false),
                [1] => Self::Bool(true),
                [other] => {
                    return Err(Error::invalid_input(
                        "bool",
                        format!("byte 0x{:02x} is neither 0 nor 1", other),
                    ))
                }
            },
            PrimitiveKind::Char => {
                let scalar = u32::from_le_bytes(take::<4>(input)?);
                let c = char::from_u32(scalar).ok_or_else(|| {
                    Error::invalid_input("char", format!("0x{:x} is not a Unicode scalar", scalar))
                })?;
                Self::Char(c)
            }
            PrimitiveKind::Str => {
                let len = compact::decode(input)?;
                let len = usize::try_from(len)
                    .map_err(|_| Error::invalid_input("str", "length overflows usize"))?;
                let bytes = take_slice(input, len)?;
                let s = std::str::from_utf8(bytes)
                    .map_err(|e| Error::invalid_input("str", e.to_string()))?;
                Self::Str(s.to_string())
            }
            PrimitiveKind::U8 => Self::U8(take::<1>(input)?[0]),
            PrimitiveKind::U16 => Self::U16(u16::from_le_bytes(take(input)?)),
            PrimitiveKind::U32 => Self::U32(u32::from_le_bytes(take(input)?)),
            PrimitiveKind::U64 => Self::U64(u64::from_le_bytes(take(input)?)),
            PrimitiveKind::U128 => Self::U128(u128::from_le_bytes(take(input)?)),
            PrimitiveKind::U256 => Self::U256(take(input)?),
            PrimitiveKind::I8 => Self::I8(i8::from_le_bytes(take(input)?)),
            PrimitiveKind::I16 => Self::I16(i16::from_le_bytes(take(input)?)),
            PrimitiveKind::I32 => Self::I32(i32::from_le_bytes(take(input)?)),
            PrimitiveKind::I64 => Self::I64(i64::from_le_bytes(take(input)?)),
            PrimitiveKind::I128 => Self::I128(i128::from_le_bytes(take(input)?)),
            PrimitiveKind::I256 => Self::I256(take(input)?),
        };
        Ok(value)
    }

    /// Build a value of `kind` from JSON (numbers, strings, booleans; 256-bit kinds as hex).
    pub fn from_json(kind: PrimitiveKind, json: &serde_json::Value) -> Result<Self> {
        let bad = || Error::invalid_input(kind.name(), format!("cannot build from {}", json));
        let unsigned = || json.as_u64().ok_or_else(bad);
        let signed = || json.as_i64().ok_or_else(bad);

        let value = match kind {
            PrimitiveKind::Bool => Self::Bool(json.as_bool().ok_or_else(bad)?),
            PrimitiveKind::Char => {
                let s = json.as_str().ok_or_else(bad)?;
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => return Err(bad()),
                }
            }
            PrimitiveKind::Str => Self::Str(json.as_str().ok_or_else(bad)?.to_string()),
            PrimitiveKind::U8 => Self::U8(u8::try_from(unsigned()?).map_err(|_| bad())?),
            PrimitiveKind::U16 => Self::U16(u16::try_from(unsigned()?).map_err(|_| bad())?),
            PrimitiveKind::U32 => Self::U32(u32::try_from(unsigned()?).map_err(|_| bad())?),
            PrimitiveKind::U64 => Self::U64(unsigned()?),
            PrimitiveKind::U128 => Self::U128(wide_unsigned(json).ok_or_else(bad)?),
            PrimitiveKind::I8 => Self::I8(i8::try_from(signed()?).map_err(|_| bad())?),
            PrimitiveKind::I16 => Self::I16(i16::try_from(signed()?).map_err(|_| bad())?),
            PrimitiveKind::I32 => Self::I32(i32::try_from(signed()?).map_err(|_| bad())?),
            PrimitiveKind::I64 => Self::I64(signed()?),
            PrimitiveKind::I128 => Self::I128(wide_signed(json).ok_or_else(bad)?),
            PrimitiveKind::U256 => Self::U256(raw_256(json).ok_or_else(bad)?),
            PrimitiveKind::I256 => Self::I256(raw_256(json).ok_or_else(bad)?),
        };
        Ok(value)
    }

    /// Canonical JSON form. 128-bit integers that overflow JSON numbers are strings.
    pub fn to_canonical(&self) -> serde_json::Value {
        use serde_json::Value;
        match self {
            Self::Bool(v) => Value::from(*v),
            Self::Char(v) => Value::from(v.to_string()),
            Self::Str(v) => Value::from(v.as_str()),
            Self::U8(v) => Value::from(*v),
            Self::U16(v) => Value::from(*v),
            Self::U32(v) => Value::from(*v),
            Self::U64(v) => Value::from(*v),
            Self::U128(v) => {
                u64::try_from(*v).map_or_else(|_| Value::from(v.to_string()), Value::from)
            }
            Self::I8(v) => Value::from(*v),
            Self::I16(v) => Value::from(*v),
            Self::I32(v) => Value::from(*v),
            Self::I64(v) => Value::from(*v),
            Self::I128(v) => {
                i64::try_from(*v).map_or_else(|_| Value::from(v.to_string()), Value::from)
            }
            Self::U256(raw) | Self::I256(raw) => Value::from(format!("0x{}", hex::encode(raw))),
        }
    }
}

fn wide_unsigned(json: &serde_json::Value) -> Option<u128> {
    json.as_u64()
        .map(u128::from)
        .or_else(|| json.as_str()?.parse().ok())
}

fn wide_signed(json: &serde_json::Value) -> Option<i128> {
    json.as_i64()
        .map(i128::from)
        .or_else(|| json.as_str()?.parse().ok())
}

fn raw_256(json: &serde_json::Value) -> Option<[u8; 32]> {
    let s = json.as_str()?;
    let bytes = hex::decode(s.strip_prefix("0x").unwrap_or(s)).ok()?;
    bytes.try_into().ok()
}

/// Take exactly `N` bytes from the front of `input`.
pub(crate) fn take<const N: usize>(input: &mut &[u8]) -> Result<[u8; N]> {
    let slice = take_slice(input, N)?;
    let mut out = [0u8; N];
    out.copy_from_slice(slice);
    Ok(out)
}

/// Take `len` bytes from the front of `input`.
pub(crate) fn take_slice<'a>(input: &mut &'a [u8], len: usize) -> Result<&'a [u8]> {
    if input.len() < len {
        return Err(Error::UnexpectedEof {
            needed: len,
            available: input.len(),
        });
    }
    let (head, tail) = input.split_at(len);
    *input = tail;
    Ok(head)
}
