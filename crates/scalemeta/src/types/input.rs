// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Construction inputs accepted by the vote codec.
//!
//! Each codec takes one closed union. JSON inputs are normalized into the
//! same union by [`VoteInput::from_json`].

use crate::error::{Error, Result};
use serde_json::Value;

/// Conviction supplied inside a structured vote record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvictionInput {
    /// Variant name (`"Locked2x"`).
    Name(String),
    /// Variant index (`2`).
    Index(i64),
}

impl From<&str> for ConvictionInput {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for ConvictionInput {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<i64> for ConvictionInput {
    fn from(index: i64) -> Self {
        Self::Index(index)
    }
}

impl From<i32> for ConvictionInput {
    fn from(index: i32) -> Self {
        Self::Index(i64::from(index))
    }
}

impl From<super::Conviction> for ConvictionInput {
    fn from(c: super::Conviction) -> Self {
        Self::Index(i64::from(c.index()))
    }
}

/// Every input shape `Vote` accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VoteInput {
    /// Nothing supplied: nay, no conviction.
    #[default]
    Absent,
    /// Bare decision, conviction `None`.
    Boolean(bool),
    /// Truncated to its low byte, then decoded.
    Integer(i64),
    /// First byte decoded; empty behaves like `Absent`.
    Bytes(Vec<u8>),
    /// Explicit decision plus optional conviction.
    Record {
        aye: bool,
        conviction: Option<ConvictionInput>,
    },
}

impl VoteInput {
    /// Structured record input.
    pub fn record(aye: bool, conviction: impl Into<ConvictionInput>) -> Self {
        Self::Record {
            aye,
            conviction: Some(conviction.into()),
        }
    }

    /// Normalize a JSON value.
    ///
    /// `null`, booleans, integers, byte arrays, `0x` hex strings and
    /// `{"aye": bool, "conviction"?: name | index}` objects are accepted.
    pub fn from_json(json: &Value) -> Result<Self> {
        let bad = |reason: String| Error::invalid_input("Vote", reason);

        match json {
            Value::Null => Ok(Self::Absent),
            Value::Bool(b) => Ok(Self::Boolean(*b)),
            // Only the low byte is kept, so u64 values above i64::MAX wrap.
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_u64().map(|u| u as i64))
                .map(Self::Integer)
                .ok_or_else(|| bad(format!("{} is not an integer", n))),
            Value::String(s) => Ok(Self::Bytes(decode_hex(s)?)),
            Value::Array(items) => items
                .iter()
                .map(|item| {
                    item.as_u64()
                        .and_then(|b| u8::try_from(b).ok())
                        .ok_or_else(|| bad(format!("{} is not a byte", item)))
                })
                .collect::<Result<Vec<u8>>>()
                .map(Self::Bytes),
            Value::Object(map) => {
                let aye = map
                    .get("aye")
                    .and_then(Value::as_bool)
                    .ok_or_else(|| bad("record requires a boolean `aye`".to_string()))?;
                let conviction = match map.get("conviction") {
                    None | Some(Value::Null) => None,
                    Some(Value::String(name)) => Some(ConvictionInput::Name(name.clone())),
                    Some(Value::Number(n)) => Some(ConvictionInput::Index(
                        n.as_i64()
                            .ok_or_else(|| bad(format!("conviction {} is not an integer", n)))?,
                    )),
                    Some(other) => {
                        return Err(bad(format!("conviction {} is neither name nor index", other)))
                    }
                };
                Ok(Self::Record { aye, conviction })
            }
        }
    }
}

/// Decode a `0x`-prefixed (or bare) hex string.
pub(crate) fn decode_hex(s: &str) -> Result<Vec<u8>> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(digits).map_err(|e| Error::invalid_input("Bytes", format!("{:?}: {}", s, e)))
}

impl From<()> for VoteInput {
    fn from(_: ()) -> Self {
        Self::Absent
    }
}

impl From<bool> for VoteInput {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i64> for VoteInput {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for VoteInput {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<u8> for VoteInput {
    fn from(n: u8) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<&[u8]> for VoteInput {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for VoteInput {
    fn from(bytes: [u8; N]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl From<Vec<u8>> for VoteInput {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}
