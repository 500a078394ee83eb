// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bit-packed governance vote.
//!
//! # Wire format
//!
//! ```text
//!   7   6   5   4   3   2   1   0
//! +---+---------------------------+
//! |aye|    conviction index       |
//! +---+---------------------------+
//! ```
//!
//! Exactly one byte, no framing. Indices 7..=127 are storable but name no
//! [`Conviction`]; they surface as `InvalidConviction` on access.

use super::codec::Codec;
use super::conviction::Conviction;
use super::input::{ConvictionInput, VoteInput};
use super::primitive::take;
use super::registry::{CodecValue, Registry};
use crate::error::{ConvictionError, Error, Result};
use serde::{Serialize, Serializer};
use std::fmt;

/// Decision flag (bit 7).
pub const AYE_BIT: u8 = 0b1000_0000;

/// Conviction index (bits 0..=6).
pub const CONVICTION_MASK: u8 = 0b0111_1111;

/// A single-byte vote: aye/nay plus conviction.
///
/// Byte and integer inputs are stored verbatim and validated when the
/// conviction is read; structured records are validated at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Vote {
    byte: u8,
}

impl Vote {
    /// Build a vote from any accepted input shape.
    ///
    /// ```
    /// use scalemeta::types::{Codec, Conviction, KnownTypes, Vote, VoteInput};
    ///
    /// let registry = KnownTypes::new();
    /// let vote = Vote::new(&registry, VoteInput::record(true, "Locked1x")).unwrap();
    /// assert_eq!(vote.to_bytes(), vec![0b1000_0001]);
    /// assert_eq!(vote.conviction().unwrap(), Conviction::Locked1x);
    /// ```
    pub fn new(registry: &dyn Registry, input: impl Into<VoteInput>) -> Result<Self> {
        let vote = match input.into() {
            VoteInput::Absent => Self::default(),
            VoteInput::Boolean(aye) => Self::pack(aye, Conviction::None),
            VoteInput::Integer(n) => Self::from_byte(n.to_le_bytes()[0]),
            VoteInput::Bytes(bytes) => bytes
                .first()
                .copied()
                .map_or_else(Self::default, Self::from_byte),
            VoteInput::Record { aye, conviction } => {
                Self::pack(aye, resolve_conviction(registry, conviction)?)
            }
        };
        Ok(vote)
    }

    /// Aye vote at `conviction`.
    pub const fn aye(conviction: Conviction) -> Self {
        Self::pack(true, conviction)
    }

    /// Nay vote at `conviction`.
    pub const fn nay(conviction: Conviction) -> Self {
        Self::pack(false, conviction)
    }

    /// Wrap a raw vote byte without validating its conviction bits.
    pub const fn from_byte(byte: u8) -> Self {
        Self { byte }
    }

    const fn pack(aye: bool, conviction: Conviction) -> Self {
        let flag = if aye { AYE_BIT } else { 0 };
        Self {
            byte: flag | (conviction.index() & CONVICTION_MASK),
        }
    }

    /// Raw byte.
    pub const fn as_byte(self) -> u8 {
        self.byte
    }

    /// Vote in favour.
    pub const fn is_aye(self) -> bool {
        self.byte & AYE_BIT != 0
    }

    /// Vote against.
    pub const fn is_nay(self) -> bool {
        !self.is_aye()
    }

    /// Decoded conviction; errors with the raw byte if bits 0..=6 exceed 6.
    pub fn conviction(self) -> Result<Conviction> {
        let index = self.byte & CONVICTION_MASK;
        Conviction::try_from(index).map_err(|_| {
            ConvictionError::Byte {
                byte: self.byte,
                index,
            }
            .into()
        })
    }
}

/// Build the conviction through the registry, as every codec value is built.
fn resolve_conviction(
    registry: &dyn Registry,
    input: Option<ConvictionInput>,
) -> Result<Conviction> {
    let json = match input {
        None => return Ok(Conviction::default()),
        Some(ConvictionInput::Name(name)) => serde_json::Value::from(name),
        Some(ConvictionInput::Index(index)) => serde_json::Value::from(index),
    };

    match registry.create_type(Conviction::TYPE_NAME, &json)? {
        CodecValue::Conviction(conviction) => Ok(conviction),
        other => Err(Error::invalid_input(
            Vote::TYPE_NAME,
            format!("registry built `{}` for a conviction", other.type_name()),
        )),
    }
}

impl Codec for Vote {
    const TYPE_NAME: &'static str = "Vote";

    fn encode_to(&self, out: &mut Vec<u8>) {
        out.push(self.byte);
    }

    fn to_canonical(&self) -> Result<serde_json::Value> {
        Ok(serde_json::json!({
            "aye": self.is_aye(),
            "conviction": self.conviction()?.as_str(),
        }))
    }

    fn decode(_registry: &dyn Registry, input: &mut &[u8]) -> Result<Self> {
        let [byte] = take::<1>(input)?;
        Ok(Self::from_byte(byte))
    }
}

impl From<Vote> for u8 {
    fn from(vote: Vote) -> Self {
        vote.byte
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = if self.is_aye() { "aye" } else { "nay" };
        match self.conviction() {
            Ok(c) => write!(f, "{} ({})", side, c),
            Err(_) => write!(
                f,
                "{} (invalid conviction {})",
                side,
                self.byte & CONVICTION_MASK
            ),
        }
    }
}

impl Serialize for Vote {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_canonical()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}
