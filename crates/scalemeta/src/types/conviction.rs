// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Vote conviction levels.

use super::codec::Codec;
use super::primitive::take;
use super::registry::Registry;
use crate::error::{ConvictionError, Error, Result};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// How long a voter's balance stays locked in exchange for vote weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Conviction {
    /// 0.1x votes, no lock.
    #[default]
    None = 0,
    /// 1x votes, locked for one enactment period.
    Locked1x = 1,
    /// 2x votes, locked for 2 periods.
    Locked2x = 2,
    /// 3x votes, locked for 4 periods.
    Locked3x = 3,
    /// 4x votes, locked for 8 periods.
    Locked4x = 4,
    /// 5x votes, locked for 16 periods.
    Locked5x = 5,
    /// 6x votes, locked for 32 periods.
    Locked6x = 6,
}

impl Conviction {
    /// All variants, indexed by their discriminant.
    pub const ALL: [Conviction; 7] = [
        Self::None,
        Self::Locked1x,
        Self::Locked2x,
        Self::Locked3x,
        Self::Locked4x,
        Self::Locked5x,
        Self::Locked6x,
    ];

    /// Variant with the given index.
    pub fn from_index(index: i64) -> Result<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| ConvictionError::Index(index).into())
    }

    /// Variant with the given name (case-sensitive).
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == name)
            .ok_or_else(|| ConvictionError::Name(name.to_string()).into())
    }

    /// Numeric index (`0..=6`).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Variant name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Locked1x => "Locked1x",
            Self::Locked2x => "Locked2x",
            Self::Locked3x => "Locked3x",
            Self::Locked4x => "Locked4x",
            Self::Locked5x => "Locked5x",
            Self::Locked6x => "Locked6x",
        }
    }

    /// Enactment periods the balance stays locked after the vote.
    pub const fn lock_periods(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Locked1x => 1,
            Self::Locked2x => 2,
            Self::Locked3x => 4,
            Self::Locked4x => 8,
            Self::Locked5x => 16,
            Self::Locked6x => 32,
        }
    }

    /// Vote weight of `balance` at this conviction.
    pub const fn votes(self, balance: u128) -> u128 {
        match self {
            Self::None => balance / 10,
            other => balance.saturating_mul(other as u128),
        }
    }
}

impl fmt::Display for Conviction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Conviction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl TryFrom<u8> for Conviction {
    type Error = Error;

    fn try_from(index: u8) -> Result<Self> {
        Self::from_index(i64::from(index))
    }
}

impl From<Conviction> for u8 {
    fn from(c: Conviction) -> Self {
        c.index()
    }
}

impl Codec for Conviction {
    const TYPE_NAME: &'static str = "Conviction";

    fn encode_to(&self, out: &mut Vec<u8>) {
        out.push(self.index());
    }

    fn to_canonical(&self) -> Result<serde_json::Value> {
        Ok(serde_json::Value::from(self.as_str()))
    }

    fn decode(_registry: &dyn Registry, input: &mut &[u8]) -> Result<Self> {
        let [index] = take::<1>(input)?;
        Self::try_from(index)
    }
}

impl Serialize for Conviction {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Conviction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ConvictionVisitor;

        impl Visitor<'_> for ConvictionVisitor {
            type Value = Conviction;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a conviction name or index 0..=6")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Conviction, E> {
                Conviction::from_name(v).map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Conviction, E> {
                Conviction::from_index(v).map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Conviction, E> {
                let index = i64::try_from(v).unwrap_or(i64::MAX);
                Conviction::from_index(index).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(ConvictionVisitor)
    }
}
