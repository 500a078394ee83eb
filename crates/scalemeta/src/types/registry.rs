// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Name-to-codec registry.
//!
//! The registry is an injected read-only capability: the portable resolver
//! asks it which codec backs a primitive leaf, and value construction goes
//! through [`Registry::create_type`] / [`Registry::decode_type`].
//!
//! # Example
//!
//! ```
//! use scalemeta::types::{CodecKind, KnownTypes, PrimitiveKind, Registry};
//!
//! let mut registry = KnownTypes::new();
//! registry.register("Balance", CodecKind::Primitive(PrimitiveKind::U128));
//!
//! let vote = registry
//!     .create_type("Vote", &serde_json::json!({"aye": true, "conviction": 2}))
//!     .unwrap();
//! assert_eq!(vote.to_bytes(), vec![0b1000_0010]);
//! ```

use super::codec::Codec;
use super::compact;
use super::conviction::Conviction;
use super::input::VoteInput;
use super::primitive::{PrimitiveKind, PrimitiveValue};
use super::vote::Vote;
use crate::error::{Error, Result};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Codec implementations the registry can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecKind {
    /// Fixed-width (or length-prefixed `str`) scalar.
    Primitive(PrimitiveKind),
    /// Compact unsigned integer.
    Compact,
    /// Vote conviction enum.
    Conviction,
    /// Bit-packed vote.
    Vote,
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => write!(f, "{}", kind),
            Self::Compact => f.write_str("Compact"),
            Self::Conviction => f.write_str(Conviction::TYPE_NAME),
            Self::Vote => f.write_str(Vote::TYPE_NAME),
        }
    }
}

impl Serialize for CodecKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A value produced by registry dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecValue {
    Primitive(PrimitiveValue),
    Compact(u128),
    Conviction(Conviction),
    Vote(Vote),
}

impl CodecValue {
    /// Declared type name of the contained value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Primitive(v) => v.kind().name(),
            Self::Compact(_) => "Compact",
            Self::Conviction(c) => c.type_name(),
            Self::Vote(v) => v.type_name(),
        }
    }

    /// Wire encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        match self {
            Self::Primitive(v) => v.encode_to(&mut out),
            Self::Compact(v) => compact::encode_to(*v, &mut out),
            Self::Conviction(c) => c.encode_to(&mut out),
            Self::Vote(v) => v.encode_to(&mut out),
        }
        out
    }

    /// Canonical JSON form.
    pub fn to_canonical(&self) -> Result<serde_json::Value> {
        match self {
            Self::Primitive(v) => Ok(v.to_canonical()),
            Self::Compact(v) => Ok(PrimitiveValue::U128(*v).to_canonical()),
            Self::Conviction(c) => c.to_canonical(),
            Self::Vote(v) => v.to_canonical(),
        }
    }
}

/// Resolves declared type names to codec implementations.
///
/// Implementations must be read-only after construction so a single
/// registry can be shared between resolver threads.
pub trait Registry: Send + Sync {
    /// Codec registered under `name`, if any.
    fn codec_for(&self, name: &str) -> Option<CodecKind>;

    /// Construct a value of type `name` from a JSON input.
    fn create_type(&self, name: &str, input: &serde_json::Value) -> Result<CodecValue> {
        let kind = self
            .codec_for(name)
            .ok_or_else(|| Error::UnknownType(name.to_string()))?;

        let value = match kind {
            CodecKind::Primitive(p) => {
                CodecValue::Primitive(PrimitiveValue::from_json(p, input)?)
            }
            CodecKind::Compact => {
                let n = match input {
                    serde_json::Value::String(s) => s.parse().ok(),
                    other => other.as_u64().map(u128::from),
                };
                CodecValue::Compact(n.ok_or_else(|| {
                    Error::invalid_input("Compact", format!("cannot build from {}", input))
                })?)
            }
            CodecKind::Conviction => CodecValue::Conviction(conviction_from_json(input)?),
            CodecKind::Vote => {
                let vote_input = VoteInput::from_json(input)?;
                CodecValue::Vote(Vote::new(self.as_dyn(), vote_input)?)
            }
        };
        Ok(value)
    }

    /// Decode a value of type `name` from the front of `input`, advancing it.
    fn decode_type(&self, name: &str, input: &mut &[u8]) -> Result<CodecValue> {
        let kind = self
            .codec_for(name)
            .ok_or_else(|| Error::UnknownType(name.to_string()))?;

        let value = match kind {
            CodecKind::Primitive(p) => CodecValue::Primitive(PrimitiveValue::decode(p, input)?),
            CodecKind::Compact => CodecValue::Compact(compact::decode(input)?),
            CodecKind::Conviction => {
                CodecValue::Conviction(Conviction::decode(self.as_dyn(), input)?)
            }
            CodecKind::Vote => CodecValue::Vote(Vote::decode(self.as_dyn(), input)?),
        };
        Ok(value)
    }

    /// Upcast helper for provided methods.
    fn as_dyn(&self) -> &dyn Registry;
}

fn conviction_from_json(input: &serde_json::Value) -> Result<Conviction> {
    match input {
        serde_json::Value::String(name) => Conviction::from_name(name),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(index) => Conviction::from_index(index),
            None => Err(Error::invalid_input(
                Conviction::TYPE_NAME,
                format!("{} is not an integer index", n),
            )),
        },
        serde_json::Value::Null => Ok(Conviction::default()),
        other => Err(Error::invalid_input(
            Conviction::TYPE_NAME,
            format!("cannot build from {}", other),
        )),
    }
}

/// [`HashMap`]-backed [`Registry`] pre-populated with every built-in codec.
///
/// Primitive names are registered lower-case (`u32`, `bool`, `str`).
#[derive(Debug, Clone)]
pub struct KnownTypes {
    codecs: HashMap<String, CodecKind>,
}

impl KnownTypes {
    /// Registry holding the built-in codecs.
    #[must_use]
    pub fn new() -> Self {
        let mut codecs: HashMap<String, CodecKind> = PrimitiveKind::ALL
            .into_iter()
            .map(|kind| (kind.name().to_string(), CodecKind::Primitive(kind)))
            .collect();
        codecs.insert("Compact".to_string(), CodecKind::Compact);
        codecs.insert(Conviction::TYPE_NAME.to_string(), CodecKind::Conviction);
        codecs.insert(Vote::TYPE_NAME.to_string(), CodecKind::Vote);
        Self { codecs }
    }

    /// Registry with no codecs at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            codecs: HashMap::new(),
        }
    }

    /// Register (or replace) the codec backing `name`.
    pub fn register(&mut self, name: impl Into<String>, kind: CodecKind) {
        let name = name.into();
        log::trace!("[REGISTRY] {} -> {}", name, kind);
        self.codecs.insert(name, kind);
    }

    /// Number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    /// Returns `true` if no names are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

impl Default for KnownTypes {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry for KnownTypes {
    fn codec_for(&self, name: &str) -> Option<CodecKind> {
        self.codecs.get(name).copied()
    }

    fn as_dyn(&self) -> &dyn Registry {
        self
    }
}
