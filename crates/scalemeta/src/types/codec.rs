// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Shared codec contract.
//!
//! Every codec value is built from a [`Registry`] plus a flexible input and
//! serializes to bytes and to a canonical JSON form.

use super::registry::Registry;
use crate::error::Result;

/// Encoding contract implemented by every value codec.
pub trait Codec: Sized {
    /// Declared protocol type name.
    const TYPE_NAME: &'static str;

    /// Declared protocol type name of this value.
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    /// Append the wire encoding to `out`.
    fn encode_to(&self, out: &mut Vec<u8>);

    /// Wire encoding as a fresh buffer.
    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_to(&mut out);
        out
    }

    /// Structured representation (names instead of indices).
    fn to_canonical(&self) -> Result<serde_json::Value>;

    /// Decode from the front of `input`, consuming exactly this value's bytes.
    fn decode(registry: &dyn Registry, input: &mut &[u8]) -> Result<Self>;
}
