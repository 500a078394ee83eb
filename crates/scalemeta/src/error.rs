// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for type resolution and value codecs.
//!
//! Every failure carries the offending type id, byte or name so tooling
//! built on top can report it without re-deriving context.

use crate::portable::TypeId;
use std::fmt;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Crate-wide error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // ========================================================================
    // Resolution Errors
    // ========================================================================
    /// Type id is absent from the portable table.
    #[error("unknown type id #{0}")]
    UnknownTypeId(TypeId),

    /// Resolving `id` re-entered `id` before completion.
    #[error("cyclic type definition at #{id} (resolution chain: {})", ChainDisplay(.chain))]
    CyclicTypeDefinition {
        /// Id that was re-entered.
        id: TypeId,
        /// In-progress ids at the moment of re-entry, outermost first.
        chain: Vec<TypeId>,
    },

    /// Resolution nested deeper than `ResolverConfig::max_depth`.
    #[error("resolution depth limit of {limit} exceeded at type id #{id}")]
    DepthLimitExceeded {
        /// Id whose resolution would have exceeded the limit.
        id: TypeId,
        /// Configured limit.
        limit: usize,
    },

    /// Canonical name of `id` rendered longer than `ResolverConfig::max_name_len`.
    #[error("type name of #{id} exceeds {limit} bytes")]
    NameTooLong {
        /// Id whose name overflowed.
        id: TypeId,
        /// Configured limit.
        limit: usize,
    },

    // ========================================================================
    // Metadata Loading Errors
    // ========================================================================
    /// Same id declared twice in one table.
    #[error("duplicate type id #{0} in portable table")]
    DuplicateTypeId(TypeId),

    /// Portable table JSON could not be parsed.
    #[error("malformed metadata: {0}")]
    Metadata(#[from] serde_json::Error),

    /// Metadata file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // ========================================================================
    // Codec Errors
    // ========================================================================
    /// Conviction index, name or vote byte has no `Conviction` variant.
    #[error("invalid conviction: {0}")]
    InvalidConviction(#[from] ConvictionError),

    /// Codec registry has no codec for the requested name.
    #[error("no codec registered for type `{0}`")]
    UnknownType(String),

    /// Stream decode ran out of bytes.
    #[error("unexpected end of input: needed {needed} byte(s), {available} available")]
    UnexpectedEof {
        /// Bytes required by the decoder.
        needed: usize,
        /// Bytes left in the stream.
        available: usize,
    },

    /// Construction input has a shape the codec does not accept.
    #[error("invalid input for `{type_name}`: {reason}")]
    InvalidInput {
        /// Codec type name.
        type_name: &'static str,
        /// What was wrong with the input.
        reason: String,
    },
}

impl Error {
    pub(crate) fn invalid_input(type_name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            type_name,
            reason: reason.into(),
        }
    }
}

/// Why a conviction could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvictionError {
    /// Numeric index outside `0..=6`.
    #[error("no conviction with index {0}")]
    Index(i64),
    /// Name that matches no variant (case-sensitive).
    #[error("no conviction named `{0}`")]
    Name(String),
    /// Vote byte whose low 7 bits exceed 6.
    #[error("vote byte 0x{byte:02x} carries conviction index {index}")]
    Byte {
        /// Raw vote byte.
        byte: u8,
        /// `byte & 0x7f`.
        index: u8,
    },
}

struct ChainDisplay<'a>(&'a [TypeId]);

impl fmt::Display for ChainDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "#{}", id)?;
        }
        Ok(())
    }
}
