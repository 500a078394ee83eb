// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Value codecs and the name-to-codec registry.
//!
//! # Features
//!
//! - **Registry**: [`Registry`] trait plus the built-in [`KnownTypes`]
//! - **Primitives**: little-endian scalars ([`PrimitiveValue`]) and the compact integer codec
//! - **Governance**: [`Conviction`] and the one-byte [`Vote`]
//!
//! # Example
//!
//! ```rust
//! use scalemeta::types::{Codec, Conviction, KnownTypes, Vote};
//!
//! let registry = KnownTypes::new();
//!
//! let vote = Vote::new(&registry, vec![0b1000_0010]).unwrap();
//! assert!(vote.is_aye());
//! assert_eq!(vote.conviction().unwrap(), Conviction::Locked2x);
//! assert_eq!(vote.to_bytes(), vec![0b1000_0010]);
//! ```

mod codec;
pub mod compact;
mod conviction;
mod input;
mod primitive;
mod registry;
mod vote;

pub use codec::Codec;
pub use conviction::Conviction;
pub use input::{ConvictionInput, VoteInput};
pub use primitive::{PrimitiveKind, PrimitiveValue};
pub use registry::{CodecKind, CodecValue, KnownTypes, Registry};
pub use vote::{Vote, AYE_BIT, CONVICTION_MASK};
