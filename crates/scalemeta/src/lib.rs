// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # scalemeta - metadata-driven type resolution and compact value codecs
//!
//! Interprets the portable type table that ledger nodes publish in their
//! runtime metadata and encodes/decodes protocol values against it.
//!
//! ## Quick Start
//!
//! ```rust
//! use scalemeta::{KnownTypes, PortableRegistry, PortableTable, Result, Vote, VoteInput};
//! use std::sync::Arc;
//!
//! fn main() -> Result<()> {
//!     let codecs = Arc::new(KnownTypes::new());
//!
//!     let table = PortableTable::from_json(
//!         r#"[{"id": 0, "type": {"def": {"sequence": {"type": 1}}}},
//!             {"id": 1, "type": {"def": {"primitive": "u8"}}}]"#,
//!     )?;
//!     let registry = PortableRegistry::new(table, codecs.clone());
//!     assert_eq!(registry.get_type_def(0)?.to_string(), "Vec<u8>");
//!
//!     let vote = Vote::new(codecs.as_ref(), VoteInput::record(true, "Locked2x"))?;
//!     assert_eq!(vote.as_byte(), 0b1000_0010);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |  portable: PortableTable -> PortableRegistry -> TypeDef             |
//! |            generic matchers (Range, Option, ..) | memo cache        |
//! +---------------------------------------------------------------------+
//! |  types:    Registry (name -> codec) | primitives | compact          |
//! |            Conviction | Vote                                        |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Modules Overview
//!
//! - [`portable`] - metadata table and type resolver
//! - [`types`] - codec registry and value codecs
//! - [`config`] - resolver tunables
//! - [`error`] - crate error type

pub mod config;
pub mod error;
pub mod portable;
pub mod types;

pub use config::ResolverConfig;
pub use error::{ConvictionError, Error, Result};
pub use portable::{PortableRegistry, PortableTable, PortableType, TypeDef, TypeId};
pub use types::{Codec, Conviction, KnownTypes, Registry, Vote, VoteInput};
