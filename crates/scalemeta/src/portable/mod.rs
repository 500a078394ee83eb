// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Portable type registry: metadata table, resolver and generic matchers.
//!
//! # Architecture
//!
//! ```text
//!   metadata JSON ──> PortableTable ──> PortableRegistry ──> Arc<TypeDef>
//!                     (immutable)       │  matchers (Range, Option, ..)
//!                                       │  memo cache (dashmap)
//!                                       └─ codec Registry (primitive leaves)
//! ```
//!
//! # Example
//!
//! ```rust
//! use scalemeta::portable::{PortableRegistry, PortableTable};
//! use scalemeta::types::KnownTypes;
//! use std::sync::Arc;
//!
//! let table = PortableTable::from_json(r#"{"types": [
//!     {"id": 0, "type": {"path": ["Range"], "params": [{"name": "Idx", "type": 1}],
//!      "def": {"composite": {"fields": [
//!         {"name": "start", "type": 1, "typeName": "Idx"},
//!         {"name": "end", "type": 1, "typeName": "Idx"}]}}}},
//!     {"id": 1, "type": {"def": {"primitive": "U32"}}}
//! ]}"#).unwrap();
//!
//! let registry = PortableRegistry::new(table, Arc::new(KnownTypes::new()));
//! assert_eq!(registry.get_type_def(0).unwrap().to_string(), "Range<u32>");
//! ```

mod cache;
mod generics;
mod model;
mod naming;
mod resolver;
mod table;
mod type_def;

/// Index of a type within one portable table.
pub type TypeId = u32;

pub use cache::CacheStats;
pub use generics::{
    builtin_matchers, GenericMatcher, GenericShape, MapMatcher, OptionMatcher, RangeMatcher,
    ResultMatcher, SetMatcher,
};
pub use model::{Field, PortableType, TypeDefVariant, TypeParam, VariantArm};
pub use resolver::PortableRegistry;
pub use table::PortableTable;
pub use type_def::{GenericInstance, Member, TypeDef, TypeDefInfo, TypeRef, VariantDef};

#[cfg(test)]
mod tests;
