// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Resolved type definitions.

use super::TypeId;
use crate::types::{CodecKind, PrimitiveKind};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Reference to another resolved type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    pub id: TypeId,
    pub type_name: Arc<str>,
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name)
    }
}

/// Resolved composite or variant field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Declared source type name, carried through from metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

/// Resolved variant arm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantDef {
    pub name: String,
    pub index: u8,
    pub fields: Vec<Member>,
}

/// Resolved structure of a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "def")]
pub enum TypeDefInfo {
    Primitive(PrimitiveKind),
    Composite(Vec<Member>),
    Variant(Vec<VariantDef>),
    Sequence(TypeRef),
    Array { element: TypeRef, len: u32 },
    Tuple(Vec<TypeRef>),
    Compact(TypeRef),
    BitSequence { store: TypeRef, order: TypeRef },
}

/// Generic instantiation recognised from a type's structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenericInstance {
    /// Generic name (`Range`, `Option`, ...).
    pub name: String,
    /// Substituted parameters, in declaration order.
    pub params: Vec<TypeRef>,
}

/// Fully resolved definition of one portable type.
///
/// `Display` prints the canonical name (`Range<u32>`, `Vec<u8>`, `[u8; 32]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDef {
    pub id: TypeId,
    pub type_name: Arc<str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generic: Option<GenericInstance>,
    pub info: TypeDefInfo,
    /// Codec backing this type, when the codec registry knows one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codec: Option<CodecKind>,
}

impl TypeDef {
    pub fn is_generic(&self) -> bool {
        self.generic.is_some()
    }

    /// Primitive kind when this is a primitive leaf.
    pub fn as_primitive(&self) -> Option<PrimitiveKind> {
        match self.info {
            TypeDefInfo::Primitive(kind) => Some(kind),
            _ => None,
        }
    }

    /// Types referenced one level down, in declaration order.
    pub fn children(&self) -> Vec<&TypeRef> {
        match &self.info {
            TypeDefInfo::Primitive(_) => Vec::new(),
            TypeDefInfo::Composite(members) => members.iter().map(|m| &m.ty).collect(),
            TypeDefInfo::Variant(variants) => variants
                .iter()
                .flat_map(|v| v.fields.iter().map(|m| &m.ty))
                .collect(),
            TypeDefInfo::Sequence(element)
            | TypeDefInfo::Array { element, .. }
            | TypeDefInfo::Compact(element) => vec![element],
            TypeDefInfo::Tuple(members) => members.iter().collect(),
            TypeDefInfo::BitSequence { store, order } => vec![store, order],
        }
    }
}

impl fmt::Display for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name)
    }
}

impl PartialEq<str> for TypeDef {
    fn eq(&self, other: &str) -> bool {
        &*self.type_name == other
    }
}

impl PartialEq<&str> for TypeDef {
    fn eq(&self, other: &&str) -> bool {
        &*self.type_name == *other
    }
}
