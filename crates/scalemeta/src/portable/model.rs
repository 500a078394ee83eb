// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Raw portable type descriptors as carried by chain metadata.
//!
//! JSON entries nest the descriptor under `type`:
//!
//! ```json
//! { "id": 0, "type": { "path": ["Range"], "params": [{ "name": "Idx", "type": 1 }],
//!                      "def": { "composite": { "fields": [ ... ] } } } }
//! ```
//!
//! [`PortableType`] flattens that into one node.

use super::TypeId;
use crate::types::PrimitiveKind;
use serde::{Deserialize, Serialize};

/// One node of the portable type graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawEntry", into = "RawEntry")]
pub struct PortableType {
    pub id: TypeId,
    /// Namespace segments, outermost first. May be empty.
    pub path: Vec<String>,
    /// Declared generic parameters.
    pub params: Vec<TypeParam>,
    pub def: TypeDefVariant,
    pub docs: Vec<String>,
}

impl PortableType {
    /// Node with no path, params or docs.
    pub fn new(id: TypeId, def: TypeDefVariant) -> Self {
        Self {
            id,
            path: Vec::new(),
            params: Vec::new(),
            def,
            docs: Vec::new(),
        }
    }

    /// Set the namespace path.
    #[must_use]
    pub fn with_path<S: Into<String>>(mut self, path: impl IntoIterator<Item = S>) -> Self {
        self.path = path.into_iter().map(Into::into).collect();
        self
    }

    /// Append a generic parameter.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, ty: Option<TypeId>) -> Self {
        self.params.push(TypeParam {
            name: name.into(),
            ty,
        });
        self
    }

    /// Last path segment (`Range` for `core::ops::Range`).
    pub fn ident(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }
}

/// Generic parameter declaration. `ty` is absent for phantom/unbound params.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParam {
    pub name: String,
    #[serde(rename = "type", default)]
    pub ty: Option<TypeId>,
}

/// Composite field or variant arm field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeId,
    /// Source-level type name as written by the type's author (`Idx`, `T::AccountId`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<String>,
}

impl Field {
    /// Unnamed field of type `ty`.
    pub fn unnamed(ty: TypeId) -> Self {
        Self {
            name: None,
            ty,
            type_name: None,
            docs: Vec::new(),
        }
    }

    /// Named field of type `ty`.
    pub fn named(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::unnamed(ty)
        }
    }

    /// Set the declared source type name.
    #[must_use]
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }
}

/// One arm of a `Variant` definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantArm {
    pub name: String,
    pub index: u8,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub docs: Vec<String>,
}

impl VariantArm {
    pub fn new(name: impl Into<String>, index: u8, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            index,
            fields,
            docs: Vec::new(),
        }
    }
}

/// Structural definition of a node; exactly one shape is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeDefVariant {
    Primitive(PrimitiveKind),
    Composite {
        #[serde(default)]
        fields: Vec<Field>,
    },
    Variant {
        #[serde(default)]
        variants: Vec<VariantArm>,
    },
    Sequence {
        #[serde(rename = "type")]
        element: TypeId,
    },
    Array {
        len: u32,
        #[serde(rename = "type")]
        element: TypeId,
    },
    Tuple(Vec<TypeId>),
    Compact {
        #[serde(rename = "type")]
        inner: TypeId,
    },
    BitSequence {
        #[serde(rename = "bitStoreType")]
        store: TypeId,
        #[serde(rename = "bitOrderType")]
        order: TypeId,
    },
}

impl TypeDefVariant {
    /// Ids referenced directly by this definition, in declaration order.
    pub fn references(&self) -> Vec<TypeId> {
        match self {
            Self::Primitive(_) => Vec::new(),
            Self::Composite { fields } => fields.iter().map(|f| f.ty).collect(),
            Self::Variant { variants } => variants
                .iter()
                .flat_map(|arm| arm.fields.iter().map(|f| f.ty))
                .collect(),
            Self::Sequence { element } | Self::Array { element, .. } => vec![*element],
            Self::Tuple(members) => members.clone(),
            Self::Compact { inner } => vec![*inner],
            Self::BitSequence { store, order } => vec![*store, *order],
        }
    }

    /// Short shape label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Primitive(_) => "primitive",
            Self::Composite { .. } => "composite",
            Self::Variant { .. } => "variant",
            Self::Sequence { .. } => "sequence",
            Self::Array { .. } => "array",
            Self::Tuple(_) => "tuple",
            Self::Compact { .. } => "compact",
            Self::BitSequence { .. } => "bitSequence",
        }
    }
}

// ----------------------------------------------------------------------------
// Wire shape
// ----------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
struct RawEntry {
    id: TypeId,
    #[serde(rename = "type")]
    ty: RawType,
}

#[derive(Serialize, Deserialize)]
struct RawType {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    path: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    params: Vec<TypeParam>,
    def: TypeDefVariant,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    docs: Vec<String>,
}

impl From<RawEntry> for PortableType {
    fn from(raw: RawEntry) -> Self {
        Self {
            id: raw.id,
            path: raw.ty.path,
            params: raw.ty.params,
            def: raw.ty.def,
            docs: raw.ty.docs,
        }
    }
}

impl From<PortableType> for RawEntry {
    fn from(ty: PortableType) -> Self {
        Self {
            id: ty.id,
            ty: RawType {
                path: ty.path,
                params: ty.params,
                def: ty.def,
                docs: ty.docs,
            },
        }
    }
}
