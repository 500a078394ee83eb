// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Immutable id-indexed table of portable types.

use super::model::PortableType;
use super::TypeId;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Flat portable type table, keyed by id. Ids may be sparse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortableTable {
    types: BTreeMap<TypeId, PortableType>,
}

/// Accepted document shapes: the metadata `{"types": [...]}` object or a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Registry { types: Vec<PortableType> },
    Bare(Vec<PortableType>),
}

impl Document {
    fn into_types(self) -> Vec<PortableType> {
        match self {
            Self::Registry { types } | Self::Bare(types) => types,
        }
    }
}

impl PortableTable {
    /// Build a table; fails on the first duplicated id.
    pub fn new(types: impl IntoIterator<Item = PortableType>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for ty in types {
            let id = ty.id;
            if map.insert(id, ty).is_some() {
                return Err(Error::DuplicateTypeId(id));
            }
        }
        let table = Self { types: map };
        log::debug!("[TABLE] loaded {} portable types", table.len());

        let missing = table.missing_references();
        if !missing.is_empty() {
            log::warn!("[TABLE] {} referenced id(s) absent: {:?}", missing.len(), missing);
        }
        Ok(table)
    }

    /// Parse a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: Document = serde_json::from_str(json)?;
        Self::new(doc.into_types())
    }

    /// Parse a JSON document from a reader.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let doc: Document = serde_json::from_reader(reader)?;
        Self::new(doc.into_types())
    }

    /// Load a JSON metadata file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("[TABLE] reading {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    #[must_use]
    pub fn get(&self, id: TypeId) -> Option<&PortableType> {
        self.types.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: TypeId) -> bool {
        self.types.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Types in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &PortableType> + '_ {
        self.types.values()
    }

    /// Ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.types.keys().copied()
    }

    /// Ids referenced by some entry but not declared, ascending and deduplicated.
    ///
    /// Resolving anything that reaches one of them fails with `UnknownTypeId`.
    #[must_use]
    pub fn missing_references(&self) -> Vec<TypeId> {
        let mut missing: Vec<TypeId> = self
            .iter()
            .flat_map(|ty| ty.def.references())
            .filter(|id| !self.contains(*id))
            .collect();
        missing.sort_unstable();
        missing.dedup();
        missing
    }
}

impl<'a> IntoIterator for &'a PortableTable {
    type Item = &'a PortableType;
    type IntoIter = std::collections::btree_map::Values<'a, TypeId, PortableType>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.values()
    }
}
