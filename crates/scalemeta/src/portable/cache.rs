// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Concurrent memo cache for resolved names and definitions.
//!
//! Two maps, both insert-or-fetch: the first value stored for an id wins and
//! every racing thread gets that value back. Only successful resolutions are
//! ever inserted.

use super::type_def::TypeDef;
use super::TypeId;
use dashmap::DashMap;
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

/// Cache hit/miss statistics.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub name_hits: u64,
    pub name_misses: u64,
    pub def_hits: u64,
    pub def_misses: u64,
    /// Names currently cached.
    pub names: usize,
    /// Definitions currently cached.
    pub defs: usize,
}

#[derive(Debug, Default)]
pub(crate) struct ResolutionCache {
    names: DashMap<TypeId, Arc<str>>,
    defs: DashMap<TypeId, Arc<TypeDef>>,
    stats: RwLock<CacheStats>,
}

impl ResolutionCache {
    pub(crate) fn name(&self, id: TypeId) -> Option<Arc<str>> {
        let hit = self.names.get(&id).map(|entry| Arc::clone(entry.value()));
        if hit.is_some() {
            self.stats.write().name_hits += 1;
        }
        hit
    }

    /// Store `name` unless another thread got there first; returns the stored value.
    pub(crate) fn insert_name(&self, id: TypeId, name: Arc<str>) -> Arc<str> {
        self.stats.write().name_misses += 1;
        Arc::clone(self.names.entry(id).or_insert(name).value())
    }

    pub(crate) fn def(&self, id: TypeId) -> Option<Arc<TypeDef>> {
        let hit = self.defs.get(&id).map(|entry| Arc::clone(entry.value()));
        if hit.is_some() {
            self.stats.write().def_hits += 1;
        }
        hit
    }

    /// Store `def` unless another thread got there first; returns the stored value.
    pub(crate) fn insert_def(&self, id: TypeId, def: TypeDef) -> Arc<TypeDef> {
        self.stats.write().def_misses += 1;
        Arc::clone(self.defs.entry(id).or_insert_with(|| Arc::new(def)).value())
    }

    pub(crate) fn stats(&self) -> CacheStats {
        CacheStats {
            names: self.names.len(),
            defs: self.defs.len(),
            ..*self.stats.read()
        }
    }

    pub(crate) fn clear(&self) {
        self.names.clear();
        self.defs.clear();
        *self.stats.write() = CacheStats::default();
    }
}
