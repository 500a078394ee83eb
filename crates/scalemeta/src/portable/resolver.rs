// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Memoized resolution of portable type ids into [`TypeDef`]s.
//!
//! Naming is the recursive part. Every lookup walks the graph with its own
//! in-progress stack; finished names land in the shared cache. A node is
//! therefore in one of three states for a given walk:
//!
//! ```text
//!   Unvisited ──push──> InProgress ──pop + insert──> Done(name)
//!                           │
//!                           └── re-entered ──> CyclicTypeDefinition
//! ```
//!
//! Composites and variants with a path are named by that path alone, so
//! self-referential chain types (`Call` containing `Vec<Call>`) terminate.
//! Cycles through anonymous or generic nodes have no finite name.

use super::cache::{CacheStats, ResolutionCache};
use super::generics::{builtin_matchers, GenericMatcher, GenericShape};
use super::model::{Field, PortableType, TypeDefVariant};
use super::naming;
use super::table::PortableTable;
use super::type_def::{GenericInstance, Member, TypeDef, TypeDefInfo, TypeRef, VariantDef};
use super::TypeId;
use crate::config::ResolverConfig;
use crate::error::{Error, Result};
use crate::types::{CodecKind, Registry};
use std::fmt;
use std::sync::Arc;

/// Per-walk state of a node.
enum VisitState {
    Unvisited,
    InProgress,
    Done(Arc<str>),
}

/// Resolves ids of one [`PortableTable`] against an injected codec [`Registry`].
///
/// `Send + Sync`; share it behind an `Arc` and call from any thread.
pub struct PortableRegistry {
    table: PortableTable,
    codecs: Arc<dyn Registry>,
    config: ResolverConfig,
    matchers: Vec<Box<dyn GenericMatcher>>,
    cache: ResolutionCache,
}

impl PortableRegistry {
    /// Registry with the default config and the built-in generic matchers.
    pub fn new(table: PortableTable, codecs: Arc<dyn Registry>) -> Self {
        Self {
            table,
            codecs,
            config: ResolverConfig::default(),
            matchers: builtin_matchers(),
            cache: ResolutionCache::default(),
        }
    }

    /// Replace the config. Drops anything already cached.
    #[must_use]
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self.cache.clear();
        self
    }

    /// Append a matcher after the existing ones. Drops anything already cached.
    #[must_use]
    pub fn with_matcher(mut self, matcher: Box<dyn GenericMatcher>) -> Self {
        self.matchers.push(matcher);
        self.cache.clear();
        self
    }

    pub fn table(&self) -> &PortableTable {
        &self.table
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Canonical name of `id` (`Range<u32>`, `Vec<u8>`, `sp_core::crypto::AccountId32`).
    pub fn type_name(&self, id: TypeId) -> Result<Arc<str>> {
        self.name_of(id, &mut Vec::new())
    }

    /// Fully resolved definition of `id`.
    pub fn get_type_def(&self, id: TypeId) -> Result<Arc<TypeDef>> {
        if let Some(def) = self.cache.def(id) {
            log::trace!("[RESOLVER] cache hit #{}", id);
            return Ok(def);
        }

        let ty = self.lookup(id)?;
        let type_name = self.type_name(id)?;
        let generic = match self.match_generic(ty) {
            Some(shape) => Some(GenericInstance {
                params: self.refs(&shape.params)?,
                name: shape.name,
            }),
            None => None,
        };
        let info = self.build_info(&ty.def)?;
        let codec = self.codec_for(ty);

        let def = TypeDef {
            id,
            type_name,
            path: ty.path.clone(),
            generic,
            info,
            codec,
        };
        log::debug!("[RESOLVER] [OK] #{} -> {}", id, def.type_name);
        Ok(self.cache.insert_def(id, def))
    }

    /// Every type of the table, in ascending id order. Stops at the first failure.
    pub fn resolve_all(&self) -> Result<Vec<Arc<TypeDef>>> {
        self.table.ids().map(|id| self.get_type_def(id)).collect()
    }

    // ------------------------------------------------------------------------
    // Naming
    // ------------------------------------------------------------------------

    fn lookup(&self, id: TypeId) -> Result<&PortableType> {
        self.table.get(id).ok_or(Error::UnknownTypeId(id))
    }

    fn visit_state(&self, id: TypeId, stack: &[TypeId]) -> VisitState {
        if let Some(name) = self.cache.name(id) {
            VisitState::Done(name)
        } else if stack.contains(&id) {
            VisitState::InProgress
        } else {
            VisitState::Unvisited
        }
    }

    fn name_of(&self, id: TypeId, stack: &mut Vec<TypeId>) -> Result<Arc<str>> {
        match self.visit_state(id, stack) {
            VisitState::Done(name) => return Ok(name),
            VisitState::InProgress => {
                log::warn!("[RESOLVER] cyclic type definition at #{} via {:?}", id, stack);
                return Err(Error::CyclicTypeDefinition {
                    id,
                    chain: stack.clone(),
                });
            }
            VisitState::Unvisited => {}
        }

        if stack.len() >= self.config.max_depth {
            log::warn!(
                "[RESOLVER] depth limit {} exceeded at #{}",
                self.config.max_depth,
                id
            );
            return Err(Error::DepthLimitExceeded {
                id,
                limit: self.config.max_depth,
            });
        }

        let ty = self.lookup(id)?;
        stack.push(id);
        let computed = self.compute_name(ty, stack);
        stack.pop();

        let name = computed?;
        if name.len() > self.config.max_name_len {
            log::warn!(
                "[RESOLVER] name of #{} is {} bytes, limit {}",
                id,
                name.len(),
                self.config.max_name_len
            );
            return Err(Error::NameTooLong {
                id,
                limit: self.config.max_name_len,
            });
        }
        log::trace!("[RESOLVER] #{} ({}) named {}", id, ty.def.kind(), name);
        Ok(self.cache.insert_name(id, Arc::from(name)))
    }

    fn compute_name(&self, ty: &PortableType, stack: &mut Vec<TypeId>) -> Result<String> {
        if let Some(shape) = self.match_generic(ty) {
            let params = self.names(&shape.params, stack)?;
            return Ok(naming::generic(&shape.name, &params));
        }

        let name = match &ty.def {
            TypeDefVariant::Primitive(kind) => kind.name().to_string(),
            TypeDefVariant::Sequence { element } => {
                naming::sequence(&self.name_of(*element, stack)?)
            }
            TypeDefVariant::Array { element, len } => {
                naming::array(&self.name_of(*element, stack)?, *len)
            }
            TypeDefVariant::Tuple(members) => naming::tuple(&self.names(members, stack)?),
            TypeDefVariant::Compact { inner } => naming::compact(&self.name_of(*inner, stack)?),
            TypeDefVariant::BitSequence { .. } => naming::BIT_SEQUENCE.to_string(),
            TypeDefVariant::Composite { fields } => match naming::path(&ty.path) {
                Some(path) => path,
                None => naming::fields(&self.field_names(fields, stack)?),
            },
            TypeDefVariant::Variant { variants } => match naming::path(&ty.path) {
                Some(path) => path,
                None => {
                    let arms = variants
                        .iter()
                        .map(|arm| Ok((arm.name.as_str(), self.field_names(&arm.fields, stack)?)))
                        .collect::<Result<Vec<_>>>()?;
                    naming::variant(&arms)
                }
            },
        };
        Ok(name)
    }

    fn names(&self, ids: &[TypeId], stack: &mut Vec<TypeId>) -> Result<Vec<Arc<str>>> {
        ids.iter().map(|id| self.name_of(*id, stack)).collect()
    }

    fn field_names<'f>(
        &self,
        fields: &'f [Field],
        stack: &mut Vec<TypeId>,
    ) -> Result<Vec<(Option<&'f str>, Arc<str>)>> {
        fields
            .iter()
            .map(|f| Ok((f.name.as_deref(), self.name_of(f.ty, stack)?)))
            .collect()
    }

    fn match_generic(&self, ty: &PortableType) -> Option<GenericShape> {
        if !matches!(
            ty.def,
            TypeDefVariant::Composite { .. } | TypeDefVariant::Variant { .. }
        ) {
            return None;
        }
        self.matchers.iter().find_map(|matcher| {
            let shape = matcher.try_match(ty, &self.config)?;
            log::trace!("[RESOLVER] #{} matched {}", ty.id, matcher.name());
            Some(shape)
        })
    }

    // ------------------------------------------------------------------------
    // Definitions
    // ------------------------------------------------------------------------

    fn type_ref(&self, id: TypeId) -> Result<TypeRef> {
        Ok(TypeRef {
            id,
            type_name: self.type_name(id)?,
        })
    }

    fn refs(&self, ids: &[TypeId]) -> Result<Vec<TypeRef>> {
        ids.iter().map(|id| self.type_ref(*id)).collect()
    }

    fn members(&self, fields: &[Field]) -> Result<Vec<Member>> {
        fields
            .iter()
            .map(|f| {
                Ok(Member {
                    name: f.name.clone(),
                    ty: self.type_ref(f.ty)?,
                    type_name: f.type_name.clone(),
                })
            })
            .collect()
    }

    fn build_info(&self, def: &TypeDefVariant) -> Result<TypeDefInfo> {
        let info = match def {
            TypeDefVariant::Primitive(kind) => TypeDefInfo::Primitive(*kind),
            TypeDefVariant::Composite { fields } => TypeDefInfo::Composite(self.members(fields)?),
            TypeDefVariant::Variant { variants } => TypeDefInfo::Variant(
                variants
                    .iter()
                    .map(|arm| {
                        Ok(VariantDef {
                            name: arm.name.clone(),
                            index: arm.index,
                            fields: self.members(&arm.fields)?,
                        })
                    })
                    .collect::<Result<_>>()?,
            ),
            TypeDefVariant::Sequence { element } => TypeDefInfo::Sequence(self.type_ref(*element)?),
            TypeDefVariant::Array { element, len } => TypeDefInfo::Array {
                element: self.type_ref(*element)?,
                len: *len,
            },
            TypeDefVariant::Tuple(members) => TypeDefInfo::Tuple(self.refs(members)?),
            TypeDefVariant::Compact { inner } => TypeDefInfo::Compact(self.type_ref(*inner)?),
            TypeDefVariant::BitSequence { store, order } => TypeDefInfo::BitSequence {
                store: self.type_ref(*store)?,
                order: self.type_ref(*order)?,
            },
        };
        Ok(info)
    }

    /// Primitive leaves by name, compact wrappers as `Compact`, named types by
    /// their last path segment (`pallet::vote::Vote` -> `Vote`).
    fn codec_for(&self, ty: &PortableType) -> Option<CodecKind> {
        match &ty.def {
            TypeDefVariant::Primitive(kind) => self.codecs.codec_for(kind.name()),
            TypeDefVariant::Compact { .. } => self.codecs.codec_for("Compact"),
            _ => ty.ident().and_then(|ident| self.codecs.codec_for(ident)),
        }
    }
}

impl fmt::Debug for PortableRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortableRegistry")
            .field("types", &self.table.len())
            .field("config", &self.config)
            .field(
                "matchers",
                &self.matchers.iter().map(|m| m.name()).collect::<Vec<_>>(),
            )
            .field("cache", &self.cache.stats())
            .finish()
    }
}
