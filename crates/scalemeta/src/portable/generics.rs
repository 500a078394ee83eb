// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Structural recognisers for well-known generic wrappers.
//!
//! Each matcher is a pure predicate over one [`PortableType`]. The resolver
//! evaluates them in priority order and the first hit names the type
//! `Name<P1, P2, ..>` with every parameter resolved normally.
//!
//! | priority | matcher | shape |
//! |---|---|---|
//! | 1 | `Range` | composite, two same-typed fields typed by the single param |
//! | 2 | `RangeInclusive` | same, path ends `RangeInclusive` |
//! | 3 | `BTreeMap` | composite, params `K`, `V`, one field |
//! | 4 | `BTreeSet` | composite, one param, one field |
//! | 5 | `Option` | variant `None` / `Some(T)` |
//! | 6 | `Result` | variant `Ok(T)` / `Err(E)` |

use super::model::{Field, PortableType, TypeDefVariant, VariantArm};
use super::TypeId;
use crate::config::ResolverConfig;
use std::fmt;

/// A recognised generic instantiation, before parameter resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericShape {
    pub name: String,
    /// Parameter type ids, in declaration order.
    pub params: Vec<TypeId>,
}

/// Structural recogniser plugged into the resolver.
pub trait GenericMatcher: Send + Sync + fmt::Debug {
    /// Generic name this matcher produces.
    fn name(&self) -> &str;

    /// `Some` when `ty` has this matcher's shape.
    fn try_match(&self, ty: &PortableType, config: &ResolverConfig) -> Option<GenericShape>;
}

/// Built-in matchers in priority order.
pub fn builtin_matchers() -> Vec<Box<dyn GenericMatcher>> {
    vec![
        Box::new(RangeMatcher::new("Range")),
        Box::new(RangeMatcher::new("RangeInclusive")),
        Box::new(MapMatcher),
        Box::new(SetMatcher),
        Box::new(OptionMatcher),
        Box::new(ResultMatcher),
    ]
}

/// Every param bound to a type, or `None` if any is phantom.
fn bound_params(ty: &PortableType) -> Option<Vec<TypeId>> {
    ty.params.iter().map(|p| p.ty).collect()
}

fn composite_fields<'a>(ty: &'a PortableType, ident: &str) -> Option<&'a [Field]> {
    match &ty.def {
        TypeDefVariant::Composite { fields } if ty.ident() == Some(ident) => Some(fields),
        _ => None,
    }
}

fn variant_arms<'a>(ty: &'a PortableType, ident: &str) -> Option<&'a [VariantArm]> {
    match &ty.def {
        TypeDefVariant::Variant { variants } if ty.ident() == Some(ident) => Some(variants),
        _ => None,
    }
}

// ----------------------------------------------------------------------------
// Range / RangeInclusive
// ----------------------------------------------------------------------------

/// `struct Range<Idx> { start: Idx, end: Idx }`.
#[derive(Debug, Clone)]
pub struct RangeMatcher {
    ident: &'static str,
}

impl RangeMatcher {
    pub const fn new(ident: &'static str) -> Self {
        Self { ident }
    }
}

impl GenericMatcher for RangeMatcher {
    fn name(&self) -> &str {
        self.ident
    }

    fn try_match(&self, ty: &PortableType, config: &ResolverConfig) -> Option<GenericShape> {
        let fields = composite_fields(ty, self.ident)?;
        let [param] = ty.params.as_slice() else {
            return None;
        };
        let [start, end] = fields else {
            return None;
        };

        if start.ty != end.ty {
            return None;
        }
        let typed_by_param =
            |f: &Field| f.type_name.as_deref() == Some(param.name.as_str());
        if !typed_by_param(start) || !typed_by_param(end) {
            return None;
        }
        if config.range_field_names
            && (start.name.as_deref() != Some("start") || end.name.as_deref() != Some("end"))
        {
            return None;
        }

        Some(GenericShape {
            name: self.ident.to_string(),
            params: vec![param.ty?],
        })
    }
}

// ----------------------------------------------------------------------------
// BTreeMap / BTreeSet
// ----------------------------------------------------------------------------

/// `BTreeMap<K, V>` encoded as a single sequence-of-pairs field.
#[derive(Debug, Clone, Copy)]
pub struct MapMatcher;

impl GenericMatcher for MapMatcher {
    fn name(&self) -> &str {
        "BTreeMap"
    }

    fn try_match(&self, ty: &PortableType, _config: &ResolverConfig) -> Option<GenericShape> {
        let fields = composite_fields(ty, "BTreeMap")?;
        let params = bound_params(ty)?;
        (fields.len() == 1 && params.len() == 2).then(|| GenericShape {
            name: "BTreeMap".to_string(),
            params,
        })
    }
}

/// `BTreeSet<T>` encoded as a single sequence field.
#[derive(Debug, Clone, Copy)]
pub struct SetMatcher;

impl GenericMatcher for SetMatcher {
    fn name(&self) -> &str {
        "BTreeSet"
    }

    fn try_match(&self, ty: &PortableType, _config: &ResolverConfig) -> Option<GenericShape> {
        let fields = composite_fields(ty, "BTreeSet")?;
        let params = bound_params(ty)?;
        (fields.len() == 1 && params.len() == 1).then(|| GenericShape {
            name: "BTreeSet".to_string(),
            params,
        })
    }
}

// ----------------------------------------------------------------------------
// Option / Result
// ----------------------------------------------------------------------------

fn arm<'a>(arms: &'a [VariantArm], name: &str) -> Option<&'a VariantArm> {
    arms.iter().find(|a| a.name == name)
}

/// `enum Option<T> { None, Some(T) }`.
#[derive(Debug, Clone, Copy)]
pub struct OptionMatcher;

impl GenericMatcher for OptionMatcher {
    fn name(&self) -> &str {
        "Option"
    }

    fn try_match(&self, ty: &PortableType, _config: &ResolverConfig) -> Option<GenericShape> {
        let arms = variant_arms(ty, "Option")?;
        let params = bound_params(ty)?;
        if arms.len() != 2 || params.len() != 1 {
            return None;
        }
        let none = arm(arms, "None")?;
        let some = arm(arms, "Some")?;
        (none.fields.is_empty() && some.fields.len() == 1).then(|| GenericShape {
            name: "Option".to_string(),
            params,
        })
    }
}

/// `enum Result<T, E> { Ok(T), Err(E) }`.
#[derive(Debug, Clone, Copy)]
pub struct ResultMatcher;

impl GenericMatcher for ResultMatcher {
    fn name(&self) -> &str {
        "Result"
    }

    fn try_match(&self, ty: &PortableType, _config: &ResolverConfig) -> Option<GenericShape> {
        let arms = variant_arms(ty, "Result")?;
        let params = bound_params(ty)?;
        if arms.len() != 2 || params.len() != 2 {
            return None;
        }
        let ok = arm(arms, "Ok")?;
        let err = arm(arms, "Err")?;
        (ok.fields.len() == 1 && err.fields.len() == 1).then(|| GenericShape {
            name: "Result".to_string(),
            params,
        })
    }
}
